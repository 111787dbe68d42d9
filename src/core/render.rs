// Copyright 2026 fstabgen Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::{core::model::MountEntry, defs};

/// The fully rendered table: header block plus one line per entry, in
/// the order the entries were read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    pub lines: Vec<String>,
    pub warnings: Vec<String>,
}

impl RenderedTable {
    pub fn text(&self) -> String {
        let mut out = String::from(defs::FSTAB_HEADER);
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}

fn device_field(entry: &MountEntry) -> String {
    match (&entry.fs_type[..], &entry.export_path) {
        ("nfs", Some(export)) => format!("{}:{}", entry.source, export),
        _ => entry.source.clone(),
    }
}

fn options_field(entry: &MountEntry, apply_root_reserve: bool) -> String {
    let mut options = entry.options.clone();

    if apply_root_reserve
        && defs::RESERVE_CAPABLE_TYPES.contains(&entry.fs_type.as_str())
    {
        if let Some(reserve) = &entry.root_reserve {
            options.push(format!("root-reserve={}", reserve));
        }
    }

    if options.is_empty() {
        "defaults".to_string()
    } else {
        options.join(",")
    }
}

/// Render one entry as a six-field fstab line. Byte-identical output
/// for equal inputs.
pub fn render(entry: &MountEntry, apply_root_reserve: bool) -> String {
    format!(
        "{} {} {} {} {} {}",
        device_field(entry),
        entry.mount_point,
        entry.fs_type,
        options_field(entry, apply_root_reserve),
        entry.dump,
        entry.pass
    )
}

pub fn render_all(entries: &[MountEntry], apply_root_reserve: bool) -> RenderedTable {
    let mut warnings = Vec::new();

    for entry in entries {
        if apply_root_reserve
            && entry.root_reserve.is_some()
            && !defs::RESERVE_CAPABLE_TYPES.contains(&entry.fs_type.as_str())
        {
            warnings.push(format!(
                "{}: root-reserve requested but '{}' does not support it; ignored",
                entry.source, entry.fs_type
            ));
        }
    }

    let lines = entries
        .iter()
        .map(|entry| render(entry, apply_root_reserve))
        .collect();

    RenderedTable { lines, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> MountEntry {
        MountEntry {
            source: "/dev/sda1".into(),
            mount_point: "/data".into(),
            fs_type: "ext4".into(),
            export_path: None,
            options: Vec::new(),
            root_reserve: None,
            dump: 0,
            pass: 2,
        }
    }

    #[test]
    fn empty_options_render_as_defaults() {
        assert_eq!(render(&entry(), false), "/dev/sda1 /data ext4 defaults 0 2");
    }

    #[test]
    fn nfs_device_field_joins_source_and_export() {
        let entry = MountEntry {
            source: "192.168.4.5".into(),
            mount_point: "/home".into(),
            fs_type: "nfs".into(),
            export_path: Some("/var/nfs/home".into()),
            options: vec!["noexec".into(), "nosuid".into()],
            root_reserve: None,
            dump: 0,
            pass: 0,
        };

        let line = render(&entry, false);
        let fields: Vec<_> = line.split_whitespace().collect();
        assert_eq!(fields[0], "192.168.4.5:/var/nfs/home");
        assert_eq!(fields[3], "noexec,nosuid");
        assert_eq!(line, "192.168.4.5:/var/nfs/home /home nfs noexec,nosuid 0 0");
    }

    #[test]
    fn root_reserve_appended_for_ext_family() {
        let entry = MountEntry {
            options: vec!["rw".into()],
            root_reserve: Some("10%".into()),
            ..entry()
        };

        assert_eq!(
            render(&entry, true),
            "/dev/sda1 /data ext4 rw,root-reserve=10% 0 2"
        );
        // not applied when the flag is off
        assert_eq!(render(&entry, false), "/dev/sda1 /data ext4 rw 0 2");
    }

    #[test]
    fn root_reserve_on_non_capable_type_warns_and_is_dropped() {
        let entry = MountEntry {
            fs_type: "xfs".into(),
            root_reserve: Some("5%".into()),
            ..entry()
        };

        let table = render_all(std::slice::from_ref(&entry), true);
        assert_eq!(table.lines, vec!["/dev/sda1 /data xfs defaults 0 2"]);
        assert_eq!(table.warnings.len(), 1);
        assert!(table.warnings[0].contains("does not support"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let entries = vec![entry()];
        let a = render_all(&entries, true).text();
        let b = render_all(&entries, true).text();
        assert_eq!(a, b);
    }

    #[test]
    fn table_text_starts_with_header() {
        let table = render_all(&[entry()], false);
        assert!(table.text().starts_with("# /etc/fstab"));
        assert!(table.text().ends_with("defaults 0 2\n"));
    }
}
