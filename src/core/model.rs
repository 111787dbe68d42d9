// Copyright 2026 fstabgen Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::OnceLock;

use regex_lite::Regex;
use serde_yaml::{Mapping, Value};
use thiserror::Error;

use crate::defs;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config: {0}")]
    Malformed(&'static str),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{src}: missing required field '{field}'")]
    MissingField { src: String, field: &'static str },
    #[error("{src}: nfs mount is missing 'export' field")]
    MissingExportForNfs { src: String },
    #[error("{src}: field '{field}' must be a {expected}")]
    WrongType {
        src: String,
        field: &'static str,
        expected: &'static str,
    },
    #[error("{src}: mount point '{mount_point}' must be an absolute path")]
    InvalidMountPoint { src: String, mount_point: String },
}

/// One mount description, validated and ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    pub source: String,
    pub mount_point: String,
    pub fs_type: String,
    pub export_path: Option<String>,
    pub options: Vec<String>,
    pub root_reserve: Option<String>,
    pub dump: u8,
    pub pass: u8,
}

#[derive(Debug, Default)]
pub struct BuildReport {
    pub entries: Vec<MountEntry>,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<String>,
}

static SOURCE_SHAPE_REGEX: OnceLock<Regex> = OnceLock::new();

// Absolute path, dotted-quad IPv4, or a LABEL=/UUID=-style tag.
// Advisory only: other shapes are accepted with a warning.
fn source_shape_is_known(source: &str) -> bool {
    let re = SOURCE_SHAPE_REGEX.get_or_init(|| {
        Regex::new(
            r"^(/[^:]+|((25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.){3}(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])|(LABEL|UUID|PARTUUID|PARTLABEL)=[\w-]+)$",
        )
        .expect("invalid source shape pattern")
    });
    re.is_match(source)
}

/// Fixed per-type dump/pass values. Journaled block filesystems get
/// fsck ordering 2, everything else is excluded from dump and fsck.
fn dump_pass_for(fs_type: &str) -> (u8, u8) {
    if defs::FSCK_ORDERED_TYPES.contains(&fs_type) {
        (0, 2)
    } else {
        (0, 0)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn string_field(
    details: &Mapping,
    source: &str,
    field: &'static str,
) -> Result<Option<String>, ValidationError> {
    match details.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => match scalar_to_string(value) {
            Some(s) if !s.is_empty() => Ok(Some(s)),
            Some(_) => Ok(None),
            None => Err(ValidationError::WrongType {
                src: source.to_string(),
                field,
                expected: "scalar",
            }),
        },
    }
}

fn options_field(details: &Mapping, source: &str) -> Result<Vec<String>, ValidationError> {
    match details.get("options") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Sequence(items)) => {
            let mut options = Vec::with_capacity(items.len());
            for item in items {
                match scalar_to_string(item) {
                    Some(s) => options.push(s),
                    None => {
                        return Err(ValidationError::WrongType {
                            src: source.to_string(),
                            field: "options",
                            expected: "sequence of scalars",
                        });
                    }
                }
            }
            Ok(options)
        }
        Some(_) => Err(ValidationError::WrongType {
            src: source.to_string(),
            field: "options",
            expected: "sequence of scalars",
        }),
    }
}

fn build_entry(source: &str, details: &Mapping) -> Result<MountEntry, ValidationError> {
    let mount_point = string_field(details, source, "mount")?.ok_or_else(|| {
        ValidationError::MissingField {
            src: source.to_string(),
            field: "mount",
        }
    })?;

    if !mount_point.starts_with('/') {
        return Err(ValidationError::InvalidMountPoint {
            src: source.to_string(),
            mount_point,
        });
    }

    let fs_type = string_field(details, source, "type")?.ok_or_else(|| {
        ValidationError::MissingField {
            src: source.to_string(),
            field: "type",
        }
    })?;

    let export_path = string_field(details, source, "export")?;

    if fs_type == "nfs" && export_path.is_none() {
        return Err(ValidationError::MissingExportForNfs {
            src: source.to_string(),
        });
    }

    let options = options_field(details, source)?;
    let root_reserve = string_field(details, source, "root-reserve")?;
    let (dump, pass) = dump_pass_for(&fs_type);

    Ok(MountEntry {
        source: source.to_string(),
        mount_point,
        fs_type,
        export_path,
        options,
        root_reserve,
        dump,
        pass,
    })
}

/// Turn the generic YAML tree into typed mount entries. Per-entry
/// problems are collected, not fatal; an unusable document shell is.
pub fn build(tree: &Value) -> Result<BuildReport, ConfigError> {
    let root = tree
        .as_mapping()
        .ok_or(ConfigError::Malformed("document root is not a mapping"))?;

    let fstab = root
        .get("fstab")
        .ok_or(ConfigError::Malformed("missing top-level 'fstab' key"))?
        .as_mapping()
        .ok_or(ConfigError::Malformed("'fstab' is not a mapping"))?;

    let mut report = BuildReport::default();

    for (key, value) in fstab {
        let source = match scalar_to_string(key) {
            Some(s) if !s.is_empty() => s,
            _ => {
                report.errors.push(ValidationError::WrongType {
                    src: format!("{:?}", key),
                    field: "source",
                    expected: "non-empty string",
                });
                continue;
            }
        };

        let details = match value {
            Value::Mapping(m) => m,
            _ => {
                report.errors.push(ValidationError::WrongType {
                    src: source,
                    field: "entry",
                    expected: "mapping",
                });
                continue;
            }
        };

        if !source_shape_is_known(&source) {
            report.warnings.push(format!(
                "{}: source is not a path, IPv4 address, or filesystem tag; using it as-is",
                source
            ));
        }

        match build_entry(&source, details) {
            Ok(entry) => {
                if !defs::KNOWN_FS_TYPES.contains(&entry.fs_type.as_str()) {
                    report.warnings.push(format!(
                        "{}: unknown filesystem type '{}'; using it as-is",
                        source, entry.fs_type
                    ));
                }
                report.entries.push(entry);
            }
            Err(e) => report.errors.push(e),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn builds_nfs_entry_with_export() {
        let report = build(&tree(
            "fstab:\n  192.168.4.5:\n    mount: /home\n    export: /var/nfs/home\n    type: nfs\n    options:\n      - noexec\n      - nosuid\n",
        ))
        .unwrap();

        assert!(report.errors.is_empty());
        assert_eq!(report.entries.len(), 1);

        let entry = &report.entries[0];
        assert_eq!(entry.source, "192.168.4.5");
        assert_eq!(entry.mount_point, "/home");
        assert_eq!(entry.fs_type, "nfs");
        assert_eq!(entry.export_path.as_deref(), Some("/var/nfs/home"));
        assert_eq!(entry.options, vec!["noexec", "nosuid"]);
        assert_eq!((entry.dump, entry.pass), (0, 0));
    }

    #[test]
    fn missing_mount_is_collected_and_siblings_survive() {
        let report = build(&tree(
            "fstab:\n  /dev/sda1:\n    type: ext4\n  /dev/sda2:\n    mount: /data\n    type: xfs\n",
        ))
        .unwrap();

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].source, "/dev/sda2");
        assert_eq!(
            report.errors,
            vec![ValidationError::MissingField {
                src: "/dev/sda1".into(),
                field: "mount",
            }]
        );
    }

    #[test]
    fn nfs_without_export_is_rejected() {
        let report = build(&tree(
            "fstab:\n  192.168.4.5:\n    mount: /home\n    type: nfs\n",
        ))
        .unwrap();

        assert!(report.entries.is_empty());
        assert_eq!(
            report.errors,
            vec![ValidationError::MissingExportForNfs {
                src: "192.168.4.5".into(),
            }]
        );
    }

    #[test]
    fn relative_mount_point_is_rejected() {
        let report = build(&tree(
            "fstab:\n  /dev/sda1:\n    mount: data\n    type: ext4\n",
        ))
        .unwrap();

        assert!(report.entries.is_empty());
        assert!(matches!(
            report.errors[0],
            ValidationError::InvalidMountPoint { .. }
        ));
    }

    #[test]
    fn missing_fstab_key_is_malformed() {
        assert!(matches!(
            build(&tree("mounts: {}")),
            Err(ConfigError::Malformed(_))
        ));
        assert!(matches!(
            build(&tree("- a\n- b")),
            Err(ConfigError::Malformed(_))
        ));
    }

    #[test]
    fn insertion_order_is_preserved() {
        let report = build(&tree(
            "fstab:\n  /dev/sdb1:\n    mount: /b\n    type: ext4\n  /dev/sda1:\n    mount: /a\n    type: ext4\n",
        ))
        .unwrap();

        let sources: Vec<_> = report.entries.iter().map(|e| e.source.as_str()).collect();
        assert_eq!(sources, vec!["/dev/sdb1", "/dev/sda1"]);
    }

    #[test]
    fn scalar_options_are_a_type_error() {
        let report = build(&tree(
            "fstab:\n  /dev/sda1:\n    mount: /a\n    type: ext4\n    options: rw\n",
        ))
        .unwrap();

        assert!(report.entries.is_empty());
        assert!(matches!(
            report.errors[0],
            ValidationError::WrongType { field: "options", .. }
        ));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let report = build(&tree(
            "fstab:\n  /dev/sda1:\n    mount: /a\n    type: ext4\n    comment: main disk\n",
        ))
        .unwrap();

        assert!(report.errors.is_empty());
        assert_eq!(report.entries.len(), 1);
    }

    #[test]
    fn odd_source_shape_warns_but_builds() {
        let report = build(&tree(
            "fstab:\n  mydisk:\n    mount: /a\n    type: ext4\n",
        ))
        .unwrap();

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn uuid_tag_source_is_a_known_shape() {
        let report = build(&tree(
            "fstab:\n  UUID=0a3407de-014b-458b-b5c1-848e92a327a3:\n    mount: /a\n    type: ext4\n",
        ))
        .unwrap();

        assert_eq!(report.entries.len(), 1);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn ext_family_gets_fsck_ordering() {
        let report = build(&tree(
            "fstab:\n  /dev/sda1:\n    mount: /a\n    type: ext4\n  /dev/sda2:\n    mount: /b\n    type: tmpfs\n",
        ))
        .unwrap();

        assert_eq!((report.entries[0].dump, report.entries[0].pass), (0, 2));
        assert_eq!((report.entries[1].dump, report.entries[1].pass), (0, 0));
    }
}
