// Copyright 2026 fstabgen Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::{Context, Result};

/// Write `content` to a temp file in the same directory as `path`, then
/// rename it into place. Readers of `path` see either the old bytes or
/// the new bytes, never a partial write.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, content: C) -> Result<()> {
    let path = path.as_ref();
    let dir = path.parent().unwrap_or_else(|| Path::new("."));

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let pid = std::process::id();
    let temp_file = dir.join(format!(".{}_{}.tmp", pid, now));

    {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_file)
            .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
        file.write_all(content.as_ref())
            .context("failed to write temp file")?;
        file.sync_all().context("failed to sync temp file")?;
    }

    if let Err(e) = fs::rename(&temp_file, path) {
        let _ = fs::remove_file(&temp_file);
        return Err(e).with_context(|| format!("failed to rename temp file over {}", path.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_write_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("fstab");
        fs::write(&target, "old").unwrap();

        atomic_write(&target, "new contents\n").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "new contents\n");
        // no temp files left behind
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn atomic_write_creates_missing_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("fstab");

        atomic_write(&target, "fresh\n").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "fresh\n");
    }
}
