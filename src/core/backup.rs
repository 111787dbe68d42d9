// Copyright 2026 fstabgen Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Local;
use thiserror::Error;

use crate::defs;

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("no backup found in {dir}")]
    NoBackupFound { dir: PathBuf },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Snapshots the target file into a backup directory before mutation
/// and restores the most recent snapshot on rollback. Backups are
/// never pruned.
#[derive(Debug, Clone)]
pub struct BackupManager {
    dir: PathBuf,
}

impl BackupManager {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Copy `target` into the backup directory under a second-resolution
    /// timestamped name. A missing target is not an error: there is
    /// nothing to protect, so no snapshot is taken.
    pub fn snapshot(&self, target: &Path) -> Result<Option<PathBuf>, BackupError> {
        if !target.exists() {
            tracing::debug!("no existing file at {}, skipping backup", target.display());
            return Ok(None);
        }

        fs::create_dir_all(&self.dir)?;

        let stamp = Local::now().format(defs::BACKUP_TIMESTAMP_FORMAT);
        let backup_file = self.dir.join(format!(
            "{}{}{}",
            defs::BACKUP_PREFIX,
            stamp,
            defs::BACKUP_SUFFIX
        ));

        fs::copy(target, &backup_file)?;

        tracing::info!("backup created: {}", backup_file.display());

        Ok(Some(backup_file))
    }

    /// Copy the most recent snapshot back over `target`. The naming
    /// scheme makes lexicographic order equal chronological order.
    pub fn restore_latest(&self, target: &Path) -> Result<PathBuf, BackupError> {
        let latest = self.latest()?.ok_or_else(|| BackupError::NoBackupFound {
            dir: self.dir.clone(),
        })?;

        fs::copy(&latest, target)?;

        tracing::info!("restored {} over {}", latest.display(), target.display());

        Ok(latest)
    }

    fn latest(&self) -> Result<Option<PathBuf>, BackupError> {
        if !self.dir.exists() {
            return Ok(None);
        }

        let mut latest: Option<PathBuf> = None;

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();

            if !name.starts_with(defs::BACKUP_PREFIX) || !name.ends_with(defs::BACKUP_SUFFIX) {
                continue;
            }

            let path = entry.path();
            if latest
                .as_ref()
                .map(|current| path.file_name() > current.file_name())
                .unwrap_or(true)
            {
                latest = Some(path);
            }
        }

        Ok(latest)
    }
}
