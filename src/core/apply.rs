// Copyright 2026 fstabgen Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{fs, path::PathBuf};

use serde_yaml::Value;
use thiserror::Error;

use crate::{
    conf::config::Settings,
    core::{
        backup::{BackupError, BackupManager},
        model::{self, ConfigError, ValidationError},
        render,
        validate::{Validator, Verdict},
    },
    utils,
};

#[derive(Debug)]
pub enum ApplyOutcome {
    /// Rendered text only; the filesystem was never touched.
    DryRun(String),
    Committed {
        backup: Option<PathBuf>,
        warnings: Vec<String>,
    },
}

#[derive(Debug, Error)]
pub enum ApplyError {
    #[error(transparent)]
    Malformed(#[from] ConfigError),
    #[error("no valid entries in the mount description ({} rejected)", .errors.len())]
    NoValidEntries { errors: Vec<ValidationError> },
    #[error("could not back up the current file, refusing to overwrite it: {source}")]
    BackupFailed {
        #[source]
        source: BackupError,
    },
    #[error("failed to write the new table: {reason}")]
    WriteFailed {
        reason: String,
        backup: Option<PathBuf>,
    },
    #[error("validation of the new table failed, previous contents restored: {diagnostic}")]
    ValidationFailedRolledBack {
        diagnostic: String,
        backup: Option<PathBuf>,
    },
    #[error(
        "validation failed AND restoring the previous contents failed ({restore_error}); \
         the target file is in an indeterminate state: {diagnostic}"
    )]
    RollbackFailed {
        diagnostic: String,
        #[source]
        restore_error: BackupError,
        backup: Option<PathBuf>,
    },
}

impl ApplyError {
    /// The authoritative pre-run snapshot, when one was taken.
    pub fn backup_file(&self) -> Option<&PathBuf> {
        match self {
            ApplyError::WriteFailed { backup, .. }
            | ApplyError::ValidationFailedRolledBack { backup, .. }
            | ApplyError::RollbackFailed { backup, .. } => backup.as_ref(),
            _ => None,
        }
    }
}

/// Owns the target-file mutation: build -> render -> (dry-run exit) ->
/// snapshot -> atomic write -> external validation -> commit, with
/// rollback to the snapshot on validation failure. Steps run in this
/// order, always; each failure aborts at its own transition.
pub struct ApplyController {
    settings: Settings,
    backup: BackupManager,
    validator: Box<dyn Validator>,
}

impl ApplyController {
    pub fn new(settings: Settings, validator: Box<dyn Validator>) -> Self {
        let backup = BackupManager::new(settings.backup_dir.clone());
        Self {
            settings,
            backup,
            validator,
        }
    }

    pub fn run(&self, tree: &Value) -> Result<ApplyOutcome, ApplyError> {
        let report = model::build(tree)?;

        for error in &report.errors {
            tracing::warn!("skipping entry: {}", error);
        }

        if report.entries.is_empty() {
            return Err(ApplyError::NoValidEntries {
                errors: report.errors,
            });
        }

        let table = render::render_all(&report.entries, self.settings.root_reserve);

        let mut warnings = report.warnings;
        warnings.extend(table.warnings.iter().cloned());
        for warning in &warnings {
            tracing::warn!("{}", warning);
        }

        let text = table.text();

        if self.settings.dry_run {
            tracing::info!("dry run, no files were changed");
            return Ok(ApplyOutcome::DryRun(text));
        }

        let target = &self.settings.fstab_file;

        let backup = self
            .backup
            .snapshot(target)
            .map_err(|source| ApplyError::BackupFailed { source })?;

        tracing::info!("writing mount table to {}", target.display());

        utils::atomic_write(target, &text).map_err(|e| ApplyError::WriteFailed {
            reason: format!("{:#}", e),
            backup: backup.clone(),
        })?;

        match self.validator.check(target) {
            Verdict::Pass => {
                tracing::info!("mount table validated successfully");
                Ok(ApplyOutcome::Committed { backup, warnings })
            }
            Verdict::Fail { diagnostic } => {
                tracing::error!("validation failed, rolling back: {}", diagnostic);
                self.rollback(diagnostic, backup)
            }
        }
    }

    /// Put the target back into its pre-run state: restore the snapshot,
    /// or remove the file if there was nothing there before.
    fn rollback(
        &self,
        diagnostic: String,
        backup: Option<PathBuf>,
    ) -> Result<ApplyOutcome, ApplyError> {
        let target = &self.settings.fstab_file;

        let restore_result = match &backup {
            Some(_) => self.backup.restore_latest(target).map(|_| ()),
            None => fs::remove_file(target).map_err(BackupError::Io),
        };

        match restore_result {
            Ok(()) => Err(ApplyError::ValidationFailedRolledBack { diagnostic, backup }),
            Err(restore_error) => Err(ApplyError::RollbackFailed {
                diagnostic,
                restore_error,
                backup,
            }),
        }
    }
}
