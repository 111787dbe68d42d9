// Copyright 2026 fstabgen Developers
// SPDX-License-Identifier: GPL-3.0-or-later
mod conf;
mod core;
mod defs;
mod utils;

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use crate::{
    conf::{cli::Cli, config::Settings},
    core::{validate::FindmntValidator, ApplyController, ApplyError, ApplyOutcome},
};

fn load_settings(cli: &Cli) -> Result<Settings> {
    if let Some(config_path) = &cli.config {
        return Settings::from_file(config_path).with_context(|| {
            format!(
                "Failed to load settings from custom path: {}",
                config_path.display()
            )
        });
    }

    match Settings::load_default() {
        Ok(settings) => Ok(settings),
        Err(e) => {
            let is_not_found = e
                .root_cause()
                .downcast_ref::<std::io::Error>()
                .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                .unwrap_or(false);

            if is_not_found {
                Ok(Settings::default())
            } else {
                Err(e).context(format!(
                    "Failed to load default settings from {}",
                    defs::CONFIG_FILE
                ))
            }
        }
    }
}

fn exit_code_for(error: &ApplyError) -> i32 {
    match error {
        ApplyError::ValidationFailedRolledBack { .. } => 2,
        ApplyError::RollbackFailed { .. } => 3,
        _ => 1,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = load_settings(&cli)?;

    settings.merge_with_cli(
        cli.yaml_file.clone(),
        cli.fstab_file.clone(),
        cli.dry_run,
        cli.root_reserve,
    );

    utils::init_logging(cli.verbose).context("Failed to initialize logging")?;

    tracing::debug!(
        "yaml: {}, fstab: {}, backups: {}",
        settings.yaml_file.display(),
        settings.fstab_file.display(),
        settings.backup_dir.display()
    );

    let yaml_text = fs::read_to_string(&settings.yaml_file).with_context(|| {
        format!(
            "Failed to read mount description: {}",
            settings.yaml_file.display()
        )
    })?;

    let tree: serde_yaml::Value = serde_yaml::from_str(&yaml_text).with_context(|| {
        format!(
            "Failed to parse mount description: {}",
            settings.yaml_file.display()
        )
    })?;

    let controller = ApplyController::new(settings, Box::new(FindmntValidator));

    match controller.run(&tree) {
        Ok(ApplyOutcome::DryRun(text)) => {
            print!("{}", text);
        }
        Ok(ApplyOutcome::Committed { backup, .. }) => {
            if let Some(backup) = backup {
                tracing::info!("pre-run snapshot retained at {}", backup.display());
            }
            tracing::info!(">> Mount table committed.");
        }
        Err(error) => {
            tracing::error!("{}", error);

            if let ApplyError::NoValidEntries { errors } = &error {
                for e in errors {
                    tracing::error!("  {}", e);
                }
            }

            match error.backup_file() {
                Some(backup) => tracing::error!(
                    "authoritative pre-run snapshot: {}",
                    backup.display()
                ),
                None => tracing::error!("no pre-run snapshot exists for this run"),
            }

            std::process::exit(exit_code_for(&error));
        }
    }

    Ok(())
}
