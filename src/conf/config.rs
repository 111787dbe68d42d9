// Copyright 2026 fstabgen Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::defs;

/// Settings resolved from the optional TOML file plus CLI overrides.
/// Passed explicitly into the apply controller; there is no global
/// mutable configuration.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_yaml_file")]
    pub yaml_file: PathBuf,
    #[serde(default = "default_fstab_file")]
    pub fstab_file: PathBuf,
    #[serde(default = "default_backup_dir")]
    pub backup_dir: PathBuf,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default)]
    pub root_reserve: bool,
}

fn default_yaml_file() -> PathBuf {
    PathBuf::from(defs::DEFAULT_YAML_FILE)
}

fn default_fstab_file() -> PathBuf {
    PathBuf::from(defs::DEFAULT_FSTAB_FILE)
}

fn default_backup_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(defs::DEFAULT_BACKUP_SUBDIR)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            yaml_file: default_yaml_file(),
            fstab_file: default_fstab_file(),
            backup_dir: default_backup_dir(),
            dry_run: false,
            root_reserve: false,
        }
    }
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).context("failed to read settings file")?;

        let settings: Settings =
            toml::from_str(&content).context("failed to parse settings file")?;

        Ok(settings)
    }

    pub fn load_default() -> Result<Self> {
        Self::from_file(defs::CONFIG_FILE)
    }

    pub fn merge_with_cli(
        &mut self,
        yaml_file: Option<PathBuf>,
        fstab_file: Option<PathBuf>,
        dry_run: bool,
        root_reserve: bool,
    ) {
        if let Some(path) = yaml_file {
            self.yaml_file = path;
        }

        if let Some(path) = fstab_file {
            self.fstab_file = path;
        }

        if dry_run {
            self.dry_run = true;
        }

        if root_reserve {
            self.root_reserve = true;
        }
    }
}
