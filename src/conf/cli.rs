// Copyright 2026 fstabgen Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "fstabgen",
    version,
    about = "Generate /etc/fstab from a YAML mount description and apply it safely"
)]
pub struct Cli {
    /// Path to a TOML settings file
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
    /// Path to the YAML mount description
    #[arg(long = "yaml_file")]
    pub yaml_file: Option<PathBuf>,
    /// Path to the target fstab file
    #[arg(long = "fstab_file")]
    pub fstab_file: Option<PathBuf>,
    /// Print the generated table without touching any file
    #[arg(long = "dry_run")]
    pub dry_run: bool,
    /// Apply root-reserve settings for capable filesystems
    #[arg(long = "root_reserve")]
    pub root_reserve: bool,
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
