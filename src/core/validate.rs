// Copyright 2026 fstabgen Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::{path::Path, process::Command};

/// Outcome of dry-testing a mount table. Any non-success exit of the
/// underlying tool is a failure; the diagnostic is surfaced verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail { diagnostic: String },
}

/// Seam for the external "exercise every entry without persistent
/// changes" collaborator.
pub trait Validator {
    fn check(&self, fstab: &Path) -> Verdict;
}

/// Production validator: `findmnt --verify --tab-file <path>` parses
/// and probes every entry of the given table without mounting.
pub struct FindmntValidator;

impl Validator for FindmntValidator {
    fn check(&self, fstab: &Path) -> Verdict {
        let output = match Command::new("findmnt")
            .arg("--verify")
            .arg("--tab-file")
            .arg(fstab)
            .output()
        {
            Ok(output) => output,
            Err(e) => {
                return Verdict::Fail {
                    diagnostic: format!("failed to run findmnt: {}", e),
                };
            }
        };

        if output.status.success() {
            return Verdict::Pass;
        }

        let mut diagnostic = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if diagnostic.is_empty() {
            diagnostic = String::from_utf8_lossy(&output.stdout).trim().to_string();
        }
        if diagnostic.is_empty() {
            diagnostic = format!("findmnt exited with {}", output.status);
        }

        Verdict::Fail { diagnostic }
    }
}
