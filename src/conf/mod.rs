// Copyright 2026 fstabgen Developers
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod cli;
pub mod config;
