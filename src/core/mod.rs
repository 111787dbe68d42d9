// Copyright 2026 fstabgen Developers
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod apply;
pub mod backup;
pub mod model;
pub mod render;
pub mod validate;

pub use apply::{ApplyController, ApplyError, ApplyOutcome};
