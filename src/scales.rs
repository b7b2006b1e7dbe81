// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-scale marker types.

use super::instant::TimeScale;

/// Julian Day on the UT axis: days since −4712-01-01T12:00 UT (proleptic
/// Julian calendar).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JD;

impl TimeScale for JD {
    const LABEL: &'static str = "JD";
}
