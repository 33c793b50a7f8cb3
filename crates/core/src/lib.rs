// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod ledger;
mod report;

#[cfg(test)]
mod tests;

pub use error::CoreError;
pub use ledger::{
    OpenMovementCommand, ValidatedOpen, require_no_active_movement, single_active,
    validate_close_movement, validate_open_movement,
};
pub use report::{
    ActiveRow, DimensionCount, LONG_TENURE_LIMIT, LookupRef, PeriodCounts, ReportDimension,
    TOP_TENURE_DEFAULT, count_by_dimension, long_tenure, period_counts, top_by_tenure,
};
