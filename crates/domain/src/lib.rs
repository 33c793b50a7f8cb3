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
mod tenure;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use tenure::{
    age_at, days_between, format_elapsed, month_start, months_ago, next_month_start,
};
pub use types::{Agent, LookupItem, LookupKind, Movement};
pub use validation::{parse_iso_date, validate_agent_name, validate_lookup_name};
