// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure date arithmetic for ages, tenure durations, and month cutoffs.
//!
//! The elapsed-time formatting deliberately uses a 30-day month and a
//! 12-month year. That approximation is the behavioral contract inherited
//! from the reporting screens; callers must not expect agreement with true
//! calendar months.

use crate::error::DomainError;
use crate::validation::parse_iso_date;
use time::Date;

/// Computes the integer age in years at `today` for a birth date given as an
/// ISO 8601 string.
///
/// Uses calendar year subtraction, decremented by one when `today`'s
/// month/day precedes the birthday's month/day. Returns `None` when the
/// birth date is absent or unparsable, or when the computed age would be
/// negative (a birth date in the future).
#[must_use]
pub fn age_at(birth_date: Option<&str>, today: Date) -> Option<i32> {
    let birth: Date = parse_iso_date(birth_date?, "birth_date").ok()?;

    let mut age: i32 = today.year() - birth.year();
    let today_md: (u8, u8) = (u8::from(today.month()), today.day());
    let birth_md: (u8, u8) = (u8::from(birth.month()), birth.day());
    if today_md < birth_md {
        age -= 1;
    }

    (age >= 0).then_some(age)
}

/// Exact calendar day count from `from` to `to` (date-only, truncated
/// toward zero). Negative when `to` precedes `from`.
#[must_use]
pub fn days_between(from: Date, to: Date) -> i64 {
    i64::from(to.to_julian_day() - from.to_julian_day())
}

/// Formats the elapsed duration since `from` using the 30-day-month /
/// 12-month-year bucketing rule.
///
/// - under 30 days: `"{days} dias"`
/// - under 12 approximate months: `"{months} mês|meses"`
/// - otherwise: `"{years} ano|anos"`, with `" e {rem} mês|meses"` appended
///   when the remainder is non-zero.
#[must_use]
pub fn format_elapsed(from: Date, today: Date) -> String {
    let days: i64 = days_between(from, today).max(0);
    if days < 30 {
        return format!("{days} dias");
    }

    let months: i64 = days / 30;
    if months < 12 {
        return format!("{months} {}", month_word(months));
    }

    let years: i64 = months / 12;
    let rem: i64 = months % 12;
    if rem == 0 {
        format!("{years} {}", year_word(years))
    } else {
        format!("{years} {} e {rem} {}", year_word(years), month_word(rem))
    }
}

const fn month_word(n: i64) -> &'static str {
    if n == 1 { "mês" } else { "meses" }
}

const fn year_word(n: i64) -> &'static str {
    if n == 1 { "ano" } else { "anos" }
}

/// Returns the date `n` calendar months before `reference`, clamping the
/// day-of-month when the target month is shorter.
///
/// # Errors
///
/// Returns an error if the shifted date falls outside the supported range.
pub fn months_ago(reference: Date, n: u32) -> Result<Date, DomainError> {
    let delta = i32::try_from(n).map_err(|_| DomainError::DateArithmeticOverflow {
        operation: format!("subtracting {n} months"),
    })?;
    shift_months(reference, -delta)
}

/// The first day of `date`'s calendar month.
///
/// # Errors
///
/// Returns an error if the date cannot be constructed (unreachable for any
/// valid input date, but propagated rather than unwrapped).
pub fn month_start(date: Date) -> Result<Date, DomainError> {
    Date::from_calendar_date(date.year(), date.month(), 1).map_err(|_| {
        DomainError::DateArithmeticOverflow {
            operation: format!("computing month start of {date}"),
        }
    })
}

/// The first day of the calendar month after `date`'s month.
///
/// Together with [`month_start`] this bounds the half-open window
/// `[month_start, next_month_start)` used for this-month entry/exit counts.
///
/// # Errors
///
/// Returns an error if the shifted date falls outside the supported range.
pub fn next_month_start(date: Date) -> Result<Date, DomainError> {
    shift_months(month_start(date)?, 1)
}

/// Shifts a date by whole calendar months, clamping the day-of-month to the
/// length of the target month.
fn shift_months(reference: Date, delta: i32) -> Result<Date, DomainError> {
    let overflow = || DomainError::DateArithmeticOverflow {
        operation: format!("shifting {reference} by {delta} months"),
    };

    let total: i32 = reference
        .year()
        .checked_mul(12)
        .and_then(|y| y.checked_add(i32::from(u8::from(reference.month())) - 1))
        .and_then(|m| m.checked_add(delta))
        .ok_or_else(overflow)?;

    let year: i32 = total.div_euclid(12);
    let month: time::Month =
        time::Month::try_from(u8::try_from(total.rem_euclid(12) + 1).map_err(|_| overflow())?)
            .map_err(|_| overflow())?;

    let day: u8 = reference.day().min(time::util::days_in_month(month, year));
    Date::from_calendar_date(year, month, day).map_err(|_| overflow())
}
