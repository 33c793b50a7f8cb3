// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, parse_iso_date, validate_agent_name, validate_lookup_name};
use time::macros::date;

#[test]
fn test_parse_iso_date_accepts_calendar_dates() {
    assert_eq!(
        parse_iso_date("2024-02-29", "entry_date").unwrap(),
        date!(2024 - 02 - 29)
    );
    // surrounding whitespace is tolerated
    assert_eq!(
        parse_iso_date(" 2023-01-10 ", "entry_date").unwrap(),
        date!(2023 - 01 - 10)
    );
}

#[test]
fn test_parse_iso_date_rejects_invalid_input() {
    for bad in ["", "2023-02-30", "2023-13-01", "10/01/2023", "yesterday"] {
        let result = parse_iso_date(bad, "entry_date");
        assert!(
            matches!(result, Err(DomainError::DateParseError { field: "entry_date", .. })),
            "expected parse failure for {bad:?}"
        );
    }
}

#[test]
fn test_validate_agent_name() {
    assert!(validate_agent_name("Maria das Dores").is_ok());
    assert!(matches!(
        validate_agent_name("   "),
        Err(DomainError::InvalidName(_))
    ));
}

#[test]
fn test_validate_lookup_name() {
    assert!(validate_lookup_name("Pastoral da Juventude").is_ok());
    assert!(matches!(
        validate_lookup_name(""),
        Err(DomainError::InvalidLookupName(_))
    ));
}
