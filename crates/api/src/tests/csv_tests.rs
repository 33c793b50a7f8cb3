// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pastoral::{ActiveRow, LookupRef};
use pastoral_domain::LookupKind;
use time::{Date, Month};

use crate::csv_export::{EXPORT_FILENAME, render_csv};
use crate::handlers;
use crate::request_response::ReportFilter;

use super::{create_test_agent, open_test_movement, seed_lookups, setup};

fn active_row(agent_id: i64, name: &str, parish: &str, entry: Date) -> ActiveRow {
    ActiveRow {
        movement_id: agent_id,
        agent_id,
        agent_name: name.to_string(),
        parish: LookupRef {
            id: 1,
            name: parish.to_string(),
        },
        pastoral_group: LookupRef {
            id: 2,
            name: String::from("Catequese"),
        },
        role_function: LookupRef {
            id: 3,
            name: String::from("Coordenador"),
        },
        entry_date: entry,
    }
}

#[test]
fn test_csv_starts_with_bom_and_header() {
    let bytes = render_csv(&[]).unwrap();

    assert_eq!(&bytes[..3], [0xEF, 0xBB, 0xBF]);
    let text = String::from_utf8(bytes).unwrap();
    assert_eq!(
        text.trim_start_matches('\u{feff}').trim_end(),
        "agent_id,agente_nome,paroquia,pastoral_grupo,funcao_cargo,data_entrada"
    );
}

#[test]
fn test_csv_writes_one_line_per_row() {
    let entry = Date::from_calendar_date(2020, Month::May, 10).unwrap();
    let rows = vec![active_row(7, "Bruno Costa", "Sao Jose", entry)];

    let bytes = render_csv(&rows).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.trim_end().lines().collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "7,Bruno Costa,Sao Jose,Catequese,Coordenador,2020-05-10");
}

#[test]
fn test_csv_quotes_fields_containing_separators() {
    let entry = Date::from_calendar_date(2020, Month::May, 10).unwrap();
    let rows = vec![active_row(7, "Costa, Bruno \"Nino\"", "Sao Jose", entry)];

    let bytes = render_csv(&rows).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.trim_end().lines().collect();

    assert_eq!(
        lines[1],
        "7,\"Costa, Bruno \"\"Nino\"\"\",Sao Jose,Catequese,Coordenador,2020-05-10"
    );
}

#[test]
fn test_export_filename_constant() {
    assert_eq!(EXPORT_FILENAME, "agentes_ativos.csv");
}

#[test]
fn test_export_contains_only_active_agents() {
    let mut persistence = setup();
    let refs = seed_lookups(&mut persistence);
    let active = create_test_agent(&mut persistence, "Ana Silva");
    let closed = create_test_agent(&mut persistence, "Daniel Reis");
    open_test_movement(&mut persistence, active, refs, "2020-01-01");
    let movement_id = open_test_movement(&mut persistence, closed, refs, "2021-01-01");
    persistence.close_movement(movement_id, "2024-01-01").unwrap();

    let today = Date::from_calendar_date(2026, Month::August, 31).unwrap();
    let bytes =
        handlers::export_active_agents(&mut persistence, ReportFilter::default(), today).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    assert!(text.contains("Ana Silva"));
    assert!(!text.contains("Daniel Reis"));
}

#[test]
fn test_export_applies_both_filters() {
    let mut persistence = setup();
    let refs = seed_lookups(&mut persistence);
    let second_parish = persistence
        .create_lookup(LookupKind::Parish, "Sao Jose")
        .unwrap();

    let old = create_test_agent(&mut persistence, "Ana Silva");
    let mid = create_test_agent(&mut persistence, "Bruno Costa");
    let recent = create_test_agent(&mut persistence, "Carla Dias");
    open_test_movement(&mut persistence, old, refs, "2010-01-01");
    open_test_movement(&mut persistence, mid, (second_parish, refs.1, refs.2), "2024-03-01");
    open_test_movement(&mut persistence, recent, refs, "2026-08-05");

    let today = Date::from_calendar_date(2026, Month::August, 31).unwrap();

    // Entered in the last 36 months and at least 12 months ago: Bruno only.
    let filter = ReportFilter {
        period_months: Some(36),
        min_tenure_months: Some(12),
    };
    let bytes = handlers::export_active_agents(&mut persistence, filter, today).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    assert!(!text.contains("Ana Silva"));
    assert!(text.contains("Bruno Costa"));
    assert!(!text.contains("Carla Dias"));
}
