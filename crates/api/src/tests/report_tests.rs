// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pastoral_domain::LookupKind;
use time::{Date, Month};

use super::{admin, create_test_agent, open_test_movement, seed_lookups, setup};
use crate::handlers;
use crate::request_response::{CloseMovementRequest, ReportFilter};

fn today() -> Date {
    Date::from_calendar_date(2026, Month::August, 31).unwrap()
}

/// Four agents: Ana (active since 2010), Bruno (active since 2020), Carla
/// (entered this month), Daniel (closed this month). Bruno serves in a
/// second parish.
fn seed_report_data(
    persistence: &mut pastoral_persistence::SqlitePersistence,
) -> (i64, i64, i64) {
    let refs = seed_lookups(persistence);
    let second_parish = persistence
        .create_lookup(LookupKind::Parish, "Sao Jose")
        .unwrap();

    let ana = create_test_agent(persistence, "Ana Silva");
    let bruno = create_test_agent(persistence, "Bruno Costa");
    let carla = create_test_agent(persistence, "Carla Dias");
    let daniel = create_test_agent(persistence, "Daniel Reis");

    open_test_movement(persistence, ana, refs, "2010-01-01");
    open_test_movement(persistence, bruno, (second_parish, refs.1, refs.2), "2020-05-10");
    open_test_movement(persistence, carla, refs, "2026-08-05");
    let closed = open_test_movement(persistence, daniel, refs, "2024-02-01");
    handlers::close_movement(
        persistence,
        closed,
        &CloseMovementRequest {
            exit_date: String::from("2026-08-10"),
        },
        &admin(),
    )
    .unwrap();

    refs
}

#[test]
fn test_report_counts_whole_ledger() {
    let mut persistence = setup();
    seed_report_data(&mut persistence);

    let report =
        handlers::build_report(&mut persistence, ReportFilter::default(), today()).unwrap();

    assert_eq!(report.counts.total_agents, 4);
    assert_eq!(report.counts.active, 3);
    assert_eq!(report.counts.inactive, 1);
    assert_eq!(report.counts.entries_this_month, 1);
    assert_eq!(report.counts.exits_this_month, 1);
}

#[test]
fn test_report_breaks_down_by_dimension() {
    let mut persistence = setup();
    seed_report_data(&mut persistence);

    let report =
        handlers::build_report(&mut persistence, ReportFilter::default(), today()).unwrap();

    // Ana and Carla in the seeded parish, Bruno in the second one.
    assert_eq!(report.by_parish.len(), 2);
    assert_eq!(report.by_parish[0].name, "Paroquia Matriz");
    assert_eq!(report.by_parish[0].count, 2);
    assert_eq!(report.by_parish[1].name, "Sao Jose");
    assert_eq!(report.by_parish[1].count, 1);

    assert_eq!(report.by_pastoral_group.len(), 1);
    assert_eq!(report.by_pastoral_group[0].count, 3);
    assert_eq!(report.by_role_function[0].count, 3);
}

#[test]
fn test_report_ranks_top_tenure_oldest_first() {
    let mut persistence = setup();
    seed_report_data(&mut persistence);

    let report =
        handlers::build_report(&mut persistence, ReportFilter::default(), today()).unwrap();

    let names: Vec<&str> = report
        .top_tenure
        .iter()
        .map(|row| row.agent_name.as_str())
        .collect();
    assert_eq!(names, vec!["Ana Silva", "Bruno Costa", "Carla Dias"]);
    assert_eq!(report.top_tenure[0].tenure, "16 anos e 10 meses");
    assert_eq!(report.top_tenure[0].entry_date, "2010-01-01");
}

#[test]
fn test_period_filter_scopes_active_set() {
    let mut persistence = setup();
    seed_report_data(&mut persistence);

    let filter = ReportFilter {
        period_months: Some(12),
        min_tenure_months: None,
    };
    let report = handlers::build_report(&mut persistence, filter, today()).unwrap();

    // Only Carla entered within the last 12 months.
    assert_eq!(report.counts.active, 1);
    assert_eq!(report.counts.total_agents, 4);
    assert_eq!(report.counts.inactive, 3);
    assert_eq!(report.top_tenure.len(), 1);
    assert_eq!(report.top_tenure[0].agent_name, "Carla Dias");
}

#[test]
fn test_zero_months_means_no_filter() {
    let mut persistence = setup();
    seed_report_data(&mut persistence);

    let filter = ReportFilter {
        period_months: Some(0),
        min_tenure_months: None,
    };
    let report = handlers::build_report(&mut persistence, filter, today()).unwrap();
    assert_eq!(report.counts.active, 3);
    assert!(report.long_tenure.is_none());
}

#[test]
fn test_long_tenure_listed_only_when_requested() {
    let mut persistence = setup();
    seed_report_data(&mut persistence);

    let without =
        handlers::build_report(&mut persistence, ReportFilter::default(), today()).unwrap();
    assert!(without.long_tenure.is_none());

    let filter = ReportFilter {
        period_months: None,
        min_tenure_months: Some(60),
    };
    let with = handlers::build_report(&mut persistence, filter, today()).unwrap();

    // Ana and Bruno entered at least five years ago.
    let rows = with.long_tenure.unwrap();
    let names: Vec<&str> = rows.iter().map(|row| row.agent_name.as_str()).collect();
    assert_eq!(names, vec!["Ana Silva", "Bruno Costa"]);
}

#[test]
fn test_report_on_empty_store() {
    let mut persistence = setup();

    let report =
        handlers::build_report(&mut persistence, ReportFilter::default(), today()).unwrap();

    assert_eq!(report.counts.total_agents, 0);
    assert_eq!(report.counts.active, 0);
    assert!(report.by_parish.is_empty());
    assert!(report.top_tenure.is_empty());
}
