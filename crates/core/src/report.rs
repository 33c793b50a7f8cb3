// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Report aggregation over the currently active movements.
//!
//! Every function here is a pure, deterministic transformation of an
//! already-filtered row set. Callers apply the period cutoff when loading
//! rows from the store; the tenure cutoff is applied by [`long_tenure`].

use serde::{Deserialize, Serialize};
use time::Date;

/// How many groups a per-dimension breakdown returns.
const TOP_GROUPS: usize = 10;

/// Default size of the longest-tenure ranking.
pub const TOP_TENURE_DEFAULT: usize = 10;

/// Cap on the long-tenure listing.
pub const LONG_TENURE_LIMIT: usize = 50;

/// A lookup value as resolved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRef {
    /// The lookup row id.
    pub id: i64,
    /// The display name.
    pub name: String,
}

/// One active movement with its display names resolved.
///
/// This is the read-time projection produced by the store's join; it carries
/// identifiers and names only, never live references to directory rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveRow {
    /// The movement id.
    pub movement_id: i64,
    /// The agent id.
    pub agent_id: i64,
    /// The agent's display name.
    pub agent_name: String,
    /// The parish the movement points at.
    pub parish: LookupRef,
    /// The pastoral group the movement points at.
    pub pastoral_group: LookupRef,
    /// The role/function the movement points at.
    pub role_function: LookupRef,
    /// The movement's entry date.
    pub entry_date: Date,
}

/// The dimension a breakdown groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportDimension {
    /// Group by parish.
    Parish,
    /// Group by pastoral group.
    PastoralGroup,
    /// Group by role/function.
    RoleFunction,
}

/// One group in a per-dimension breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionCount {
    /// The lookup row id of the group.
    pub id: i64,
    /// The group's display name.
    pub name: String,
    /// How many active movements fall in the group.
    pub count: usize,
}

/// Headline figures for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodCounts {
    /// Total number of agents in the directory.
    pub total_agents: u64,
    /// Active movements after the period filter.
    pub active: u64,
    /// `total_agents - active`, floored at zero.
    pub inactive: u64,
    /// Movements opened within the current calendar month.
    pub entries_this_month: u64,
    /// Movements closed within the current calendar month.
    pub exits_this_month: u64,
}

/// Groups active rows by the chosen dimension and returns the ten largest
/// groups, ordered by count descending, then name ascending
/// (case-insensitive), then id.
///
/// The final id tie-break makes the ordering fully deterministic even for
/// duplicate names, which the lookup tables do not normally allow.
#[must_use]
pub fn count_by_dimension(rows: &[ActiveRow], dimension: ReportDimension) -> Vec<DimensionCount> {
    let mut groups: Vec<DimensionCount> = Vec::new();

    for row in rows {
        let value: &LookupRef = match dimension {
            ReportDimension::Parish => &row.parish,
            ReportDimension::PastoralGroup => &row.pastoral_group,
            ReportDimension::RoleFunction => &row.role_function,
        };
        match groups.iter_mut().find(|g| g.id == value.id) {
            Some(group) => group.count += 1,
            None => groups.push(DimensionCount {
                id: value.id,
                name: value.name.clone(),
                count: 1,
            }),
        }
    }

    groups.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.id.cmp(&b.id))
    });
    groups.truncate(TOP_GROUPS);
    groups
}

/// Returns the `n` longest-serving active rows: ascending entry date
/// (oldest first), stable on equal dates.
#[must_use]
pub fn top_by_tenure(rows: &[ActiveRow], n: usize) -> Vec<ActiveRow> {
    let mut ranked: Vec<ActiveRow> = rows.to_vec();
    ranked.sort_by_key(|row| row.entry_date);
    ranked.truncate(n);
    ranked
}

/// Rows active since `tenure_cutoff` or earlier, ascending by entry date,
/// capped at `limit`.
#[must_use]
pub fn long_tenure(rows: &[ActiveRow], tenure_cutoff: Date, limit: usize) -> Vec<ActiveRow> {
    let mut matched: Vec<ActiveRow> = rows
        .iter()
        .filter(|row| row.entry_date <= tenure_cutoff)
        .cloned()
        .collect();
    matched.sort_by_key(|row| row.entry_date);
    matched.truncate(limit);
    matched
}

/// Assembles the headline figures.
///
/// `active` is the size of the active-row set after the period filter;
/// `inactive` is the directory total minus that, floored at zero (an agent
/// can hold several historical movements, so the subtraction can go
/// negative on skewed data).
#[must_use]
pub const fn period_counts(
    total_agents: u64,
    active: u64,
    entries_this_month: u64,
    exits_this_month: u64,
) -> PeriodCounts {
    PeriodCounts {
        total_agents,
        active,
        inactive: total_agents.saturating_sub(active),
        entries_this_month,
        exits_this_month,
    }
}
