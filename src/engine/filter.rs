//! Scope filters for the drill-down views.
//!
//! Filters return owned snapshots; the loaded table itself is never touched.

use std::cmp::Ordering;

use crate::dataset::FundingEvent;

/// Rows whose startup name matches `name` exactly.
pub fn by_startup(events: &[FundingEvent], name: &str) -> Vec<FundingEvent> {
    events.iter().filter(|e| e.startup == name).cloned().collect()
}

/// Rows whose raw investor cell contains `name` as a substring. The match is
/// case-sensitive and a null cell never matches.
pub fn by_investor(events: &[FundingEvent], name: &str) -> Vec<FundingEvent> {
    events
        .iter()
        .filter(|e| e.investors.as_deref().map_or(false, |s| s.contains(name)))
        .cloned()
        .collect()
}

/// The `n` most recent rows, newest first. Undated rows sort after every
/// dated one; the sort is stable so equal dates keep table order.
pub fn recent_events(events: &[FundingEvent], n: usize) -> Vec<FundingEvent> {
    let mut rows: Vec<FundingEvent> = events.to_vec();
    rows.sort_by(|a, b| match (a.date, b.date) {
        (Some(da), Some(db)) => db.cmp(&da),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    rows.truncate(n);
    rows
}
