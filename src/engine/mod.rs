//! Aggregation primitives over the loaded event table.
//!
//! Every function here is a pure fold over `&[FundingEvent]`: no caching,
//! no mutation, deterministic output for a given input slice. The view
//! layer composes these into the per-screen payloads.

use serde::Serialize;

use crate::dataset::FundingEvent;

pub mod distribution;
pub mod filter;
pub mod investors;
pub mod ranking;
pub mod summary;
pub mod timeseries;

pub use distribution::distribution_by_key;
pub use filter::{by_investor, by_startup, recent_events};
pub use investors::{explode_investors, top_investors};
pub use ranking::top_by_key;
pub use summary::{overall_summary, scope_summary, ScopeMetrics, SummaryMetrics};
pub use timeseries::{monthly_series, yearly_series, TrendMetric, TrendPoint, YearAmount};

/// Bucket label for events whose group column is null or blank.
pub const UNKNOWN_KEY: &str = "Unknown";

/// Which event column a grouped aggregation keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKey {
    Startup,
    Vertical,
    City,
    Round,
}

impl GroupKey {
    /// The key value this event contributes under, or `None` when the
    /// column is null or blank (callers bucket those as [`UNKNOWN_KEY`]).
    fn of<'a>(&self, event: &'a FundingEvent) -> Option<&'a str> {
        let raw = match self {
            GroupKey::Startup => Some(event.startup.as_str()),
            GroupKey::Vertical => event.vertical.as_deref(),
            GroupKey::City => event.city.as_deref(),
            GroupKey::Round => event.round.as_deref(),
        };
        raw.map(str::trim).filter(|s| !s.is_empty())
    }
}

/// One labelled amount in a ranking or distribution table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyAmount {
    pub key: String,
    pub amount: f64,
}

/// Per-key accumulator shared by the summary, ranking and distribution
/// folds. Null amounts contribute nothing; `funded` counts the rows that
/// did carry an amount.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct GroupAgg {
    pub sum: f64,
    pub max: Option<f64>,
    pub funded: u64,
}

impl GroupAgg {
    fn add(&mut self, amount: Option<f64>) {
        if let Some(v) = amount {
            self.sum += v;
            self.funded += 1;
            self.max = Some(match self.max {
                Some(m) => m.max(v),
                None => v,
            });
        }
    }
}

/// Fold the slice into per-key aggregates, keyed on `key`. Output order is
/// first encounter in the slice, which keeps downstream stable sorts
/// reproducible across runs.
pub(crate) fn group_by_key(events: &[FundingEvent], key: GroupKey) -> Vec<(String, GroupAgg)> {
    use std::collections::hash_map::Entry;
    use std::collections::HashMap;

    let mut order: Vec<String> = Vec::new();
    let mut table: HashMap<String, GroupAgg> = HashMap::new();

    for event in events {
        let label = key.of(event).unwrap_or(UNKNOWN_KEY);
        match table.entry(label.to_string()) {
            Entry::Occupied(mut slot) => slot.get_mut().add(event.amount_cr),
            Entry::Vacant(slot) => {
                order.push(label.to_string());
                let mut agg = GroupAgg::default();
                agg.add(event.amount_cr);
                slot.insert(agg);
            }
        }
    }

    order
        .into_iter()
        .map(|label| {
            let agg = table[&label];
            (label, agg)
        })
        .collect()
}
