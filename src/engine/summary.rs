//! Headline metrics for the overall view and the drill-down scopes.

use serde::Serialize;

use super::{group_by_key, GroupKey, KeyAmount};
use crate::dataset::FundingEvent;

/// Overall dataset metrics. `top_startup` is `None` when no row carries a
/// parseable amount; that is a valid dataset, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetrics {
    /// Sum of all non-null amounts, rounded to the nearest crore.
    pub total_amount: f64,
    /// Startup with the single largest funding round and that round's amount.
    pub top_startup: Option<KeyAmount>,
    /// Mean, across funded startups, of each startup's summed amount.
    pub avg_per_startup: f64,
    /// Rows with a non-null amount.
    pub funded_round_count: usize,
    /// Distinct startup names over the whole table, funded or not.
    pub distinct_startups: usize,
}

/// Compute the overall summary from one grouped pass.
pub fn overall_summary(events: &[FundingEvent]) -> SummaryMetrics {
    let groups = group_by_key(events, GroupKey::Startup);

    let total: f64 = groups.iter().map(|(_, agg)| agg.sum).sum();

    // Largest single round per startup; the sort is stable so equal maxima
    // keep first-encounter order.
    let mut maxes: Vec<KeyAmount> = groups
        .iter()
        .filter_map(|(key, agg)| {
            agg.max.map(|amount| KeyAmount {
                key: key.clone(),
                amount,
            })
        })
        .collect();
    let funded_startups = maxes.len();
    maxes.sort_by(|a, b| b.amount.total_cmp(&a.amount));

    let avg_per_startup = if funded_startups > 0 {
        total / funded_startups as f64
    } else {
        0.0
    };

    SummaryMetrics {
        total_amount: total.round(),
        top_startup: maxes.into_iter().next(),
        avg_per_startup,
        funded_round_count: groups.iter().map(|(_, agg)| agg.funded as usize).sum(),
        distinct_startups: groups.len(),
    }
}

/// Metrics for one drill-down scope (an already-filtered slice).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScopeMetrics {
    /// Sum of non-null amounts in the scope.
    pub total_amount: f64,
    /// Largest single amount, `None` when no row in the scope is funded.
    pub max_amount: Option<f64>,
    /// Mean over funded rows only, `None` when no row in the scope is funded.
    pub mean_amount: Option<f64>,
    /// All rows in the scope, null amounts included.
    pub round_count: usize,
}

pub fn scope_summary(events: &[FundingEvent]) -> ScopeMetrics {
    let mut total = 0.0;
    let mut max: Option<f64> = None;
    let mut funded = 0usize;
    for amount in events.iter().filter_map(|e| e.amount_cr) {
        total += amount;
        funded += 1;
        max = Some(match max {
            Some(m) => m.max(amount),
            None => amount,
        });
    }
    let mean = (funded > 0).then(|| total / funded as f64);

    ScopeMetrics {
        total_amount: total,
        max_amount: max,
        mean_amount: mean,
        round_count: events.len(),
    }
}
