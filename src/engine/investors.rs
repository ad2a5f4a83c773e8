//! Per-investor attribution over the comma-separated investor cells.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::KeyAmount;
use crate::dataset::FundingEvent;

/// One logical row per distinct investor named on each event. Splitting,
/// trimming and within-row de-duplication follow
/// [`FundingEvent::investor_names`]; every investor of a round is attributed
/// the round's full amount.
pub fn explode_investors(events: &[FundingEvent]) -> Vec<(String, &FundingEvent)> {
    let mut rows = Vec::new();
    for event in events {
        for name in event.investor_names() {
            rows.push((name.to_string(), event));
        }
    }
    rows
}

/// The `n` investors with the largest summed non-null amounts across the
/// slice, descending. Equal sums keep first-encounter order.
pub fn top_investors(events: &[FundingEvent], n: usize) -> Vec<KeyAmount> {
    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, f64> = HashMap::new();

    for (name, event) in explode_investors(events) {
        let amount = event.amount_cr.unwrap_or(0.0);
        match sums.entry(name) {
            Entry::Occupied(mut slot) => *slot.get_mut() += amount,
            Entry::Vacant(slot) => {
                order.push(slot.key().clone());
                slot.insert(amount);
            }
        }
    }

    let mut ranked: Vec<KeyAmount> = order
        .into_iter()
        .map(|key| {
            let amount = sums[&key];
            KeyAmount { key, amount }
        })
        .collect();
    ranked.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    ranked.truncate(n);
    ranked
}
