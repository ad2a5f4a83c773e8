//! Top-N leaderboards by summed amount.

use super::{distribution_by_key, GroupKey, KeyAmount};
use crate::dataset::FundingEvent;

/// The `n` largest keys by summed non-null amount, descending. The sort is
/// stable, so equal sums keep their first-encounter order and the output is
/// reproducible across runs.
pub fn top_by_key(events: &[FundingEvent], key: GroupKey, n: usize) -> Vec<KeyAmount> {
    let mut ranked = distribution_by_key(events, key);
    ranked.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(startup: &str, amount: Option<f64>) -> FundingEvent {
        FundingEvent {
            date: None,
            startup: startup.to_string(),
            vertical: None,
            city: None,
            round: None,
            investors: None,
            amount_cr: amount,
        }
    }

    #[test]
    fn ranks_by_summed_amount_descending() {
        let events = vec![
            event("Small", Some(1.0)),
            event("Big", Some(10.0)),
            event("Big", Some(5.0)),
            event("Mid", Some(8.0)),
        ];
        let top = top_by_key(&events, GroupKey::Startup, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].key, "Big");
        assert_eq!(top[0].amount, 15.0);
        assert_eq!(top[1].key, "Mid");
    }

    #[test]
    fn equal_sums_keep_first_encounter_order() {
        let events = vec![
            event("First", Some(4.0)),
            event("Second", Some(4.0)),
            event("Third", Some(9.0)),
        ];
        let keys: Vec<String> = top_by_key(&events, GroupKey::Startup, 3)
            .into_iter()
            .map(|k| k.key)
            .collect();
        assert_eq!(keys, ["Third", "First", "Second"]);
    }

    #[test]
    fn truncates_to_n_and_tolerates_short_input() {
        let events = vec![event("Only", Some(2.0))];
        assert_eq!(top_by_key(&events, GroupKey::Startup, 10).len(), 1);
        assert!(top_by_key(&[], GroupKey::Startup, 10).is_empty());
    }
}
