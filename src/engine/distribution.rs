//! Share-of-whole breakdowns per categorical column.

use super::{group_by_key, GroupKey, KeyAmount};
use crate::dataset::FundingEvent;

/// Summed non-null amounts per distinct value of `key`, in first-encounter
/// order. Rows whose key column is null or blank land in the `"Unknown"`
/// bucket so the per-key sums reconcile with the overall total.
pub fn distribution_by_key(events: &[FundingEvent], key: GroupKey) -> Vec<KeyAmount> {
    group_by_key(events, key)
        .into_iter()
        .map(|(key, agg)| KeyAmount {
            key,
            amount: agg.sum,
        })
        .collect()
}
