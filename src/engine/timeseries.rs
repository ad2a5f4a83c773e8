//! Chronological aggregation for the MoM and YoY charts.
//!
//! Ordering always comes from the `(year, month)` tuple; the display label
//! is carried alongside and is never sorted on.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::dataset::{FundingEvent, YearMonth};

/// What a monthly trend point measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendMetric {
    /// Summed non-null amounts per month.
    Total,
    /// Row count per month, null amounts included.
    Count,
}

/// One month of the trend, chronologically keyed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub month: YearMonth,
    /// Display form `"{month}-{year}"`, month unpadded.
    pub label: String,
    pub value: f64,
}

/// Group by `(year, month)` and emit the requested metric in chronological
/// order. Undated rows have no bucket and are skipped.
pub fn monthly_series(events: &[FundingEvent], metric: TrendMetric) -> Vec<TrendPoint> {
    let mut buckets: BTreeMap<YearMonth, (f64, u64)> = BTreeMap::new();
    for event in events {
        if let Some(month) = event.year_month() {
            let bucket = buckets.entry(month).or_insert((0.0, 0));
            bucket.0 += event.amount_cr.unwrap_or(0.0);
            bucket.1 += 1;
        }
    }

    buckets
        .into_iter()
        .map(|(month, (sum, rows))| TrendPoint {
            month,
            label: month.to_string(),
            value: match metric {
                TrendMetric::Total => sum,
                TrendMetric::Count => rows as f64,
            },
        })
        .collect()
}

/// One year of summed funding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearAmount {
    pub year: i32,
    pub amount: f64,
}

/// Summed non-null amounts per calendar year, ascending. Undated rows are
/// skipped.
pub fn yearly_series(events: &[FundingEvent]) -> Vec<YearAmount> {
    let mut buckets: BTreeMap<i32, f64> = BTreeMap::new();
    for event in events {
        if let Some(year) = event.year() {
            *buckets.entry(year).or_insert(0.0) += event.amount_cr.unwrap_or(0.0);
        }
    }

    buckets
        .into_iter()
        .map(|(year, amount)| YearAmount { year, amount })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(date: Option<(i32, u32, u32)>, amount: Option<f64>) -> FundingEvent {
        FundingEvent {
            date: date.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap()),
            startup: "S".to_string(),
            vertical: None,
            city: None,
            round: None,
            investors: None,
            amount_cr: amount,
        }
    }

    #[test]
    fn months_order_chronologically_not_lexically() {
        let events = vec![
            event(Some((2020, 1, 5)), Some(1.0)),
            event(Some((2019, 11, 5)), Some(1.0)),
            event(Some((2019, 12, 5)), Some(1.0)),
        ];
        let labels: Vec<String> = monthly_series(&events, TrendMetric::Total)
            .into_iter()
            .map(|p| p.label)
            .collect();
        assert_eq!(labels, ["11-2019", "12-2019", "1-2020"]);
    }

    #[test]
    fn count_includes_null_amounts_total_does_not() {
        let events = vec![
            event(Some((2021, 3, 1)), Some(10.0)),
            event(Some((2021, 3, 9)), None),
        ];
        let totals = monthly_series(&events, TrendMetric::Total);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].value, 10.0);
        let counts = monthly_series(&events, TrendMetric::Count);
        assert_eq!(counts[0].value, 2.0);
    }

    #[test]
    fn undated_rows_are_skipped() {
        let events = vec![event(None, Some(99.0)), event(Some((2022, 6, 1)), Some(1.0))];
        let points = monthly_series(&events, TrendMetric::Total);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value, 1.0);
        assert_eq!(yearly_series(&events), [YearAmount { year: 2022, amount: 1.0 }]);
    }

    #[test]
    fn yearly_sums_ascend_by_year() {
        let events = vec![
            event(Some((2021, 2, 1)), Some(5.0)),
            event(Some((2019, 7, 1)), Some(2.0)),
            event(Some((2021, 9, 1)), Some(3.0)),
        ];
        let years = yearly_series(&events);
        assert_eq!(
            years,
            [
                YearAmount { year: 2019, amount: 2.0 },
                YearAmount { year: 2021, amount: 8.0 },
            ]
        );
    }

    #[test]
    fn repeated_calls_agree() {
        let events = vec![
            event(Some((2020, 4, 1)), Some(7.0)),
            event(Some((2020, 5, 1)), None),
        ];
        assert_eq!(
            monthly_series(&events, TrendMetric::Count),
            monthly_series(&events, TrendMetric::Count)
        );
    }
}
