//! Per-mode result sets.
//!
//! Each view bundles the derived tables one screen needs. Sections within a
//! view are independent of each other, so they are computed with nested
//! `rayon::join`; output is deterministic regardless of scheduling.

use serde::Serialize;

use crate::dataset::{FundingDataset, FundingEvent};
use crate::engine::{
    by_investor, by_startup, distribution_by_key, monthly_series, overall_summary, recent_events,
    scope_summary, top_by_key, top_investors, yearly_series, GroupKey, KeyAmount, ScopeMetrics,
    SummaryMetrics, TrendMetric, TrendPoint, YearAmount,
};

/// Rows shown in ranking tables.
pub const TOP_N: usize = 10;
/// Rows shown in the investor view's recent-events table.
pub const RECENT_N: usize = 5;

/// Whole-dataset analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallView {
    pub metric: TrendMetric,
    pub summary: SummaryMetrics,
    pub trend: Vec<TrendPoint>,
    pub top_startups: Vec<KeyAmount>,
    pub sectors: Vec<KeyAmount>,
}

pub fn overall(dataset: &FundingDataset, metric: TrendMetric) -> OverallView {
    let events = dataset.events();
    let (summary, (trend, (top_startups, sectors))) = rayon::join(
        || overall_summary(events),
        || {
            rayon::join(
                || monthly_series(events, metric),
                || {
                    rayon::join(
                        || top_by_key(events, GroupKey::Startup, TOP_N),
                        || distribution_by_key(events, GroupKey::Vertical),
                    )
                },
            )
        },
    );

    OverallView {
        metric,
        summary,
        trend,
        top_startups,
        sectors,
    }
}

/// Drill-down for one startup. `None` when the name matches no row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartupView {
    pub startup: String,
    pub metrics: ScopeMetrics,
    pub trend: Vec<TrendPoint>,
    pub rounds: Vec<KeyAmount>,
    pub cities: Vec<KeyAmount>,
    pub top_investors: Vec<KeyAmount>,
    pub yearly: Vec<YearAmount>,
}

pub fn startup(dataset: &FundingDataset, name: &str) -> Option<StartupView> {
    let scoped = by_startup(dataset.events(), name);
    if scoped.is_empty() {
        return None;
    }

    let (metrics, (trend, ((rounds, cities), (investors, yearly)))) = rayon::join(
        || scope_summary(&scoped),
        || {
            rayon::join(
                || monthly_series(&scoped, TrendMetric::Total),
                || {
                    rayon::join(
                        || {
                            rayon::join(
                                || distribution_by_key(&scoped, GroupKey::Round),
                                || distribution_by_key(&scoped, GroupKey::City),
                            )
                        },
                        || {
                            rayon::join(
                                || top_investors(&scoped, TOP_N),
                                || yearly_series(&scoped),
                            )
                        },
                    )
                },
            )
        },
    );

    Some(StartupView {
        startup: name.to_string(),
        metrics,
        trend,
        rounds,
        cities,
        top_investors: investors,
        yearly,
    })
}

/// Drill-down for one investor. `None` when the name matches no row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestorView {
    pub investor: String,
    pub recent: Vec<FundingEvent>,
    pub top_startups: Vec<KeyAmount>,
    pub sectors: Vec<KeyAmount>,
    pub yearly: Vec<YearAmount>,
}

pub fn investor(dataset: &FundingDataset, name: &str) -> Option<InvestorView> {
    let scoped = by_investor(dataset.events(), name);
    if scoped.is_empty() {
        return None;
    }

    let ((recent, top_startups), (sectors, yearly)) = rayon::join(
        || {
            rayon::join(
                || recent_events(&scoped, RECENT_N),
                || top_by_key(&scoped, GroupKey::Startup, TOP_N),
            )
        },
        || {
            rayon::join(
                || distribution_by_key(&scoped, GroupKey::Vertical),
                || yearly_series(&scoped),
            )
        },
    );

    Some(InvestorView {
        investor: name.to_string(),
        recent,
        top_startups,
        sectors,
        yearly,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(
        date: Option<(i32, u32, u32)>,
        startup: &str,
        vertical: &str,
        city: &str,
        round: &str,
        investors: Option<&str>,
        amount: Option<f64>,
    ) -> FundingEvent {
        FundingEvent {
            date: date.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap()),
            startup: startup.to_string(),
            vertical: Some(vertical.to_string()),
            city: Some(city.to_string()),
            round: Some(round.to_string()),
            investors: investors.map(str::to_string),
            amount_cr: amount,
        }
    }

    fn fixture() -> FundingDataset {
        FundingDataset::from_events(vec![
            event(
                Some((2019, 11, 2)),
                "Zomato",
                "FoodTech",
                "Gurgaon",
                "Series D",
                Some("Ant Financial"),
                Some(200.0),
            ),
            event(
                Some((2019, 12, 9)),
                "BYJU'S",
                "EdTech",
                "Bengaluru",
                "Private Equity",
                Some("Tiger Global, Owl Ventures"),
                Some(540.0),
            ),
            event(
                Some((2020, 1, 14)),
                "Zomato",
                "FoodTech",
                "Gurgaon",
                "Series E",
                Some("Tiger Global"),
                Some(150.0),
            ),
            event(None, "Unlisted", "FinTech", "Pune", "Seed", None, None),
        ])
    }

    #[test]
    fn overall_sections_match_direct_engine_calls() {
        let ds = fixture();
        let view = overall(&ds, TrendMetric::Total);
        assert_eq!(view.summary, overall_summary(ds.events()));
        assert_eq!(view.trend, monthly_series(ds.events(), TrendMetric::Total));
        assert_eq!(
            view.top_startups,
            top_by_key(ds.events(), GroupKey::Startup, TOP_N)
        );
        assert_eq!(
            view.sectors,
            distribution_by_key(ds.events(), GroupKey::Vertical)
        );
    }

    #[test]
    fn overall_view_carries_the_count_metric() {
        let ds = fixture();
        let view = overall(&ds, TrendMetric::Count);
        // The undated row has no month bucket; the three dated ones do.
        let total_rows: f64 = view.trend.iter().map(|p| p.value).sum();
        assert_eq!(total_rows, 3.0);
        assert_eq!(view.metric, TrendMetric::Count);
    }

    #[test]
    fn startup_view_scopes_every_section() {
        let ds = fixture();
        let view = startup(&ds, "Zomato").unwrap();
        assert_eq!(view.metrics.total_amount, 350.0);
        assert_eq!(view.metrics.round_count, 2);
        assert_eq!(view.trend.len(), 2);
        assert_eq!(view.rounds.len(), 2);
        assert_eq!(view.cities, [KeyAmount { key: "Gurgaon".to_string(), amount: 350.0 }]);
        assert_eq!(
            view.top_investors,
            [
                KeyAmount { key: "Ant Financial".to_string(), amount: 200.0 },
                KeyAmount { key: "Tiger Global".to_string(), amount: 150.0 },
            ]
        );
        assert_eq!(view.yearly.len(), 2);
    }

    #[test]
    fn unknown_names_yield_no_view() {
        let ds = fixture();
        assert_eq!(startup(&ds, "Nope"), None);
        assert_eq!(investor(&ds, "Nobody Capital"), None);
    }

    #[test]
    fn investor_view_matches_its_scope() {
        let ds = fixture();
        let view = investor(&ds, "Tiger Global").unwrap();
        assert_eq!(view.recent.len(), 2);
        // Newest scoped round first.
        assert_eq!(view.recent[0].startup, "Zomato");
        assert_eq!(view.top_startups[0].key, "BYJU'S");
        assert_eq!(view.yearly.len(), 2);
    }

    #[test]
    fn views_are_idempotent() {
        let ds = fixture();
        assert_eq!(overall(&ds, TrendMetric::Total), overall(&ds, TrendMetric::Total));
        assert_eq!(startup(&ds, "Zomato"), startup(&ds, "Zomato"));
        assert_eq!(investor(&ds, "Tiger Global"), investor(&ds, "Tiger Global"));
    }
}
