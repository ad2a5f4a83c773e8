use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;

/// A calendar month, ordered chronologically.
///
/// The derived `Ord` compares `(year, month)` lexicographically, so sorting
/// `YearMonth` keys is chronological sorting. Display produces the
/// dashboard's `"{month}-{year}"` label (month unpadded); ordering never
/// looks at that string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.month, self.year)
    }
}

/// A single funding round as loaded from one CSV row.
///
/// Optional fields hold `None` where the source cell was empty or failed
/// coercion; a bad cell never rejects the row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundingEvent {
    pub date: Option<NaiveDate>,
    pub startup: String,
    pub vertical: Option<String>,
    pub city: Option<String>,
    pub round: Option<String>,
    pub investors: Option<String>,
    pub amount_cr: Option<f64>,
}

impl FundingEvent {
    /// Calendar month of the round, `None` when the date is null.
    ///
    /// Derived on access, never stored, so it cannot drift out of sync with
    /// `date`.
    pub fn year_month(&self) -> Option<YearMonth> {
        self.date.map(|d| YearMonth::new(d.year(), d.month()))
    }

    /// Calendar year of the round, `None` when the date is null.
    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year())
    }

    /// Distinct investor names on this event, in listed order.
    ///
    /// The raw cell is comma-separated free text: segments are trimmed,
    /// empty segments from stray commas are dropped, and a name repeated
    /// within one row is kept once so the row's amount is attributed to it
    /// once, not twice.
    pub fn investor_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        if let Some(raw) = self.investors.as_deref() {
            for segment in raw.split(',') {
                let name = segment.trim();
                if name.is_empty() || names.contains(&name) {
                    continue;
                }
                names.push(name);
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_with_investors(raw: Option<&str>) -> FundingEvent {
        FundingEvent {
            date: None,
            startup: "Acme".to_string(),
            vertical: None,
            city: None,
            round: None,
            investors: raw.map(str::to_string),
            amount_cr: Some(10.0),
        }
    }

    #[test]
    fn year_month_orders_chronologically_not_lexically() {
        let mut months = vec![
            YearMonth::new(2020, 1),
            YearMonth::new(2019, 11),
            YearMonth::new(2019, 12),
        ];
        months.sort();
        let labels: Vec<String> = months.iter().map(|m| m.to_string()).collect();
        // lexical order would put "1-2020" before "11-2019"
        assert_eq!(labels, vec!["11-2019", "12-2019", "1-2020"]);
    }

    #[test]
    fn year_month_is_derived_from_date() {
        let event = FundingEvent {
            date: NaiveDate::from_ymd_opt(2020, 1, 5),
            ..event_with_investors(None)
        };
        assert_eq!(event.year_month(), Some(YearMonth::new(2020, 1)));
        assert_eq!(event.year(), Some(2020));

        let undated = event_with_investors(None);
        assert_eq!(undated.year_month(), None);
        assert_eq!(undated.year(), None);
    }

    #[test]
    fn investor_names_trims_and_drops_empty_segments() {
        let event = event_with_investors(Some(" Tiger Global , Owl Ventures,, "));
        assert_eq!(event.investor_names(), vec!["Tiger Global", "Owl Ventures"]);
    }

    #[test]
    fn investor_names_dedupes_within_one_row() {
        let event = event_with_investors(Some("A, B,B"));
        assert_eq!(event.investor_names(), vec!["A", "B"]);
    }

    #[test]
    fn investor_names_handles_null_cell() {
        let event = event_with_investors(None);
        assert!(event.investor_names().is_empty());
    }
}
