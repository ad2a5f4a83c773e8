//! The load-once event repository.
//!
//! A [`FundingDataset`] is constructed once at startup and passed by
//! reference to every aggregation call. It owns the immutable event table;
//! there is no global cache and no write path after load.

use anyhow::Result;
use once_cell::sync::OnceCell;
use std::collections::BTreeSet;
use std::path::Path;

use crate::ingest::{self, LoadReport};

mod event;
pub use event::{FundingEvent, YearMonth};

/// Immutable snapshot of the funding table plus memoized selector indexes.
pub struct FundingDataset {
    events: Vec<FundingEvent>,
    report: LoadReport,
    /// Lazily computed, at most once per dataset.
    startups: OnceCell<Vec<String>>,
    investors: OnceCell<Vec<String>>,
}

impl FundingDataset {
    /// Load the CSV at `path`; the dataset is immutable afterwards.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let (events, report) = ingest::load_events(path)?;
        Ok(Self::new(events, report))
    }

    /// Wrap already-typed events (tests and embedding callers).
    pub fn from_events(events: Vec<FundingEvent>) -> Self {
        let report = LoadReport {
            rows: events.len(),
            ..LoadReport::default()
        };
        Self::new(events, report)
    }

    fn new(events: Vec<FundingEvent>, report: LoadReport) -> Self {
        Self {
            events,
            report,
            startups: OnceCell::new(),
            investors: OnceCell::new(),
        }
    }

    pub fn events(&self) -> &[FundingEvent] {
        &self.events
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Sorted distinct startup names for selector population; blank names
    /// are omitted. Computed on first call, reused afterwards.
    pub fn startups(&self) -> &[String] {
        self.startups.get_or_init(|| {
            let set: BTreeSet<&str> = self
                .events
                .iter()
                .map(|e| e.startup.trim())
                .filter(|s| !s.is_empty())
                .collect();
            set.into_iter().map(str::to_string).collect()
        })
    }

    /// Sorted distinct individual investor names, split out of the raw
    /// comma-separated cells with [`FundingEvent::investor_names`].
    /// Computed on first call, reused afterwards.
    pub fn investors(&self) -> &[String] {
        self.investors.get_or_init(|| {
            let mut set: BTreeSet<String> = BTreeSet::new();
            for event in &self.events {
                for name in event.investor_names() {
                    set.insert(name.to_string());
                }
            }
            set.into_iter().collect()
        })
    }
}
