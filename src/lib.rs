//! Startup-funding aggregation engine.
//!
//! Loads a cleaned funding CSV once into an immutable [`FundingDataset`] and
//! derives summaries, time series, rankings and distributions from it. The
//! `fundlens` binary is a thin terminal harness over these modules.

pub mod dataset;
pub mod engine;
pub mod ingest;
pub mod view;

pub use dataset::{FundingDataset, FundingEvent, YearMonth};
