//! CSV ingestion: every cell is coerced exactly once here, and nothing
//! downstream re-parses strings.
//!
//! Structural problems (unreadable file, missing contract column, a record
//! the CSV parser cannot yield) abort the load. Cell-level problems never
//! do: a bad date or amount coerces to null and is tallied in the
//! [`LoadReport`].

use anyhow::{Context, Result};
use csv::StringRecord;
use serde::Serialize;
use std::{fs::File, io::BufReader, path::Path};
use tracing::{info, instrument, warn};

use crate::dataset::FundingEvent;

pub mod fields;

/// Header names of the source CSV; these are the external contract.
pub const COL_DATE: &str = "date";
pub const COL_STARTUP: &str = "startup";
pub const COL_VERTICAL: &str = "vertical";
pub const COL_CITY: &str = "city";
pub const COL_ROUND: &str = "rounds";
pub const COL_INVESTORS: &str = "investors";
pub const COL_AMOUNT: &str = "amount(in cr)";

/// Tallies from one load.
///
/// `null_dates`/`null_amounts` count rows whose cell was empty or failed
/// coercion — both are plain nulls to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    pub rows: usize,
    pub null_dates: usize,
    pub null_amounts: usize,
}

/// Positions of the contract columns within this file's header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    date: usize,
    startup: usize,
    vertical: usize,
    city: usize,
    round: usize,
    investors: usize,
    amount: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| -> Result<usize> {
            headers
                .iter()
                // strip the BOM some spreadsheet exports prepend to the
                // first header, or the first contract column goes "missing"
                .position(|h| h.trim().trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
                .with_context(|| format!("missing required column `{}`", name))
        };
        Ok(Self {
            date: find(COL_DATE)?,
            startup: find(COL_STARTUP)?,
            vertical: find(COL_VERTICAL)?,
            city: find(COL_CITY)?,
            round: find(COL_ROUND)?,
            investors: find(COL_INVESTORS)?,
            amount: find(COL_AMOUNT)?,
        })
    }
}

/// Load every row of `path` into typed events, plus the coercion tallies.
#[instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_events<P: AsRef<Path>>(path: P) -> Result<(Vec<FundingEvent>, LoadReport)> {
    let file = File::open(path.as_ref())
        .with_context(|| format!("opening funding CSV `{}`", path.as_ref().display()))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let headers = reader.headers().context("reading CSV header row")?.clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut events = Vec::new();
    let mut report = LoadReport::default();

    for (idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
        let event = event_from_record(&record, columns);

        if event.date.is_none() {
            report.null_dates += 1;
        }
        if event.amount_cr.is_none() {
            report.null_amounts += 1;
        }
        events.push(event);
    }
    report.rows = events.len();

    info!(
        rows = report.rows,
        null_dates = report.null_dates,
        null_amounts = report.null_amounts,
        "loaded funding events"
    );
    Ok((events, report))
}

fn event_from_record(record: &StringRecord, columns: ColumnIndex) -> FundingEvent {
    // flexible(true) lets short records through; absent cells read as empty
    let cell = |idx: usize| record.get(idx).unwrap_or("");

    let raw_date = cell(columns.date);
    let date = fields::parse_date(raw_date);
    if date.is_none() && !raw_date.is_empty() {
        warn!(value = raw_date, "unparsable date coerced to null");
    }

    let raw_amount = cell(columns.amount);
    let amount_cr = fields::parse_amount(raw_amount);
    if amount_cr.is_none() && !raw_amount.is_empty() {
        warn!(value = raw_amount, "non-numeric amount coerced to null");
    }

    FundingEvent {
        date,
        startup: cell(columns.startup).to_string(),
        vertical: fields::non_empty(cell(columns.vertical)),
        city: fields::non_empty(cell(columns.city)),
        round: fields::non_empty(cell(columns.round)),
        investors: fields::non_empty(cell(columns.investors)),
        amount_cr,
    }
}
