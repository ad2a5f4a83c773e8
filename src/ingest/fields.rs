use chrono::NaiveDate;

/// Date formats accepted for the `date` column, day-first forms before the
/// unambiguous ISO fallbacks.
const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d", "%Y/%m/%d"];

/// Parse a calendar date, `None` when the cell is empty or matches no
/// accepted format.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Parse a crore amount, `None` for empty, non-numeric, or non-finite cells.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

/// Keep a free-text cell, `None` when it is empty after trimming.
pub fn non_empty(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}
