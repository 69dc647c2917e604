//! Parsing of `--filter key=value` and date range arguments.

use chrono::NaiveDate;

use fpds_feed::{DateRange, FilterValue};

const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), INPUT_DATE_FORMAT).ok()
}

/// Parse `START,END` (both `YYYY-MM-DD`) into a date range.
pub fn parse_date_range(s: &str) -> Result<DateRange, String> {
    let (start, end) = s
        .split_once(',')
        .ok_or_else(|| format!("expected START,END but got {s:?}"))?;
    let start = parse_date(start).ok_or_else(|| format!("invalid start date {start:?}"))?;
    let end = parse_date(end).ok_or_else(|| format!("invalid end date {end:?}"))?;
    Ok(DateRange::new(start, end))
}

/// Infer a filter value: `true`/`false`, `YYYY-MM-DD`, `YYYY-MM-DD,YYYY-MM-DD`, else text.
pub fn parse_filter_value(s: &str) -> FilterValue {
    match s {
        "true" => return FilterValue::Bool(true),
        "false" => return FilterValue::Bool(false),
        _ => {}
    }
    if let Some(date) = parse_date(s) {
        return FilterValue::Date(date);
    }
    if let Ok(range) = parse_date_range(s) {
        return FilterValue::DateRange(range);
    }
    FilterValue::Text(s.to_string())
}

/// Parse one `key=value` filter argument.
pub fn parse_filter(s: &str) -> Result<(String, FilterValue), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value but got {s:?}"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing filter key in {s:?}"));
    }
    Ok((key.to_string(), parse_filter_value(value)))
}
