//! Human-readable rendering of records and the field table.

use fpds_feed::{Record, FIELD_MAP};

/// One line per record: modified timestamp, id, title.
pub fn summary_line(record: &Record) -> String {
    let modified = record
        .modified
        .map(|ts| ts.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{modified:<19}  {}  {}",
        record.id().unwrap_or("-"),
        record.title().unwrap_or("")
    )
}

/// Friendly key and upstream name, aligned in two columns.
pub fn field_table() -> String {
    let width = FIELD_MAP.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    FIELD_MAP
        .iter()
        .map(|(friendly, upstream)| format!("{friendly:<width$}  {upstream}"))
        .collect::<Vec<_>>()
        .join("\n")
}
