//! Pull the list of entries out of one parsed feed page.

use serde_json::Value;

/// Return the `feed.entry` list of a parsed page.
///
/// A single match serializes as one object rather than a list, so it is
/// wrapped. `None` means the page has no `feed.entry`, or only an empty
/// `<entry/>`, which the driver reads as "no more results".
pub fn extract_entries(page: &Value) -> Option<Vec<Value>> {
    let entry = page.get("feed")?.get("entry")?;
    match entry {
        Value::Null => None,
        Value::Array(items) => Some(items.clone()),
        other => Some(vec![other.clone()]),
    }
}
