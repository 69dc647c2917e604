//! Recover a record's last-modified timestamp from its award or IDV data.

use chrono::NaiveDateTime;
use serde_json::Value;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Resolve `lastModifiedDate`, falling back to `createdDate`.
///
/// Looks under `IDV` when present, otherwise `award`, then
/// `transactionInformation`. Any missing key or unparseable value yields
/// `None`.
pub fn resolve_modified_date(content: &Value) -> Option<NaiveDateTime> {
    let award = content.get("IDV").or_else(|| content.get("award"))?;
    let transaction = award.get("transactionInformation")?;
    let raw = transaction
        .get("lastModifiedDate")
        .or_else(|| transaction.get("createdDate"))?;
    NaiveDateTime::parse_from_str(raw.as_str()?.trim(), TIMESTAMP_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn ts(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_prefers_last_modified() {
        let content = json!({"award": {"transactionInformation": {
            "createdDate": "2020-01-01 00:00:00",
            "lastModifiedDate": "2021-03-04 12:30:15"
        }}});
        assert_eq!(resolve_modified_date(&content), Some(ts(2021, 3, 4, 12, 30, 15)));
    }

    #[test]
    fn test_falls_back_to_created() {
        let content = json!({"award": {"transactionInformation": {
            "createdDate": "2021-05-01 00:00:00"
        }}});
        assert_eq!(resolve_modified_date(&content), Some(ts(2021, 5, 1, 0, 0, 0)));
    }

    #[test]
    fn test_idv_takes_precedence() {
        let content = json!({
            "IDV": {"transactionInformation": {"lastModifiedDate": "2019-02-03 04:05:06"}},
            "award": {"transactionInformation": {"lastModifiedDate": "2001-01-01 00:00:00"}}
        });
        assert_eq!(resolve_modified_date(&content), Some(ts(2019, 2, 3, 4, 5, 6)));
    }

    #[test]
    fn test_missing_pieces_are_unknown() {
        assert_eq!(resolve_modified_date(&json!({})), None);
        assert_eq!(resolve_modified_date(&json!({"award": {}})), None);
        assert_eq!(
            resolve_modified_date(&json!({"award": {"transactionInformation": {}}})),
            None
        );
        assert_eq!(resolve_modified_date(&Value::Null), None);
    }

    #[test]
    fn test_malformed_values_are_unknown() {
        let bad_format = json!({"award": {"transactionInformation": {
            "lastModifiedDate": "2021-05-01T00:00:00Z"
        }}});
        assert_eq!(resolve_modified_date(&bad_format), None);

        let not_text = json!({"award": {"transactionInformation": {
            "lastModifiedDate": {"@xsi:nil": "true"}
        }}});
        assert_eq!(resolve_modified_date(&not_text), None);
    }

    #[test]
    fn test_unparseable_last_modified_does_not_fall_back() {
        let content = json!({"award": {"transactionInformation": {
            "lastModifiedDate": "",
            "createdDate": "2021-05-01 00:00:00"
        }}});
        assert_eq!(resolve_modified_date(&content), None);
    }
}
