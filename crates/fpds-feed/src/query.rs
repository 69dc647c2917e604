//! Encoding of translated filters into the feed's `q` parameter.

use chrono::NaiveDate;

use crate::fields::boolean_value;
use crate::types::{DateRange, FilterValue};

const DATE_FORMAT: &str = "%Y/%m/%d";

/// Render two dates as the bracketed range token, e.g. `[2020/01/02,2020/03/04]`.
pub fn date_format(start: NaiveDate, end: NaiveDate) -> String {
    format!("[{},{}]", start.format(DATE_FORMAT), end.format(DATE_FORMAT))
}

/// Render one filter value the way the feed expects it.
pub fn encode_value(value: &FilterValue) -> String {
    match value {
        FilterValue::Text(s) => s.clone(),
        FilterValue::Date(d) => d.format(DATE_FORMAT).to_string(),
        FilterValue::DateRange(DateRange { start, end }) => date_format(*start, *end),
        FilterValue::Bool(b) => boolean_value(*b).to_string(),
    }
}

/// Join `FIELD:value` tokens with single spaces, in the given order.
pub fn combine_params<K: AsRef<str>>(params: &[(K, FilterValue)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}:{}", key.as_ref(), encode_value(value)))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_format() {
        assert_eq!(
            date_format(date(2020, 1, 2), date(2020, 3, 4)),
            "[2020/01/02,2020/03/04]"
        );
    }

    #[test]
    fn test_combine_params_order_and_spacing() {
        let params = vec![
            ("VENDOR_NAME", FilterValue::Text("ACME".into())),
            ("AWARD_STATUS", FilterValue::Bool(false)),
            ("SIGNED_DATE", FilterValue::Date(date(2019, 7, 4))),
        ];
        assert_eq!(
            combine_params(&params),
            "VENDOR_NAME:ACME AWARD_STATUS:N SIGNED_DATE:2019/07/04"
        );
    }

    #[test]
    fn test_range_value_becomes_token() {
        let params = vec![(
            "LAST_MOD_DATE",
            FilterValue::DateRange(DateRange::new(date(2021, 1, 1), date(2021, 1, 31))),
        )];
        assert_eq!(combine_params(&params), "LAST_MOD_DATE:[2021/01/01,2021/01/31]");
    }

    #[test]
    fn test_text_passes_through_verbatim() {
        let params = vec![("LAST_MOD_DATE", FilterValue::Text("2021/01/15".into()))];
        assert_eq!(combine_params(&params), "LAST_MOD_DATE:2021/01/15");
    }

    #[test]
    fn test_empty_params() {
        let params: Vec<(&str, FilterValue)> = Vec::new();
        assert_eq!(combine_params(&params), "");
    }
}
