//! Friendly filter keys and their upstream feed field names.

use crate::types::{FeedError, FeedResult, FilterSet, FilterValue};

/// Friendly key → upstream field name.
pub const FIELD_MAP: &[(&str, &str)] = &[
    ("piid", "PIID"),
    ("idv_piid", "REF_IDV_PIID"),
    ("idv_agency_id", "REF_IDV_AGENCY_ID"),
    ("modification_number", "MODIFICATION_NUMBER"),
    ("contracting_agency_id", "CONTRACTING_AGENCY_ID"),
    ("contracting_agency_name", "CONTRACTING_AGENCY_NAME"),
    ("contracting_office_id", "CONTRACTING_OFFICE_ID"),
    ("contracting_office_name", "CONTRACTING_OFFICE_NAME"),
    ("funding_agency_id", "FUNDING_AGENCY_ID"),
    ("funding_office_id", "FUNDING_OFFICE_ID"),
    ("funding_office_name", "FUNDING_OFFICE_NAME"),
    ("agency_code", "AGENCY_CODE"),
    ("agency_name", "AGENCY_NAME"),
    ("department_id", "DEPARTMENT_ID"),
    ("department_name", "DEPARTMENT_NAME"),
    ("last_modified_date", "LAST_MOD_DATE"),
    ("last_modified_by", "LAST_MODIFIED_BY"),
    ("award_completion_date", "AWARD_COMPLETION_DATE"),
    ("created_on", "CREATED_DATE"),
    ("date_signed", "SIGNED_DATE"),
    ("effective_date", "EFFECTIVE_DATE"),
    ("estimated_completion_date", "ESTIMATED_COMPLETION_DATE"),
    ("obligated_amount", "OBLIGATED_AMOUNT"),
    ("ultimate_contract_value", "ULTIMATE_CONTRACT_VALUE"),
    ("contract_pricing_type", "TYPE_OF_CONTRACT_PRICING"),
    ("award_status", "AWARD_STATUS"),
    ("contract_type", "CONTRACT_TYPE"),
    ("created_by", "CREATED_BY"),
    ("description", "DESCRIPTION_OF_REQUIREMENT"),
    ("modification_reason", "REASON_FOR_MODIFICATION"),
    ("legislative_mandates", "LEGISLATIVE_MANDATES"),
    ("local_area_setaside", "LOCAL_AREA_SET_ASIDE"),
    ("socioeconomic_indicators", "SOCIO_ECONOMIC_INDICATORS"),
    ("multiyear_contract", "MULTIYEAR_CONTRACT"),
    ("national_interest_code", "NATIONAL_INTEREST_CODE"),
    ("national_interest_description", "NATIONAL_INTEREST_DESCRIPTION"),
    ("naics_code", "PRINCIPAL_NAICS_CODE"),
    ("naics_description", "NAICS_DESCRIPTION"),
    ("product_or_service_code", "PRODUCT_OR_SERVICE_CODE"),
    ("product_or_service_description", "PRODUCT_OR_SERVICE_DESCRIPTION"),
    ("place_of_performance_district", "POP_CONGRESS_DISTRICT_CODE"),
    ("place_of_performance_country", "POP_CONGRESS_COUNTRY"),
    ("place_of_performance_state", "POP_STATE_NAME"),
    ("vendor_city", "VENDOR_ADDRESS_CITY"),
    ("vendor_district", "VENDOR_CONGRESS_DISTRICT_CODE"),
    ("vendor_country_code", "VENDOR_ADDRESS_COUNTRY_CODE"),
    ("vendor_country_name", "VENDOR_ADDRESS_COUNTRY_NAME"),
    ("vendor_duns", "VENDOR_DUNS_NUMBER"),
    ("vendor_dba_name", "VENDOR_DOING_BUSINESS_AS_NAME"),
    ("vendor_name", "VENDOR_NAME"),
    ("vendor_state_code", "VENDOR_ADDRESS_STATE_CODE"),
    ("vendor_state_name", "VENDOR_ADDRESS_STATE_NAME"),
    ("vendor_zip", "VENDOR_ADDRESS_ZIP_CODE"),
];

/// The friendly key carrying the client-side last-modified window.
pub const LAST_MODIFIED_DATE: &str = "last_modified_date";

/// Upstream encoding of boolean filter values.
pub fn boolean_value(value: bool) -> &'static str {
    if value {
        "Y"
    } else {
        "N"
    }
}

/// Look up the upstream name for a friendly key.
pub fn upstream_name(key: &str) -> Option<&'static str> {
    FIELD_MAP
        .iter()
        .find(|(friendly, _)| *friendly == key)
        .map(|(_, upstream)| *upstream)
}

/// Replace every friendly key with its upstream name, keeping order.
///
/// Fails on the first key missing from [`FIELD_MAP`].
pub fn translate(filters: &FilterSet) -> FeedResult<Vec<(&'static str, FilterValue)>> {
    filters
        .iter()
        .map(|(key, value)| {
            upstream_name(key)
                .map(|name| (name, value.clone()))
                .ok_or_else(|| FeedError::UnknownField(key.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_key_translates_alone() {
        for (friendly, upstream) in FIELD_MAP {
            let filters = FilterSet::new().with(*friendly, "x");
            let translated = translate(&filters).unwrap();
            assert_eq!(translated, vec![(*upstream, FilterValue::Text("x".into()))]);
        }
    }

    #[test]
    fn test_table_has_no_duplicate_keys() {
        let keys: HashSet<_> = FIELD_MAP.iter().map(|(k, _)| k).collect();
        assert_eq!(keys.len(), FIELD_MAP.len());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let filters = FilterSet::new().with("vendor_name", "ACME").with("colour", "red");
        match translate(&filters) {
            Err(FeedError::UnknownField(key)) => assert_eq!(key, "colour"),
            other => panic!("expected UnknownField, got {other:?}"),
        }
    }

    #[test]
    fn test_translation_keeps_order_and_values() {
        let filters = FilterSet::new()
            .with("vendor_name", "ACME")
            .with("award_status", true);
        let translated = translate(&filters).unwrap();
        assert_eq!(
            translated,
            vec![
                ("VENDOR_NAME", FilterValue::Text("ACME".into())),
                ("AWARD_STATUS", FilterValue::Bool(true)),
            ]
        );
    }

    #[test]
    fn test_boolean_value() {
        assert_eq!(boolean_value(true), "Y");
        assert_eq!(boolean_value(false), "N");
    }
}
