//! Request assembly: the seed request plus the rule pipeline.

use oncomatch_common::Result;
use oncomatch_fhir::Bundle;
use tracing::{debug, instrument};

use crate::classifier::classify;
use crate::request::{
    ApiRequest, FilterFields, SortClause, FIRST_PAGE_NUMBER, RESULT_FIELDS, SORT_FIELD_DISTANCE,
    SORT_ORDER_ASC,
};
use crate::rules::RULES;
use crate::tables::MappingTables;

/// Seed request with pagination, projection and sort defaults. The
/// filter starts empty and the rules fill it in.
pub fn generate_api_query(country_filter: Option<&str>, page_size: u32) -> ApiRequest {
    ApiRequest {
        page: FIRST_PAGE_NUMBER,
        page_size,
        fields: RESULT_FIELDS.iter().map(|f| f.to_string()).collect(),
        filter: FilterFields {
            countries: country_filter.map(String::from).into_iter().collect(),
            ..FilterFields::default()
        },
        origin: None,
        sort: vec![SortClause {
            field: SORT_FIELD_DISTANCE.to_string(),
            order: SORT_ORDER_ASC.to_string(),
        }],
    }
}

/// Run the full rule pipeline over a bundle, folding every extracted
/// clinical fact into `request`. The first fatal mapping error aborts
/// the assembly; the request must not be sent after a failure.
#[instrument(skip_all, fields(n_entries = bundle.entry.len()))]
pub fn convert_bundle_to_api_request(
    bundle: &Bundle,
    tables: &MappingTables,
    request: &mut ApiRequest,
) -> Result<()> {
    let resources = classify(bundle);
    debug!(n_kinds = resources.len(), "classified bundle");
    for rule in RULES {
        rule(&resources, tables, request)?;
    }
    debug!(
        n_eligibility = request.filter.eligibility.len(),
        has_condition = request.filter.condition.is_some(),
        "assembled filter request"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_request_defaults() {
        let request = generate_api_query(Some("US"), 25);
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, 25);
        assert_eq!(request.fields.len(), 8);
        assert_eq!(request.filter.countries, vec!["US".to_string()]);
        assert_eq!(request.sort[0].field, "distance");
        assert_eq!(request.sort[0].order, "asc");
    }

    #[test]
    fn test_empty_bundle_leaves_filter_untouched() {
        let bundle: Bundle = serde_json::from_value(serde_json::json!({
            "resourceType": "Bundle", "type": "collection", "entry": []
        }))
        .unwrap();
        let tables = MappingTables::new();
        let mut request = generate_api_query(None, 25);
        convert_bundle_to_api_request(&bundle, &tables, &mut request).unwrap();

        assert!(request.filter.condition.is_none());
        assert!(request.filter.eligibility.is_empty());
        assert!(request.filter.phases.is_none());
        assert!(request.filter.distance.is_none());
        assert!(request.filter.countries.is_empty());
        assert!(request.origin.is_none());
    }

    #[test]
    fn test_full_bundle_runs_every_rule() {
        let bundle: Bundle = serde_json::from_value(serde_json::json!({
            "resourceType": "Bundle", "type": "collection",
            "entry": [
                { "resource": { "resourceType": "Patient", "birthDate": "1952-03-04" } },
                { "resource": {
                    "resourceType": "Parameters",
                    "parameter": [ { "name": "phase", "valueString": "phase-2" } ]
                } },
                { "resource": {
                    "resourceType": "Condition",
                    "meta": { "profile": [
                        "http://hl7.org/fhir/us/mcode/StructureDefinition/mcode-primary-cancer-condition"
                    ] },
                    "code": { "coding": [
                        { "system": "http://snomed.info/sct", "code": "254837009" }
                    ] }
                } },
                { "resource": {
                    "resourceType": "Observation",
                    "meta": { "profile": [
                        "http://hl7.org/fhir/us/mcode/StructureDefinition/mcode-ecog-performance-status"
                    ] },
                    "valueInteger": 1
                } }
            ]
        }))
        .unwrap();
        let tables = MappingTables::new();
        let mut request = generate_api_query(None, 25);
        convert_bundle_to_api_request(&bundle, &tables, &mut request).unwrap();

        assert_eq!(
            request.filter.condition.as_ref().unwrap().value_id,
            "254837009"
        );
        assert_eq!(request.filter.phases.as_deref(), Some(&["2".to_string()][..]));
        // Age and ECOG entries.
        assert_eq!(request.filter.eligibility.len(), 2);
        assert_eq!(request.filter.eligibility[0].field_id, "6");
        assert_eq!(
            request.filter.eligibility[0].value.as_deref(),
            Some("04031952")
        );
        assert_eq!(request.filter.eligibility[1].field_id, "14");
    }
}
