//! Condition rule: primary cancer condition → the single condition
//! filter value.

use oncomatch_common::Result;
use tracing::{debug, warn};

use crate::classifier::{conditions, ResourcesByType};
use crate::profiles::PRIMARY_CANCER_CONDITION;
use crate::request::{ApiRequest, ValueField};
use crate::tables::MappingTables;

pub fn map_condition(
    resources: &ResourcesByType,
    tables: &MappingTables,
    request: &mut ApiRequest,
) -> Result<()> {
    let Some(condition_list) = conditions(resources) else {
        warn!("bundle has no Condition resource, skipping condition filter");
        return Ok(());
    };
    let Some(primary) = condition_list
        .iter()
        .find(|c| c.meta.has_profile(PRIMARY_CANCER_CONDITION))
    else {
        warn!(
            profile = PRIMARY_CANCER_CONDITION,
            "no Condition carries the primary cancer profile, skipping condition filter"
        );
        return Ok(());
    };

    // The vendor takes exactly one condition pair. When the concept
    // carries several codings, each mapped coding overwrites the last:
    // last writer wins.
    for coding in primary.code.as_ref().map(|c| c.codings()).unwrap_or(&[]) {
        let Some(code) = coding.code.as_deref() else {
            debug!("condition coding without a code, skipping");
            continue;
        };
        let value_set = tables.dictionaries.value_set_for(coding.system.as_deref())?;
        request.filter.condition = Some(ValueField::new(value_set, code));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::generate_api_query;
    use crate::classifier::classify;
    use oncomatch_fhir::Bundle;

    const PRIMARY_PROFILE: &str =
        "http://hl7.org/fhir/us/mcode/StructureDefinition/mcode-primary-cancer-condition";

    fn run(bundle: serde_json::Value) -> Result<ApiRequest> {
        let bundle: Bundle = serde_json::from_value(bundle).unwrap();
        let resources = classify(&bundle);
        let tables = MappingTables::new();
        let mut request = generate_api_query(None, 25);
        map_condition(&resources, &tables, &mut request)?;
        Ok(request)
    }

    #[test]
    fn test_last_coding_wins() {
        let request = run(serde_json::json!({
            "resourceType": "Bundle", "type": "collection",
            "entry": [ { "resource": {
                "resourceType": "Condition",
                "meta": { "profile": [PRIMARY_PROFILE] },
                "code": { "coding": [
                    { "system": "http://snomed.info/sct", "code": "254837009" },
                    { "system": "http://hl7.org/fhir/sid/icd-10-cm", "code": "C50.911" }
                ] }
            } } ]
        }))
        .unwrap();
        let condition = request.filter.condition.unwrap();
        assert_eq!(condition.value_id, "C50.911");
        assert_eq!(condition.value_set_id.as_deref(), Some("icd-10-cm"));
    }

    #[test]
    fn test_unprofiled_condition_is_skipped() {
        let request = run(serde_json::json!({
            "resourceType": "Bundle", "type": "collection",
            "entry": [ { "resource": {
                "resourceType": "Condition",
                "code": { "coding": [ { "system": "http://snomed.info/sct", "code": "254837009" } ] }
            } } ]
        }))
        .unwrap();
        assert!(request.filter.condition.is_none());
    }

    #[test]
    fn test_unknown_coding_system_is_fatal() {
        let result = run(serde_json::json!({
            "resourceType": "Bundle", "type": "collection",
            "entry": [ { "resource": {
                "resourceType": "Condition",
                "meta": { "profile": [PRIMARY_PROFILE] },
                "code": { "coding": [ { "system": "http://example.org/local", "code": "X1" } ] }
            } } ]
        }));
        assert!(result.is_err());
    }
}
