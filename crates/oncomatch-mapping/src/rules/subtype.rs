//! Subtype rule: histology/morphology extension on the primary cancer
//! condition → "Diagnosis" eligibility entry.

use oncomatch_common::Result;
use tracing::debug;

use crate::classifier::{conditions, ResourcesByType};
use crate::profiles::{HISTOLOGY_MORPHOLOGY, PRIMARY_CANCER_CONDITION};
use crate::request::{ApiRequest, EligibilityField, ValueField};
use crate::tables::categories::CATEGORY_DIAGNOSIS;
use crate::tables::MappingTables;

pub fn map_subtype(
    resources: &ResourcesByType,
    tables: &MappingTables,
    request: &mut ApiRequest,
) -> Result<()> {
    let Some(condition_list) = conditions(resources) else {
        debug!("bundle has no Condition resource, skipping subtype filter");
        return Ok(());
    };
    let Some(primary) = condition_list
        .iter()
        .find(|c| c.meta.has_profile(PRIMARY_CANCER_CONDITION))
    else {
        debug!("no primary cancer condition, skipping subtype filter");
        return Ok(());
    };

    let histology = primary
        .extension
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .find(|ext| {
            ext.url
                .as_deref()
                .is_some_and(|url| url.contains(HISTOLOGY_MORPHOLOGY))
        });
    let Some(coding) = histology
        .and_then(|ext| ext.value_codeable_concept.as_ref())
        .and_then(|concept| concept.first_coding())
    else {
        debug!("primary condition has no histology/morphology coding, skipping subtype filter");
        return Ok(());
    };
    let Some(code) = coding.code.as_deref() else {
        debug!("histology coding without a code, skipping subtype filter");
        return Ok(());
    };

    let value_set = tables.dictionaries.value_set_for(coding.system.as_deref())?;
    let category = tables.categories.get(CATEGORY_DIAGNOSIS);
    request.filter.push_eligibility(EligibilityField::coded(
        category,
        vec![ValueField::new(value_set, code)],
    ));
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
    const HISTOLOGY_URL: &str =
        "http://hl7.org/fhir/us/mcode/StructureDefinition/mcode-histology-morphology-behavior";

    fn run(bundle: serde_json::Value) -> ApiRequest {
        let bundle: Bundle = serde_json::from_value(bundle).unwrap();
        let resources = classify(&bundle);
        let tables = MappingTables::new();
        let mut request = generate_api_query(None, 25);
        map_subtype(&resources, &tables, &mut request).unwrap();
        request
    }

    #[test]
    fn test_histology_extension_mapped() {
        let request = run(serde_json::json!({
            "resourceType": "Bundle", "type": "collection",
            "entry": [ { "resource": {
                "resourceType": "Condition",
                "meta": { "profile": [PRIMARY_PROFILE] },
                "code": { "coding": [] },
                "extension": [ {
                    "url": HISTOLOGY_URL,
                    "valueCodeableConcept": { "coding": [
                        { "system": "http://snomed.info/sct", "code": "32913002" }
                    ] }
                } ]
            } } ]
        }));
        let field = &request.filter.eligibility[0];
        assert_eq!(field.field_id, "19");
        let values = field.values.as_ref().unwrap();
        assert_eq!(values[0].value_id, "32913002");
        assert_eq!(values[0].value_set_id.as_deref(), Some("2.16.840.1.113883.6.96"));
    }

    #[test]
    fn test_no_histology_coding_pushes_nothing() {
        // An unrelated extension must not produce an empty Diagnosis
        // entry.
        let request = run(serde_json::json!({
            "resourceType": "Bundle", "type": "collection",
            "entry": [ { "resource": {
                "resourceType": "Condition",
                "meta": { "profile": [PRIMARY_PROFILE] },
                "extension": [ { "url": "http://example.org/unrelated" } ]
            } } ]
        }));
        assert!(request.filter.eligibility.is_empty());
    }
}
