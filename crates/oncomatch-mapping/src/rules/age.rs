//! Age rule: patient birth date → scalar Age eligibility value.

use oncomatch_common::Result;
use tracing::{debug, warn};

use crate::classifier::{patients, ResourcesByType};
use crate::request::{ApiRequest, EligibilityField};
use crate::tables::categories::CATEGORY_AGE;
use crate::tables::MappingTables;

pub fn map_age(
    resources: &ResourcesByType,
    tables: &MappingTables,
    request: &mut ApiRequest,
) -> Result<()> {
    let Some(patient_list) = patients(resources) else {
        debug!("bundle has no Patient resource, skipping age filter");
        return Ok(());
    };
    let Some(patient) = patient_list.first() else {
        return Ok(());
    };
    let Some(birth_date) = patient.birth_date.as_deref() else {
        warn!("Patient resource has no birthDate, skipping age filter");
        return Ok(());
    };

    let category = tables.categories.get(CATEGORY_AGE);
    request
        .filter
        .push_eligibility(EligibilityField::scalar(category, vendor_birth_date(birth_date)));
    Ok(())
}

/// Reformat a FHIR birth date ("YYYY-MM-DD" or "YYYY") into the vendor's
/// "DDMMYYYY" layout, zero-filling day and month as "0101" when only a
/// year was recorded.
fn vendor_birth_date(birth_date: &str) -> String {
    let parts: Vec<&str> = birth_date.split('-').collect();
    match parts.as_slice() {
        [year, month, day] => format!("{day}{month}{year}"),
        _ => format!("0101{}", parts[0]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::generate_api_query;
    use crate::classifier::classify;
    use oncomatch_fhir::Bundle;

    fn run(bundle: serde_json::Value) -> ApiRequest {
        let bundle: Bundle = serde_json::from_value(bundle).unwrap();
        let resources = classify(&bundle);
        let tables = MappingTables::new();
        let mut request = generate_api_query(None, 25);
        map_age(&resources, &tables, &mut request).unwrap();
        request
    }

    #[test]
    fn test_full_birth_date() {
        let request = run(serde_json::json!({
            "resourceType": "Bundle", "type": "collection",
            "entry": [ { "resource": { "resourceType": "Patient", "birthDate": "1952-03-04" } } ]
        }));
        let field = &request.filter.eligibility[0];
        assert_eq!(field.field_id, "6");
        assert_eq!(field.value.as_deref(), Some("04031952"));
    }

    #[test]
    fn test_year_only_birth_date() {
        let request = run(serde_json::json!({
            "resourceType": "Bundle", "type": "collection",
            "entry": [ { "resource": { "resourceType": "Patient", "birthDate": "1952" } } ]
        }));
        assert_eq!(
            request.filter.eligibility[0].value.as_deref(),
            Some("01011952")
        );
    }

    #[test]
    fn test_missing_birth_date_is_noop() {
        let request = run(serde_json::json!({
            "resourceType": "Bundle", "type": "collection",
            "entry": [ { "resource": { "resourceType": "Patient" } } ]
        }));
        assert!(request.filter.eligibility.is_empty());
    }

    #[test]
    fn test_missing_patient_is_noop() {
        let request = run(serde_json::json!({
            "resourceType": "Bundle", "type": "collection", "entry": []
        }));
        assert!(request.filter.eligibility.is_empty());
    }
}
