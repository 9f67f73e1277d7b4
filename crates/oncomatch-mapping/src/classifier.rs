//! Resource classifier: groups a flat bundle by resource kind.

use std::collections::HashMap;

use oncomatch_fhir::{
    Bundle, Condition, MedicationAdministration, MedicationRequest, Observation, Parameters,
    Patient, Procedure, Resource,
};

/// Resource kind keys, matching the FHIR `resourceType` values.
pub mod kind {
    pub const PATIENT: &str = "Patient";
    pub const CONDITION: &str = "Condition";
    pub const OBSERVATION: &str = "Observation";
    pub const MEDICATION_ADMINISTRATION: &str = "MedicationAdministration";
    pub const MEDICATION_REQUEST: &str = "MedicationRequest";
    pub const PROCEDURE: &str = "Procedure";
    pub const PARAMETERS: &str = "Parameters";
}

/// Resources grouped by kind, lists in encounter order. Built once per
/// request and discarded after mapping completes.
pub type ResourcesByType<'a> = HashMap<&'static str, Vec<&'a Resource>>;

/// Group the bundle's resources by declared kind. Entries without a
/// resource payload are skipped; a kind that never occurs simply has no
/// key, which each rule treats as a no-op.
pub fn classify(bundle: &Bundle) -> ResourcesByType<'_> {
    let mut map: ResourcesByType = HashMap::new();
    for entry in &bundle.entry {
        if let Some(resource) = &entry.resource {
            map.entry(resource.kind()).or_default().push(resource);
        }
    }
    map
}

macro_rules! typed_accessor {
    ($name:ident, $key:expr, $variant:ident, $ty:ty) => {
        /// Typed view of one resource kind. `None` means the kind was
        /// absent from the bundle entirely.
        pub fn $name<'a>(resources: &ResourcesByType<'a>) -> Option<Vec<&'a $ty>> {
            resources.get($key).map(|list| {
                list.iter()
                    .filter_map(|r| match r {
                        Resource::$variant(inner) => Some(inner),
                        _ => None,
                    })
                    .collect()
            })
        }
    };
}

typed_accessor!(patients, kind::PATIENT, Patient, Patient);
typed_accessor!(conditions, kind::CONDITION, Condition, Condition);
typed_accessor!(observations, kind::OBSERVATION, Observation, Observation);
typed_accessor!(
    medication_administrations,
    kind::MEDICATION_ADMINISTRATION,
    MedicationAdministration,
    MedicationAdministration
);
typed_accessor!(
    medication_requests,
    kind::MEDICATION_REQUEST,
    MedicationRequest,
    MedicationRequest
);
typed_accessor!(procedures, kind::PROCEDURE, Procedure, Procedure);
typed_accessor!(parameters, kind::PARAMETERS, Parameters, Parameters);

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(entries: serde_json::Value) -> Bundle {
        serde_json::from_value(serde_json::json!({
            "resourceType": "Bundle",
            "type": "collection",
            "entry": entries
        }))
        .unwrap()
    }

    #[test]
    fn test_classify_groups_by_kind_in_order() {
        let bundle = bundle(serde_json::json!([
            { "resource": { "resourceType": "Condition", "code": { "text": "first" } } },
            { "resource": { "resourceType": "Patient", "birthDate": "1952" } },
            { "resource": { "resourceType": "Condition", "code": { "text": "second" } } }
        ]));
        let map = classify(&bundle);
        assert_eq!(map[kind::CONDITION].len(), 2);
        assert_eq!(map[kind::PATIENT].len(), 1);
        let conds = conditions(&map).unwrap();
        assert_eq!(
            conds[0].code.as_ref().unwrap().text.as_deref(),
            Some("first")
        );
        assert_eq!(
            conds[1].code.as_ref().unwrap().text.as_deref(),
            Some("second")
        );
    }

    #[test]
    fn test_classify_skips_missing_payloads() {
        let bundle = bundle(serde_json::json!([
            { },
            { "resource": { "resourceType": "Patient" } }
        ]));
        let map = classify(&bundle);
        assert_eq!(map.len(), 1);
        assert_eq!(map[kind::PATIENT].len(), 1);
    }

    #[test]
    fn test_absent_kind_yields_none() {
        let bundle = bundle(serde_json::json!([]));
        let map = classify(&bundle);
        assert!(observations(&map).is_none());
        assert!(conditions(&map).is_none());
    }
}
