//! Per-resource wire structs and the shared FHIR datatypes.
//!
//! Every field is optional unless the rules require it: real-world bundles
//! are loosely populated and a missing field must never fail
//! deserialization of the whole bundle.

use serde::{Deserialize, Serialize};

/// Resource metadata. Only `profile` matters here: the extraction rules
/// select resources by substring match against the mCODE profile URLs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Vec<String>>,
}

impl Meta {
    /// True if any meta.profile entry contains `marker` as a substring.
    pub fn has_profile(&self, marker: &str) -> bool {
        self.profile
            .as_deref()
            .is_some_and(|profiles| profiles.iter().any(|p| p.contains(marker)))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeableConcept {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coding: Option<Vec<Coding>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CodeableConcept {
    /// The codings, or an empty slice when absent.
    pub fn codings(&self) -> &[Coding] {
        self.coding.as_deref().unwrap_or(&[])
    }

    /// First coding, if any.
    pub fn first_coding(&self) -> Option<&Coding> {
        self.codings().first()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_codeable_concept: Option<CodeableConcept>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(default)]
    pub meta: Meta,
    /// Received as "YYYY-MM-DD" or "YYYY".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(default)]
    pub meta: Meta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationComponent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_codeable_concept: Option<CodeableConcept>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    #[serde(default)]
    pub meta: Meta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_codeable_concept: Option<CodeableConcept>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_integer: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<Vec<CodeableConcept>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<Vec<ObservationComponent>>,
}

impl Observation {
    /// First coding of the first interpretation concept, if any.
    pub fn interpretation_coding(&self) -> Option<&Coding> {
        self.interpretation
            .as_deref()
            .and_then(|concepts| concepts.first())
            .and_then(CodeableConcept::first_coding)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationAdministration {
    #[serde(default)]
    pub meta: Meta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medication_codeable_concept: Option<CodeableConcept>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationRequest {
    #[serde(default)]
    pub meta: Meta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medication_codeable_concept: Option<CodeableConcept>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Procedure {
    #[serde(default)]
    pub meta: Meta,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_string: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter: Option<Vec<Parameter>>,
}

impl Parameters {
    /// Value of the first parameter named `name`, if present.
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.parameter
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .find(|p| p.name == name)
            .and_then(|p| p.value_string.as_deref())
    }

    /// All values of parameters named `name`, in order.
    pub fn values_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.parameter
            .as_deref()
            .unwrap_or(&[])
            .iter()
            .filter(move |p| p.name == name)
            .filter_map(|p| p.value_string.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_profile_substring_match() {
        let meta = Meta {
            profile: Some(vec![
                "http://hl7.org/fhir/us/mcode/StructureDefinition/mcode-primary-cancer-condition"
                    .to_string(),
            ]),
        };
        assert!(meta.has_profile("mcode-primary-cancer-condition"));
        assert!(!meta.has_profile("mcode-tumor-marker"));
        assert!(!Meta::default().has_profile("mcode-primary-cancer-condition"));
    }

    #[test]
    fn test_parameters_value_lookup() {
        let params: Parameters = serde_json::from_value(serde_json::json!({
            "parameter": [
                { "name": "zipCode", "valueString": "01730" },
                { "name": "phase", "valueString": "phase-1" },
                { "name": "phase", "valueString": "phase-2" }
            ]
        }))
        .unwrap();
        assert_eq!(params.value_of("zipCode"), Some("01730"));
        assert_eq!(params.value_of("travelRadius"), None);
        let phases: Vec<&str> = params.values_of("phase").collect();
        assert_eq!(phases, vec!["phase-1", "phase-2"]);
    }

    #[test]
    fn test_observation_interpretation_coding() {
        let obs: Observation = serde_json::from_value(serde_json::json!({
            "interpretation": [
                { "coding": [ { "system": "http://loinc.org", "code": "LA6576-8" } ] }
            ]
        }))
        .unwrap();
        assert_eq!(
            obs.interpretation_coding().and_then(|c| c.code.as_deref()),
            Some("LA6576-8")
        );
    }
}
