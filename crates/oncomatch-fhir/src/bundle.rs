//! Patient bundle wire model.

use serde::{Deserialize, Serialize};

use crate::resources::{
    Condition, MedicationAdministration, MedicationRequest, Observation, Parameters, Patient,
    Procedure,
};

/// A FHIR Bundle: an ordered collection of clinical resources. Immutable
/// input, owned by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    #[serde(rename = "resourceType", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub bundle_type: Option<String>,
    #[serde(default)]
    pub entry: Vec<BundleEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Resource>,
}

/// The resource kinds the matcher reads. Anything else lands on
/// `Unsupported` and is skipped by the classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "resourceType")]
pub enum Resource {
    Patient(Patient),
    Condition(Condition),
    Observation(Observation),
    MedicationAdministration(MedicationAdministration),
    MedicationRequest(MedicationRequest),
    Procedure(Procedure),
    Parameters(Parameters),
    #[serde(other)]
    Unsupported,
}

impl Resource {
    /// The declared resource kind, used as the classification key.
    pub fn kind(&self) -> &'static str {
        match self {
            Resource::Patient(_) => "Patient",
            Resource::Condition(_) => "Condition",
            Resource::Observation(_) => "Observation",
            Resource::MedicationAdministration(_) => "MedicationAdministration",
            Resource::MedicationRequest(_) => "MedicationRequest",
            Resource::Procedure(_) => "Procedure",
            Resource::Parameters(_) => "Parameters",
            Resource::Unsupported => "Unsupported",
        }
    }
}
