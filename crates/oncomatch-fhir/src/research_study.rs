//! Outgoing ResearchStudy shape.
//!
//! One ResearchStudy per matched trial, created once by the result mapper
//! and never mutated afterwards. This mirrors the FHIR R4 ResearchStudy
//! fields the matcher actually populates, plus the vendor's per-site
//! detail (coordinates, address, contacts) carried in `sites`.

use serde::{Deserialize, Serialize};

use crate::resources::CodeableConcept;

pub const RESEARCH_STUDY_PHASE_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/research-study-phase";
pub const CLINICAL_TRIAL_IDENTIFIER_SYSTEM: &str = "http://clinicaltrials.gov/";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#use: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySite {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contacts: Vec<StudyContact>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchStudy {
    #[serde(rename = "resourceType")]
    pub resource_type: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<CodeableConcept>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contact: Vec<StudyContact>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sites: Vec<StudySite>,
}

impl ResearchStudy {
    pub fn new(id: u32) -> Self {
        Self {
            resource_type: "ResearchStudy".to_string(),
            id: format!("study-{id}"),
            ..Default::default()
        }
    }

    pub fn add_official_identifier(&mut self, value: &str) {
        self.identifier.push(Identifier {
            r#use: Some("official".to_string()),
            system: Some(CLINICAL_TRIAL_IDENTIFIER_SYSTEM.to_string()),
            value: Some(value.to_string()),
        });
    }

    pub fn add_contact(&mut self, contact: StudyContact) {
        self.contact.push(contact);
    }

    pub fn add_site(&mut self, site: StudySite) {
        self.sites.push(site);
    }
}
