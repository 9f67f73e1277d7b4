//! Vendor trial → FHIR ResearchStudy.
//!
//! One study per trial record, assigned sequential `study-N` ids in
//! retrieval order. A record that does not look like a trial (numeric
//! trialId, string shortTitle) fails the whole conversion; there is no
//! partial result set.

use oncomatch_common::{MatchError, Result};
use oncomatch_fhir::research_study::RESEARCH_STUDY_PHASE_SYSTEM;
use oncomatch_fhir::{CodeableConcept, Coding, ResearchStudy, StudyContact, StudySite};
use oncomatch_mapping::MappingTables;
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VendorTrial {
    trial_id: Option<u64>,
    short_title: Option<String>,
    full_title: Option<String>,
    nct_id: Option<String>,
    phase: Option<VendorPhase>,
    status: Option<VendorStatus>,
    #[serde(default)]
    sites: Vec<VendorSite>,
    #[serde(default)]
    overall_contacts: Vec<VendorContact>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VendorPhase {
    phase_id: Option<String>,
    phase_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VendorStatus {
    status_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VendorSite {
    site_name: Option<String>,
    address: Option<String>,
    city: Option<String>,
    state_code: Option<String>,
    zip_code: Option<String>,
    country_code: Option<String>,
    coordinates: Option<VendorCoordinates>,
    #[serde(default)]
    contacts: Vec<VendorContact>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VendorCoordinates {
    lat: Option<f64>,
    lon: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VendorContact {
    role: Option<String>,
    contact_name: Option<String>,
    phone_number: Option<String>,
    email: Option<String>,
}

/// Convert the accumulated trial records into studies. Fails on the
/// first record that cannot be understood.
pub fn convert_trials(
    tables: &MappingTables,
    trials: &[serde_json::Value],
) -> Result<Vec<ResearchStudy>> {
    let mut studies = Vec::with_capacity(trials.len());
    for (id, trial) in trials.iter().enumerate() {
        studies.push(convert_trial(tables, trial, id as u32)?);
    }
    debug!(n_studies = studies.len(), "converted trials to research studies");
    Ok(studies)
}

pub fn convert_trial(
    tables: &MappingTables,
    raw: &serde_json::Value,
    id: u32,
) -> Result<ResearchStudy> {
    let trial: VendorTrial = serde_json::from_value(raw.clone())
        .map_err(|e| MatchError::Parse(format!("unable to parse trial from server ({e}): {raw}")))?;
    if trial.trial_id.is_none() || trial.short_title.is_none() {
        return Err(MatchError::Parse(format!(
            "unable to parse trial from server (missing trialId or shortTitle): {raw}"
        )));
    }

    let mut study = ResearchStudy::new(id);
    study.title = trial.short_title;
    study.description = trial.full_title;
    if let Some(nct_id) = &trial.nct_id {
        study.add_official_identifier(nct_id);
    }

    if let Some(phase) = &trial.phase {
        let fhir_code = phase
            .phase_id
            .as_deref()
            .and_then(|id| tables.phases.fhir_code(id));
        if fhir_code.is_none() {
            warn!(phase_id = ?phase.phase_id, "vendor phase without a FHIR equivalent");
        }
        study.phase = Some(CodeableConcept {
            coding: Some(vec![Coding {
                system: Some(RESEARCH_STUDY_PHASE_SYSTEM.to_string()),
                code: fhir_code.map(String::from),
                display: fhir_code.map(String::from),
            }]),
            text: phase.phase_name.clone(),
        });
    }

    if let Some(status_id) = trial.status.as_ref().and_then(|s| s.status_id.as_deref()) {
        // Unmapped statuses leave the field unset.
        study.status = tables
            .statuses
            .research_study_status(status_id)
            .map(String::from);
    }

    for contact in &trial.overall_contacts {
        study.add_contact(study_contact(contact));
    }
    for site in &trial.sites {
        study.add_site(StudySite {
            name: site.site_name.clone(),
            latitude: site.coordinates.as_ref().and_then(|c| c.lat),
            longitude: site.coordinates.as_ref().and_then(|c| c.lon),
            address: site.address.clone(),
            city: site.city.clone(),
            state: site.state_code.clone(),
            zip_code: site.zip_code.clone(),
            country: site.country_code.clone(),
            contacts: site.contacts.iter().map(study_contact).collect(),
        });
    }

    Ok(study)
}

fn study_contact(contact: &VendorContact) -> StudyContact {
    StudyContact {
        name: contact.contact_name.clone(),
        role: contact.role.clone(),
        phone: contact.phone_number.clone(),
        email: contact.email.clone(),
    }
}
