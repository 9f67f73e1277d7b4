//! Drugs rule: cancer-related medication administrations and requests →
//! "Drugs" eligibility entry.

use oncomatch_common::Result;
use tracing::debug;

use crate::classifier::{medication_administrations, medication_requests, ResourcesByType};
use crate::profiles::{MEDICATION_ADMINISTRATION, MEDICATION_REQUEST};
use crate::request::{ApiRequest, EligibilityField, ValueField};
use crate::tables::categories::CATEGORY_DRUGS;
use crate::tables::MappingTables;
use oncomatch_fhir::CodeableConcept;

pub fn map_drugs(
    resources: &ResourcesByType,
    tables: &MappingTables,
    request: &mut ApiRequest,
) -> Result<()> {
    let mut values = Vec::new();

    match medication_administrations(resources) {
        Some(administrations) => {
            for admin in administrations
                .iter()
                .filter(|m| m.meta.has_profile(MEDICATION_ADMINISTRATION))
            {
                collect_medication_codings(
                    tables,
                    admin.medication_codeable_concept.as_ref(),
                    &mut values,
                )?;
            }
        }
        None => debug!("bundle has no MedicationAdministration resource"),
    }

    match medication_requests(resources) {
        Some(requests) => {
            for req in requests
                .iter()
                .filter(|m| m.meta.has_profile(MEDICATION_REQUEST))
            {
                collect_medication_codings(
                    tables,
                    req.medication_codeable_concept.as_ref(),
                    &mut values,
                )?;
            }
        }
        None => debug!("bundle has no MedicationRequest resource"),
    }

    if values.is_empty() {
        return Ok(());
    }
    let category = tables.categories.get(CATEGORY_DRUGS);
    request
        .filter
        .push_eligibility(EligibilityField::coded(category, values));
    Ok(())
}

fn collect_medication_codings(
    tables: &MappingTables,
    concept: Option<&CodeableConcept>,
    values: &mut Vec<ValueField>,
) -> Result<()> {
    for coding in concept.map(|c| c.codings()).unwrap_or(&[]) {
        let Some(code) = coding.code.as_deref() else {
            continue;
        };
        let value_set = tables.dictionaries.value_set_for(coding.system.as_deref())?;
        values.push(ValueField::new(value_set, code));
    }
    Ok(())
}
