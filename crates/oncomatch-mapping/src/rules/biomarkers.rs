//! Biomarker rule: tumor-marker and genomic-variant observations →
//! one shared "Biomarkers" eligibility entry.

use oncomatch_common::Result;
use tracing::debug;

use crate::classifier::{observations, ResourcesByType};
use crate::profiles::{GENOMIC_VARIANT, LOINC_GENE_STUDIED_ID_HGNC, TUMOR_MARKER};
use crate::request::{ApiRequest, EligibilityField, ValueField};
use crate::tables::categories::CATEGORY_BIOMARKERS;
use crate::tables::MappingTables;
use oncomatch_fhir::Observation;

pub fn map_biomarkers(
    resources: &ResourcesByType,
    tables: &MappingTables,
    request: &mut ApiRequest,
) -> Result<()> {
    let Some(observation_list) = observations(resources) else {
        debug!("bundle has no Observation resource, skipping biomarker filter");
        return Ok(());
    };

    let mut values = Vec::new();

    for obs in observation_list
        .iter()
        .filter(|o| o.meta.has_profile(TUMOR_MARKER))
    {
        let status = marker_status(tables, obs);
        for coding in obs.code.as_ref().map(|c| c.codings()).unwrap_or(&[]) {
            let Some(code) = coding.code.as_deref() else {
                continue;
            };
            let value_set = tables.dictionaries.value_set_for(coding.system.as_deref())?;
            let mut value = ValueField::new(value_set, code);
            value.status = status.map(String::from);
            values.push(value);
        }
    }

    for obs in observation_list
        .iter()
        .filter(|o| o.meta.has_profile(GENOMIC_VARIANT))
    {
        let status = marker_status(tables, obs);
        for component in obs.component.as_deref().unwrap_or(&[]) {
            let is_gene_studied = component
                .code
                .as_ref()
                .and_then(|c| c.first_coding())
                .and_then(|c| c.code.as_deref())
                == Some(LOINC_GENE_STUDIED_ID_HGNC);
            if !is_gene_studied {
                continue;
            }
            let Some(gene) = component
                .value_codeable_concept
                .as_ref()
                .and_then(|c| c.first_coding())
            else {
                continue;
            };
            let Some(code) = gene.code.as_deref() else {
                continue;
            };
            let value_set = tables.dictionaries.value_set_for(gene.system.as_deref())?;
            let mut value = ValueField::new(value_set, code);
            value.status = status.map(String::from);
            values.push(value);
        }
    }

    if values.is_empty() {
        debug!("no tumor-marker or genomic-variant observations matched, skipping biomarker filter");
        return Ok(());
    }
    let category = tables.categories.get(CATEGORY_BIOMARKERS);
    request
        .filter
        .push_eligibility(EligibilityField::coded(category, values));
    Ok(())
}

/// Marker status from the interpretation coding, falling back to the
/// value concept: interpretation carries positive/negative qualifiers,
/// the value concept carries Present/Absent.
fn marker_status(tables: &MappingTables, obs: &Observation) -> Option<&'static str> {
    tables
        .biomarkers
        .status_for(obs.interpretation_coding())
        .or_else(|| {
            tables.biomarkers.status_for(
                obs.value_codeable_concept
                    .as_ref()
                    .and_then(|c| c.first_coding()),
            )
        })
}
