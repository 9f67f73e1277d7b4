//! Stage rule: cancer stage-group observations → implied metastasis
//! codes in the "Metastasise" eligibility entry.

use oncomatch_common::Result;
use tracing::{debug, warn};

use crate::classifier::{observations, ResourcesByType};
use crate::profiles::CANCER_STAGE_GROUP;
use crate::request::{ApiRequest, EligibilityField, ValueField};
use crate::tables::categories::CATEGORY_METASTASISE;
use crate::tables::MappingTables;

pub fn map_stage(
    resources: &ResourcesByType,
    tables: &MappingTables,
    request: &mut ApiRequest,
) -> Result<()> {
    let Some(observation_list) = observations(resources) else {
        debug!("bundle has no Observation resource, skipping stage filter");
        return Ok(());
    };

    let mut values: Vec<ValueField> = Vec::new();
    for obs in observation_list
        .iter()
        .filter(|o| o.meta.has_profile(CANCER_STAGE_GROUP))
    {
        for coding in obs
            .value_codeable_concept
            .as_ref()
            .map(|c| c.codings())
            .unwrap_or(&[])
        {
            let Some(code) = coding.code.as_deref() else {
                continue;
            };
            let Some(mets) = tables.stages.mets_for_code(code) else {
                warn!(code, "unmapped stage-group code, skipping");
                continue;
            };
            for met in mets {
                if values.iter().any(|v| v.value_id == *met) {
                    continue;
                }
                values.push(ValueField::bare(*met));
            }
        }
    }

    if values.is_empty() {
        return Ok(());
    }
    let category = tables.categories.get(CATEGORY_METASTASISE);
    request
        .filter
        .push_eligibility(EligibilityField::coded(category, values));
    Ok(())
}
