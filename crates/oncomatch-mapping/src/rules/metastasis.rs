//! Metastasis rule: secondary cancer condition → "Metastasise"
//! eligibility entry.

use oncomatch_common::Result;
use tracing::debug;

use crate::classifier::{conditions, ResourcesByType};
use crate::profiles::SECONDARY_CANCER_CONDITION;
use crate::request::{ApiRequest, EligibilityField, ValueField};
use crate::tables::categories::CATEGORY_METASTASISE;
use crate::tables::MappingTables;

pub fn map_metastasis(
    resources: &ResourcesByType,
    tables: &MappingTables,
    request: &mut ApiRequest,
) -> Result<()> {
    let Some(condition_list) = conditions(resources) else {
        debug!("bundle has no Condition resource, skipping metastasis filter");
        return Ok(());
    };
    let Some(secondary) = condition_list
        .iter()
        .find(|c| c.meta.has_profile(SECONDARY_CANCER_CONDITION))
    else {
        debug!("no secondary cancer condition in bundle, skipping metastasis filter");
        return Ok(());
    };

    let mut values = Vec::new();
    for coding in secondary.code.as_ref().map(|c| c.codings()).unwrap_or(&[]) {
        let Some(code) = coding.code.as_deref() else {
            continue;
        };
        let value_set = tables.dictionaries.value_set_for(coding.system.as_deref())?;
        values.push(ValueField::new(value_set, code));
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
