//! Procedure rule: surgical and radiation procedures → "Prior
//! modalities" eligibility entry.

use oncomatch_common::Result;
use tracing::debug;

use crate::classifier::{procedures, ResourcesByType};
use crate::profiles::{RADIOTHERAPY, SURGICAL_PROCEDURE};
use crate::request::{ApiRequest, EligibilityField, ValueField};
use crate::tables::categories::CATEGORY_PRIOR_MODALITIES;
use crate::tables::MappingTables;

// Vendor modality ids.
const MODALITY_SURGERY: &str = "176";
const MODALITY_RADIATION: &str = "169";

pub fn map_procedure(
    resources: &ResourcesByType,
    tables: &MappingTables,
    request: &mut ApiRequest,
) -> Result<()> {
    let Some(procedure_list) = procedures(resources) else {
        debug!("bundle has no Procedure resource, skipping modality filter");
        return Ok(());
    };

    let mut values = Vec::new();
    if procedure_list
        .iter()
        .any(|p| p.meta.has_profile(SURGICAL_PROCEDURE))
    {
        values.push(ValueField::bare(MODALITY_SURGERY));
    }
    if procedure_list
        .iter()
        .any(|p| p.meta.has_profile(RADIOTHERAPY))
    {
        values.push(ValueField::bare(MODALITY_RADIATION));
    }

    if values.is_empty() {
        return Ok(());
    }
    let category = tables.categories.get(CATEGORY_PRIOR_MODALITIES);
    request
        .filter
        .push_eligibility(EligibilityField::coded(category, values));
    Ok(())
}
