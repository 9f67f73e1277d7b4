//! Performance status rule: ECOG and Karnofsky observations → "ECOG
//! Performance status" eligibility entry.

use oncomatch_common::{MatchError, Result};
use tracing::{debug, warn};

use crate::classifier::{observations, ResourcesByType};
use crate::profiles::{ECOG_PERFORMANCE_STATUS, KARNOFSKY_PERFORMANCE_STATUS};
use crate::request::{ApiRequest, EligibilityField, ValueField};
use crate::tables::categories::CATEGORY_ECOG;
use crate::tables::ecog::ECOG_DICT_NAME;
use crate::tables::MappingTables;

pub fn map_performance_status(
    resources: &ResourcesByType,
    tables: &MappingTables,
    request: &mut ApiRequest,
) -> Result<()> {
    let Some(observation_list) = observations(resources) else {
        debug!("bundle has no Observation resource, skipping performance status filter");
        return Ok(());
    };

    let mut values = Vec::new();

    let ecog_obs = observation_list
        .iter()
        .find(|o| o.meta.has_profile(ECOG_PERFORMANCE_STATUS));
    match ecog_obs {
        Some(obs) => match obs.value_integer {
            Some(value) => {
                let code = tables.ecog.code_for_ecog(value).ok_or_else(|| {
                    MatchError::Mapping(format!("{value} is not a valid ECOG grade"))
                })?;
                values.push(ValueField::new(ECOG_DICT_NAME, code));
            }
            None => warn!("ECOG observation has no integer value, skipping"),
        },
        None => debug!("no ECOG-profiled observation in bundle"),
    }

    let karnofsky_obs = observation_list
        .iter()
        .find(|o| o.meta.has_profile(KARNOFSKY_PERFORMANCE_STATUS));
    match karnofsky_obs {
        Some(obs) => match obs.value_integer {
            Some(value) => {
                // Out-of-range Karnofsky is fatal, not a skip.
                let code = tables.ecog.code_for_karnofsky(value)?;
                values.push(ValueField::new(ECOG_DICT_NAME, code));
            }
            None => warn!("Karnofsky observation has no integer value, skipping"),
        },
        None => debug!("no Karnofsky-profiled observation in bundle"),
    }

    if values.is_empty() {
        return Ok(());
    }
    let category = tables.categories.get(CATEGORY_ECOG);
    request
        .filter
        .push_eligibility(EligibilityField::coded(category, values));
    Ok(())
}
