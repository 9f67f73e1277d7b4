//! Distance rule: zipCode/travelRadius parameters → distance filter and
//! search origin.

use oncomatch_common::{MatchError, Result};
use tracing::debug;

use crate::classifier::{parameters, ResourcesByType};
use crate::request::{ApiRequest, DistanceClause, GeoPoint, OriginClause};
use crate::tables::MappingTables;

const DISTANCE_UNIT_MILES: &str = "mi";

pub fn map_distance(
    resources: &ResourcesByType,
    tables: &MappingTables,
    request: &mut ApiRequest,
) -> Result<()> {
    let Some(parameter_list) = parameters(resources) else {
        debug!("bundle has no Parameters resource, skipping distance filter");
        return Ok(());
    };

    let zip_code = parameter_list.iter().find_map(|p| p.value_of("zipCode"));
    let radius = parameter_list.iter().find_map(|p| p.value_of("travelRadius"));
    let (Some(zip_code), Some(radius)) = (zip_code, radius) else {
        debug!("zipCode or travelRadius parameter missing, skipping distance filter");
        return Ok(());
    };

    let distance: f64 = radius.parse().map_err(|_| {
        MatchError::Mapping(format!("travelRadius {radius:?} is not a number"))
    })?;
    let point = tables.zip.resolve(zip_code).ok_or_else(|| {
        MatchError::Mapping(format!("cannot resolve coordinates for zip code {zip_code}"))
    })?;

    let from = GeoPoint {
        lat: point.lat,
        lon: point.lng,
    };
    request.filter.distance = Some(DistanceClause {
        from,
        distance,
        distance_unit: DISTANCE_UNIT_MILES.to_string(),
    });
    request.origin = Some(OriginClause { from });
    Ok(())
}
