//! Phase rule: "phase" request parameters → vendor phase filter.
//!
//! The one rule where an unmapped value is fatal: a caller asking for a
//! phase the vendor cannot express must not silently get unfiltered
//! results.

use oncomatch_common::Result;
use tracing::debug;

use crate::classifier::{parameters, ResourcesByType};
use crate::request::ApiRequest;
use crate::tables::MappingTables;

pub fn map_phase(
    resources: &ResourcesByType,
    tables: &MappingTables,
    request: &mut ApiRequest,
) -> Result<()> {
    let Some(param_resources) = parameters(resources) else {
        debug!("bundle has no Parameters resource, skipping phase filter");
        return Ok(());
    };

    for params in param_resources {
        for phase in params.values_of("phase") {
            if phase.is_empty() {
                continue;
            }
            let code = tables.phases.vendor_code(phase)?;
            request
                .filter
                .phases
                .get_or_insert_with(Vec::new)
                .push(code.to_string());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::generate_api_query;
    use crate::classifier::classify;
    use oncomatch_fhir::Bundle;

    fn run(bundle: serde_json::Value) -> Result<ApiRequest> {
        let bundle: Bundle = serde_json::from_value(bundle).unwrap();
        let resources = classify(&bundle);
        let tables = MappingTables::new();
        let mut request = generate_api_query(None, 25);
        map_phase(&resources, &tables, &mut request)?;
        Ok(request)
    }

    fn phase_bundle(phases: &[&str]) -> serde_json::Value {
        let parameter: Vec<_> = phases
            .iter()
            .map(|p| serde_json::json!({ "name": "phase", "valueString": p }))
            .collect();
        serde_json::json!({
            "resourceType": "Bundle", "type": "collection",
            "entry": [ { "resource": { "resourceType": "Parameters", "parameter": parameter } } ]
        })
    }

    #[test]
    fn test_known_phases() {
        let request = run(phase_bundle(&["phase-2", "phase-1-phase-2"])).unwrap();
        assert_eq!(
            request.filter.phases.as_deref(),
            Some(&["2".to_string(), "5".to_string()][..])
        );
    }

    #[test]
    fn test_unknown_phase_fails_assembly() {
        assert!(run(phase_bundle(&["phase-99"])).is_err());
    }

    #[test]
    fn test_no_parameters_leaves_phases_unset() {
        let request = run(serde_json::json!({
            "resourceType": "Bundle", "type": "collection", "entry": []
        }))
        .unwrap();
        assert!(request.filter.phases.is_none());
    }
}
