//! Trial phase code tables.
//!
//! Forward direction maps FHIR research-study-phase codes to vendor phase
//! ids for the query filter. The inverse direction is used by the result
//! mapper and also covers vendor-only phases (pilot, phase 3B) that fold
//! into the nearest FHIR code.

use std::collections::HashMap;

use oncomatch_common::{MatchError, Result};

#[derive(Debug)]
pub struct PhaseTable {
    to_vendor: HashMap<&'static str, &'static str>,
    to_fhir: HashMap<&'static str, &'static str>,
}

impl PhaseTable {
    pub fn new() -> Self {
        let forward = [
            ("early-phase-1", "12"),
            ("phase-1", "1"),
            ("phase-2", "2"),
            ("phase-3", "3"),
            ("phase-4", "4"),
            ("phase-1-phase-2", "5"),
            ("phase-2-phase-3", "11"),
        ];
        let to_vendor: HashMap<_, _> = forward.into_iter().collect();
        let mut to_fhir: HashMap<_, _> = forward.into_iter().map(|(f, v)| (v, f)).collect();
        // Vendor-only phases with no FHIR equivalent of their own.
        to_fhir.insert("8", "early-phase-1"); // Pilot
        to_fhir.insert("7", "phase-3"); // Phase 3.B
        Self { to_vendor, to_fhir }
    }

    /// Vendor phase id for a FHIR phase string. An unrecognized phase in
    /// the request parameters fails the whole assembly.
    pub fn vendor_code(&self, fhir_phase: &str) -> Result<&'static str> {
        self.to_vendor
            .get(fhir_phase)
            .copied()
            .ok_or_else(|| MatchError::Mapping(format!("unrecognized trial phase: {fhir_phase}")))
    }

    /// FHIR phase code for a vendor phase id, if known.
    pub fn fhir_code(&self, vendor_id: &str) -> Option<&'static str> {
        self.to_fhir.get(vendor_id).copied()
    }
}

impl Default for PhaseTable {
    fn default() -> Self {
        Self::new()
    }
}
