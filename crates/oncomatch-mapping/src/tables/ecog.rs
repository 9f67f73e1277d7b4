//! ECOG / Karnofsky performance status table.
//!
//! ECOG integer values map directly to vendor codes. Karnofsky values
//! (0-100) fold into the ECOG band whose range contains them.

use oncomatch_common::{MatchError, Result};

/// Vendor dictionary name for performance status values.
pub const ECOG_DICT_NAME: &str = "Ecog";

#[derive(Debug, Clone)]
struct EcogBand {
    ecog: i64,
    karnofsky_min: i64,
    karnofsky_max: i64,
    code: &'static str,
}

#[derive(Debug)]
pub struct EcogTable {
    bands: Vec<EcogBand>,
}

impl EcogTable {
    pub fn new() -> Self {
        let bands = vec![
            EcogBand { ecog: 0, karnofsky_min: 81, karnofsky_max: 100, code: "ecog:0" },
            EcogBand { ecog: 1, karnofsky_min: 70, karnofsky_max: 80, code: "ecog:1" },
            EcogBand { ecog: 2, karnofsky_min: 50, karnofsky_max: 69, code: "ecog:2" },
            EcogBand { ecog: 3, karnofsky_min: 30, karnofsky_max: 49, code: "ecog:3" },
            EcogBand { ecog: 4, karnofsky_min: 1, karnofsky_max: 29, code: "ecog:4" },
            EcogBand { ecog: 5, karnofsky_min: 0, karnofsky_max: 0, code: "ecog:5" },
        ];
        Self { bands }
    }

    /// Vendor code for a reported ECOG value.
    pub fn code_for_ecog(&self, value: i64) -> Option<&'static str> {
        self.bands.iter().find(|b| b.ecog == value).map(|b| b.code)
    }

    /// Vendor ECOG code for a Karnofsky value via the band ranges. A
    /// value outside every configured band is a fatal mapping error.
    pub fn code_for_karnofsky(&self, value: i64) -> Result<&'static str> {
        self.bands
            .iter()
            .find(|b| b.karnofsky_min <= value && value <= b.karnofsky_max)
            .map(|b| b.code)
            .ok_or_else(|| {
                MatchError::Mapping(format!("{value} is not a valid Karnofsky assessment value"))
            })
    }
}

impl Default for EcogTable {
    fn default() -> Self {
        Self::new()
    }
}
