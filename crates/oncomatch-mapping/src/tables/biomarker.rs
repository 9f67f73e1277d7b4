//! Biomarker qualifier table.
//!
//! Maps interpretation / value codings on tumor-marker and genomic
//! variant observations to the vendor's marker status vocabulary. Exact
//! system+code matches come first; when the coding is not in the table
//! its display text is checked for the usual positive/negative wording.

use std::collections::HashMap;

use oncomatch_fhir::Coding;

pub const STATUS_POSITIVE: &str = "positive";
pub const STATUS_NEGATIVE: &str = "negative";
pub const STATUS_HIGH: &str = "high";
pub const STATUS_LOW: &str = "low";

#[derive(Debug)]
pub struct QualifierTable {
    by_system_code: HashMap<&'static str, &'static str>,
}

impl QualifierTable {
    pub fn new() -> Self {
        let by_system_code = [
            ("http://loinc.org/LA6576-8", STATUS_POSITIVE),
            ("http://loinc.org/LA6577-6", STATUS_NEGATIVE),
            ("http://snomed.info/sct/10828004", STATUS_POSITIVE),
            ("http://snomed.info/sct/260385009", STATUS_NEGATIVE),
            ("http://loinc.org/LA9633-4", STATUS_POSITIVE), // Present
            ("http://loinc.org/LA9634-2", STATUS_NEGATIVE), // Absent
            ("http://snomed.info/sct/52101004", STATUS_POSITIVE), // Present
            ("http://snomed.info/sct/2667000", STATUS_NEGATIVE), // Absent
            ("http://snomed.info/sct/75540009", STATUS_HIGH),
            ("http://snomed.info/sct/62482003", STATUS_LOW),
        ]
        .into_iter()
        .collect();
        Self { by_system_code }
    }

    /// Marker status for a qualifier coding, or `None` when the coding
    /// carries no recognizable qualifier.
    pub fn status_for(&self, coding: Option<&Coding>) -> Option<&'static str> {
        let coding = coding?;
        let key = format!(
            "{}/{}",
            coding.system.as_deref().unwrap_or_default(),
            coding.code.as_deref().unwrap_or_default()
        );
        if let Some(status) = self.by_system_code.get(key.as_str()) {
            return Some(status);
        }
        let display = coding.display.as_deref()?;
        if display.contains("Negative") || display.contains("Absent") {
            return Some(STATUS_NEGATIVE);
        }
        if display.contains("Positive") || display.contains("Present") {
            return Some(STATUS_POSITIVE);
        }
        None
    }
}

impl Default for QualifierTable {
    fn default() -> Self {
        Self::new()
    }
}
