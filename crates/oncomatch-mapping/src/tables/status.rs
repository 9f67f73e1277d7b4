//! Vendor trial status → ResearchStudy status.
//!
//! Statuses the vendor reports but FHIR has no word for are left unset
//! on the study rather than defaulted.

use std::collections::HashMap;

#[derive(Debug)]
pub struct StatusTable {
    by_vendor_id: HashMap<&'static str, &'static str>,
}

impl StatusTable {
    pub fn new() -> Self {
        let by_vendor_id = [
            ("1", "active"),
            ("5", "approved"),
            ("16", "completed"),
            ("19", "withdrawn"),
            ("9", "in-review"),
            ("6", "temporarily-closed-to-accrual"),
        ]
        .into_iter()
        .collect();
        Self { by_vendor_id }
    }

    pub fn research_study_status(&self, vendor_id: &str) -> Option<&'static str> {
        self.by_vendor_id.get(vendor_id).copied()
    }
}

impl Default for StatusTable {
    fn default() -> Self {
        Self::new()
    }
}
