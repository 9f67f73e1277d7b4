//! Eligibility category table.
//!
//! Category ids and names mirror the vendor's eligibility-field lookup
//! service, including its spelling of "Metastasise".

use std::collections::HashMap;

pub const CATEGORY_AGE: &str = "Age";
pub const CATEGORY_BIOMARKERS: &str = "Biomarkers";
pub const CATEGORY_ECOG: &str = "ECOG Performance status";
pub const CATEGORY_DRUGS: &str = "Drugs";
pub const CATEGORY_DIAGNOSIS: &str = "Diagnosis";
pub const CATEGORY_METASTASISE: &str = "Metastasise";
pub const CATEGORY_PRIOR_MODALITIES: &str = "Prior modalities";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub mode: &'static str,
}

#[derive(Debug)]
pub struct CategoryTable {
    entries: HashMap<&'static str, Category>,
}

impl CategoryTable {
    pub fn new() -> Self {
        let entries = [
            ("Measurable disease", "1"),
            ("Severity", "2"),
            ("Surgical Procedures", "3"),
            ("Outcome", "4"),
            (CATEGORY_PRIOR_MODALITIES, "5"),
            (CATEGORY_AGE, "6"),
            (CATEGORY_BIOMARKERS, "7"),
            ("Prior clinical trial", "8"),
            ("Anatomic Cancer Location", "9"),
            ("Comorbidity", "10"),
            ("Diagnostic Details", "11"),
            ("Diagnostic Tests", "12"),
            (CATEGORY_DRUGS, "13"),
            (CATEGORY_ECOG, "14"),
            ("Gender", "15"),
            ("Family history", "16"),
            (CATEGORY_METASTASISE, "17"),
            ("Unresectable", "18"),
            (CATEGORY_DIAGNOSIS, "19"),
        ]
        .into_iter()
        .map(|(name, id)| (name, Category { id, mode: "" }))
        .collect();
        Self { entries }
    }

    /// Category data for a well-known name. The names used by the rules
    /// are compile-time constants, so a miss is a programming error.
    pub fn get(&self, name: &str) -> &Category {
        self.entries
            .get(name)
            .unwrap_or_else(|| panic!("unknown eligibility category: {name}"))
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::new()
    }
}
