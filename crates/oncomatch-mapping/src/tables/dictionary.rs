//! Coding system → vendor value-set dictionary.
//!
//! Every coded value sent to the vendor pairs a value id with the vendor
//! dictionary it belongs to. A coding whose system has no configured
//! dictionary cannot be expressed in the vendor vocabulary at all, so
//! the lookup fails hard rather than sending a half-formed filter.

use std::collections::HashMap;

use oncomatch_common::{MatchError, Result};

#[derive(Debug)]
pub struct DictionaryTable {
    by_system: HashMap<&'static str, &'static str>,
}

impl DictionaryTable {
    pub fn new() -> Self {
        let by_system = [
            ("http://snomed.info/sct", "2.16.840.1.113883.6.96"),
            ("http://loinc.org", "2.16.840.1.113883.6.1"),
            ("http://hl7.org/fhir/sid/icd-10-cm", "icd-10-cm"),
            ("http://www.nlm.nih.gov/research/umls/rxnorm", "Rxnorm"),
            ("http://www.genenames.org", "Hugo"),
        ]
        .into_iter()
        .collect();
        Self { by_system }
    }

    /// Vendor value-set id for a FHIR coding system URL.
    pub fn value_set_for(&self, system: Option<&str>) -> Result<&'static str> {
        let system = system.unwrap_or_default();
        self.by_system.get(system).copied().ok_or_else(|| {
            MatchError::Mapping(format!("no vendor dictionary for coding system: {system}"))
        })
    }
}

impl Default for DictionaryTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_systems() {
        let table = DictionaryTable::new();
        assert_eq!(
            table.value_set_for(Some("http://snomed.info/sct")).unwrap(),
            "2.16.840.1.113883.6.96"
        );
        assert_eq!(
            table
                .value_set_for(Some("http://www.nlm.nih.gov/research/umls/rxnorm"))
                .unwrap(),
            "Rxnorm"
        );
    }

    #[test]
    fn test_missing_system_fails_hard() {
        let table = DictionaryTable::new();
        assert!(table.value_set_for(Some("http://example.org/private")).is_err());
        assert!(table.value_set_for(None).is_err());
    }
}
