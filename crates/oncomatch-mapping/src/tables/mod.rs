//! Static lookup tables.
//!
//! Immutable, constructed once at process start and passed by reference
//! into the extraction rules, so tests can hand a rule alternate tables.

pub mod biomarker;
pub mod categories;
pub mod dictionary;
pub mod ecog;
pub mod phase;
pub mod stage;
pub mod status;
pub mod zip;

pub use zip::ZipIndex;

/// Owner of every coded-vocabulary table the rules consult, plus the zip
/// index for the geographic filter. Read-only for the lifetime of the
/// process.
#[derive(Debug)]
pub struct MappingTables {
    pub categories: categories::CategoryTable,
    pub phases: phase::PhaseTable,
    pub ecog: ecog::EcogTable,
    pub stages: stage::StageTable,
    pub biomarkers: biomarker::QualifierTable,
    pub dictionaries: dictionary::DictionaryTable,
    pub statuses: status::StatusTable,
    pub zip: ZipIndex,
}

impl MappingTables {
    pub fn new() -> Self {
        Self {
            categories: categories::CategoryTable::new(),
            phases: phase::PhaseTable::new(),
            ecog: ecog::EcogTable::new(),
            stages: stage::StageTable::new(),
            biomarkers: biomarker::QualifierTable::new(),
            dictionaries: dictionary::DictionaryTable::new(),
            statuses: status::StatusTable::new(),
            zip: ZipIndex::empty(),
        }
    }

    pub fn with_zip_index(mut self, zip: ZipIndex) -> Self {
        self.zip = zip;
        self
    }
}

impl Default for MappingTables {
    fn default() -> Self {
        Self::new()
    }
}
