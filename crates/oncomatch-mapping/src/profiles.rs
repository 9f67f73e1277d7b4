//! mCODE profile markers recognized by the extraction rules.
//!
//! All defined under http://hl7.org/fhir/us/mcode/StructureDefinition/.
//! Selection is by substring match against `meta.profile`, so version
//! suffixes on the profile URL do not matter.

pub const PRIMARY_CANCER_CONDITION: &str = "mcode-primary-cancer-condition";
pub const SECONDARY_CANCER_CONDITION: &str = "mcode-secondary-cancer-condition";
pub const TUMOR_MARKER: &str = "mcode-tumor-marker";
pub const GENOMIC_VARIANT: &str = "mcode-genomic-variant";
pub const ECOG_PERFORMANCE_STATUS: &str = "mcode-ecog-performance-status";
pub const KARNOFSKY_PERFORMANCE_STATUS: &str = "mcode-karnofsky-performance-status";
pub const MEDICATION_ADMINISTRATION: &str = "mcode-cancer-related-medication-administration";
pub const MEDICATION_REQUEST: &str = "mcode-cancer-related-medication-request";
pub const HISTOLOGY_MORPHOLOGY: &str = "mcode-histology-morphology-behavior";
pub const CANCER_STAGE_GROUP: &str = "mcode-cancer-stage-group";
pub const SURGICAL_PROCEDURE: &str = "mcode-cancer-related-surgical-procedure";
pub const RADIOTHERAPY: &str = "mcode-cancer-related-radiation-procedure";

/// LOINC code identifying the gene-studied component of a genomic
/// variant observation (HGNC gene id).
pub const LOINC_GENE_STUDIED_ID_HGNC: &str = "48018-6";
