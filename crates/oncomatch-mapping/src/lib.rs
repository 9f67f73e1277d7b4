//! oncomatch-mapping — The mapping engine.
//!
//! Reads typed clinical facts (age, condition, biomarkers, performance
//! status, stage, medications, procedures, geographic filters) out of a
//! classified FHIR bundle and assembles them into a single vendor filter
//! request. Lookup tables are immutable, built once per process, and
//! passed by reference into every rule.

pub mod assembler;
pub mod classifier;
pub mod profiles;
pub mod request;
pub mod rules;
pub mod tables;

pub use assembler::{convert_bundle_to_api_request, generate_api_query};
pub use classifier::{classify, ResourcesByType};
pub use request::{ApiRequest, EligibilityField, FilterFields, SortClause, ValueField};
pub use tables::MappingTables;
