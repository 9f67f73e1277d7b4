//! Extraction rules.
//!
//! One rule per clinical concept. Every rule reads the classified
//! resources, consults the shared tables, and appends zero or more
//! filter fragments to the one in-flight request. A missing resource
//! kind or profile is a logged no-op; unmappable values that the vendor
//! contract cannot tolerate (unknown phase, invalid performance status,
//! unresolvable zip, unknown coding system) abort the whole assembly.

pub mod age;
pub mod biomarkers;
pub mod condition;
pub mod distance;
pub mod drugs;
pub mod metastasis;
pub mod performance_status;
pub mod phase;
pub mod procedure;
pub mod stage;
pub mod subtype;

use oncomatch_common::Result;

use crate::classifier::ResourcesByType;
use crate::request::ApiRequest;
use crate::tables::MappingTables;

pub type Rule = fn(&ResourcesByType, &MappingTables, &mut ApiRequest) -> Result<()>;

/// The rules in assembly order. Order only matters where two rules write
/// the same category: stage and metastasis both target "Metastasise" and
/// each appends its own entry.
pub const RULES: [Rule; 11] = [
    age::map_age,
    phase::map_phase,
    condition::map_condition,
    subtype::map_subtype,
    biomarkers::map_biomarkers,
    performance_status::map_performance_status,
    drugs::map_drugs,
    metastasis::map_metastasis,
    distance::map_distance,
    stage::map_stage,
    procedure::map_procedure,
];
