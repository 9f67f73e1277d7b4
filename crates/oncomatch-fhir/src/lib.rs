//! oncomatch-fhir — Typed FHIR R4 subset for the trial matcher.
//!
//! Wire models for the incoming patient Bundle (only the resource kinds
//! and fields the extraction rules read) and for the outgoing
//! ResearchStudy result shape. FHIR semantic alignment without a full
//! resource model; unknown resource kinds deserialize to
//! `Resource::Unsupported` and are ignored downstream.

pub mod bundle;
pub mod research_study;
pub mod resources;

pub use bundle::{Bundle, BundleEntry, Resource};
pub use research_study::{ResearchStudy, StudyContact, StudySite};
pub use resources::{
    CodeableConcept, Coding, Condition, Extension, MedicationAdministration, MedicationRequest,
    Meta, Observation, ObservationComponent, Parameter, Parameters, Patient, Procedure,
};
