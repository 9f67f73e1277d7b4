//! oncomatch-common — Shared error taxonomy used across all Oncomatch crates.

pub mod error;

pub use error::{MatchError, Result};
