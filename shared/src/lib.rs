//! Shared types for the order board service
//!
//! Contains the order domain model and the utilities every component needs.
//! Service-internal types (HTTP view models, wire records) are kept in their
//! respective components.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
