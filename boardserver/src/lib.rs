//! Board server library for the order tracking board
//!
//! Polls the external order-management API on a fixed cadence, classifies
//! orders against their 48-hour SLA deadline, and serves the resulting
//! per-status buckets as JSON for the render layer.

pub mod core;
pub mod error;
pub mod server;
pub mod services;
pub mod traits;
pub mod types;

// Re-export main types
pub use core::state::{BoardState, BoardSummary, SectionSummary};
pub use error::{BoardError, BoardResult};
pub use server::{build_router, AppContext};
pub use traits::OrderSource;

// Re-export service implementations
pub use services::{OrderApiConfig, PollerConfig, PollerHandle, RestOrderSource};
