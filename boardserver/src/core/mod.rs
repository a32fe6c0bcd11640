//! Core business logic
//!
//! Pure functions and state with no I/O dependencies.

pub mod engine;
pub mod state;
pub mod window;

pub use engine::{classify, countdown, orders_for_status, remaining_ms};
pub use state::{BoardState, BoardSummary, SectionSummary};
pub use window::within_window;
