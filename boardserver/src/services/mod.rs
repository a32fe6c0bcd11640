//! Service implementations
//!
//! Real implementations of the I/O seams: the order-management API client
//! and the polling timers.

pub mod order_api;
pub mod poller;

#[cfg(test)]
mod tests;

pub use order_api::{OrderApiConfig, RestOrderSource};
pub use poller::{start, PollerConfig, PollerHandle};
