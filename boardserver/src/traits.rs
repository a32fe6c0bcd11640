//! Service trait definitions for dependency injection
//!
//! All I/O is abstracted behind these traits for testability.

use async_trait::async_trait;

use crate::error::BoardResult;
use shared::Order;

/// Source of order snapshots.
///
/// A fetch returns the full current order list; callers replace their
/// snapshot wholesale rather than merging.
#[mockall::automock]
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// Fetch the complete order list from the external system.
    async fn fetch_orders(&self) -> BoardResult<Vec<Order>>;
}
