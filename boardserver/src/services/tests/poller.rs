//! Tests for the polling timers

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::core::state::BoardState;
use crate::error::BoardError;
use crate::services::poller::{self, PollerConfig};
use crate::traits::MockOrderSource;
use shared::Order;

fn test_order(number: i64, status: &str) -> Order {
    Order {
        order_number: number,
        customer_id: format!("CUST{number}"),
        customer_name: String::new(),
        po_number: None,
        created_at: Some(chrono::Utc::now()),
        order_date: None,
        need_by_date: None,
        status: status.to_string(),
    }
}

fn fast_config() -> PollerConfig {
    PollerConfig {
        tick_interval: Duration::from_millis(5),
        fetch_interval: Duration::from_millis(10),
        sections: vec!["Order Placed".to_string()],
    }
}

#[tokio::test]
async fn fetch_replaces_snapshot_wholesale() {
    let mut source = MockOrderSource::new();
    source
        .expect_fetch_orders()
        .returning(|| Ok(vec![test_order(1, "Order Placed"), test_order(2, "Order Placed")]));

    let state = Arc::new(RwLock::new(BoardState::new()));
    let handle = poller::start(Arc::new(source), state.clone(), fast_config());

    tokio::time::sleep(Duration::from_millis(100)).await;
    handle.stop();

    let guard = state.read().await;
    assert!(guard.has_data());
    assert_eq!(guard.orders().len(), 2);
    assert!(guard.last_error().is_none());
    assert!(guard.last_fetch().is_some());
}

#[tokio::test]
async fn failed_fetch_keeps_previous_snapshot() {
    let mut source = MockOrderSource::new();
    source
        .expect_fetch_orders()
        .times(1)
        .returning(|| Ok(vec![test_order(1, "Order Placed")]));
    source
        .expect_fetch_orders()
        .returning(|| Err(BoardError::payload("upstream down")));

    let state = Arc::new(RwLock::new(BoardState::new()));
    let handle = poller::start(Arc::new(source), state.clone(), fast_config());

    tokio::time::sleep(Duration::from_millis(100)).await;
    handle.stop();

    let guard = state.read().await;
    // The first snapshot survives the later failures.
    assert_eq!(guard.orders().len(), 1);
    assert_eq!(guard.orders()[0].order_number, 1);
    assert!(guard.last_error().is_some());
}

#[tokio::test]
async fn tick_recomputes_summary() {
    let mut source = MockOrderSource::new();
    source
        .expect_fetch_orders()
        .returning(|| Ok(vec![test_order(1, "Order Placed")]));

    let state = Arc::new(RwLock::new(BoardState::new()));
    let handle = poller::start(Arc::new(source), state.clone(), fast_config());

    tokio::time::sleep(Duration::from_millis(100)).await;
    handle.stop();

    let guard = state.read().await;
    let summary = guard.summary();
    assert!(summary.generated_at.is_some());
    let section = summary.sections.get("Order Placed").unwrap();
    assert_eq!(section.total, 1);
    assert_eq!(section.green, 1);
}

#[tokio::test]
async fn stop_cancels_both_timers() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in_mock = calls.clone();

    let mut source = MockOrderSource::new();
    source.expect_fetch_orders().returning(move || {
        calls_in_mock.fetch_add(1, Ordering::SeqCst);
        Ok(vec![])
    });

    let state = Arc::new(RwLock::new(BoardState::new()));
    let handle = poller::start(Arc::new(source), state.clone(), fast_config());

    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.stop();

    let calls_at_stop = calls.load(Ordering::SeqCst);
    assert!(calls_at_stop >= 1);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(calls.load(Ordering::SeqCst), calls_at_stop);
}

#[tokio::test]
async fn dropping_the_handle_cancels_both_timers() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in_mock = calls.clone();

    let mut source = MockOrderSource::new();
    source.expect_fetch_orders().returning(move || {
        calls_in_mock.fetch_add(1, Ordering::SeqCst);
        Ok(vec![])
    });

    let state = Arc::new(RwLock::new(BoardState::new()));
    let handle = poller::start(Arc::new(source), state.clone(), fast_config());

    tokio::time::sleep(Duration::from_millis(50)).await;
    drop(handle);

    let calls_at_drop = calls.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(calls.load(Ordering::SeqCst), calls_at_drop);
}
