//! HTTP surface for the board
//!
//! JSON-only: the render layer owns all presentation. Every request
//! recomputes severity and countdowns from the current wall clock, so
//! consumers polling each second get a live countdown without the server
//! pushing anything.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::core::engine::orders_for_status;
use crate::core::state::{BoardState, BoardSummary};
use crate::types::{BoardView, OrderView, SectionView};
use shared::{CapacityPlan, OrderFilter, TimeWindow};

/// Shared request context: the snapshot plus layout policy.
#[derive(Clone)]
pub struct AppContext {
    pub state: Arc<RwLock<BoardState>>,
    /// Status sections configured for this board, in display order.
    pub sections: Arc<Vec<String>>,
    pub capacity_plan: Arc<CapacityPlan>,
}

/// Snapshot staleness threshold reported by the health endpoint.
const FRESHNESS_MINUTES: i64 = 5;

#[derive(Debug, Deserialize, Default)]
pub struct BoardQuery {
    /// Time-window selector, defaults to `all`.
    pub window: Option<String>,
    /// Free-text search string.
    pub q: Option<String>,
    /// Comma-separated subset of the configured sections.
    pub sections: Option<String>,
}

pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/board", get(board))
        .route("/api/summary", get(summary))
        .route("/api/status/:status", get(status_bucket))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()).into_inner())
        .with_state(ctx)
}

fn parse_filter(query: &BoardQuery) -> Result<OrderFilter, (StatusCode, String)> {
    let window = match query.window.as_deref() {
        None | Some("") => TimeWindow::All,
        Some(raw) => TimeWindow::from_str(raw)
            .ok_or_else(|| (StatusCode::BAD_REQUEST, format!("Unknown window: {raw}")))?,
    };
    Ok(OrderFilter::new(window, query.q.clone().unwrap_or_default()))
}

/// Resolve which configured sections are visible for this request,
/// preserving the configured display order.
fn visible_sections(ctx: &AppContext, requested: Option<&str>) -> Vec<String> {
    match requested {
        None | Some("") => ctx.sections.as_ref().clone(),
        Some(raw) => {
            let wanted: Vec<&str> = raw.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();
            ctx.sections
                .iter()
                .filter(|section| wanted.iter().any(|w| w.eq_ignore_ascii_case(section)))
                .cloned()
                .collect()
        }
    }
}

async fn health(State(ctx): State<AppContext>) -> Json<serde_json::Value> {
    let state = ctx.state.read().await;
    let now = Utc::now();

    Json(json!({
        "status": "healthy",
        "uptime_seconds": state.uptime_seconds(),
        "has_data": state.has_data(),
        "snapshot_fresh": state.is_fresh(Duration::minutes(FRESHNESS_MINUTES), now),
        "last_fetch": state.last_fetch(),
        "last_error": state.last_error(),
    }))
}

/// Per-section severity counts, as maintained by the background tick.
///
/// Unlike the board endpoints this does not recompute anything; it serves
/// the tick's last result, so its `generated_at` lags "now" by up to one
/// tick interval.
async fn summary(State(ctx): State<AppContext>) -> Json<BoardSummary> {
    Json(ctx.state.read().await.summary().clone())
}

/// All visible sections, each capped by the layout-driven capacity.
async fn board(
    State(ctx): State<AppContext>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<BoardView>, (StatusCode, String)> {
    let filter = parse_filter(&query)?;
    let sections = visible_sections(&ctx, query.sections.as_deref());
    let capacity = ctx.capacity_plan.capacity_for(sections.len());

    let state = ctx.state.read().await;
    let now = Utc::now();

    let section_views = sections
        .into_iter()
        .map(|status| build_section(state.orders(), &status, &filter, now, capacity))
        .collect();

    Ok(Json(BoardView {
        generated_at: now,
        window: filter.window,
        search: filter.search,
        sections: section_views,
    }))
}

/// A single bucket, shown alone, so it gets the solo-section capacity.
async fn status_bucket(
    State(ctx): State<AppContext>,
    Path(status): Path<String>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<SectionView>, (StatusCode, String)> {
    let filter = parse_filter(&query)?;
    let capacity = ctx.capacity_plan.capacity_for(1);

    let state = ctx.state.read().await;
    let now = Utc::now();

    Ok(Json(build_section(state.orders(), &status, &filter, now, capacity)))
}

fn build_section(
    orders: &[shared::Order],
    status: &str,
    filter: &OrderFilter,
    now: chrono::DateTime<Utc>,
    capacity: usize,
) -> SectionView {
    // Run uncapped once for the match count, then cap for display.
    let mut matched = orders_for_status(orders, status, filter, now, usize::MAX);
    let total_matching = matched.len();
    matched.truncate(capacity);

    SectionView {
        status: status.to_string(),
        capacity,
        total_matching,
        orders: matched.into_iter().map(|o| OrderView::from_order(o, now)).collect(),
    }
}
