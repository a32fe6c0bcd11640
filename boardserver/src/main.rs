//! Board server entry point
//!
//! Wires the REST order source, the polling timers, and the HTTP surface
//! together with the configured status sections.

use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;

use boardserver::{
    build_router, AppContext, BoardError, BoardResult, BoardState, OrderApiConfig, PollerConfig,
    RestOrderSource,
};
use shared::CapacityPlan;

/// Serves the order tracking board: polls the order-management API and
/// exposes SLA-classified status buckets as JSON.
#[derive(Parser, Debug)]
#[command(name = "boardserver")]
#[command(about = "Order tracking board server")]
struct Args {
    /// Port for the HTTP server
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Order-management API endpoint (credentials come from ORDER_API_KEY,
    /// ORDER_API_USER and ORDER_API_PASSWORD, or a .env file)
    #[arg(long)]
    api_url: String,

    /// Comma-separated status sections shown on the board
    #[arg(
        long,
        default_value = "Order Placed,Credit Review,Delivery Planning,Dispatched for Delivery"
    )]
    sections: String,

    /// Seconds between order snapshot refreshes
    #[arg(long, default_value = "300")]
    refresh_secs: u64,

    /// Seconds between countdown recomputations
    #[arg(long, default_value = "1")]
    tick_secs: u64,
}

#[tokio::main]
async fn main() -> BoardResult<()> {
    let args = Args::parse();

    shared::logging::init_tracing(Some(&args.log_level));

    let sections: Vec<String> = args
        .sections
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if sections.is_empty() {
        return Err(BoardError::config("at least one status section is required"));
    }
    if args.refresh_secs == 0 || args.tick_secs == 0 {
        return Err(BoardError::config("refresh and tick intervals must be non-zero"));
    }

    let api_config = OrderApiConfig::from_env(args.api_url)?;
    let source = Arc::new(RestOrderSource::new(api_config));
    let state = Arc::new(RwLock::new(BoardState::new()));

    let poller = boardserver::services::poller::start(
        source,
        state.clone(),
        PollerConfig {
            tick_interval: Duration::from_secs(args.tick_secs),
            fetch_interval: Duration::from_secs(args.refresh_secs),
            sections: sections.clone(),
        },
    );

    let ctx = AppContext {
        state,
        sections: Arc::new(sections),
        capacity_plan: Arc::new(CapacityPlan::default()),
    };
    let router = build_router(ctx);

    let addr: SocketAddr = format!("127.0.0.1:{}", args.port)
        .parse()
        .map_err(|e| BoardError::config(format!("Invalid port: {e}")))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| BoardError::ServerStartup(format!("Failed to bind to {addr}: {e}")))?;

    info!("Board server listening on http://{addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Release both timers together on the way out.
    poller.stop();
    info!("Board server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Received shutdown signal");
}
