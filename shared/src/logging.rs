//! Shared logging bootstrap for consistent tracing output

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for a service binary.
///
/// `log_level` applies to our own crates; noisy HTTP internals are pinned to
/// warn. `RUST_LOG` takes precedence when set.
pub fn init_tracing(log_level: Option<&str>) {
    let base_level = log_level.unwrap_or("info");
    let default_filter = format!(
        "boardserver={base_level},shared={base_level},tower=warn,hyper=warn,reqwest=warn"
    );

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    tracing_subscriber::registry().with(env_filter).with(fmt_layer).init();
}
