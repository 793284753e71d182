//! Process-wide `tracing` subscriber.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt::{self, format::FmtSpan}};

/// Installs the global subscriber at `info`.
pub fn init() -> bool {
    init_with_default("info")
}

/// Installs the global subscriber. `RUST_LOG`, when set, replaces `default_directive`.
///
/// At debug verbosity the closing of every pipeline span is logged with its
/// busy/idle time. Returns `false` when a global subscriber was already set.
pub fn init_with_default(default_directive: &str) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let span_events = match env_filter.max_level_hint() {
        Some(level) if level >= LevelFilter::DEBUG => FmtSpan::CLOSE,
        _ => FmtSpan::NONE,
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(span_events);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
}
