//! Routes `tracing` macros into a logger.
//!
//! Run with `cargo run -p logger --example tracing_demo --features tracing`.

use std::sync::Arc;

use logger::{LogEvent, Logger, Severity, init_tracing};

fn main() {
    let logger = Arc::new(Logger::with_threshold(Severity::Debug));
    logger.subscribe(|event: &LogEvent| {
        println!("[{:>8}] {}", event.level(), event.message());
    });
    logger.add_level_handler(Severity::Critical, |message| {
        eprintln!("paging on-call: {message}");
    });

    init_tracing(Arc::clone(&logger));

    tracing::trace!("not shown: below the debug threshold");
    tracing::debug!("connecting to {}", "db.internal");
    tracing::info!("connected");
    tracing::warn!(retries = 2, "slow handshake");
    tracing::error!("replica lost");
}
