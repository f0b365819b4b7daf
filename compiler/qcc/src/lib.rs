//! The QuickCode command-line runner.
//!
//! Loads `.qc` scripts from disk, runs them one at a time or as a batch,
//! and reports results. The binary (`qc`) is a thin argument parser over
//! [`commands`].

pub mod commands;
pub mod load;
pub mod test;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Only active when `RUST_LOG` is set, e.g.
/// `RUST_LOG=qc_eval=trace` to follow every executed instruction.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}
