//! Tracing initialization for the command-line tools.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding per-module log directives, e.g.
/// `FRAME_GRAMMAR_LOG=frame_grammar::core::extractor=debug`.
pub const LOG_ENV: &str = "FRAME_GRAMMAR_LOG";

/// Install a stderr `fmt` subscriber filtered by [`LOG_ENV`], falling back to
/// `frame_grammar=info`. Later calls do nothing.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new("frame_grammar=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .try_init()
            .ok();
    });
}
