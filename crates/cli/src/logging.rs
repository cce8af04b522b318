//! Tracing subscriber setup for the CLI.
//!
//! Diagnostics go to stderr so stdout stays reserved for the summary and
//! `--json` output. `RUST_LOG` takes precedence over the flags. The default
//! level is `info`, which shows replacement notices while a scan is running.

use std::io::IsTerminal;
use std::sync::Once;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Install the global subscriber. Subsequent calls are ignored.
pub fn init_tracing(verbose: bool, json: bool) {
    INIT.call_once(|| {
        let default_level = if verbose { "debug" } else { "info" };
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

        let ansi = std::io::stderr().is_terminal();
        let registry = tracing_subscriber::registry().with(env_filter);
        if json {
            registry.with(fmt::layer().json().with_writer(std::io::stderr).with_target(true)).init();
        } else {
            registry
                .with(fmt::layer().with_writer(std::io::stderr).with_ansi(ansi).with_target(false))
                .init();
        }
    });
}
