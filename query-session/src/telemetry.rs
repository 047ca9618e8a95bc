//! Logging setup for front ends embedding a query session.
//!
//! Events go to stderr so a terminal panel drawn on stdout stays readable.

use std::fmt;
use std::io::{self, IsTerminal};

use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Filter used when `RUST_LOG` is unset: quiet dependencies, session lifecycle at info.
pub const DEFAULT_DIRECTIVES: &str = "warn,query_session=info";

/// Wall-clock time of day (`14:03:07.412`); dates add nothing in an interactive session.
#[derive(Clone, Copy, Debug, Default)]
struct ClockTime;

impl FormatTime for ClockTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// `RUST_LOG` when set and valid, else `default`.
pub fn filter_from_env(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Installs the global subscriber.
///
/// # Errors
/// [`TryInitError`] when a global subscriber is already set.
pub fn init(default: &str) -> Result<(), TryInitError> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_timer(ClockTime)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter_from_env(default))
        .with(stderr_layer)
        .try_init()
}
