//! Tracing setup for the tagdex binary.
//!
//! Logs go to stderr so rendered output on stdout stays machine-readable.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "TAGDEX_LOG";

/// Initialise the global tracing subscriber.
///
/// `TAGDEX_LOG` takes precedence over `level`. Only the first call in a
/// process takes effect.
pub fn init_tracing(level: Level) {
    let env_filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .ok();
}
