//! Logging bootstrap.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::config::SpellListConfig;

/// Install the global subscriber: `RUST_LOG` if set, else the configured
/// directive. A second call is a no-op that returns an error.
pub fn init_tracing(config: &SpellListConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_directive))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    tracing::debug!(directive = %config.log_directive, "Tracing initialised");
    Ok(())
}
