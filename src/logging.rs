//! Logging setup
//!
//! Thin wrapper around `tracing-subscriber` for binaries and test harnesses
//! embedding the engine. The engine itself only emits events; hosts that
//! already install their own subscriber can ignore this module entirely.
//!
//! Engine events never include password material, only derived metrics such
//! as lengths and entropy values.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Subscriber configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset
    pub level: Level,
    /// Whether to include event timestamps
    pub include_timestamps: bool,
    /// Whether to include the emitting module path
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            include_timestamps: true,
            include_targets: false,
        }
    }
}

/// Install a global subscriber. Honors `RUST_LOG` when set, otherwise falls
/// back to the configured level. Safe to call more than once; later calls
/// are no-ops.
pub fn init_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str().to_lowercase()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.include_targets);

    let result = if config.include_timestamps {
        builder.try_init()
    } else {
        builder.without_time().try_init()
    };

    // An already-installed subscriber is fine.
    let _ = result;
    Ok(())
}
