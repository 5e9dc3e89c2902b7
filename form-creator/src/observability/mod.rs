//! Observability (structured logging)
//!
//! The library only emits `tracing` events; binaries that want to see them
//! install a subscriber with [`init`] or [`init_with`].

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable multi-line output
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Observability configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Filter used when `RUST_LOG` is not set
    pub default_filter: String,

    /// Output format
    pub format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self {
                default_filter: "debug,form_creator=trace".to_string(),
                format: LogFormat::Pretty,
            }
        } else {
            Self {
                default_filter: "info".to_string(),
                format: LogFormat::Json,
            }
        }
    }
}

impl ObservabilityConfig {
    /// Create a config with an explicit default filter
    pub fn new(default_filter: impl Into<String>) -> Self {
        Self {
            default_filter: default_filter.into(),
            ..Default::default()
        }
    }

    /// Emit JSON lines
    #[must_use]
    pub const fn with_json(mut self) -> Self {
        self.format = LogFormat::Json;
        self
    }

    /// Emit pretty output
    #[must_use]
    pub const fn with_pretty(mut self) -> Self {
        self.format = LogFormat::Pretty;
        self
    }
}

/// Initialize logging with build-dependent defaults
///
/// Debug builds log pretty output at `debug` (`trace` for this crate),
/// release builds log JSON at `info`. `RUST_LOG` overrides the filter.
///
/// # Example
///
/// ```rust,no_run
/// use form_creator::observability;
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init()?;
/// tracing::info!("Application started");
/// # Ok(())
/// # }
/// ```
pub fn init() -> anyhow::Result<()> {
    init_with(&ObservabilityConfig::default())
}

/// Initialize logging from an explicit configuration
///
/// Fails if a global subscriber is already installed.
pub fn init_with(config: &ObservabilityConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_filter))?;

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()?,
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ObservabilityConfig::default();
        if cfg!(debug_assertions) {
            assert_eq!(config.default_filter, "debug,form_creator=trace");
            assert_eq!(config.format, LogFormat::Pretty);
        } else {
            assert_eq!(config.format, LogFormat::Json);
        }
    }

    #[test]
    fn test_builder() {
        let config = ObservabilityConfig::new("warn").with_json();
        assert_eq!(config.default_filter, "warn");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_second_init_fails() {
        let config = ObservabilityConfig::new("off");
        let first = init_with(&config);
        assert!(first.is_err() || init_with(&config).is_err());
    }
}
