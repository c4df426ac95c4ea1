// Logging module - Logging infrastructure
use crate::domain::config::GlobalConfig;
use crate::domain::error::{DataSfError, DataSfResult};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Legacy variable honoured after `RUST_LOG`
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Pick the filter directive.
///
/// Priority: `RUST_LOG`, `LOG_LEVEL`, `--verbose`, configured level.
pub fn resolve_filter(
    config: &GlobalConfig,
    verbose: bool,
    rust_log: Option<String>,
    log_level: Option<String>,
) -> String {
    if let Some(directive) = rust_log.filter(|v| !v.is_empty()) {
        return directive;
    }
    if let Some(level) = log_level.filter(|v| !v.is_empty()) {
        return level.to_lowercase();
    }
    if verbose {
        return "debug".to_string();
    }
    config.log_level.to_lowercase()
}

/// Initialize logging system; logs go to stderr so pages on stdout stay clean
pub fn init_logging(config: &GlobalConfig, verbose: bool) -> DataSfResult<()> {
    let directive = resolve_filter(
        config,
        verbose,
        std::env::var(EnvFilter::DEFAULT_ENV).ok(),
        std::env::var(LOG_LEVEL_ENV).ok(),
    );
    let env_filter = EnvFilter::try_new(&directive).map_err(|e| DataSfError::Config {
        message: format!("Invalid log filter '{}': {}", directive, e),
    })?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_level(true),
        )
        .try_init()
        .map_err(|e| DataSfError::Config {
            message: format!("Failed to initialize logging: {}", e),
        })?;

    tracing::debug!("Logging initialized with filter '{}'", directive);
    Ok(())
}
