use crate::config::TelemetryConfig;
use tracing_subscriber::filter::{EnvFilter, ParseError};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("log filter `{directives}` is not valid")]
    InvalidFilter {
        directives: String,
        #[source]
        source: ParseError,
    },
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled(#[from] TryInitError),
}

/// Where the active log directives came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOrigin {
    RustLog,
    Configured,
}

/// Picks the scan's log filter. Usable `RUST_LOG` directives win; anything
/// else falls back to the configured level, which must parse.
pub fn log_filter(
    rust_log: Option<&str>,
    config: &TelemetryConfig,
) -> Result<(EnvFilter, FilterOrigin), TelemetryError> {
    let from_env = rust_log
        .map(str::trim)
        .filter(|directives| !directives.is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok());
    if let Some(filter) = from_env {
        return Ok((filter, FilterOrigin::RustLog));
    }

    EnvFilter::try_new(&config.log_level)
        .map(|filter| (filter, FilterOrigin::Configured))
        .map_err(|source| TelemetryError::InvalidFilter {
            directives: config.log_level.clone(),
            source,
        })
}

/// Installs a stderr-only subscriber; stdout stays reserved for the scan
/// summary.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (filter, origin) = log_filter(rust_log.as_deref(), config)?;

    let diagnostics = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(diagnostics)
        .try_init()?;

    tracing::debug!(?origin, "diagnostics enabled");
    Ok(())
}
