use crate::workflows::listings::FilterConfig;
use std::env;
use std::fmt;
use std::path::PathBuf;

const DEFAULT_INPUT: &str = "cardata";
const DEFAULT_CSV_PATH: &str = "van_candidates.csv";
const DEFAULT_JSON_PATH: &str = "van_candidates.json";

/// Top-level configuration for a scan run. Only file locations and logging
/// come from the environment; the filter rubric is fixed.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input: InputConfig,
    pub export: ExportConfig,
    pub filter: FilterConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let input = InputConfig {
            path: env_path("VAN_SCOUT_INPUT", DEFAULT_INPUT),
        };

        let export = ExportConfig {
            csv_path: env_path("VAN_SCOUT_CSV_PATH", DEFAULT_CSV_PATH),
            json_path: env_path("VAN_SCOUT_JSON_PATH", DEFAULT_JSON_PATH),
        };

        export.validate()?;

        let log_level = env::var("VAN_SCOUT_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        Ok(Self {
            input,
            export,
            filter: FilterConfig::todd(),
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn env_path(var: &str, default: &str) -> PathBuf {
    env::var(var)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

/// Where the listing feed is read from.
#[derive(Debug, Clone)]
pub struct InputConfig {
    pub path: PathBuf,
}

/// Destination files for the ranked candidates.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub csv_path: PathBuf,
    pub json_path: PathBuf,
}

impl ExportConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.csv_path == self.json_path {
            return Err(ConfigError::OutputCollision {
                path: self.csv_path.clone(),
            });
        }
        Ok(())
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    OutputCollision { path: PathBuf },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::OutputCollision { path } => write!(
                f,
                "CSV and JSON exports both point at {}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
