use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the intake tooling.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub intake: IntakeConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let collection =
            env::var("BIODATA_COLLECTION").unwrap_or_else(|_| DEFAULT_COLLECTION.to_string());
        if collection.trim().is_empty() {
            return Err(ConfigError::EmptyCollection);
        }

        let delay_ms = env::var("BIODATA_CONFIRMATION_DELAY_MS")
            .unwrap_or_else(|_| DEFAULT_CONFIRMATION_DELAY_MS.to_string())
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidConfirmationDelay)?;

        let export_dir = env::var("BIODATA_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_EXPORT_DIR));

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            intake: IntakeConfig {
                collection: collection.trim().to_string(),
                confirmation_delay: Duration::from_millis(delay_ms),
                export_dir,
            },
        })
    }
}

pub const DEFAULT_COLLECTION: &str = "applicants";
pub const DEFAULT_CONFIRMATION_DELAY_MS: u64 = 3000;
pub const DEFAULT_EXPORT_DIR: &str = "exports";

/// Where submissions go and how the applicant flow is paced.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    pub collection: String,
    pub confirmation_delay: Duration,
    pub export_dir: PathBuf,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_string(),
            confirmation_delay: Duration::from_millis(DEFAULT_CONFIRMATION_DELAY_MS),
            export_dir: PathBuf::from(DEFAULT_EXPORT_DIR),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidConfirmationDelay,
    EmptyCollection,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidConfirmationDelay => write!(
                f,
                "BIODATA_CONFIRMATION_DELAY_MS must be a whole number of milliseconds"
            ),
            ConfigError::EmptyCollection => write!(f, "BIODATA_COLLECTION must not be empty"),
        }
    }
}

impl std::error::Error for ConfigError {}
