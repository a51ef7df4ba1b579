use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::biodata::{
    ExportError, FormSubmitError, LoginError, PhotoError, RenderError, StoreError,
};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Json(serde_json::Error),
    Export(ExportError),
    Submission(FormSubmitError),
    Login(LoginError),
    Store(StoreError),
    Photo(PhotoError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Json(err) => write!(f, "invalid application json: {}", err),
            AppError::Export(err) => write!(f, "export failed: {}", err),
            AppError::Submission(err) => write!(f, "submission failed: {}", err),
            AppError::Login(err) => write!(f, "login failed: {}", err),
            AppError::Store(err) => write!(f, "store error: {}", err),
            AppError::Photo(err) => write!(f, "photo error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::Export(err) => Some(err),
            AppError::Submission(err) => Some(err),
            AppError::Login(err) => Some(err),
            AppError::Store(err) => Some(err),
            AppError::Photo(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<ExportError> for AppError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

impl From<RenderError> for AppError {
    fn from(value: RenderError) -> Self {
        Self::Export(ExportError::Render(value))
    }
}

impl From<FormSubmitError> for AppError {
    fn from(value: FormSubmitError) -> Self {
        Self::Submission(value)
    }
}

impl From<LoginError> for AppError {
    fn from(value: LoginError) -> Self {
        Self::Login(value)
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<PhotoError> for AppError {
    fn from(value: PhotoError) -> Self {
        Self::Photo(value)
    }
}
