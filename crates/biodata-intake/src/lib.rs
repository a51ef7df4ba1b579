//! Applicant biodata intake: the form model and reducer, the session gate, submission into a
//! document store, and PDF/workbook exports for reviewers.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

pub use error::AppError;
