//! Applicant-facing form controller: draft ownership, validation and the confirmation cycle.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::domain::{Application, Gender};
use super::reducer::{reduce, FormAction};
use super::repository::{ApplicationKey, ApplicationStore};
use super::submission::{SubmissionError, SubmissionPipeline};

pub const SUBMISSION_FAILED_MESSAGE: &str = "Gagal mengirim biodata. Coba lagi.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    Idle,
    Succeeded { key: ApplicationKey },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormSubmitError {
    #[error("required fields are blank: {}", .0.join(", "))]
    Incomplete(Vec<&'static str>),
    #[error("the previous submission is still being confirmed")]
    AwaitingReset,
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Wire paths of required fields that are still blank.
pub fn missing_required_fields(application: &Application) -> Vec<&'static str> {
    let personal = &application.personal;
    let declaration = &application.declaration;
    let checks = [
        ("appliedPosition", blank(&application.applied_position)),
        ("personal.fullName", blank(&personal.full_name)),
        ("personal.gender", personal.gender == Gender::Unset),
        ("personal.birthPlace", blank(&personal.birth_place)),
        ("personal.birthDate", personal.birth_date.is_none()),
        ("personal.phone", blank(&personal.phone)),
        ("personal.email", blank(&personal.email)),
        ("personal.ktpNumber", blank(&personal.ktp_number)),
        ("declaration.city", blank(&declaration.city)),
        ("declaration.date", declaration.date.is_none()),
        (
            "declaration.fullName",
            blank(&declaration.full_name) && blank(&personal.full_name),
        ),
    ];

    checks
        .into_iter()
        .filter_map(|(path, missing)| missing.then_some(path))
        .collect()
}

/// Draft owner for one applicant session.
pub struct ApplicantForm<S> {
    pipeline: Arc<SubmissionPipeline<S>>,
    confirmation_delay: Duration,
    draft: Application,
    status: SubmissionStatus,
}

impl<S> ApplicantForm<S>
where
    S: ApplicationStore + 'static,
{
    pub fn mount(pipeline: Arc<SubmissionPipeline<S>>, confirmation_delay: Duration) -> Self {
        Self {
            pipeline,
            confirmation_delay,
            draft: Application::new_draft(),
            status: SubmissionStatus::Idle,
        }
    }

    pub fn draft(&self) -> &Application {
        &self.draft
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn is_submitting(&self) -> bool {
        self.pipeline.is_busy()
    }

    pub fn dispatch(&mut self, action: FormAction) {
        self.draft = reduce(&self.draft, action);
    }

    pub fn submit(&mut self) -> Result<ApplicationKey, FormSubmitError> {
        if matches!(self.status, SubmissionStatus::Succeeded { .. }) {
            return Err(FormSubmitError::AwaitingReset);
        }

        let missing = missing_required_fields(&self.draft);
        if !missing.is_empty() {
            debug!(fields = ?missing, "submission blocked by blank required fields");
            return Err(FormSubmitError::Incomplete(missing));
        }

        match self.pipeline.submit(&self.draft) {
            Ok(receipt) => {
                self.status = SubmissionStatus::Succeeded {
                    key: receipt.key.clone(),
                };
                Ok(receipt.key)
            }
            Err(SubmissionError::InFlight) => Err(SubmissionError::InFlight.into()),
            Err(err) => {
                warn!(error = %err, "keeping draft after failed submission");
                self.status = SubmissionStatus::Failed {
                    message: SUBMISSION_FAILED_MESSAGE.to_string(),
                };
                Err(err.into())
            }
        }
    }

    /// Hold the confirmation for the configured delay, then start a fresh draft.
    ///
    /// Returns `false` without waiting when there is no successful submission to confirm.
    pub async fn finish_confirmation(&mut self) -> bool {
        if !matches!(self.status, SubmissionStatus::Succeeded { .. }) {
            return false;
        }

        tokio::time::sleep(self.confirmation_delay).await;
        self.dispatch(FormAction::Reset);
        self.status = SubmissionStatus::Idle;
        info!("confirmation finished; draft reset");
        true
    }
}
