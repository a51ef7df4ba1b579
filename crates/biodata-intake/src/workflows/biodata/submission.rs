use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info};

use super::domain::Application;
use super::repository::{ApplicationKey, ApplicationStore, StoreError};

/// Persists completed drafts into a named collection, one submission at a time.
pub struct SubmissionPipeline<S> {
    store: Arc<S>,
    collection: String,
    in_flight: AtomicBool,
}

/// Result of a successful submission: the store key and the record exactly as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub key: ApplicationKey,
    pub stored: Application,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("a submission is already in progress")]
    InFlight,
    #[error(transparent)]
    Store(#[from] StoreError),
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Fill the declaration signature from the applicant's name when it was left empty.
/// A whitespace-only signature counts as filled in and is stored as typed.
pub fn prepare_for_storage(application: &Application) -> Application {
    let mut record = application.clone();
    if record.declaration.full_name.is_empty() {
        record.declaration.full_name = record.personal.full_name.clone();
    }
    record
}

impl<S> SubmissionPipeline<S>
where
    S: ApplicationStore + 'static,
{
    pub fn new(store: Arc<S>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Persist `application` once. Failures are returned as-is and never retried.
    pub fn submit(&self, application: &Application) -> Result<SubmissionReceipt, SubmissionError> {
        let _guard = InFlightGuard::acquire(&self.in_flight).ok_or(SubmissionError::InFlight)?;

        let record = prepare_for_storage(application);
        match self.store.create(&self.collection, &record) {
            Ok(key) => {
                info!(
                    collection = %self.collection,
                    key = %key,
                    position = %record.applied_position,
                    "application submitted"
                );
                Ok(SubmissionReceipt {
                    key,
                    stored: record,
                })
            }
            Err(err) => {
                error!(collection = %self.collection, error = %err, "application submission failed");
                Err(err.into())
            }
        }
    }
}
