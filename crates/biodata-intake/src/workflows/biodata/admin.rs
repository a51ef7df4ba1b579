use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use tracing::{error, info};

use super::domain::Application;
use super::export::{
    export_pdf, export_recap, export_workbook, Artifact, ExportError, PdfRenderer,
    WorkbookRenderer,
};
use super::repository::{ApplicationKey, ApplicationStore, SnapshotEvent, StoredApplication};
use super::subscription::Subscription;

#[derive(Debug)]
struct DashboardState {
    applicants: Vec<StoredApplication>,
    loading: bool,
}

/// Live view over the submitted applications, kept current by a store subscription.
pub struct AdminDashboard {
    state: Arc<Mutex<DashboardState>>,
    subscription: Option<Subscription>,
}

impl AdminDashboard {
    pub fn mount<S>(store: &S, collection: &str) -> Self
    where
        S: ApplicationStore + ?Sized,
    {
        let state = Arc::new(Mutex::new(DashboardState {
            applicants: Vec::new(),
            loading: true,
        }));
        let sink = Arc::clone(&state);
        let subscription = store.subscribe(
            collection,
            Box::new(move |event: &SnapshotEvent| {
                let mut guard = sink.lock().unwrap_or_else(PoisonError::into_inner);
                match event {
                    Ok(applicants) => {
                        info!(count = applicants.len(), "applicant snapshot received");
                        guard.applicants = applicants.clone();
                    }
                    Err(err) => error!(error = %err, "applicant subscription failed"),
                }
                guard.loading = false;
            }),
        );

        Self {
            state,
            subscription: Some(subscription),
        }
    }

    fn state(&self) -> MutexGuard<'_, DashboardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    pub fn applicants(&self) -> Vec<StoredApplication> {
        self.state().applicants.clone()
    }

    pub fn total(&self) -> usize {
        self.state().applicants.len()
    }

    fn find(&self, key: &ApplicationKey) -> Result<Application, ExportError> {
        self.state()
            .applicants
            .iter()
            .find(|stored| &stored.key == key)
            .map(|stored| stored.application.clone())
            .ok_or_else(|| ExportError::UnknownApplicant(key.to_string()))
    }

    pub fn export_pdf<R>(&self, key: &ApplicationKey, renderer: &R) -> Result<Artifact, ExportError>
    where
        R: PdfRenderer + ?Sized,
    {
        let application = self.find(key)?;
        Ok(export_pdf(&application, renderer)?)
    }

    pub fn export_workbook<R>(
        &self,
        key: &ApplicationKey,
        renderer: &R,
    ) -> Result<Artifact, ExportError>
    where
        R: WorkbookRenderer + ?Sized,
    {
        let application = self.find(key)?;
        Ok(export_workbook(&application, renderer)?)
    }

    pub fn export_recap<R>(&self, renderer: &R, today: NaiveDate) -> Result<Artifact, ExportError>
    where
        R: WorkbookRenderer + ?Sized,
    {
        let applications: Vec<Application> = self
            .state()
            .applicants
            .iter()
            .map(|stored| stored.application.clone())
            .collect();
        export_recap(&applications, renderer, today)
    }

    /// Stop listening; the snapshot already received stays readable.
    pub fn unmount(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
            info!("admin dashboard unmounted");
        }
    }
}

impl Drop for AdminDashboard {
    fn drop(&mut self) {
        self.unmount();
    }
}
