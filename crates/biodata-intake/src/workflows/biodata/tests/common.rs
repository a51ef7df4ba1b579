use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use chrono::NaiveDate;

use crate::workflows::biodata::domain::{
    Application, CivilStatus, FamilyMember, Gender, LanguageSkill, Proficiency, WorkExperience,
};
use crate::workflows::biodata::export::{
    BiodataDocument, PdfRenderer, RenderError, WorkbookLayout, WorkbookRenderer,
};
use crate::workflows::biodata::{
    ApplicationKey, ApplicationStore, AuthError, Identity, IdentityProvider, Listener,
    ListenerRegistry, SnapshotEvent, StoreError, StoredApplication, SubmissionError,
    SubmissionPipeline, Subscription,
};

pub(super) const COLLECTION: &str = "applicants";

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date")
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn work(from: &str, to: &str, company: &str) -> WorkExperience {
    WorkExperience {
        from: from.to_string(),
        to: to.to_string(),
        company_info: company.to_string(),
        position_status: "Staf Admin / Tetap".to_string(),
        salary: "4.500.000".to_string(),
        reason_for_leaving: "Kontrak selesai".to_string(),
        ..WorkExperience::blank()
    }
}

/// Application with every required field filled in; the declaration name is left blank.
pub(super) fn complete_application(full_name: &str) -> Application {
    let mut application = Application::initial(today());
    application.applied_position = "Customer Service".to_string();

    let personal = &mut application.personal;
    personal.full_name = full_name.to_string();
    personal.gender = Gender::Female;
    personal.birth_place = "Bandung".to_string();
    personal.birth_date = Some(date(1998, 4, 12));
    personal.phone = "081234567890".to_string();
    personal.email = "siti@mail.com".to_string();
    personal.ktp_number = "3273015204980001".to_string();

    application.declaration.city = "Jakarta".to_string();
    application
}

pub(super) fn detailed_application(full_name: &str) -> Application {
    let mut application = complete_application(full_name);
    application.education.formal[2].school_name = "SMA Negeri 3 Bandung".to_string();
    application.education.formal[4].school_name = "Universitas Padjadjaran".to_string();
    application.education.formal[4].major = "Akuntansi".to_string();
    application.work_experience = vec![
        work("2019", "2021", "PT Sinar Jaya"),
        work("2021", "2024", "PT Bank Sejahtera"),
    ];
    application.family.civil_status = CivilStatus::Married;
    application.family.marriage_date = Some(date(2022, 6, 1));
    application.family.spouse_and_children = vec![FamilyMember {
        name: "Andi".to_string(),
        gender: Gender::Male,
        ..FamilyMember::blank()
    }];
    application.family.parents_and_siblings[0].name = "Slamet".to_string();
    application.skills.computer.programs = vec!["Word".to_string(), "Excel".to_string()];
    application.skills.language.languages = vec![LanguageSkill {
        name: "Inggris".to_string(),
        proficiency: Proficiency::Active,
        ..LanguageSkill::blank()
    }];
    application
}

/// Store keeping one collection in memory and re-publishing it after every write.
#[derive(Default)]
pub(super) struct MemoryStore {
    records: Mutex<Vec<StoredApplication>>,
    listeners: ListenerRegistry<SnapshotEvent>,
    sequence: AtomicUsize,
}

impl MemoryStore {
    pub(super) fn stored(&self) -> Vec<StoredApplication> {
        self.records.lock().expect("store mutex poisoned").clone()
    }

    pub(super) fn seed(&self, applications: &[Application]) {
        for application in applications {
            self.create(COLLECTION, application).expect("seed succeeds");
        }
    }

    pub(super) fn publish_failure(&self, message: &str) {
        self.listeners
            .notify(&Err(StoreError::Unavailable(message.to_string())));
    }
}

impl ApplicationStore for MemoryStore {
    fn create(
        &self,
        _collection: &str,
        application: &Application,
    ) -> Result<ApplicationKey, StoreError> {
        let id = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let key = ApplicationKey(format!("doc-{id:03}"));
        let snapshot = {
            let mut records = self.records.lock().expect("store mutex poisoned");
            records.push(StoredApplication {
                key: key.clone(),
                application: application.clone(),
            });
            records.clone()
        };
        self.listeners.notify(&Ok(snapshot));
        Ok(key)
    }

    fn subscribe(&self, _collection: &str, listener: Listener<SnapshotEvent>) -> Subscription {
        self.listeners
            .register_and_prime(listener, &Ok(self.stored()))
    }
}

/// Store whose writes always fail.
#[derive(Default)]
pub(super) struct FailingStore {
    pub(super) attempts: AtomicUsize,
}

impl ApplicationStore for FailingStore {
    fn create(&self, _collection: &str, _application: &Application) -> Result<ApplicationKey, StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("network down".to_string()))
    }

    fn subscribe(&self, _collection: &str, _listener: Listener<SnapshotEvent>) -> Subscription {
        Subscription::detached()
    }
}

/// Store that tries a second submission through the same pipeline while the first is in flight.
#[derive(Default)]
pub(super) struct ReentrantStore {
    pub(super) pipeline: OnceLock<Arc<SubmissionPipeline<ReentrantStore>>>,
    pub(super) nested: Mutex<Option<Result<(), SubmissionError>>>,
}

impl ApplicationStore for ReentrantStore {
    fn create(&self, _collection: &str, application: &Application) -> Result<ApplicationKey, StoreError> {
        if let Some(pipeline) = self.pipeline.get() {
            let outcome = pipeline.submit(application).map(|_| ());
            *self.nested.lock().expect("nested mutex poisoned") = Some(outcome);
        }
        Ok(ApplicationKey("doc-outer".to_string()))
    }

    fn subscribe(&self, _collection: &str, _listener: Listener<SnapshotEvent>) -> Subscription {
        Subscription::detached()
    }
}

/// Identity provider with a fixed password and a live identity feed.
#[derive(Default)]
pub(super) struct FakeIdentityProvider {
    current: Mutex<Option<Identity>>,
    listeners: ListenerRegistry<Option<Identity>>,
    fail_sign_out: bool,
}

impl FakeIdentityProvider {
    pub(super) const PASSWORD: &'static str = "rahasia";

    pub(super) fn failing_sign_out() -> Self {
        Self {
            fail_sign_out: true,
            ..Self::default()
        }
    }

    /// Publish a change without going through sign-in, as a session restore would.
    pub(super) fn restore(&self, identity: Option<Identity>) {
        *self.current.lock().expect("identity mutex poisoned") = identity.clone();
        self.listeners.notify(&identity);
    }

    pub(super) fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl IdentityProvider for FakeIdentityProvider {
    fn sign_in(&self, email: &str, secret: &str) -> Result<Identity, AuthError> {
        if secret != Self::PASSWORD {
            return Err(AuthError::InvalidCredentials);
        }
        let identity = Identity::new(format!("uid-{email}"), Some(email));
        self.restore(Some(identity.clone()));
        Ok(identity)
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        if self.fail_sign_out {
            return Err(AuthError::Unavailable("offline".to_string()));
        }
        self.restore(None);
        Ok(())
    }

    fn subscribe(&self, listener: Listener<Option<Identity>>) -> Subscription {
        let current = self.current.lock().expect("identity mutex poisoned").clone();
        self.listeners.register_and_prime(listener, &current)
    }
}

/// Renderer that records what it was asked to draw.
#[derive(Default)]
pub(super) struct RecordingRenderer {
    pub(super) documents: Mutex<Vec<BiodataDocument>>,
    pub(super) workbooks: Mutex<Vec<WorkbookLayout>>,
}

impl RecordingRenderer {
    pub(super) fn calls(&self) -> usize {
        self.documents.lock().expect("renderer mutex poisoned").len()
            + self.workbooks.lock().expect("renderer mutex poisoned").len()
    }
}

impl PdfRenderer for RecordingRenderer {
    fn render(&self, document: &BiodataDocument) -> Result<Vec<u8>, RenderError> {
        self.documents
            .lock()
            .expect("renderer mutex poisoned")
            .push(document.clone());
        Ok(b"%PDF-fake".to_vec())
    }
}

impl WorkbookRenderer for RecordingRenderer {
    fn render(&self, layout: &WorkbookLayout) -> Result<Vec<u8>, RenderError> {
        self.workbooks
            .lock()
            .expect("renderer mutex poisoned")
            .push(layout.clone());
        Ok(b"PK-fake".to_vec())
    }
}
