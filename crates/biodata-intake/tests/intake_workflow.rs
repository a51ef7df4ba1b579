//! End-to-end intake scenarios driven through the public API: an applicant signs in, fills the
//! form and submits; an administrator then reviews and exports what was stored.

mod common {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use biodata_intake::workflows::biodata::{
        Application, ApplicationKey, ApplicationStore, AuthError, Identity, IdentityProvider,
        Listener, ListenerRegistry, SnapshotEvent, StoreError, StoredApplication, Subscription,
    };

    #[derive(Default)]
    pub(super) struct SharedStore {
        records: Mutex<Vec<StoredApplication>>,
        listeners: ListenerRegistry<SnapshotEvent>,
        sequence: AtomicUsize,
    }

    impl ApplicationStore for SharedStore {
        fn create(
            &self,
            _collection: &str,
            application: &Application,
        ) -> Result<ApplicationKey, StoreError> {
            let key = ApplicationKey(format!(
                "applicant-{}",
                self.sequence.fetch_add(1, Ordering::SeqCst) + 1
            ));
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
            let current = self.records.lock().expect("store mutex poisoned").clone();
            self.listeners.register_and_prime(listener, &Ok(current))
        }
    }

    #[derive(Default)]
    pub(super) struct PasswordProvider {
        current: Mutex<Option<Identity>>,
        listeners: ListenerRegistry<Option<Identity>>,
    }

    impl IdentityProvider for PasswordProvider {
        fn sign_in(&self, email: &str, secret: &str) -> Result<Identity, AuthError> {
            if secret != "secret-123" {
                return Err(AuthError::InvalidCredentials);
            }
            let identity = Identity::new(format!("uid:{email}"), Some(email));
            *self.current.lock().expect("identity mutex poisoned") = Some(identity.clone());
            self.listeners.notify(&Some(identity.clone()));
            Ok(identity)
        }

        fn sign_out(&self) -> Result<(), AuthError> {
            *self.current.lock().expect("identity mutex poisoned") = None;
            self.listeners.notify(&None);
            Ok(())
        }

        fn subscribe(&self, listener: Listener<Option<Identity>>) -> Subscription {
            let current = self.current.lock().expect("identity mutex poisoned").clone();
            self.listeners.register_and_prime(listener, &current)
        }
    }
}

use std::sync::Arc;
use std::time::Duration;

use biodata_intake::workflows::biodata::domain::{Gender, WorkExperience};
use biodata_intake::workflows::biodata::export::{PrintPdfRenderer, XlsxRenderer};
use biodata_intake::workflows::biodata::reducer::{
    ApplicationField, DeclarationField, ItemEdit, ListItem, ListKey, PersonalField, SectionField,
    WorkField,
};
use biodata_intake::workflows::biodata::{
    AdminDashboard, ApplicantForm, FormAction, SessionGate, SubmissionPipeline,
    SubmissionStatus, View,
};
use chrono::NaiveDate;
use common::{PasswordProvider, SharedStore};

fn personal(field: PersonalField) -> FormAction {
    FormAction::SetSectionField(SectionField::Personal(field))
}

fn fill_required<S>(form: &mut ApplicantForm<S>)
where
    S: biodata_intake::workflows::biodata::ApplicationStore + 'static,
{
    form.dispatch(FormAction::SetField(ApplicationField::AppliedPosition(
        "Teller".to_string(),
    )));
    form.dispatch(personal(PersonalField::FullName("Dewi Lestari".to_string())));
    form.dispatch(personal(PersonalField::Gender(Gender::Female)));
    form.dispatch(personal(PersonalField::BirthPlace("Surabaya".to_string())));
    form.dispatch(personal(PersonalField::BirthDate(NaiveDate::from_ymd_opt(
        1997, 2, 3,
    ))));
    form.dispatch(personal(PersonalField::Phone("081300001111".to_string())));
    form.dispatch(personal(PersonalField::Email("dewi@mail.com".to_string())));
    form.dispatch(personal(PersonalField::KtpNumber("3578014302970002".to_string())));
    form.dispatch(FormAction::SetSectionField(SectionField::Declaration(
        DeclarationField::City("Surabaya".to_string()),
    )));
}

#[tokio::test(start_paused = true)]
async fn applicant_submission_reaches_the_admin_dashboard() {
    let store = Arc::new(SharedStore::default());
    let provider = Arc::new(PasswordProvider::default());
    let gate = SessionGate::mount(provider.clone());
    assert_eq!(gate.view(), View::Login);

    gate.login("dewi@mail.com", "secret-123")
        .expect("applicant signs in");
    assert_eq!(gate.view(), View::ApplicantForm);

    let pipeline = Arc::new(SubmissionPipeline::new(store.clone(), "applicants"));
    let mut form = ApplicantForm::mount(pipeline, Duration::from_millis(3000));
    fill_required(&mut form);

    let first = WorkExperience::blank();
    let first_id = first.id.clone();
    form.dispatch(FormAction::AppendItem(ListItem::Work(first)));
    form.dispatch(FormAction::AppendItem(ListItem::Work(WorkExperience::blank())));
    form.dispatch(FormAction::UpdateItem {
        index: 1,
        edit: ItemEdit::Work(WorkField::CompanyInfo("PT Bank Nusantara".to_string())),
    });
    form.dispatch(FormAction::RemoveItem {
        list: ListKey::WorkExperience,
        id: first_id,
    });
    assert_eq!(form.draft().work_experience.len(), 1);

    let key = form.submit().expect("submission succeeds");
    assert!(matches!(form.status(), SubmissionStatus::Succeeded { .. }));
    assert!(form.finish_confirmation().await);
    assert!(form.draft().personal.full_name.is_empty());

    gate.logout();
    gate.login("recruit.admin@mail.com", "secret-123")
        .expect("admin signs in");
    assert_eq!(gate.view(), View::AdminDashboard);

    let dashboard = AdminDashboard::mount(store.as_ref(), "applicants");
    assert!(!dashboard.is_loading());
    let applicants = dashboard.applicants();
    assert_eq!(applicants.len(), 1);
    assert_eq!(applicants[0].key, key);
    assert_eq!(
        applicants[0].application.declaration.full_name, "Dewi Lestari",
        "declaration name backfilled on submit"
    );
    assert_eq!(
        applicants[0].application.work_experience[0].company_info,
        "PT Bank Nusantara"
    );

    let pdf = dashboard
        .export_pdf(&key, &PrintPdfRenderer)
        .expect("pdf renders");
    assert_eq!(pdf.file_name, "Biodata_Dewi_Lestari.pdf");
    assert!(pdf.bytes.starts_with(b"%PDF"));

    let workbook = dashboard
        .export_workbook(&key, &XlsxRenderer)
        .expect("workbook renders");
    assert_eq!(workbook.file_name, "Biodata_Dewi_Lestari.xlsx");
    assert!(workbook.bytes.starts_with(b"PK"));

    let today = NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date");
    let recap = dashboard
        .export_recap(&XlsxRenderer, today)
        .expect("recap renders");
    assert_eq!(recap.file_name, "Rekapitulasi_Pelamar_18-10-2026.xlsx");
    assert!(recap.bytes.starts_with(b"PK"));
}

#[test]
fn login_failure_hides_the_cause() {
    let provider = Arc::new(PasswordProvider::default());
    let gate = SessionGate::mount(provider);

    let err = gate
        .login("dewi@mail.com", "wrong")
        .expect_err("bad password rejected");

    assert_eq!(err.to_string(), "Email atau password salah.");
    assert_eq!(gate.view(), View::Login);
}
