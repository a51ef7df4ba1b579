use std::sync::Arc;
use std::time::Duration;

use super::common::*;
use crate::workflows::biodata::domain::CivilStatus;
use crate::workflows::biodata::reducer::{
    ApplicationField, FamilyField, PersonalField, SectionField,
};
use crate::workflows::biodata::{
    missing_required_fields, Application, ApplicantForm, ApplicationStore, FormAction,
    FormSubmitError, SubmissionError, SubmissionPipeline, SubmissionStatus,
    SUBMISSION_FAILED_MESSAGE,
};

const DELAY: Duration = Duration::from_millis(3000);

fn form_with<S: ApplicationStore + 'static>(store: Arc<S>) -> ApplicantForm<S> {
    ApplicantForm::mount(Arc::new(SubmissionPipeline::new(store, COLLECTION)), DELAY)
}

fn fill<S: ApplicationStore + 'static>(form: &mut ApplicantForm<S>, application: Application) {
    form.dispatch(FormAction::SetField(ApplicationField::AppliedPosition(
        application.applied_position,
    )));
    form.dispatch(FormAction::SetField(ApplicationField::Personal(
        application.personal,
    )));
    form.dispatch(FormAction::SetField(ApplicationField::Declaration(
        application.declaration,
    )));
}

#[test]
fn fresh_draft_lists_required_fields() {
    let missing = missing_required_fields(&Application::initial(today()));

    assert!(missing.contains(&"appliedPosition"));
    assert!(missing.contains(&"personal.fullName"));
    assert!(missing.contains(&"personal.ktpNumber"));
    assert!(missing.contains(&"declaration.city"));
    assert!(missing.contains(&"declaration.fullName"));
    assert!(!missing.contains(&"declaration.date"));
    assert!(!missing.iter().any(|path| path.starts_with("family.")));
}

#[test]
fn personal_name_satisfies_declaration_name() {
    let application = complete_application("Siti Rahma");

    assert!(missing_required_fields(&application).is_empty());
}

#[test]
fn incomplete_draft_never_reaches_the_store() {
    let store = Arc::new(MemoryStore::default());
    let mut form = form_with(store.clone());

    match form.submit() {
        Err(FormSubmitError::Incomplete(fields)) => assert!(fields.contains(&"personal.email")),
        other => panic!("expected incomplete draft, got {other:?}"),
    }
    assert!(store.stored().is_empty());
    assert_eq!(form.status(), &SubmissionStatus::Idle);
}

#[test]
fn failed_submission_keeps_the_draft() {
    let store = Arc::new(FailingStore::default());
    let mut form = form_with(store);
    fill(&mut form, complete_application("Siti Rahma"));
    let before = form.draft().clone();

    let result = form.submit();

    assert!(matches!(
        result,
        Err(FormSubmitError::Submission(SubmissionError::Store(_)))
    ));
    assert_eq!(form.draft(), &before);
    assert_eq!(
        form.status(),
        &SubmissionStatus::Failed {
            message: SUBMISSION_FAILED_MESSAGE.to_string()
        }
    );
    assert!(!form.is_submitting());
}

#[tokio::test(start_paused = true)]
async fn confirmation_resets_the_draft_after_the_delay() {
    let store = Arc::new(MemoryStore::default());
    let mut form = form_with(store.clone());
    fill(&mut form, complete_application("Siti Rahma"));

    let key = form.submit().expect("submission succeeds");
    assert_eq!(form.status(), &SubmissionStatus::Succeeded { key: key.clone() });
    assert!(matches!(form.submit(), Err(FormSubmitError::AwaitingReset)));
    assert_eq!(store.stored().len(), 1);

    let started = tokio::time::Instant::now();
    assert!(form.finish_confirmation().await);

    assert!(started.elapsed() >= DELAY);
    assert_eq!(form.status(), &SubmissionStatus::Idle);
    assert!(form.draft().personal.full_name.is_empty());
    assert!(form.draft().applied_position.is_empty());
}

#[tokio::test(start_paused = true)]
async fn confirmation_without_success_returns_immediately() {
    let mut form = form_with(Arc::new(MemoryStore::default()));
    form.dispatch(FormAction::SetSectionField(SectionField::Personal(
        PersonalField::FullName("Siti".to_string()),
    )));

    let started = tokio::time::Instant::now();
    assert!(!form.finish_confirmation().await);
    assert_eq!(started.elapsed(), Duration::ZERO);
    assert_eq!(form.draft().personal.full_name, "Siti");
}

#[test]
fn marriage_and_divorce_dates_are_never_required() {
    let store = Arc::new(MemoryStore::default());
    let mut form = form_with(store.clone());
    fill(&mut form, complete_application("Siti Rahma"));

    for status in [CivilStatus::Unmarried, CivilStatus::Married, CivilStatus::Divorced] {
        form.dispatch(FormAction::SetSectionField(SectionField::Family(
            FamilyField::CivilStatus(status),
        )));
        assert_eq!(form.draft().family.marriage_date, None);
        assert_eq!(form.draft().family.divorce_date, None);
        assert!(
            missing_required_fields(form.draft()).is_empty(),
            "{status:?} should not require family dates"
        );
    }

    let key = form.submit().expect("married applicant without dates submits");
    let stored = store.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].key, key);
    assert_eq!(stored[0].application.family.civil_status, CivilStatus::Divorced);
}
