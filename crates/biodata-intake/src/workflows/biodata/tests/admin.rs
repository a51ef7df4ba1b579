use super::common::*;
use crate::workflows::biodata::export::EMPTY_RECAP_MESSAGE;
use crate::workflows::biodata::{AdminDashboard, ApplicationKey, ApplicationStore, ExportError};

#[test]
fn mount_loads_the_current_snapshot() {
    let store = MemoryStore::default();
    store.seed(&[complete_application("Siti Rahma")]);

    let dashboard = AdminDashboard::mount(&store, COLLECTION);

    assert!(!dashboard.is_loading());
    assert_eq!(dashboard.total(), 1);
}

#[test]
fn new_submissions_replace_the_snapshot() {
    let store = MemoryStore::default();
    let dashboard = AdminDashboard::mount(&store, COLLECTION);
    assert_eq!(dashboard.total(), 0);

    store
        .create(COLLECTION, &complete_application("Budi Santoso"))
        .expect("write succeeds");
    store
        .create(COLLECTION, &complete_application("Siti Rahma"))
        .expect("write succeeds");

    let names: Vec<String> = dashboard
        .applicants()
        .into_iter()
        .map(|stored| stored.application.personal.full_name)
        .collect();
    assert_eq!(names, vec!["Budi Santoso", "Siti Rahma"]);
}

#[test]
fn snapshot_error_keeps_previous_list() {
    let store = MemoryStore::default();
    store.seed(&[complete_application("Siti Rahma")]);
    let dashboard = AdminDashboard::mount(&store, COLLECTION);

    store.publish_failure("permission denied");

    assert_eq!(dashboard.total(), 1);
    assert!(!dashboard.is_loading());
}

#[test]
fn unmount_stops_updates() {
    let store = MemoryStore::default();
    let mut dashboard = AdminDashboard::mount(&store, COLLECTION);

    dashboard.unmount();
    store
        .create(COLLECTION, &complete_application("Siti Rahma"))
        .expect("write succeeds");

    assert_eq!(dashboard.total(), 0);
}

#[test]
fn empty_recap_is_refused_without_rendering() {
    let store = MemoryStore::default();
    let dashboard = AdminDashboard::mount(&store, COLLECTION);
    let renderer = RecordingRenderer::default();

    let err = dashboard
        .export_recap(&renderer, today())
        .expect_err("nothing to export");

    assert!(matches!(err, ExportError::NothingToExport));
    assert_eq!(err.to_string(), EMPTY_RECAP_MESSAGE);
    assert_eq!(renderer.calls(), 0);
}

#[test]
fn exports_stored_applicants() {
    let store = MemoryStore::default();
    store.seed(&[
        detailed_application("Siti Rahma"),
        complete_application("Budi Santoso"),
    ]);
    let dashboard = AdminDashboard::mount(&store, COLLECTION);
    let renderer = RecordingRenderer::default();
    let key = ApplicationKey("doc-001".to_string());

    let pdf = dashboard.export_pdf(&key, &renderer).expect("pdf export");
    assert_eq!(pdf.file_name, "Biodata_Siti_Rahma.pdf");

    let workbook = dashboard
        .export_workbook(&key, &renderer)
        .expect("workbook export");
    assert_eq!(workbook.file_name, "Biodata_Siti_Rahma.xlsx");

    let recap = dashboard
        .export_recap(&renderer, today())
        .expect("recap export");
    assert_eq!(recap.file_name, "Rekapitulasi_Pelamar_18-10-2026.xlsx");
    let layouts = renderer.workbooks.lock().expect("renderer mutex poisoned");
    assert_eq!(layouts[1].sheets[0].rows.len(), 2);
}

#[test]
fn unknown_key_is_reported() {
    let store = MemoryStore::default();
    let dashboard = AdminDashboard::mount(&store, COLLECTION);
    let renderer = RecordingRenderer::default();

    let err = dashboard
        .export_pdf(&ApplicationKey("missing".to_string()), &renderer)
        .expect_err("no such applicant");

    assert!(matches!(err, ExportError::UnknownApplicant(key) if key == "missing"));
}
