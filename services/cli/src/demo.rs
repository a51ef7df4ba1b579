use crate::infra::{parse_date, write_artifact, InMemoryApplicationStore, InMemoryIdentityProvider};
use biodata_intake::config::AppConfig;
use biodata_intake::error::AppError;
use biodata_intake::workflows::biodata::domain::{CivilStatus, Gender, WorkExperience};
use biodata_intake::workflows::biodata::export::{PrintPdfRenderer, XlsxRenderer};
use biodata_intake::workflows::biodata::reducer::{
    ApplicationField, ComputerField, DeclarationField, EducationField, FamilyField, ItemEdit,
    ListItem, NestedItemEdit, ParentSiblingField, PersonalField, SectionField, SubsectionField,
    WorkField,
};
use biodata_intake::workflows::biodata::{
    AdminDashboard, ApplicantForm, FormAction, PhotoPayload, SessionGate, SubmissionPipeline,
    SubmissionStatus, View,
};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

const APPLICANT_EMAIL: &str = "pelamar@contoh.id";
const ADMIN_EMAIL: &str = "admin@contoh.id";
const DEMO_PASSWORD: &str = "rahasia123";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Directory for the demo exports. Defaults to BIODATA_EXPORT_DIR.
    #[arg(long)]
    pub(crate) out_dir: Option<PathBuf>,
    /// Optional JPEG or PNG used as the applicant photo; the format is read from the file.
    #[arg(long)]
    pub(crate) photo: Option<PathBuf>,
    /// Override the recap date (defaults to today).
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Override the post-submit confirmation pause in milliseconds.
    #[arg(long)]
    pub(crate) confirmation_delay_ms: Option<u64>,
    /// Stop after the dashboard listing without writing any files.
    #[arg(long)]
    pub(crate) skip_exports: bool,
}

pub(crate) async fn run_demo(args: DemoArgs, config: &AppConfig) -> Result<(), AppError> {
    let DemoArgs {
        out_dir,
        photo,
        today,
        confirmation_delay_ms,
        skip_exports,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let out_dir = out_dir.unwrap_or_else(|| config.intake.export_dir.clone());
    let delay = confirmation_delay_ms
        .map(Duration::from_millis)
        .unwrap_or(config.intake.confirmation_delay);

    let store = Arc::new(InMemoryApplicationStore::default());
    let provider = Arc::new(
        InMemoryIdentityProvider::default()
            .with_account(APPLICANT_EMAIL, DEMO_PASSWORD)
            .with_account(ADMIN_EMAIL, DEMO_PASSWORD),
    );

    println!("Biodata intake demo");
    let gate = SessionGate::mount(provider.clone());
    println!("- Signed out view: {:?}", gate.view());

    if let Err(err) = gate.login(APPLICANT_EMAIL, "salah") {
        println!("- Wrong password: {err}");
    }
    gate.login(APPLICANT_EMAIL, DEMO_PASSWORD)?;
    println!("- {APPLICANT_EMAIL} -> {:?}", gate.view());

    let pipeline = Arc::new(SubmissionPipeline::new(
        store.clone(),
        config.intake.collection.clone(),
    ));
    let mut form = ApplicantForm::mount(pipeline, delay);

    if let Err(err) = form.submit() {
        println!("  Blank draft refused: {err}");
    }

    for action in demo_actions(photo.as_deref())? {
        form.dispatch(action);
    }

    let key = form.submit()?;
    if let SubmissionStatus::Succeeded { key } = form.status() {
        println!("  Submitted as {key}; confirmation shown for {} ms", delay.as_millis());
    }
    form.finish_confirmation().await;
    println!(
        "  Form reset for the next applicant (name now {:?})",
        form.draft().personal.full_name
    );

    gate.logout();
    gate.login(ADMIN_EMAIL, DEMO_PASSWORD)?;
    println!("- {ADMIN_EMAIL} -> {:?}", gate.view());
    if gate.view() != View::AdminDashboard {
        return Ok(());
    }

    let mut dashboard = AdminDashboard::mount(store.as_ref(), &config.intake.collection);
    println!("  {} applicant(s) on the dashboard", dashboard.total());
    for stored in dashboard.applicants() {
        let personal = &stored.application.personal;
        println!(
            "  - {} | {} | {} | {}",
            stored.key, personal.full_name, stored.application.applied_position, personal.phone
        );
    }

    if !skip_exports {
        let artifacts = [
            dashboard.export_pdf(&key, &PrintPdfRenderer)?,
            dashboard.export_workbook(&key, &XlsxRenderer)?,
            dashboard.export_recap(&XlsxRenderer, today)?,
        ];
        for artifact in &artifacts {
            let path = write_artifact(&out_dir, artifact)?;
            println!("  Wrote {} ({} bytes)", path.display(), artifact.bytes.len());
        }
    }

    dashboard.unmount();
    gate.logout();
    info!(view = ?gate.view(), "demo finished");
    Ok(())
}

fn load_photo(path: &Path) -> Result<PhotoPayload, AppError> {
    let bytes = fs::read(path)?;
    Ok(PhotoPayload::from_image_bytes(&bytes)?)
}

fn personal(field: PersonalField) -> FormAction {
    FormAction::SetSectionField(SectionField::Personal(field))
}

fn text(value: &str) -> String {
    value.to_string()
}

fn demo_actions(photo: Option<&Path>) -> Result<Vec<FormAction>, AppError> {
    let mut actions = vec![
        FormAction::SetField(ApplicationField::AppliedPosition(text("Staff Administrasi"))),
        personal(PersonalField::FullName(text("Rina Kartika Sari"))),
        personal(PersonalField::Gender(Gender::Female)),
        personal(PersonalField::BirthPlace(text("Yogyakarta"))),
        personal(PersonalField::BirthDate(NaiveDate::from_ymd_opt(1996, 8, 21))),
        personal(PersonalField::Phone(text("081234567890"))),
        personal(PersonalField::Email(text(APPLICANT_EMAIL))),
        personal(PersonalField::KtpNumber(text("3471016108960001"))),
        personal(PersonalField::Address(text("Jl. Kaliurang Km 5 No. 12"))),
        FormAction::SetSectionField(SectionField::Family(FamilyField::CivilStatus(
            CivilStatus::Unmarried,
        ))),
        FormAction::UpdateNestedItem {
            index: 0,
            edit: NestedItemEdit::ParentSibling(ParentSiblingField::Name(text("Sutrisno"))),
        },
        FormAction::UpdateNestedItem {
            index: 1,
            edit: NestedItemEdit::ParentSibling(ParentSiblingField::Name(text("Sri Wahyuni"))),
        },
        FormAction::UpdateNestedItem {
            index: 2,
            edit: NestedItemEdit::FormalEducation(EducationField::SchoolName(text(
                "SMA Negeri 3 Yogyakarta",
            ))),
        },
        FormAction::UpdateNestedItem {
            index: 4,
            edit: NestedItemEdit::FormalEducation(EducationField::SchoolName(text(
                "Universitas Gadjah Mada",
            ))),
        },
        FormAction::UpdateNestedItem {
            index: 4,
            edit: NestedItemEdit::FormalEducation(EducationField::Major(text("Akuntansi"))),
        },
        FormAction::SetSubsectionField(SubsectionField::Computer(ComputerField::CanOperate(
            true,
        ))),
        FormAction::SetSubsectionField(SubsectionField::Computer(ComputerField::Programs(vec![
            text("Word"),
            text("Excel"),
        ]))),
        FormAction::AppendItem(ListItem::Work(WorkExperience::blank())),
        FormAction::UpdateItem {
            index: 0,
            edit: ItemEdit::Work(WorkField::CompanyInfo(text("CV Sinar Abadi"))),
        },
        FormAction::UpdateItem {
            index: 0,
            edit: ItemEdit::Work(WorkField::PositionStatus(text("Admin Gudang"))),
        },
        FormAction::SetSectionField(SectionField::Declaration(DeclarationField::City(text(
            "Yogyakarta",
        )))),
    ];

    if let Some(path) = photo {
        actions.push(FormAction::SetField(ApplicationField::Photo(Some(
            load_photo(path)?,
        ))));
    }
    Ok(actions)
}
