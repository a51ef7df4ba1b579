//! Document exports: per-applicant PDF and workbook, and the all-applicant recap workbook.

mod artifact;
mod layout;
mod pdf;
mod workbook;
mod xlsx;

pub use artifact::{
    applicant_file_stem, recap_file_name, Artifact, PDF_MEDIA_TYPE, XLSX_MEDIA_TYPE,
};
pub use layout::{
    biodata_document, computer_summary, social_media_summary, BiodataDocument, Block,
    DocumentSection, PhotoRegion, DOCUMENT_SUBTITLE, DOCUMENT_TITLE, PHOTO_ERROR, PHOTO_PLACEHOLDER,
};
pub use pdf::{PdfRenderer, PrintPdfRenderer};
pub use workbook::{
    applicant_workbook, column_widths, recap_row, recap_workbook, SheetLayout, WorkbookLayout,
    MIN_COLUMN_WIDTH, NOT_AVAILABLE, RECAP_SHEET,
};
pub use xlsx::{WorkbookRenderer, XlsxRenderer};

use chrono::NaiveDate;
use tracing::info;

use super::domain::Application;

/// Notice shown instead of producing an empty recap.
pub const EMPTY_RECAP_MESSAGE: &str = "Belum ada data pelamar untuk diexport.";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("pdf rendering failed: {0}")]
    Pdf(String),
    #[error(transparent)]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("layout cannot be rendered: {0}")]
    Layout(String),
}

impl From<printpdf::Error> for RenderError {
    fn from(value: printpdf::Error) -> Self {
        Self::Pdf(format!("{value:?}"))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("{}", EMPTY_RECAP_MESSAGE)]
    NothingToExport,
    #[error("no applicant stored under key {0}")]
    UnknownApplicant(String),
    #[error(transparent)]
    Render(#[from] RenderError),
}

pub fn export_pdf<R>(application: &Application, renderer: &R) -> Result<Artifact, RenderError>
where
    R: PdfRenderer + ?Sized,
{
    let document = biodata_document(application);
    let bytes = renderer.render(&document)?;
    let file_name = format!("{}.pdf", applicant_file_stem(&application.personal.full_name));
    info!(file = %file_name, bytes = bytes.len(), "biodata pdf exported");
    Ok(Artifact {
        file_name,
        media_type: PDF_MEDIA_TYPE,
        bytes,
    })
}

pub fn export_workbook<R>(
    application: &Application,
    renderer: &R,
) -> Result<Artifact, RenderError>
where
    R: WorkbookRenderer + ?Sized,
{
    let layout = applicant_workbook(application);
    let bytes = renderer.render(&layout)?;
    let file_name = format!("{}.xlsx", applicant_file_stem(&application.personal.full_name));
    info!(file = %file_name, sheets = layout.sheets.len(), "biodata workbook exported");
    Ok(Artifact {
        file_name,
        media_type: XLSX_MEDIA_TYPE,
        bytes,
    })
}

/// Recap of every applicant. Refuses an empty input without calling the renderer.
pub fn export_recap<R>(
    applications: &[Application],
    renderer: &R,
    today: NaiveDate,
) -> Result<Artifact, ExportError>
where
    R: WorkbookRenderer + ?Sized,
{
    if applications.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let layout = recap_workbook(applications);
    let bytes = renderer.render(&layout)?;
    let file_name = recap_file_name(today);
    info!(file = %file_name, applicants = applications.len(), "recap workbook exported");
    Ok(Artifact {
        file_name,
        media_type: XLSX_MEDIA_TYPE,
        bytes,
    })
}
