use chrono::NaiveDate;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const XLSX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// A rendered file ready to be saved or offered for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

/// `Biodata_<full name>` with every whitespace character replaced by an underscore.
pub fn applicant_file_stem(full_name: &str) -> String {
    let name: String = full_name
        .chars()
        .map(|ch| if ch.is_whitespace() { '_' } else { ch })
        .collect();
    format!("Biodata_{name}")
}

pub fn recap_file_name(today: NaiveDate) -> String {
    format!("Rekapitulasi_Pelamar_{}.xlsx", today.format("%-d-%-m-%Y"))
}
