//! Sheet layouts for the single-applicant workbook and the recap workbook.

use crate::workflows::biodata::domain::{display_date, Application};

use super::layout::computer_summary;

pub const RECAP_SHEET: &str = "Rekapitulasi Pelamar";
pub const NOT_AVAILABLE: &str = "N/A";
pub const MIN_COLUMN_WIDTH: f64 = 10.0;

const RECAP_HEADER: [&str; 7] = [
    "Nama Lengkap",
    "Posisi Dilamar",
    "Email",
    "Telepon",
    "Tempat, Tgl Lahir",
    "Pendidikan Terakhir",
    "Pengalaman Kerja Terakhir",
];

#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Explicit widths in characters; `None` leaves the renderer default.
    pub column_widths: Option<Vec<f64>>,
}

impl SheetLayout {
    fn new<const N: usize>(name: &str, header: [&str; N], rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.to_string(),
            header: header.iter().map(|label| label.to_string()).collect(),
            rows,
            column_widths: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkbookLayout {
    pub sheets: Vec<SheetLayout>,
}

impl WorkbookLayout {
    pub fn sheet(&self, name: &str) -> Option<&SheetLayout> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str()).collect()
    }
}

fn key_values(entries: &[(&str, &str)]) -> Vec<Vec<String>> {
    entries
        .iter()
        .map(|(label, value)| vec![label.to_string(), value.to_string()])
        .collect()
}

pub fn applicant_workbook(application: &Application) -> WorkbookLayout {
    let mut sheets = vec![identity_sheet(application)];

    if !application.work_experience.is_empty() {
        let rows = application
            .work_experience
            .iter()
            .map(|work| {
                vec![
                    work.from.clone(),
                    work.to.clone(),
                    work.company_info.clone(),
                    work.position_status.clone(),
                    work.salary.clone(),
                    work.reason_for_leaving.clone(),
                ]
            })
            .collect();
        sheets.push(SheetLayout::new(
            "Pengalaman Kerja",
            [
                "Dari",
                "Sampai",
                "Informasi Perusahaan",
                "Jabatan & Status",
                "Gaji & Tunjangan",
                "Alasan Berhenti",
            ],
            rows,
        ));
    }

    let education_rows = application
        .education
        .formal
        .iter()
        .filter(|entry| !entry.school_name.trim().is_empty())
        .map(|entry| {
            vec![
                entry.level.clone(),
                entry.school_name.clone(),
                entry.major.clone(),
                entry.graduation_year.clone(),
                entry.gpa.clone(),
                entry.scholarship.label().to_string(),
            ]
        })
        .collect();
    sheets.push(SheetLayout::new(
        "Pendidikan Formal",
        [
            "Tingkat",
            "Nama Sekolah/Universitas",
            "Jurusan",
            "Tahun Lulus",
            "IPK/NEM",
            "Beasiswa",
        ],
        education_rows,
    ));

    let mut skill_rows = vec![vec![
        "Komputer".to_string(),
        computer_summary(&application.skills),
    ]];
    skill_rows.extend(application.skills.language.languages.iter().map(|language| {
        vec![
            "Bahasa Asing".to_string(),
            format!("{} ({})", language.name, language.proficiency.label()),
        ]
    }));
    sheets.push(SheetLayout::new(
        "Keterampilan",
        ["Kategori", "Detail"],
        skill_rows,
    ));

    sheets.extend(family_sheet(application));

    if !application.non_formal_education.is_empty() {
        let rows = application
            .non_formal_education
            .iter()
            .map(|course| {
                vec![
                    course.course_name.clone(),
                    course.organizer.clone(),
                    course.year.clone(),
                    course.duration.clone(),
                    course.certificate.label().to_string(),
                    course.funded_by.clone(),
                ]
            })
            .collect();
        sheets.push(SheetLayout::new(
            "Kursus",
            [
                "Nama Kursus/Pelatihan",
                "Penyelenggara",
                "Tahun",
                "Durasi",
                "Sertifikat",
                "Dibiayai Oleh",
            ],
            rows,
        ));
    }

    if !application.organizations.is_empty() {
        let rows = application
            .organizations
            .iter()
            .map(|org| {
                vec![
                    org.name.clone(),
                    org.position.clone(),
                    org.kind.clone(),
                    org.year.clone(),
                ]
            })
            .collect();
        sheets.push(SheetLayout::new(
            "Organisasi",
            ["Nama Organisasi", "Jabatan", "Jenis Organisasi", "Tahun"],
            rows,
        ));
    }

    WorkbookLayout { sheets }
}

fn identity_sheet(application: &Application) -> SheetLayout {
    let personal = &application.personal;
    let birth_date = display_date(personal.birth_date);
    let rows = key_values(&[
        ("Posisi Dilamar", application.applied_position.as_str()),
        ("Nama Lengkap", personal.full_name.as_str()),
        ("Jenis Kelamin", personal.gender.label()),
        ("Tempat Lahir", personal.birth_place.as_str()),
        ("Tanggal Lahir", birth_date.as_str()),
        ("Tinggi Badan (cm)", personal.height.as_str()),
        ("Berat Badan (kg)", personal.weight.as_str()),
        ("Golongan Darah", personal.blood_type.as_str()),
        ("Kewarganegaraan", personal.nationality.as_str()),
        ("Agama", personal.religion.as_str()),
        ("Alamat Tinggal", personal.address.as_str()),
        ("Kode Pos Tinggal", personal.postal_code.as_str()),
        ("Alamat KTP", personal.ktp_address.as_str()),
        ("Kode Pos KTP", personal.ktp_postal_code.as_str()),
        ("No. Telepon/HP", personal.phone.as_str()),
        ("Alamat E-mail", personal.email.as_str()),
        ("No. KTP", personal.ktp_number.as_str()),
    ]);
    SheetLayout::new("Identitas Pribadi", ["Kategori", "Data"], rows)
}

fn family_sheet(application: &Application) -> Option<SheetLayout> {
    let family = &application.family;
    let mut rows: Vec<Vec<String>> = Vec::new();

    if family.civil_status.has_spouse_section() {
        rows.extend(family.spouse_and_children.iter().map(|member| {
            vec![
                "Istri/Suami & Anak".to_string(),
                member.name.clone(),
                member.gender.short_label().to_string(),
                display_date(member.birth_date),
                member.education.clone(),
                member.occupation.clone(),
            ]
        }));
    }

    rows.extend(
        family
            .parents_and_siblings
            .iter()
            .filter(|relative| !relative.name.trim().is_empty())
            .map(|relative| {
                vec![
                    relative.relationship.clone(),
                    relative.name.clone(),
                    relative.gender.short_label().to_string(),
                    display_date(relative.birth_date),
                    relative.last_education.clone(),
                    relative.occupation.clone(),
                ]
            }),
    );

    if rows.is_empty() {
        return None;
    }
    Some(SheetLayout::new(
        "Keluarga",
        [
            "Hubungan",
            "Nama",
            "L/P",
            "Tanggal Lahir",
            "Pendidikan",
            "Pekerjaan",
        ],
        rows,
    ))
}

fn or_not_available(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// One row per applicant for the recap sheet.
pub fn recap_row(application: &Application) -> Vec<String> {
    let personal = &application.personal;
    vec![
        personal.full_name.clone(),
        application.applied_position.clone(),
        personal.email.clone(),
        personal.phone.clone(),
        format!(
            "{}, {}",
            personal.birth_place,
            display_date(personal.birth_date)
        ),
        or_not_available(
            application
                .latest_education()
                .map(|entry| entry.school_name.as_str()),
        ),
        or_not_available(
            application
                .latest_work()
                .map(|work| work.company_info.as_str()),
        ),
    ]
}

/// Longest value per column, never narrower than [`MIN_COLUMN_WIDTH`]. Headers do not count.
pub fn column_widths(columns: usize, rows: &[Vec<String>]) -> Vec<f64> {
    (0..columns)
        .map(|column| {
            rows.iter()
                .filter_map(|row| row.get(column))
                .map(|value| value.chars().count() as f64)
                .fold(MIN_COLUMN_WIDTH, f64::max)
        })
        .collect()
}

pub fn recap_workbook<'a>(applications: impl IntoIterator<Item = &'a Application>) -> WorkbookLayout {
    let rows: Vec<Vec<String>> = applications.into_iter().map(recap_row).collect();
    let mut sheet = SheetLayout::new(RECAP_SHEET, RECAP_HEADER, rows);
    sheet.column_widths = Some(column_widths(RECAP_HEADER.len(), &sheet.rows));
    WorkbookLayout {
        sheets: vec![sheet],
    }
}
