//! Renderer-neutral layout of the per-applicant biodata document.

use tracing::warn;

use crate::workflows::biodata::domain::{display_date, Application, SkillsData, SocialMedia};
use crate::workflows::biodata::photo::DecodedPhoto;

pub const DOCUMENT_TITLE: &str = "FORMULIR BIODATA";
pub const DOCUMENT_SUBTITLE: &str = "HARAP DIISI LENGKAP DENGAN HURUF CETAK";
pub const PHOTO_PLACEHOLDER: &str = "Pas Foto 3x4";
pub const PHOTO_ERROR: &str = "Image Error";

#[derive(Debug, Clone, PartialEq)]
pub enum PhotoRegion {
    Image(DecodedPhoto),
    Placeholder(&'static str),
    Failed(&'static str),
}

impl PhotoRegion {
    fn from_application(application: &Application) -> Self {
        let Some(photo) = application.photo.as_ref() else {
            return PhotoRegion::Placeholder(PHOTO_PLACEHOLDER);
        };
        match photo.decode() {
            Ok(decoded) => PhotoRegion::Image(decoded),
            Err(err) => {
                warn!(error = %err, "photo could not be decoded; drawing placeholder");
                PhotoRegion::Failed(PHOTO_ERROR)
            }
        }
    }

    pub fn caption(&self) -> Option<&'static str> {
        match self {
            PhotoRegion::Image(_) => None,
            PhotoRegion::Placeholder(text) | PhotoRegion::Failed(text) => Some(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    KeyValue(Vec<(String, String)>),
    Table {
        head: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSection {
    pub heading: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BiodataDocument {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub photo: PhotoRegion,
    pub applied_position: String,
    pub sections: Vec<DocumentSection>,
}

impl BiodataDocument {
    pub fn section(&self, heading: &str) -> Option<&DocumentSection> {
        self.sections
            .iter()
            .find(|section| section.heading == heading)
    }
}

fn pairs<const N: usize>(entries: [(&str, String); N]) -> Block {
    Block::KeyValue(
        entries
            .into_iter()
            .map(|(label, value)| (label.to_string(), value))
            .collect(),
    )
}

fn table<const N: usize>(head: [&str; N], rows: Vec<Vec<String>>) -> Option<Block> {
    if rows.is_empty() {
        return None;
    }
    Some(Block::Table {
        head: head.iter().map(|label| label.to_string()).collect(),
        rows,
    })
}

fn section(heading: &str, blocks: Vec<Block>) -> Option<DocumentSection> {
    if blocks.is_empty() {
        return None;
    }
    Some(DocumentSection {
        heading: heading.to_string(),
        blocks,
    })
}

pub fn biodata_document(application: &Application) -> BiodataDocument {
    let sections = [
        personal_section(application),
        family_section(application),
        formal_education_section(application),
        course_section(application),
        skills_section(&application.skills),
        organization_section(application),
        work_section(application),
        health_section(application),
        other_section(application),
        references_section(application),
        declaration_section(application),
    ]
    .into_iter()
    .flatten()
    .collect();

    BiodataDocument {
        title: DOCUMENT_TITLE,
        subtitle: DOCUMENT_SUBTITLE,
        photo: PhotoRegion::from_application(application),
        applied_position: format!("Jabatan yang dilamar: {}", application.applied_position),
        sections,
    }
}

fn personal_section(application: &Application) -> Option<DocumentSection> {
    let personal = &application.personal;
    section(
        "I. IDENTITAS PRIBADI",
        vec![pairs([
            ("Nama Lengkap", personal.full_name.clone()),
            ("Jenis Kelamin", personal.gender.label().to_string()),
            (
                "Tempat/Tanggal Lahir",
                format!(
                    "{}, {}",
                    personal.birth_place,
                    display_date(personal.birth_date)
                ),
            ),
            (
                "Tinggi / Berat Badan",
                format!("{} cm / {} kg", personal.height, personal.weight),
            ),
            ("Golongan Darah", personal.blood_type.clone()),
            ("Kewarganegaraan", personal.nationality.clone()),
            ("Agama", personal.religion.clone()),
            ("Alamat Tinggal", personal.address.clone()),
            ("Kode Pos", personal.postal_code.clone()),
            ("Status Tempat Tinggal", personal.residence_status.join(", ")),
            ("Alamat KTP", personal.ktp_address.clone()),
            ("Kode Pos KTP", personal.ktp_postal_code.clone()),
            ("No. KTP", personal.ktp_number.clone()),
            ("KTP Berlaku Hingga", personal.ktp_expiry.clone()),
            ("Dikeluarkan di", personal.ktp_city.clone()),
            ("Alamat E-mail", personal.email.clone()),
            ("Nomor Telepon & HP", personal.phone.clone()),
            ("Media Sosial", social_media_summary(&personal.social_media)),
        ])],
    )
}

fn family_section(application: &Application) -> Option<DocumentSection> {
    let family = &application.family;
    let mut status = vec![("Status Sipil", family.civil_status.label().to_string())];
    if family.civil_status.marriage_date_relevant() {
        status.push(("Tanggal Menikah", display_date(family.marriage_date)));
    }
    if family.civil_status.divorce_date_relevant() {
        status.push(("Tanggal Bercerai/Meninggal", display_date(family.divorce_date)));
    }

    let mut blocks = vec![Block::KeyValue(
        status
            .into_iter()
            .map(|(label, value)| (label.to_string(), value))
            .collect(),
    )];

    if family.civil_status.has_spouse_section() {
        let rows = family
            .spouse_and_children
            .iter()
            .map(|member| {
                vec![
                    member.name.clone(),
                    member.gender.short_label().to_string(),
                    display_date(member.birth_date),
                    member.education.clone(),
                    member.occupation.clone(),
                ]
            })
            .collect();
        blocks.extend(table(
            ["Istri/Suami & Anak", "L/P", "Tgl. Lahir", "Pendidikan", "Pekerjaan"],
            rows,
        ));
    }

    let rows = family
        .parents_and_siblings
        .iter()
        .map(|relative| {
            vec![
                relative.relationship.clone(),
                relative.name.clone(),
                relative.gender.short_label().to_string(),
                display_date(relative.birth_date),
                relative.last_education.clone(),
                relative.occupation.clone(),
            ]
        })
        .collect();
    blocks.extend(table(
        ["Hubungan", "Nama", "L/P", "Tgl. Lahir", "Pendidikan Terakhir", "Pekerjaan"],
        rows,
    ));

    section("II. SUSUNAN KELUARGA", blocks)
}

fn formal_education_section(application: &Application) -> Option<DocumentSection> {
    let rows = application
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
            ]
        })
        .collect();
    let blocks = table(
        ["Tingkat", "Nama Institusi", "Jurusan", "Tahun Lulus", "IPK/NEM"],
        rows,
    );
    section("III. RIWAYAT PENDIDIKAN FORMAL", blocks.into_iter().collect())
}

fn course_section(application: &Application) -> Option<DocumentSection> {
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
            ]
        })
        .collect();
    let blocks = table(
        ["Kursus/Pelatihan", "Penyelenggara", "Tahun", "Durasi", "Sertifikat"],
        rows,
    );
    section("IV. PENDIDIKAN NON-FORMAL / KURSUS", blocks.into_iter().collect())
}

/// Computer skill summary shared by the PDF and workbook exports.
pub fn computer_summary(skills: &SkillsData) -> String {
    let computer = &skills.computer;
    if !computer.can_operate {
        return "Tidak Mampu".to_string();
    }
    let listed = format!("{} {}", computer.programs.join(", "), computer.other);
    format!("Mampu: {}", listed.trim())
}

fn skills_section(skills: &SkillsData) -> Option<DocumentSection> {
    let mut blocks = vec![pairs([("Komputer", computer_summary(skills))])];
    let rows = skills
        .language
        .languages
        .iter()
        .map(|language| vec![language.name.clone(), language.proficiency.label().to_string()])
        .collect();
    blocks.extend(table(["Bahasa Asing", "Tingkat Kemahiran"], rows));
    section("V. KETERAMPILAN", blocks)
}

fn organization_section(application: &Application) -> Option<DocumentSection> {
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
    let blocks = table(["Organisasi", "Jabatan", "Jenis", "Tahun"], rows);
    section("VI. PENGALAMAN ORGANISASI", blocks.into_iter().collect())
}

fn work_section(application: &Application) -> Option<DocumentSection> {
    let rows = application
        .work_experience
        .iter()
        .map(|work| {
            vec![
                work.period(),
                work.company_info.clone(),
                work.position_status.clone(),
                work.reason_for_leaving.clone(),
            ]
        })
        .collect();
    let blocks = table(
        ["Tahun", "Perusahaan", "Jabatan/Status", "Alasan Berhenti"],
        rows,
    );
    section("VII. PENGALAMAN KERJA", blocks.into_iter().collect())
}

fn health_section(application: &Application) -> Option<DocumentSection> {
    let health = &application.health;
    if !health.has_health_issues.is_yes() {
        return None;
    }
    let rows = health
        .issues
        .iter()
        .map(|issue| {
            vec![
                issue.illness_name.clone(),
                issue.since.clone(),
                issue.symptoms.clone(),
                issue.disrupts_activities.label().to_string(),
            ]
        })
        .collect();
    let blocks = table(
        ["Penyakit", "Sejak", "Gejala", "Mengganggu Aktivitas"],
        rows,
    );
    section("VIII. KESEHATAN", blocks.into_iter().collect())
}

/// Filled accounts as `Platform: handle`, comma separated.
pub fn social_media_summary(accounts: &SocialMedia) -> String {
    [
        ("Instagram", &accounts.instagram),
        ("Twitter", &accounts.twitter),
        ("Facebook", &accounts.facebook),
        ("TikTok", &accounts.tiktok),
        ("Lainnya", &accounts.other),
    ]
    .into_iter()
    .filter(|(_, handle)| !handle.trim().is_empty())
    .map(|(platform, handle)| format!("{platform}: {handle}"))
    .collect::<Vec<_>>()
    .join(", ")
}

fn other_section(application: &Application) -> Option<DocumentSection> {
    let other = &application.other;
    let mut blocks = Vec::new();

    if other.attended_selection.is_yes() {
        let details = &other.selection_details;
        blocks.push(pairs([
            ("Pernah Mengikuti Seleksi", other.attended_selection.label().to_string()),
            ("Berapa Kali", details.times.clone()),
            ("Posisi", details.position.clone()),
            (
                "Bulan/Tahun",
                format!("{} {}", details.month, details.year).trim().to_string(),
            ),
        ]));
    }

    if other.has_relative.is_yes() {
        let rows = other
            .relatives
            .iter()
            .filter(|relative| !relative.name.trim().is_empty())
            .map(|relative| {
                vec![
                    relative.name.clone(),
                    relative.position.clone(),
                    relative.unit.clone(),
                    relative.relationship.clone(),
                ]
            })
            .collect();
        blocks.extend(table(
            ["Nama Kerabat", "Jabatan", "Unit Kerja", "Hubungan"],
            rows,
        ));
    }

    section("IX. LAIN-LAIN", blocks)
}

fn references_section(application: &Application) -> Option<DocumentSection> {
    let rows = application
        .other
        .references
        .iter()
        .filter(|reference| !reference.name.trim().is_empty())
        .map(|reference| {
            vec![
                reference.name.clone(),
                reference.company.clone(),
                reference.phone.clone(),
                reference.notes.clone(),
            ]
        })
        .collect();
    let blocks = table(["Referensi", "Perusahaan", "Telepon", "Keterangan"], rows);
    section("X. REFERENSI", blocks.into_iter().collect())
}

fn declaration_section(application: &Application) -> Option<DocumentSection> {
    let declaration = &application.declaration;
    let signer = if declaration.full_name.trim().is_empty() {
        application.personal.full_name.clone()
    } else {
        declaration.full_name.clone()
    };
    section(
        "XI. PERNYATAAN",
        vec![pairs([
            ("Kota", declaration.city.clone()),
            ("Tanggal", display_date(declaration.date)),
            ("Nama Lengkap Pelamar", signer),
        ])],
    )
}
