use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::photo::PhotoPayload;

/// Schooling levels of the formal education table, in display order.
pub const EDUCATION_LEVELS: [&str; 7] = [
    "SD", "SMP", "SMA/SMK", "AKADEMI", "STRATA 1", "PROFESI", "STRATA 2",
];

/// Rows of `parentsAndSiblings` whose kind is fixed (father, mother).
pub const LOCKED_PARENT_ROWS: usize = 2;

pub const FATHER: &str = "Father";
pub const MOTHER: &str = "Mother";
pub const SIBLING: &str = "Sibling";

/// Stable identity token attached to a list row when it is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Rows that can be removed from a dynamic list by identity.
pub trait Identified {
    fn id(&self) -> &EntityId;
}

macro_rules! identified {
    ($($ty:ty),+ $(,)?) => {
        $(impl Identified for $ty {
            fn id(&self) -> &EntityId {
                &self.id
            }
        })+
    };
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    #[serde(rename = "")]
    Unset,
    Male,
    Female,
}

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Gender::Unset => "",
            Gender::Male => "Laki-Laki",
            Gender::Female => "Perempuan",
        }
    }

    pub const fn short_label(self) -> &'static str {
        match self {
            Gender::Unset => "",
            Gender::Male => "L",
            Gender::Female => "P",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CivilStatus {
    #[default]
    #[serde(rename = "")]
    Unset,
    Unmarried,
    Married,
    Widowed,
    Divorced,
}

impl CivilStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CivilStatus::Unset => "",
            CivilStatus::Unmarried => "Belum Menikah",
            CivilStatus::Married => "Sudah Menikah",
            CivilStatus::Widowed => "Cerai Mati",
            CivilStatus::Divorced => "Cerai Hidup",
        }
    }

    /// Whether the spouse-and-children list applies to this status.
    pub const fn has_spouse_section(self) -> bool {
        matches!(
            self,
            CivilStatus::Married | CivilStatus::Widowed | CivilStatus::Divorced
        )
    }

    pub const fn marriage_date_relevant(self) -> bool {
        matches!(self, CivilStatus::Married)
    }

    pub const fn divorce_date_relevant(self) -> bool {
        matches!(self, CivilStatus::Widowed | CivilStatus::Divorced)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    #[default]
    #[serde(rename = "")]
    Unset,
    Yes,
    No,
}

impl YesNo {
    pub const fn label(self) -> &'static str {
        match self {
            YesNo::Unset => "",
            YesNo::Yes => "Ya",
            YesNo::No => "Tidak",
        }
    }

    pub const fn is_yes(self) -> bool {
        matches!(self, YesNo::Yes)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateStatus {
    #[default]
    #[serde(rename = "")]
    Unset,
    Present,
    Absent,
}

impl CertificateStatus {
    pub const fn label(self) -> &'static str {
        match self {
            CertificateStatus::Unset => "",
            CertificateStatus::Present => "Ada",
            CertificateStatus::Absent => "Tidak",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    #[default]
    #[serde(rename = "")]
    Unset,
    Active,
    Passive,
}

impl Proficiency {
    pub const fn label(self) -> &'static str {
        match self {
            Proficiency::Unset => "",
            Proficiency::Active => "Aktif",
            Proficiency::Passive => "Pasif",
        }
    }
}

/// The full biodata record for one applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub applied_position: String,
    pub photo: Option<PhotoPayload>,
    pub personal: PersonalData,
    pub family: FamilyData,
    pub education: EducationData,
    pub non_formal_education: Vec<Course>,
    pub skills: SkillsData,
    pub organizations: Vec<Organization>,
    pub work_experience: Vec<WorkExperience>,
    pub health: HealthData,
    pub other: OtherData,
    pub declaration: Declaration,
}

impl Application {
    /// Fresh draft with every field at its default and new identities for seeded rows.
    pub fn initial(today: NaiveDate) -> Self {
        Self {
            applied_position: String::new(),
            photo: None,
            personal: PersonalData::default(),
            family: FamilyData::initial(),
            education: EducationData::initial(),
            non_formal_education: Vec::new(),
            skills: SkillsData::default(),
            organizations: Vec::new(),
            work_experience: Vec::new(),
            health: HealthData::default(),
            other: OtherData::initial(),
            declaration: Declaration::initial(today),
        }
    }

    /// Draft dated with the local calendar day.
    pub fn new_draft() -> Self {
        Self::initial(Local::now().date_naive())
    }

    /// Last formal education row that names an institution.
    pub fn latest_education(&self) -> Option<&EducationEntry> {
        self.education
            .formal
            .iter()
            .rev()
            .find(|entry| !entry.school_name.trim().is_empty())
    }

    pub fn latest_work(&self) -> Option<&WorkExperience> {
        self.work_experience.last()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalData {
    pub full_name: String,
    pub gender: Gender,
    pub birth_place: String,
    pub birth_date: Option<NaiveDate>,
    pub height: String,
    pub weight: String,
    pub blood_type: String,
    pub nationality: String,
    pub religion: String,
    pub address: String,
    pub postal_code: String,
    pub residence_status: Vec<String>,
    pub ktp_address: String,
    pub ktp_postal_code: String,
    pub phone: String,
    pub email: String,
    pub ktp_number: String,
    pub ktp_expiry: String,
    pub ktp_city: String,
    pub social_media: SocialMedia,
}

impl Default for PersonalData {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            gender: Gender::Unset,
            birth_place: String::new(),
            birth_date: None,
            height: String::new(),
            weight: String::new(),
            blood_type: String::new(),
            nationality: "Indonesia".to_string(),
            religion: String::new(),
            address: String::new(),
            postal_code: String::new(),
            residence_status: Vec::new(),
            ktp_address: String::new(),
            ktp_postal_code: String::new(),
            phone: String::new(),
            email: String::new(),
            ktp_number: String::new(),
            ktp_expiry: "Seumur Hidup".to_string(),
            ktp_city: String::new(),
            social_media: SocialMedia::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMedia {
    pub instagram: String,
    pub twitter: String,
    pub facebook: String,
    pub tiktok: String,
    pub other: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyData {
    pub civil_status: CivilStatus,
    pub marriage_date: Option<NaiveDate>,
    pub divorce_date: Option<NaiveDate>,
    pub spouse_and_children: Vec<FamilyMember>,
    pub parents_and_siblings: Vec<ParentSibling>,
}

impl FamilyData {
    pub fn initial() -> Self {
        Self {
            civil_status: CivilStatus::Unset,
            marriage_date: None,
            divorce_date: None,
            spouse_and_children: Vec::new(),
            parents_and_siblings: vec![ParentSibling::father(), ParentSibling::mother()],
        }
    }

    pub fn siblings(&self) -> &[ParentSibling] {
        self.parents_and_siblings
            .get(LOCKED_PARENT_ROWS..)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub id: EntityId,
    pub name: String,
    pub gender: Gender,
    pub birth_date: Option<NaiveDate>,
    pub education: String,
    pub occupation: String,
}

impl FamilyMember {
    pub fn blank() -> Self {
        Self {
            id: EntityId::generate(),
            name: String::new(),
            gender: Gender::Unset,
            birth_date: None,
            education: String::new(),
            occupation: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentSibling {
    pub id: EntityId,
    pub relationship: String,
    pub name: String,
    pub gender: Gender,
    pub birth_date: Option<NaiveDate>,
    pub last_education: String,
    pub occupation: String,
    pub company: String,
    pub phone: String,
}

impl ParentSibling {
    fn with_kind(relationship: &str, gender: Gender) -> Self {
        Self {
            id: EntityId::generate(),
            relationship: relationship.to_string(),
            name: String::new(),
            gender,
            birth_date: None,
            last_education: String::new(),
            occupation: String::new(),
            company: String::new(),
            phone: String::new(),
        }
    }

    pub fn father() -> Self {
        Self::with_kind(FATHER, Gender::Male)
    }

    pub fn mother() -> Self {
        Self::with_kind(MOTHER, Gender::Female)
    }

    pub fn sibling() -> Self {
        Self::with_kind(SIBLING, Gender::Unset)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationData {
    pub formal: [EducationEntry; 7],
}

impl EducationData {
    pub fn initial() -> Self {
        Self {
            formal: EDUCATION_LEVELS.map(EducationEntry::for_level),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub level: String,
    pub school_name: String,
    pub major: String,
    pub graduation_year: String,
    pub gpa: String,
    pub scholarship: YesNo,
}

impl EducationEntry {
    fn for_level(level: &str) -> Self {
        // Primary and junior secondary rows carry no major or grade.
        let placeholder = if matches!(level, "SD" | "SMP") { "-" } else { "" };
        Self {
            level: level.to_string(),
            school_name: String::new(),
            major: placeholder.to_string(),
            graduation_year: String::new(),
            gpa: placeholder.to_string(),
            scholarship: YesNo::No,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: EntityId,
    pub course_name: String,
    pub organizer: String,
    pub year: String,
    pub duration: String,
    pub certificate: CertificateStatus,
    pub funded_by: String,
}

impl Course {
    pub fn blank() -> Self {
        Self {
            id: EntityId::generate(),
            course_name: String::new(),
            organizer: String::new(),
            year: String::new(),
            duration: String::new(),
            certificate: CertificateStatus::Absent,
            funded_by: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsData {
    pub computer: ComputerSkills,
    pub language: LanguageSkills,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputerSkills {
    pub can_operate: bool,
    pub cannot_operate: bool,
    pub programs: Vec<String>,
    pub other: String,
}

impl Default for ComputerSkills {
    fn default() -> Self {
        Self {
            can_operate: true,
            cannot_operate: false,
            programs: Vec::new(),
            other: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSkills {
    pub can_use: bool,
    pub cannot_use: bool,
    pub languages: Vec<LanguageSkill>,
}

impl Default for LanguageSkills {
    fn default() -> Self {
        Self {
            can_use: true,
            cannot_use: false,
            languages: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSkill {
    pub id: EntityId,
    pub name: String,
    pub proficiency: Proficiency,
}

impl LanguageSkill {
    pub fn blank() -> Self {
        Self {
            id: EntityId::generate(),
            name: String::new(),
            proficiency: Proficiency::Unset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: EntityId,
    pub name: String,
    pub position: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub year: String,
}

impl Organization {
    pub fn blank() -> Self {
        Self {
            id: EntityId::generate(),
            name: String::new(),
            position: String::new(),
            kind: String::new(),
            year: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub id: EntityId,
    pub from: String,
    pub to: String,
    pub company_info: String,
    pub position_status: String,
    pub is_contract: bool,
    pub is_permanent: bool,
    pub salary: String,
    pub reason_for_leaving: String,
}

impl WorkExperience {
    pub fn blank() -> Self {
        Self {
            id: EntityId::generate(),
            from: String::new(),
            to: String::new(),
            company_info: String::new(),
            position_status: String::new(),
            is_contract: false,
            is_permanent: false,
            salary: String::new(),
            reason_for_leaving: String::new(),
        }
    }

    pub fn period(&self) -> String {
        format!("{} - {}", self.from, self.to)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthData {
    pub has_health_issues: YesNo,
    pub issues: Vec<HealthIssue>,
}

impl Default for HealthData {
    fn default() -> Self {
        Self {
            has_health_issues: YesNo::No,
            issues: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthIssue {
    pub id: EntityId,
    pub illness_name: String,
    pub since: String,
    pub symptoms: String,
    pub disrupts_activities: YesNo,
}

impl HealthIssue {
    pub fn blank() -> Self {
        Self {
            id: EntityId::generate(),
            illness_name: String::new(),
            since: String::new(),
            symptoms: String::new(),
            disrupts_activities: YesNo::Unset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherData {
    pub attended_selection: YesNo,
    pub selection_details: SelectionDetails,
    pub has_relative: YesNo,
    pub relatives: Vec<Relative>,
    pub references: Vec<Reference>,
}

impl OtherData {
    pub fn initial() -> Self {
        Self {
            attended_selection: YesNo::No,
            selection_details: SelectionDetails::default(),
            has_relative: YesNo::No,
            relatives: Vec::new(),
            references: vec![Reference::blank()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionDetails {
    pub times: String,
    pub position: String,
    pub month: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relative {
    pub id: EntityId,
    pub name: String,
    pub position: String,
    pub unit: String,
    pub relationship: String,
}

impl Relative {
    pub fn blank() -> Self {
        Self {
            id: EntityId::generate(),
            name: String::new(),
            position: String::new(),
            unit: String::new(),
            relationship: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub id: EntityId,
    pub name: String,
    pub company: String,
    pub phone: String,
    pub notes: String,
}

impl Reference {
    pub fn blank() -> Self {
        Self {
            id: EntityId::generate(),
            name: String::new(),
            company: String::new(),
            phone: String::new(),
            notes: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    pub city: String,
    pub date: Option<NaiveDate>,
    pub full_name: String,
}

impl Declaration {
    pub fn initial(today: NaiveDate) -> Self {
        Self {
            city: String::new(),
            date: Some(today),
            full_name: String::new(),
        }
    }
}

identified!(
    FamilyMember,
    ParentSibling,
    Course,
    LanguageSkill,
    Organization,
    WorkExperience,
    HealthIssue,
    Relative,
    Reference,
);

/// ISO rendering of an optional calendar date; blank when unset.
pub fn display_date(date: Option<NaiveDate>) -> String {
    date.map(|value| value.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
