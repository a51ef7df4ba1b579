//! Tagged action set accepted by [`reduce`](super::reduce).
//!
//! Every path through the application is its own variant, so an edit that names a missing
//! section or field does not compile.

use chrono::NaiveDate;

use crate::workflows::biodata::domain::{
    CertificateStatus, CivilStatus, ComputerSkills, Course, Declaration, EducationData,
    EntityId, FamilyData, FamilyMember, Gender, HealthData, HealthIssue, LanguageSkill,
    LanguageSkills, Organization, OtherData, ParentSibling, PersonalData, Proficiency,
    Reference, Relative, SelectionDetails, SkillsData, SocialMedia, WorkExperience, YesNo,
};
use crate::workflows::biodata::photo::PhotoPayload;

#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    /// Replace one top-level field.
    SetField(ApplicationField),
    /// Replace `section.field`.
    SetSectionField(SectionField),
    /// Replace `section.field.subField`.
    SetSubsectionField(SubsectionField),
    /// Edit one field of the row at `index` in a top-level list.
    UpdateItem { index: usize, edit: ItemEdit },
    /// Edit one field of the row at `index` in a list nested inside a section.
    UpdateNestedItem { index: usize, edit: NestedItemEdit },
    AppendItem(ListItem),
    AppendNestedItem(NestedListItem),
    RemoveItem { list: ListKey, id: EntityId },
    RemoveNestedItem { list: NestedListKey, id: EntityId },
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApplicationField {
    AppliedPosition(String),
    Photo(Option<PhotoPayload>),
    Personal(PersonalData),
    /// Replaces the family section; the Father and Mother rows survive with their kind intact.
    Family(FamilyData),
    /// Replaces formal education; each row keeps its fixed schooling level.
    Education(EducationData),
    NonFormalEducation(Vec<Course>),
    Skills(SkillsData),
    Organizations(Vec<Organization>),
    WorkExperience(Vec<WorkExperience>),
    Health(HealthData),
    Other(OtherData),
    Declaration(Declaration),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionField {
    Personal(PersonalField),
    Family(FamilyField),
    Skills(SkillsField),
    Health(HealthField),
    Other(OtherField),
    Declaration(DeclarationField),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PersonalField {
    FullName(String),
    Gender(Gender),
    BirthPlace(String),
    BirthDate(Option<NaiveDate>),
    Height(String),
    Weight(String),
    BloodType(String),
    Nationality(String),
    Religion(String),
    Address(String),
    PostalCode(String),
    ResidenceStatus(Vec<String>),
    KtpAddress(String),
    KtpPostalCode(String),
    Phone(String),
    Email(String),
    KtpNumber(String),
    KtpExpiry(String),
    KtpCity(String),
    SocialMedia(SocialMedia),
}

/// Family edits. The parents-and-siblings list is only reachable row by row here.
#[derive(Debug, Clone, PartialEq)]
pub enum FamilyField {
    CivilStatus(CivilStatus),
    MarriageDate(Option<NaiveDate>),
    DivorceDate(Option<NaiveDate>),
    SpouseAndChildren(Vec<FamilyMember>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkillsField {
    Computer(ComputerSkills),
    Language(LanguageSkills),
}

#[derive(Debug, Clone, PartialEq)]
pub enum HealthField {
    HasHealthIssues(YesNo),
    Issues(Vec<HealthIssue>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OtherField {
    AttendedSelection(YesNo),
    SelectionDetails(SelectionDetails),
    HasRelative(YesNo),
    Relatives(Vec<Relative>),
    References(Vec<Reference>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationField {
    City(String),
    Date(Option<NaiveDate>),
    FullName(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubsectionField {
    /// `personal.socialMedia.*`
    SocialMedia(SocialMediaField),
    /// `skills.computer.*`
    Computer(ComputerField),
    /// `skills.language.*`
    Language(LanguageFlagField),
    /// `other.selectionDetails.*`
    SelectionDetails(SelectionField),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SocialMediaField {
    Instagram(String),
    Twitter(String),
    Facebook(String),
    Tiktok(String),
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComputerField {
    CanOperate(bool),
    CannotOperate(bool),
    Programs(Vec<String>),
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LanguageFlagField {
    CanUse(bool),
    CannotUse(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionField {
    Times(String),
    Position(String),
    Month(String),
    Year(String),
}

/// Row edits for the top-level lists; the variant selects the list.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemEdit {
    Course(CourseField),
    Organization(OrganizationField),
    Work(WorkField),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CourseField {
    CourseName(String),
    Organizer(String),
    Year(String),
    Duration(String),
    Certificate(CertificateStatus),
    FundedBy(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OrganizationField {
    Name(String),
    Position(String),
    Kind(String),
    Year(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkField {
    From(String),
    To(String),
    CompanyInfo(String),
    PositionStatus(String),
    IsContract(bool),
    IsPermanent(bool),
    Salary(String),
    ReasonForLeaving(String),
}

/// Row edits for lists nested inside a section; the variant selects the list.
#[derive(Debug, Clone, PartialEq)]
pub enum NestedItemEdit {
    FamilyMember(FamilyMemberField),
    ParentSibling(ParentSiblingField),
    FormalEducation(EducationField),
    Language(LanguageSkillField),
    HealthIssue(HealthIssueField),
    Relative(RelativeField),
    Reference(ReferenceField),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FamilyMemberField {
    Name(String),
    Gender(Gender),
    BirthDate(Option<NaiveDate>),
    Education(String),
    Occupation(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParentSiblingField {
    Relationship(String),
    Name(String),
    Gender(Gender),
    BirthDate(Option<NaiveDate>),
    LastEducation(String),
    Occupation(String),
    Company(String),
    Phone(String),
}

impl ParentSiblingField {
    /// Fields that define what kind of relative a row is.
    pub const fn edits_kind(&self) -> bool {
        matches!(
            self,
            ParentSiblingField::Relationship(_) | ParentSiblingField::Gender(_)
        )
    }
}

/// The schooling level of a formal education row is not editable.
#[derive(Debug, Clone, PartialEq)]
pub enum EducationField {
    SchoolName(String),
    Major(String),
    GraduationYear(String),
    Gpa(String),
    Scholarship(YesNo),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LanguageSkillField {
    Name(String),
    Proficiency(Proficiency),
}

#[derive(Debug, Clone, PartialEq)]
pub enum HealthIssueField {
    IllnessName(String),
    Since(String),
    Symptoms(String),
    DisruptsActivities(YesNo),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RelativeField {
    Name(String),
    Position(String),
    Unit(String),
    Relationship(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceField {
    Name(String),
    Company(String),
    Phone(String),
    Notes(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListItem {
    Course(Course),
    Organization(Organization),
    Work(WorkExperience),
}

/// Rows that can be appended to nested lists. Formal education has a fixed set of rows and
/// therefore no variant here.
#[derive(Debug, Clone, PartialEq)]
pub enum NestedListItem {
    FamilyMember(FamilyMember),
    ParentSibling(ParentSibling),
    Language(LanguageSkill),
    HealthIssue(HealthIssue),
    Relative(Relative),
    Reference(Reference),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKey {
    NonFormalEducation,
    Organizations,
    WorkExperience,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestedListKey {
    SpouseAndChildren,
    ParentsAndSiblings,
    Languages,
    HealthIssues,
    Relatives,
    References,
}
