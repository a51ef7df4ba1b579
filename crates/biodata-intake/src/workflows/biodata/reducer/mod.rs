//! Pure state transitions for the applicant draft.

mod actions;

pub use actions::{
    ApplicationField, ComputerField, CourseField, DeclarationField, EducationField,
    FamilyField, FamilyMemberField, FormAction, HealthField, HealthIssueField, ItemEdit,
    LanguageFlagField, LanguageSkillField, ListItem, ListKey, NestedItemEdit, NestedListItem,
    NestedListKey, OrganizationField, OtherField, ParentSiblingField, PersonalField,
    ReferenceField, RelativeField, SectionField, SelectionField, SkillsField, SocialMediaField,
    SubsectionField, WorkField,
};

use tracing::debug;

use super::domain::{
    Application, EducationData, EntityId, FamilyData, Identified, ParentSibling, EDUCATION_LEVELS,
    LOCKED_PARENT_ROWS,
};

/// Compute the next draft from the current one. The input is never modified.
pub fn reduce(state: &Application, action: FormAction) -> Application {
    if matches!(action, FormAction::Reset) {
        return Application::new_draft();
    }

    let mut next = state.clone();
    apply(&mut next, action);
    next
}

fn apply(next: &mut Application, action: FormAction) {
    match action {
        FormAction::SetField(field) => field.apply(next),
        FormAction::SetSectionField(field) => field.apply(next),
        FormAction::SetSubsectionField(field) => field.apply(next),
        FormAction::UpdateItem { index, edit } => edit.apply(next, index),
        FormAction::UpdateNestedItem { index, edit } => edit.apply(next, index),
        FormAction::AppendItem(item) => item.append_to(next),
        FormAction::AppendNestedItem(item) => item.append_to(next),
        FormAction::RemoveItem { list, id } => list.remove_from(next, &id),
        FormAction::RemoveNestedItem { list, id } => list.remove_from(next, &id),
        FormAction::Reset => *next = Application::new_draft(),
    }
}

/// Apply `edit` to the row at `index`; out-of-range positions leave the list untouched.
fn update_at<T>(items: &mut [T], index: usize, list: &'static str, edit: impl FnOnce(&mut T)) {
    match items.get_mut(index) {
        Some(item) => edit(item),
        None => debug!(list, index, len = items.len(), "ignoring update for missing row"),
    }
}

fn remove_by_id<T: Identified>(items: &mut Vec<T>, id: &EntityId) {
    items.retain(|item| item.id() != id);
}

/// Whole-family replacement keeps the current parent rows. An incoming row with a parent's
/// identity updates that parent's details; every other incoming row is kept as a sibling.
fn replace_family(current: &FamilyData, mut incoming: FamilyData) -> FamilyData {
    let parents = current
        .parents_and_siblings
        .get(..LOCKED_PARENT_ROWS)
        .unwrap_or_default();

    let mut rows: Vec<ParentSibling> = parents
        .iter()
        .map(|parent| {
            incoming
                .parents_and_siblings
                .iter()
                .find(|row| row.id == parent.id)
                .map_or_else(
                    || parent.clone(),
                    |row| ParentSibling {
                        relationship: parent.relationship.clone(),
                        gender: parent.gender,
                        ..row.clone()
                    },
                )
        })
        .collect();
    rows.extend(
        incoming
            .parents_and_siblings
            .drain(..)
            .filter(|row| parents.iter().all(|parent| parent.id != row.id)),
    );

    incoming.parents_and_siblings = rows;
    incoming
}

fn replace_education(mut incoming: EducationData) -> EducationData {
    for (entry, level) in incoming.formal.iter_mut().zip(EDUCATION_LEVELS) {
        entry.level = level.to_string();
    }
    incoming
}

impl ApplicationField {
    fn apply(self, next: &mut Application) {
        match self {
            ApplicationField::AppliedPosition(value) => next.applied_position = value,
            ApplicationField::Photo(value) => next.photo = value,
            ApplicationField::Personal(value) => next.personal = value,
            ApplicationField::Family(value) => next.family = replace_family(&next.family, value),
            ApplicationField::Education(value) => next.education = replace_education(value),
            ApplicationField::NonFormalEducation(value) => next.non_formal_education = value,
            ApplicationField::Skills(value) => next.skills = value,
            ApplicationField::Organizations(value) => next.organizations = value,
            ApplicationField::WorkExperience(value) => next.work_experience = value,
            ApplicationField::Health(value) => next.health = value,
            ApplicationField::Other(value) => next.other = value,
            ApplicationField::Declaration(value) => next.declaration = value,
        }
    }
}

impl SectionField {
    fn apply(self, next: &mut Application) {
        match self {
            SectionField::Personal(field) => {
                let personal = &mut next.personal;
                match field {
                    PersonalField::FullName(value) => personal.full_name = value,
                    PersonalField::Gender(value) => personal.gender = value,
                    PersonalField::BirthPlace(value) => personal.birth_place = value,
                    PersonalField::BirthDate(value) => personal.birth_date = value,
                    PersonalField::Height(value) => personal.height = value,
                    PersonalField::Weight(value) => personal.weight = value,
                    PersonalField::BloodType(value) => personal.blood_type = value,
                    PersonalField::Nationality(value) => personal.nationality = value,
                    PersonalField::Religion(value) => personal.religion = value,
                    PersonalField::Address(value) => personal.address = value,
                    PersonalField::PostalCode(value) => personal.postal_code = value,
                    PersonalField::ResidenceStatus(value) => personal.residence_status = value,
                    PersonalField::KtpAddress(value) => personal.ktp_address = value,
                    PersonalField::KtpPostalCode(value) => personal.ktp_postal_code = value,
                    PersonalField::Phone(value) => personal.phone = value,
                    PersonalField::Email(value) => personal.email = value,
                    PersonalField::KtpNumber(value) => personal.ktp_number = value,
                    PersonalField::KtpExpiry(value) => personal.ktp_expiry = value,
                    PersonalField::KtpCity(value) => personal.ktp_city = value,
                    PersonalField::SocialMedia(value) => personal.social_media = value,
                }
            }
            SectionField::Family(field) => {
                let family = &mut next.family;
                match field {
                    FamilyField::CivilStatus(value) => family.civil_status = value,
                    FamilyField::MarriageDate(value) => family.marriage_date = value,
                    FamilyField::DivorceDate(value) => family.divorce_date = value,
                    FamilyField::SpouseAndChildren(value) => family.spouse_and_children = value,
                }
            }
            SectionField::Skills(field) => match field {
                SkillsField::Computer(value) => next.skills.computer = value,
                SkillsField::Language(value) => next.skills.language = value,
            },
            SectionField::Health(field) => match field {
                HealthField::HasHealthIssues(value) => next.health.has_health_issues = value,
                HealthField::Issues(value) => next.health.issues = value,
            },
            SectionField::Other(field) => {
                let other = &mut next.other;
                match field {
                    OtherField::AttendedSelection(value) => other.attended_selection = value,
                    OtherField::SelectionDetails(value) => other.selection_details = value,
                    OtherField::HasRelative(value) => other.has_relative = value,
                    OtherField::Relatives(value) => other.relatives = value,
                    OtherField::References(value) => other.references = value,
                }
            }
            SectionField::Declaration(field) => {
                let declaration = &mut next.declaration;
                match field {
                    DeclarationField::City(value) => declaration.city = value,
                    DeclarationField::Date(value) => declaration.date = value,
                    DeclarationField::FullName(value) => declaration.full_name = value,
                }
            }
        }
    }
}

impl SubsectionField {
    fn apply(self, next: &mut Application) {
        match self {
            SubsectionField::SocialMedia(field) => {
                let social = &mut next.personal.social_media;
                match field {
                    SocialMediaField::Instagram(value) => social.instagram = value,
                    SocialMediaField::Twitter(value) => social.twitter = value,
                    SocialMediaField::Facebook(value) => social.facebook = value,
                    SocialMediaField::Tiktok(value) => social.tiktok = value,
                    SocialMediaField::Other(value) => social.other = value,
                }
            }
            SubsectionField::Computer(field) => {
                let computer = &mut next.skills.computer;
                match field {
                    ComputerField::CanOperate(value) => computer.can_operate = value,
                    ComputerField::CannotOperate(value) => computer.cannot_operate = value,
                    ComputerField::Programs(value) => computer.programs = value,
                    ComputerField::Other(value) => computer.other = value,
                }
            }
            SubsectionField::Language(field) => match field {
                LanguageFlagField::CanUse(value) => next.skills.language.can_use = value,
                LanguageFlagField::CannotUse(value) => next.skills.language.cannot_use = value,
            },
            SubsectionField::SelectionDetails(field) => {
                let details = &mut next.other.selection_details;
                match field {
                    SelectionField::Times(value) => details.times = value,
                    SelectionField::Position(value) => details.position = value,
                    SelectionField::Month(value) => details.month = value,
                    SelectionField::Year(value) => details.year = value,
                }
            }
        }
    }
}

impl ItemEdit {
    fn apply(self, next: &mut Application, index: usize) {
        match self {
            ItemEdit::Course(field) => {
                update_at(&mut next.non_formal_education, index, "nonFormalEducation", |row| {
                    match field {
                        CourseField::CourseName(value) => row.course_name = value,
                        CourseField::Organizer(value) => row.organizer = value,
                        CourseField::Year(value) => row.year = value,
                        CourseField::Duration(value) => row.duration = value,
                        CourseField::Certificate(value) => row.certificate = value,
                        CourseField::FundedBy(value) => row.funded_by = value,
                    }
                })
            }
            ItemEdit::Organization(field) => {
                update_at(&mut next.organizations, index, "organizations", |row| match field {
                    OrganizationField::Name(value) => row.name = value,
                    OrganizationField::Position(value) => row.position = value,
                    OrganizationField::Kind(value) => row.kind = value,
                    OrganizationField::Year(value) => row.year = value,
                })
            }
            ItemEdit::Work(field) => {
                update_at(&mut next.work_experience, index, "workExperience", |row| {
                    match field {
                        WorkField::From(value) => row.from = value,
                        WorkField::To(value) => row.to = value,
                        WorkField::CompanyInfo(value) => row.company_info = value,
                        WorkField::PositionStatus(value) => row.position_status = value,
                        WorkField::IsContract(value) => row.is_contract = value,
                        WorkField::IsPermanent(value) => row.is_permanent = value,
                        WorkField::Salary(value) => row.salary = value,
                        WorkField::ReasonForLeaving(value) => row.reason_for_leaving = value,
                    }
                })
            }
        }
    }
}

impl NestedItemEdit {
    fn apply(self, next: &mut Application, index: usize) {
        match self {
            NestedItemEdit::FamilyMember(field) => update_at(
                &mut next.family.spouse_and_children,
                index,
                "family.spouseAndChildren",
                |row| match field {
                    FamilyMemberField::Name(value) => row.name = value,
                    FamilyMemberField::Gender(value) => row.gender = value,
                    FamilyMemberField::BirthDate(value) => row.birth_date = value,
                    FamilyMemberField::Education(value) => row.education = value,
                    FamilyMemberField::Occupation(value) => row.occupation = value,
                },
            ),
            NestedItemEdit::ParentSibling(field) => {
                if index < LOCKED_PARENT_ROWS && field.edits_kind() {
                    debug!(index, "parent rows keep their relationship and gender");
                    return;
                }
                update_at(
                    &mut next.family.parents_and_siblings,
                    index,
                    "family.parentsAndSiblings",
                    |row| match field {
                        ParentSiblingField::Relationship(value) => row.relationship = value,
                        ParentSiblingField::Name(value) => row.name = value,
                        ParentSiblingField::Gender(value) => row.gender = value,
                        ParentSiblingField::BirthDate(value) => row.birth_date = value,
                        ParentSiblingField::LastEducation(value) => row.last_education = value,
                        ParentSiblingField::Occupation(value) => row.occupation = value,
                        ParentSiblingField::Company(value) => row.company = value,
                        ParentSiblingField::Phone(value) => row.phone = value,
                    },
                )
            }
            NestedItemEdit::FormalEducation(field) => update_at(
                &mut next.education.formal,
                index,
                "education.formal",
                |row| match field {
                    EducationField::SchoolName(value) => row.school_name = value,
                    EducationField::Major(value) => row.major = value,
                    EducationField::GraduationYear(value) => row.graduation_year = value,
                    EducationField::Gpa(value) => row.gpa = value,
                    EducationField::Scholarship(value) => row.scholarship = value,
                },
            ),
            NestedItemEdit::Language(field) => update_at(
                &mut next.skills.language.languages,
                index,
                "skills.language.languages",
                |row| match field {
                    LanguageSkillField::Name(value) => row.name = value,
                    LanguageSkillField::Proficiency(value) => row.proficiency = value,
                },
            ),
            NestedItemEdit::HealthIssue(field) => update_at(
                &mut next.health.issues,
                index,
                "health.issues",
                |row| match field {
                    HealthIssueField::IllnessName(value) => row.illness_name = value,
                    HealthIssueField::Since(value) => row.since = value,
                    HealthIssueField::Symptoms(value) => row.symptoms = value,
                    HealthIssueField::DisruptsActivities(value) => {
                        row.disrupts_activities = value
                    }
                },
            ),
            NestedItemEdit::Relative(field) => update_at(
                &mut next.other.relatives,
                index,
                "other.relatives",
                |row| match field {
                    RelativeField::Name(value) => row.name = value,
                    RelativeField::Position(value) => row.position = value,
                    RelativeField::Unit(value) => row.unit = value,
                    RelativeField::Relationship(value) => row.relationship = value,
                },
            ),
            NestedItemEdit::Reference(field) => update_at(
                &mut next.other.references,
                index,
                "other.references",
                |row| match field {
                    ReferenceField::Name(value) => row.name = value,
                    ReferenceField::Company(value) => row.company = value,
                    ReferenceField::Phone(value) => row.phone = value,
                    ReferenceField::Notes(value) => row.notes = value,
                },
            ),
        }
    }
}

impl ListItem {
    fn append_to(self, next: &mut Application) {
        match self {
            ListItem::Course(item) => next.non_formal_education.push(item),
            ListItem::Organization(item) => next.organizations.push(item),
            ListItem::Work(item) => next.work_experience.push(item),
        }
    }
}

impl NestedListItem {
    fn append_to(self, next: &mut Application) {
        match self {
            NestedListItem::FamilyMember(item) => next.family.spouse_and_children.push(item),
            NestedListItem::ParentSibling(item) => next.family.parents_and_siblings.push(item),
            NestedListItem::Language(item) => next.skills.language.languages.push(item),
            NestedListItem::HealthIssue(item) => next.health.issues.push(item),
            NestedListItem::Relative(item) => next.other.relatives.push(item),
            NestedListItem::Reference(item) => next.other.references.push(item),
        }
    }
}

impl ListKey {
    fn remove_from(self, next: &mut Application, id: &EntityId) {
        match self {
            ListKey::NonFormalEducation => remove_by_id(&mut next.non_formal_education, id),
            ListKey::Organizations => remove_by_id(&mut next.organizations, id),
            ListKey::WorkExperience => remove_by_id(&mut next.work_experience, id),
        }
    }
}

impl NestedListKey {
    fn remove_from(self, next: &mut Application, id: &EntityId) {
        match self {
            NestedListKey::SpouseAndChildren => {
                remove_by_id(&mut next.family.spouse_and_children, id)
            }
            NestedListKey::ParentsAndSiblings => {
                // Only appended sibling rows are removable.
                let rows = &mut next.family.parents_and_siblings;
                let mut position = 0;
                rows.retain(|row| {
                    let keep = position < LOCKED_PARENT_ROWS || row.id() != id;
                    position += 1;
                    keep
                });
            }
            NestedListKey::Languages => remove_by_id(&mut next.skills.language.languages, id),
            NestedListKey::HealthIssues => remove_by_id(&mut next.health.issues, id),
            NestedListKey::Relatives => remove_by_id(&mut next.other.relatives, id),
            NestedListKey::References => remove_by_id(&mut next.other.references, id),
        }
    }
}
