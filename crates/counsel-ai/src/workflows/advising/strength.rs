//! Point-weighted profile completeness scoring with section-level statuses
//! and next-action hints.

use super::domain::{CanonicalStatus, UserProfile};
use super::normalize::normalize_status;
use serde::{Deserialize, Serialize};

/// Profile sections in evaluation and hint-priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileSection {
    Academics,
    Exams,
    StatementOfPurpose,
    Documents,
    Preferences,
}

impl ProfileSection {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Academics => "academics",
            Self::Exams => "exams",
            Self::StatementOfPurpose => "statement_of_purpose",
            Self::Documents => "documents",
            Self::Preferences => "preferences",
        }
    }
}

/// Qualitative status derived from a section's earned/possible ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    Missing,
    Weak,
    Average,
    Strong,
}

impl SectionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Weak => "weak",
            Self::Average => "average",
            Self::Strong => "strong",
        }
    }

    fn from_points(earned: u8, possible: u8) -> Self {
        if earned == 0 {
            Self::Missing
        } else if u16::from(earned) * 100 >= u16::from(possible) * 80 {
            Self::Strong
        } else if u16::from(earned) * 100 >= u16::from(possible) * 40 {
            Self::Average
        } else {
            Self::Weak
        }
    }
}

/// Score breakdown for one profile section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionReport {
    pub section: ProfileSection,
    pub earned: u8,
    pub possible: u8,
    pub status: SectionStatus,
}

/// Derived completeness view: recomputed on every request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileStrengthResult {
    pub overall_score: u8,
    pub sections: Vec<SectionReport>,
    pub next_actions: Vec<String>,
}

const ACADEMICS_MAX: u8 = 30;
const EXAMS_MAX: u8 = 25;
const SOP_MAX: u8 = 20;
const DOCUMENTS_MAX: u8 = 15;
const PREFERENCES_MAX: u8 = 10;

const MAX_NEXT_ACTIONS: usize = 3;

/// Evaluate a profile's weighted completeness.
///
/// Pure computation over already-loaded data; the lock lookup is performed
/// by the caller and passed in as a boolean.
pub fn profile_strength(
    profile: &UserProfile,
    has_locked_university: bool,
) -> ProfileStrengthResult {
    let mut sections = Vec::with_capacity(5);
    let mut next_actions = Vec::new();

    // Academics: GPA 15, degree-or-field 10, graduation year 5.
    let mut academics = 0u8;
    if profile.gpa.is_some_and(|gpa| gpa > 0.0) {
        academics += 15;
    } else {
        next_actions.push("Add your GPA to anchor academic fit.".to_string());
    }
    let has_degree = profile
        .degree
        .as_deref()
        .is_some_and(|value| !value.trim().is_empty());
    let has_field = profile
        .field_of_study
        .as_deref()
        .is_some_and(|value| !value.trim().is_empty());
    if has_degree || has_field {
        academics += 10;
    } else {
        next_actions.push("Record your degree or intended field of study.".to_string());
    }
    if profile.graduation_year.is_some_and(|year| year > 0) {
        academics += 5;
    } else {
        next_actions.push("Add your graduation year.".to_string());
    }
    sections.push(report(ProfileSection::Academics, academics, ACADEMICS_MAX));

    // Exams: IELTS 12, GRE/GMAT 13, partial credit while in progress.
    let ielts = normalize_status(profile.ielts_status.as_deref());
    let gre_gmat = normalize_status(profile.gre_gmat_status.as_deref());
    let mut exams = 0u8;
    exams += match ielts {
        CanonicalStatus::Completed => 12,
        CanonicalStatus::InProgress => 6,
        CanonicalStatus::NotStarted => 0,
    };
    if ielts == CanonicalStatus::NotStarted {
        next_actions.push("Book your English proficiency test.".to_string());
    }
    exams += match gre_gmat {
        CanonicalStatus::Completed => 13,
        CanonicalStatus::InProgress => 6,
        CanonicalStatus::NotStarted => 0,
    };
    if gre_gmat == CanonicalStatus::NotStarted {
        next_actions.push("Schedule your GRE or GMAT.".to_string());
    }
    sections.push(report(ProfileSection::Exams, exams, EXAMS_MAX));

    // Statement of purpose: full credit when completed, half while drafting.
    let sop = normalize_status(profile.sop_status.as_deref());
    let sop_points = match sop {
        CanonicalStatus::Completed => 20,
        CanonicalStatus::InProgress => 10,
        CanonicalStatus::NotStarted => 0,
    };
    if sop == CanonicalStatus::NotStarted {
        next_actions.push("Start drafting your statement of purpose.".to_string());
    }
    sections.push(report(
        ProfileSection::StatementOfPurpose,
        sop_points,
        SOP_MAX,
    ));

    // Documents: a concrete funding plan.
    let has_funding_plan = profile
        .funding_plan
        .as_deref()
        .is_some_and(|value| !value.trim().is_empty());
    let documents = if has_funding_plan { 15 } else { 0 };
    if !has_funding_plan {
        next_actions.push("Outline how you plan to fund your studies.".to_string());
    }
    sections.push(report(ProfileSection::Documents, documents, DOCUMENTS_MAX));

    // Preferences: countries 4, budget 3, field of study 3.
    let mut preferences = 0u8;
    if !profile.preferred_countries.is_empty() {
        preferences += 4;
    } else {
        next_actions.push("Pick at least one preferred country.".to_string());
    }
    if profile.budget_per_year.is_some_and(|budget| budget > 0) {
        preferences += 3;
    } else {
        next_actions.push("Set your annual budget.".to_string());
    }
    if has_field {
        preferences += 3;
    } else {
        next_actions.push("Choose your field of study.".to_string());
    }
    sections.push(report(
        ProfileSection::Preferences,
        preferences,
        PREFERENCES_MAX,
    ));

    // Decision progress is the lowest-priority hint; it carries no points.
    if !has_locked_university {
        next_actions.push("Shortlist universities and lock your final choice.".to_string());
    }

    next_actions.truncate(MAX_NEXT_ACTIONS);

    let overall_score = sections.iter().map(|section| section.earned).sum();

    ProfileStrengthResult {
        overall_score,
        sections,
        next_actions,
    }
}

fn report(section: ProfileSection, earned: u8, possible: u8) -> SectionReport {
    SectionReport {
        section,
        earned,
        possible,
        status: SectionStatus::from_points(earned, possible),
    }
}
