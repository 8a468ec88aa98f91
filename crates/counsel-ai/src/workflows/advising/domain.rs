use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rank assumed for unranked institutions before any bucketing.
pub const DEFAULT_RANK: u32 = 500;

/// Identifier wrapper for advised users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub u64);

/// Identifier wrapper for universities in the reference catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UniversityId(pub u32);

/// Identifier wrapper for generated tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub u64);

/// Intake profile owned by a single user, keyed externally by email.
///
/// Mutated only through the profile-update operations; `profile_complete`
/// gates every downstream operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub education_level: Option<String>,
    pub degree: Option<String>,
    pub graduation_year: Option<i32>,
    /// Grade point average on a 0-10 scale.
    pub gpa: Option<f32>,
    pub intended_degree: Option<String>,
    pub field_of_study: Option<String>,
    pub intake_year: Option<i32>,
    pub preferred_countries: Vec<String>,
    /// Annual budget ceiling in USD.
    pub budget_per_year: Option<u32>,
    pub funding_plan: Option<String>,
    pub ielts_status: Option<String>,
    pub gre_gmat_status: Option<String>,
    pub sop_status: Option<String>,
    pub profile_complete: bool,
    pub created_at: DateTime<Utc>,
}

/// Admission competitiveness band, a deterministic function of rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Competitiveness {
    High,
    Medium,
    Low,
    VeryLow,
}

impl Competitiveness {
    /// Band an institution by catalog rank; unranked rows use the
    /// pessimistic default rank.
    pub fn from_rank(rank: Option<u32>) -> Self {
        match rank.unwrap_or(DEFAULT_RANK) {
            0..=50 => Self::High,
            51..=100 => Self::Medium,
            101..=300 => Self::Low,
            _ => Self::VeryLow,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
            Self::VeryLow => "VERY_LOW",
        }
    }
}

/// Immutable reference data describing one university eligible for
/// recommendation. Never created or mutated by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct University {
    pub id: UniversityId,
    pub name: String,
    pub country: String,
    /// Global rank; lower is more prestigious. Absent for unranked rows.
    pub rank: Option<u32>,
    pub competitiveness: Competitiveness,
    pub estimated_tuition_usd: u32,
}

/// Risk tier a recommended or shortlisted university falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    Reach,
    Target,
    Safe,
}

impl RiskTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Reach => "REACH",
            Self::Target => "TARGET",
            Self::Safe => "SAFE",
        }
    }
}

impl Default for RiskTier {
    fn default() -> Self {
        Self::Target
    }
}

/// A user's position in the advising pipeline.
///
/// Ordered so stage guards can express "at or past" requirements.
/// APPLICATION follows LOCKED as an alias stage, not a distinct rule set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvisingStage {
    Onboarding,
    Discovery,
    Shortlist,
    Locked,
    Application,
}

impl AdvisingStage {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Onboarding,
            Self::Discovery,
            Self::Shortlist,
            Self::Locked,
            Self::Application,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Onboarding => "ONBOARDING",
            Self::Discovery => "DISCOVERY",
            Self::Shortlist => "SHORTLIST",
            Self::Locked => "LOCKED",
            Self::Application => "APPLICATION",
        }
    }
}

impl fmt::Display for AdvisingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Canonical three-state bucket for free-text readiness statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CanonicalStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl CanonicalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "NOT_STARTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }
}

/// Relationship between a user and a shortlisted university.
///
/// At most one entry per user may be locked at any time; locking is an
/// atomic unlock-all-then-lock-one operation on the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortlistEntry {
    pub user_id: UserId,
    pub university_id: UniversityId,
    pub tier: RiskTier,
    pub locked: bool,
    pub created_at: DateTime<Utc>,
}

/// Per-user pipeline state, created lazily at the initial stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserState {
    pub user_id: UserId,
    pub current_stage: AdvisingStage,
    pub updated_at: DateTime<Utc>,
}

/// Actionable item generated in batches from the application blueprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub stage: AdvisingStage,
    pub university_id: Option<UniversityId>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}
