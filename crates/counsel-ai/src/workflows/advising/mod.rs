//! Stage-gated advising workflow: deterministic university recommendations,
//! profile-strength scoring, and the shortlist/lock pipeline.
//!
//! The engine always pre-filters its candidate pool through the directory
//! seam before anything downstream sees it; nothing in this module invents
//! universities.

pub mod catalog;
pub mod domain;
pub mod normalize;
pub mod recommendation;
pub mod repository;
pub mod router;
pub mod service;
pub mod stage;
pub mod strength;
pub mod tasks;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, UniversityCatalog};
pub use domain::{
    AdvisingStage, CanonicalStatus, Competitiveness, RiskTier, ShortlistEntry, Task, TaskId,
    University, UniversityId, UserId, UserProfile, UserState, DEFAULT_RANK,
};
pub use normalize::{normalize_country, normalize_status};
pub use recommendation::{
    classify, fit_score, EngineConfig, ProfileDefaults, RecommendationEngine, ScoredUniversity,
    TieredRecommendations,
};
pub use repository::{AdvisingStore, DirectoryError, StoreError, UniversityDirectory};
pub use router::advising_router;
pub use service::{AdvisingService, AdvisingServiceError, ProfileDraft};
pub use stage::{advance, require_at_least, InvariantViolation, StageEvent};
pub use strength::{
    profile_strength, ProfileSection, ProfileStrengthResult, SectionReport, SectionStatus,
};
pub use tasks::{application_prep_templates, TaskTemplate};
