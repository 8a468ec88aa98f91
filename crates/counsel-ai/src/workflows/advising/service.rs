use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{
    AdvisingStage, RiskTier, ShortlistEntry, Task, TaskId, UniversityId, UserId, UserProfile,
    UserState,
};
use super::normalize::normalize_country;
use super::recommendation::{RecommendationEngine, TieredRecommendations};
use super::repository::{AdvisingStore, DirectoryError, StoreError, UniversityDirectory};
use super::stage::{advance, require_at_least, InvariantViolation, StageEvent};
use super::strength::{profile_strength, ProfileStrengthResult};
use super::tasks::application_prep_templates;

/// Service composing the recommendation engine, candidate directory, and
/// advising store behind the public pipeline operations.
pub struct AdvisingService<D, S> {
    directory: Arc<D>,
    store: Arc<S>,
    engine: RecommendationEngine,
}

static USER_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static TASK_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_user_id() -> UserId {
    UserId(USER_SEQUENCE.fetch_add(1, Ordering::Relaxed))
}

fn next_task_id() -> TaskId {
    TaskId(TASK_SEQUENCE.fetch_add(1, Ordering::Relaxed))
}

/// Inbound profile fields accepted by the upsert operation. Absent fields
/// leave the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub education_level: Option<String>,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub graduation_year: Option<i32>,
    #[serde(default)]
    pub gpa: Option<f32>,
    #[serde(default)]
    pub intended_degree: Option<String>,
    #[serde(default)]
    pub field_of_study: Option<String>,
    #[serde(default)]
    pub intake_year: Option<i32>,
    #[serde(default)]
    pub preferred_countries: Option<Vec<String>>,
    #[serde(default)]
    pub budget_per_year: Option<u32>,
    #[serde(default)]
    pub funding_plan: Option<String>,
    #[serde(default)]
    pub ielts_status: Option<String>,
    #[serde(default)]
    pub gre_gmat_status: Option<String>,
    #[serde(default)]
    pub sop_status: Option<String>,
}

impl<D, S> AdvisingService<D, S>
where
    D: UniversityDirectory + 'static,
    S: AdvisingStore + 'static,
{
    pub fn new(directory: Arc<D>, store: Arc<S>, engine: RecommendationEngine) -> Self {
        Self {
            directory,
            store,
            engine,
        }
    }

    /// Create or update a profile keyed by email. Validation happens once
    /// here at the boundary; downstream components trust the typed record.
    pub fn upsert_profile(&self, draft: ProfileDraft) -> Result<UserProfile, AdvisingServiceError> {
        let email = draft.email.trim().to_string();
        if email.is_empty() || !email.contains('@') {
            return Err(AdvisingServiceError::Validation(
                "email must be a valid address".to_string(),
            ));
        }
        if let Some(gpa) = draft.gpa {
            if !(0.0..=10.0).contains(&gpa) {
                return Err(AdvisingServiceError::Validation(
                    "gpa must be on the 0-10 scale".to_string(),
                ));
            }
        }
        if draft.budget_per_year == Some(0) {
            return Err(AdvisingServiceError::Validation(
                "budget_per_year must be positive".to_string(),
            ));
        }

        let mut profile = match self.store.fetch_profile_by_email(&email)? {
            Some(existing) => existing,
            None => UserProfile {
                id: next_user_id(),
                email: email.clone(),
                name: None,
                education_level: None,
                degree: None,
                graduation_year: None,
                gpa: None,
                intended_degree: None,
                field_of_study: None,
                intake_year: None,
                preferred_countries: Vec::new(),
                budget_per_year: None,
                funding_plan: None,
                ielts_status: None,
                gre_gmat_status: None,
                sop_status: None,
                profile_complete: false,
                created_at: Utc::now(),
            },
        };

        merge_draft(&mut profile, draft);
        let stored = self.store.upsert_profile(profile)?;
        Ok(stored)
    }

    /// Final-submit: validate the required intake fields, flip the derived
    /// completeness flag, and move the pipeline into discovery. Idempotent.
    pub fn complete_profile(&self, user: UserId) -> Result<UserProfile, AdvisingServiceError> {
        let mut profile = self.require_profile(user)?;

        let mut missing = Vec::new();
        if profile.name.as_deref().map_or(true, str::is_empty) {
            missing.push("name");
        }
        if profile.gpa.is_none() {
            missing.push("gpa");
        }
        if profile.budget_per_year.is_none() {
            missing.push("budget_per_year");
        }
        if profile.preferred_countries.is_empty() {
            missing.push("preferred_countries");
        }
        if !missing.is_empty() {
            return Err(AdvisingServiceError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        if !profile.profile_complete {
            profile.profile_complete = true;
            profile = self.store.upsert_profile(profile)?;
            info!(user = user.0, "profile completed");
        }

        self.apply_stage_event(user, StageEvent::ProfileCompleted)?;
        Ok(profile)
    }

    /// Deterministic recommendations for a completed profile.
    ///
    /// Preferences are canonicalized and defaulted once here; the candidate
    /// fetch is bounded by the stretched budget ceiling and pool limit. A
    /// failing directory degrades this read path to an empty pool.
    pub fn recommendations(
        &self,
        user: UserId,
    ) -> Result<TieredRecommendations, AdvisingServiceError> {
        let profile = self.require_profile(user)?;
        if !profile.profile_complete {
            return Err(InvariantViolation::ProfileIncomplete {
                operation: "recommendations",
            }
            .into());
        }

        let config = self.engine.config();
        let countries: Vec<String> = if profile.preferred_countries.is_empty() {
            config.defaults.countries.clone()
        } else {
            profile
                .preferred_countries
                .iter()
                .map(|country| normalize_country(country))
                .collect()
        };

        let (_, budget) = self.engine.scoring_inputs(&profile);
        let ceiling = (f64::from(budget) * f64::from(config.budget_stretch)).round() as u32;

        let pool = match self
            .directory
            .fetch_by_criteria(&countries, Some(ceiling), config.pool_limit)
        {
            Ok(pool) => pool,
            Err(error) => {
                warn!(user = user.0, %error, "candidate fetch failed, degrading to empty pool");
                Vec::new()
            }
        };

        Ok(self.engine.recommend(&profile, pool))
    }

    /// Weighted completeness score with section statuses and hints.
    pub fn profile_strength(
        &self,
        user: UserId,
    ) -> Result<ProfileStrengthResult, AdvisingServiceError> {
        let profile = self.require_profile(user)?;
        let has_locked = self.store.locked_entry(user)?.is_some();
        Ok(profile_strength(&profile, has_locked))
    }

    pub fn shortlist(&self, user: UserId) -> Result<Vec<ShortlistEntry>, AdvisingServiceError> {
        self.require_profile(user)?;
        Ok(self.store.shortlist(user)?)
    }

    /// Add a university to the shortlist, defaulting the tier to TARGET.
    /// Re-adding updates the tier in place. The first entry moves the
    /// pipeline from discovery to shortlisting.
    pub fn add_to_shortlist(
        &self,
        user: UserId,
        university: UniversityId,
        tier: Option<RiskTier>,
    ) -> Result<ShortlistEntry, AdvisingServiceError> {
        let profile = self.require_profile(user)?;
        if !profile.profile_complete {
            return Err(InvariantViolation::ProfileIncomplete {
                operation: "shortlisting",
            }
            .into());
        }
        let state = self.store.state(user)?;
        require_at_least(state.current_stage, AdvisingStage::Discovery)?;

        let found = self.directory.fetch_by_ids(&[university])?;
        if found.is_empty() {
            return Err(AdvisingServiceError::NotFound("university"));
        }

        let existing = self.store.shortlist(user)?;
        let first_entry = existing.is_empty();

        let entry = match existing
            .into_iter()
            .find(|entry| entry.university_id == university)
        {
            Some(mut entry) => {
                if let Some(tier) = tier {
                    entry.tier = tier;
                }
                entry
            }
            None => ShortlistEntry {
                user_id: user,
                university_id: university,
                tier: tier.unwrap_or_default(),
                locked: false,
                created_at: Utc::now(),
            },
        };

        let stored = self.store.upsert_shortlist_entry(entry)?;

        if first_entry {
            self.apply_stage_event(user, StageEvent::ShortlistStarted)?;
        }

        Ok(stored)
    }

    /// Remove a shortlist entry. Removing the locked entry is rejected
    /// until the lock is released; emptying the shortlist moves the
    /// pipeline back to discovery.
    pub fn remove_from_shortlist(
        &self,
        user: UserId,
        university: UniversityId,
    ) -> Result<(), AdvisingServiceError> {
        self.require_profile(user)?;
        let entries = self.store.shortlist(user)?;
        let entry = entries
            .iter()
            .find(|entry| entry.university_id == university)
            .ok_or(AdvisingServiceError::NotFound("shortlist entry"))?;

        if entry.locked {
            return Err(InvariantViolation::LockedEntryRemoval.into());
        }

        self.store.remove_shortlist_entry(user, university)?;

        let remaining = entries.len() - 1;
        self.apply_stage_event(user, StageEvent::ShortlistReduced { remaining })?;
        Ok(())
    }

    /// Lock a shortlisted university as the committed application target.
    ///
    /// The store applies unlock-all, lock-one, the stage move, and the task
    /// regeneration as one atomic unit. Re-locking the locked university is
    /// a no-op so tasks are never duplicated.
    pub fn lock_university(
        &self,
        user: UserId,
        university: UniversityId,
    ) -> Result<ShortlistEntry, AdvisingServiceError> {
        let profile = self.require_profile(user)?;
        if !profile.profile_complete {
            return Err(InvariantViolation::ProfileIncomplete { operation: "locking" }.into());
        }

        let entries = self.store.shortlist(user)?;
        let target = entries
            .iter()
            .find(|entry| entry.university_id == university)
            .ok_or(AdvisingServiceError::NotFound("shortlist entry"))?;

        if target.locked {
            return Ok(target.clone());
        }

        let state = self.store.state(user)?;
        let next_stage = advance(state.current_stage, StageEvent::UniversityLocked)?;

        let tasks: Vec<Task> = application_prep_templates()
            .iter()
            .map(|template| Task {
                id: next_task_id(),
                user_id: user,
                title: template.title.to_string(),
                description: template.description.to_string(),
                stage: template.stage,
                university_id: Some(university),
                completed: false,
                created_at: Utc::now(),
            })
            .collect();

        let locked = self
            .store
            .lock_exclusive(user, university, next_stage, tasks)?;
        info!(
            user = user.0,
            university = university.0,
            "university locked, application tasks regenerated"
        );
        Ok(locked)
    }

    /// Release the current lock, clear generated tasks, and move the stage
    /// backward. A no-op when nothing is locked.
    pub fn unlock_university(&self, user: UserId) -> Result<(), AdvisingServiceError> {
        self.require_profile(user)?;
        if self.store.locked_entry(user)?.is_none() {
            return Ok(());
        }

        let remaining = self.store.shortlist(user)?.len();
        let state = self.store.state(user)?;
        let next_stage = advance(state.current_stage, StageEvent::ShortlistReduced { remaining })?;

        self.store.release_lock(user, next_stage)?;
        info!(user = user.0, "lock released, application tasks cleared");
        Ok(())
    }

    pub fn tasks(&self, user: UserId) -> Result<Vec<Task>, AdvisingServiceError> {
        self.require_profile(user)?;
        Ok(self.store.tasks(user)?)
    }

    pub fn complete_task(&self, user: UserId, task: TaskId) -> Result<Task, AdvisingServiceError> {
        self.require_profile(user)?;
        Ok(self.store.complete_task(user, task)?)
    }

    pub fn current_state(&self, user: UserId) -> Result<UserState, AdvisingServiceError> {
        self.require_profile(user)?;
        Ok(self.store.state(user)?)
    }

    fn require_profile(&self, user: UserId) -> Result<UserProfile, AdvisingServiceError> {
        self.store
            .fetch_profile(user)?
            .ok_or(AdvisingServiceError::NotFound("user profile"))
    }

    fn apply_stage_event(
        &self,
        user: UserId,
        event: StageEvent,
    ) -> Result<UserState, AdvisingServiceError> {
        let state = self.store.state(user)?;
        let next = advance(state.current_stage, event)?;
        if next == state.current_stage {
            return Ok(state);
        }
        Ok(self.store.set_stage(user, next)?)
    }
}

fn merge_draft(profile: &mut UserProfile, draft: ProfileDraft) {
    if draft.name.is_some() {
        profile.name = draft.name;
    }
    if draft.education_level.is_some() {
        profile.education_level = draft.education_level;
    }
    if draft.degree.is_some() {
        profile.degree = draft.degree;
    }
    if draft.graduation_year.is_some() {
        profile.graduation_year = draft.graduation_year;
    }
    if draft.gpa.is_some() {
        profile.gpa = draft.gpa;
    }
    if draft.intended_degree.is_some() {
        profile.intended_degree = draft.intended_degree;
    }
    if draft.field_of_study.is_some() {
        profile.field_of_study = draft.field_of_study;
    }
    if draft.intake_year.is_some() {
        profile.intake_year = draft.intake_year;
    }
    if let Some(countries) = draft.preferred_countries {
        profile.preferred_countries = countries;
    }
    if draft.budget_per_year.is_some() {
        profile.budget_per_year = draft.budget_per_year;
    }
    if draft.funding_plan.is_some() {
        profile.funding_plan = draft.funding_plan;
    }
    if draft.ielts_status.is_some() {
        profile.ielts_status = draft.ielts_status;
    }
    if draft.gre_gmat_status.is_some() {
        profile.gre_gmat_status = draft.gre_gmat_status;
    }
    if draft.sop_status.is_some() {
        profile.sop_status = draft.sop_status;
    }
}

/// Error raised by the advising service, shaped to the domain taxonomy:
/// validation faults, domain misses, invariant violations, and upstream
/// unavailability.
#[derive(Debug, thiserror::Error)]
pub enum AdvisingServiceError {
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
