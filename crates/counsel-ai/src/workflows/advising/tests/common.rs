use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::workflows::advising::catalog::UniversityCatalog;
use crate::workflows::advising::domain::{
    AdvisingStage, Competitiveness, ShortlistEntry, Task, TaskId, University, UniversityId, UserId,
    UserProfile, UserState,
};
use crate::workflows::advising::recommendation::{EngineConfig, RecommendationEngine};
use crate::workflows::advising::repository::{
    AdvisingStore, DirectoryError, StoreError, UniversityDirectory,
};
use crate::workflows::advising::service::{AdvisingService, ProfileDraft};

pub(super) fn university(id: u32, rank: Option<u32>, country: &str, tuition: u32) -> University {
    University {
        id: UniversityId(id),
        name: format!("University {id}"),
        country: country.to_string(),
        rank,
        competitiveness: Competitiveness::from_rank(rank),
        estimated_tuition_usd: tuition,
    }
}

/// Mixed catalog spanning the three tiers in the United States plus a few
/// rows elsewhere, tuition within a 40k budget's stretch band.
pub(super) fn seeded_catalog() -> UniversityCatalog {
    UniversityCatalog::from_universities(vec![
        university(1, Some(10), "United States", 42_000),
        university(2, Some(30), "United States", 38_000),
        university(3, Some(60), "United States", 30_000),
        university(4, Some(90), "United States", 26_000),
        university(5, Some(150), "United States", 22_000),
        university(6, Some(400), "United States", 18_000),
        university(7, None, "United States", 15_000),
        university(8, Some(20), "United Kingdom", 30_000),
        university(9, Some(120), "Canada", 25_000),
    ])
}

pub(super) fn complete_draft(email: &str) -> ProfileDraft {
    ProfileDraft {
        email: email.to_string(),
        name: Some("Asha Rao".to_string()),
        degree: Some("BTech".to_string()),
        graduation_year: Some(2024),
        gpa: Some(9.0),
        field_of_study: Some("Computer Science".to_string()),
        preferred_countries: Some(vec!["USA".to_string()]),
        budget_per_year: Some(40_000),
        funding_plan: Some("education loan".to_string()),
        ielts_status: Some("completed".to_string()),
        gre_gmat_status: Some("completed".to_string()),
        sop_status: Some("draft".to_string()),
        ..ProfileDraft::default()
    }
}

/// Fully-populated profile record for the pure evaluators.
pub(super) fn full_profile() -> UserProfile {
    UserProfile {
        id: UserId(9_001),
        email: "asha@example.com".to_string(),
        name: Some("Asha Rao".to_string()),
        education_level: Some("Undergraduate".to_string()),
        degree: Some("MS".to_string()),
        graduation_year: Some(2024),
        gpa: Some(9.2),
        intended_degree: Some("MS".to_string()),
        field_of_study: Some("Computer Science".to_string()),
        intake_year: Some(2026),
        preferred_countries: vec!["USA".to_string()],
        budget_per_year: Some(40_000),
        funding_plan: Some("loan".to_string()),
        ielts_status: Some("completed".to_string()),
        gre_gmat_status: Some("done".to_string()),
        sop_status: Some("ready".to_string()),
        profile_complete: true,
        created_at: Utc::now(),
    }
}

pub(super) fn engine() -> RecommendationEngine {
    RecommendationEngine::new(EngineConfig::default())
}

pub(super) fn build_service() -> (
    AdvisingService<UniversityCatalog, MemoryStore>,
    Arc<MemoryStore>,
) {
    let directory = Arc::new(seeded_catalog());
    let store = Arc::new(MemoryStore::default());
    let service = AdvisingService::new(directory, store.clone(), engine());
    (service, store)
}

/// Upsert and final-submit a profile, returning the assigned user id.
pub(super) fn onboarded_user(
    service: &AdvisingService<UniversityCatalog, MemoryStore>,
    email: &str,
) -> UserId {
    let profile = service
        .upsert_profile(complete_draft(email))
        .expect("profile upsert succeeds");
    service
        .complete_profile(profile.id)
        .expect("profile completion succeeds");
    profile.id
}

#[derive(Default)]
pub(super) struct MemoryStore {
    profiles: Mutex<HashMap<UserId, UserProfile>>,
    states: Mutex<HashMap<UserId, UserState>>,
    shortlists: Mutex<HashMap<UserId, Vec<ShortlistEntry>>>,
    tasks: Mutex<HashMap<UserId, Vec<Task>>>,
}

impl AdvisingStore for MemoryStore {
    fn fetch_profile(&self, user: UserId) -> Result<Option<UserProfile>, StoreError> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        Ok(guard.get(&user).cloned())
    }

    fn fetch_profile_by_email(&self, email: &str) -> Result<Option<UserProfile>, StoreError> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        Ok(guard.values().find(|profile| profile.email == email).cloned())
    }

    fn upsert_profile(&self, profile: UserProfile) -> Result<UserProfile, StoreError> {
        let mut guard = self.profiles.lock().expect("profile mutex poisoned");
        guard.insert(profile.id, profile.clone());
        Ok(profile)
    }

    fn state(&self, user: UserId) -> Result<UserState, StoreError> {
        let mut guard = self.states.lock().expect("state mutex poisoned");
        Ok(guard
            .entry(user)
            .or_insert_with(|| UserState {
                user_id: user,
                current_stage: AdvisingStage::Onboarding,
                updated_at: Utc::now(),
            })
            .clone())
    }

    fn set_stage(&self, user: UserId, stage: AdvisingStage) -> Result<UserState, StoreError> {
        let mut guard = self.states.lock().expect("state mutex poisoned");
        let state = guard.entry(user).or_insert_with(|| UserState {
            user_id: user,
            current_stage: AdvisingStage::Onboarding,
            updated_at: Utc::now(),
        });
        state.current_stage = stage;
        state.updated_at = Utc::now();
        Ok(state.clone())
    }

    fn shortlist(&self, user: UserId) -> Result<Vec<ShortlistEntry>, StoreError> {
        let guard = self.shortlists.lock().expect("shortlist mutex poisoned");
        Ok(guard.get(&user).cloned().unwrap_or_default())
    }

    fn upsert_shortlist_entry(&self, entry: ShortlistEntry) -> Result<ShortlistEntry, StoreError> {
        let mut guard = self.shortlists.lock().expect("shortlist mutex poisoned");
        let entries = guard.entry(entry.user_id).or_default();
        match entries
            .iter_mut()
            .find(|existing| existing.university_id == entry.university_id)
        {
            Some(existing) => *existing = entry.clone(),
            None => entries.push(entry.clone()),
        }
        Ok(entry)
    }

    fn remove_shortlist_entry(
        &self,
        user: UserId,
        university: UniversityId,
    ) -> Result<(), StoreError> {
        let mut guard = self.shortlists.lock().expect("shortlist mutex poisoned");
        let entries = guard.entry(user).or_default();
        let before = entries.len();
        entries.retain(|entry| entry.university_id != university);
        if entries.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    fn locked_entry(&self, user: UserId) -> Result<Option<ShortlistEntry>, StoreError> {
        let guard = self.shortlists.lock().expect("shortlist mutex poisoned");
        Ok(guard
            .get(&user)
            .and_then(|entries| entries.iter().find(|entry| entry.locked).cloned()))
    }

    fn lock_exclusive(
        &self,
        user: UserId,
        university: UniversityId,
        stage: AdvisingStage,
        tasks: Vec<Task>,
    ) -> Result<ShortlistEntry, StoreError> {
        let mut shortlists = self.shortlists.lock().expect("shortlist mutex poisoned");
        let mut states = self.states.lock().expect("state mutex poisoned");
        let mut task_sets = self.tasks.lock().expect("task mutex poisoned");

        let entries = shortlists.entry(user).or_default();
        for entry in entries.iter_mut() {
            entry.locked = false;
        }
        let target = entries
            .iter_mut()
            .find(|entry| entry.university_id == university)
            .ok_or(StoreError::NotFound)?;
        target.locked = true;
        let locked = target.clone();

        let state = states.entry(user).or_insert_with(|| UserState {
            user_id: user,
            current_stage: AdvisingStage::Onboarding,
            updated_at: Utc::now(),
        });
        state.current_stage = stage;
        state.updated_at = Utc::now();

        task_sets.insert(user, tasks);

        Ok(locked)
    }

    fn release_lock(&self, user: UserId, stage: AdvisingStage) -> Result<(), StoreError> {
        let mut shortlists = self.shortlists.lock().expect("shortlist mutex poisoned");
        let mut states = self.states.lock().expect("state mutex poisoned");
        let mut task_sets = self.tasks.lock().expect("task mutex poisoned");

        if let Some(entries) = shortlists.get_mut(&user) {
            for entry in entries.iter_mut() {
                entry.locked = false;
            }
        }

        let state = states.entry(user).or_insert_with(|| UserState {
            user_id: user,
            current_stage: AdvisingStage::Onboarding,
            updated_at: Utc::now(),
        });
        state.current_stage = stage;
        state.updated_at = Utc::now();

        task_sets.remove(&user);

        Ok(())
    }

    fn tasks(&self, user: UserId) -> Result<Vec<Task>, StoreError> {
        let guard = self.tasks.lock().expect("task mutex poisoned");
        Ok(guard.get(&user).cloned().unwrap_or_default())
    }

    fn complete_task(&self, user: UserId, task: TaskId) -> Result<Task, StoreError> {
        let mut guard = self.tasks.lock().expect("task mutex poisoned");
        let tasks = guard.get_mut(&user).ok_or(StoreError::NotFound)?;
        let task = tasks
            .iter_mut()
            .find(|candidate| candidate.id == task)
            .ok_or(StoreError::NotFound)?;
        task.completed = true;
        Ok(task.clone())
    }
}

/// Directory stand-in for an upstream outage.
pub(super) struct UnavailableDirectory;

impl UniversityDirectory for UnavailableDirectory {
    fn fetch_by_criteria(
        &self,
        _countries: &[String],
        _max_tuition: Option<u32>,
        _limit: usize,
    ) -> Result<Vec<University>, DirectoryError> {
        Err(DirectoryError::Unavailable("catalog offline".to_string()))
    }

    fn fetch_by_ids(&self, _ids: &[UniversityId]) -> Result<Vec<University>, DirectoryError> {
        Err(DirectoryError::Unavailable("catalog offline".to_string()))
    }
}
