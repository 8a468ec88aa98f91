use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use counsel_ai::workflows::advising::{
    AdvisingStage, AdvisingStore, Competitiveness, EngineConfig, ProfileDefaults, ShortlistEntry,
    StoreError, Task, TaskId, University, UniversityCatalog, UniversityId, UserId, UserProfile,
    UserState,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory advising store backing the service until an external
/// persistence adapter is wired in. Composite operations hold every map
/// lock for their full duration, which is what keeps lock uniqueness and
/// stage coherent.
#[derive(Default)]
pub(crate) struct InMemoryAdvisingStore {
    profiles: Mutex<HashMap<UserId, UserProfile>>,
    states: Mutex<HashMap<UserId, UserState>>,
    shortlists: Mutex<HashMap<UserId, Vec<ShortlistEntry>>>,
    tasks: Mutex<HashMap<UserId, Vec<Task>>>,
}

impl InMemoryAdvisingStore {
    fn initial_state(user: UserId) -> UserState {
        UserState {
            user_id: user,
            current_stage: AdvisingStage::Onboarding,
            updated_at: Utc::now(),
        }
    }
}

impl AdvisingStore for InMemoryAdvisingStore {
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
            .or_insert_with(|| Self::initial_state(user))
            .clone())
    }

    fn set_stage(&self, user: UserId, stage: AdvisingStage) -> Result<UserState, StoreError> {
        let mut guard = self.states.lock().expect("state mutex poisoned");
        let state = guard.entry(user).or_insert_with(|| Self::initial_state(user));
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

        let state = states.entry(user).or_insert_with(|| Self::initial_state(user));
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

        let state = states.entry(user).or_insert_with(|| Self::initial_state(user));
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

pub(crate) fn default_engine_config() -> EngineConfig {
    EngineConfig {
        tier_capacity: 5,
        pool_limit: 30,
        budget_stretch: 1.2,
        defaults: ProfileDefaults {
            countries: vec!["United States".to_string()],
            budget_per_year: 30_000,
            academic_score: 7.0,
        },
    }
}

/// Small built-in catalog for demos and local runs without a rankings CSV.
pub(crate) fn seeded_catalog() -> UniversityCatalog {
    let rows = [
        ("Massachusetts Institute of Technology", "United States", Some(1), 40_000),
        ("University of Oxford", "United Kingdom", Some(2), 30_000),
        ("Stanford University", "United States", Some(3), 40_000),
        ("University of Cambridge", "United Kingdom", Some(5), 30_000),
        ("University of Toronto", "Canada", Some(21), 25_000),
        ("Technical University of Munich", "Germany", Some(28), 2_000),
        ("University of Melbourne", "Australia", Some(37), 28_000),
        ("Carnegie Mellon University", "United States", Some(52), 40_000),
        ("University of Washington", "United States", Some(76), 38_000),
        ("University of Ottawa", "Canada", Some(240), 22_000),
        ("Arizona State University", "United States", Some(180), 32_000),
        ("Deakin University", "Australia", Some(320), 24_000),
        ("Wichita State University", "United States", None, 20_000),
    ];

    let universities = rows
        .iter()
        .enumerate()
        .map(|(index, (name, country, rank, tuition))| University {
            id: UniversityId(index as u32 + 1),
            name: (*name).to_string(),
            country: (*country).to_string(),
            rank: *rank,
            competitiveness: Competitiveness::from_rank(*rank),
            estimated_tuition_usd: *tuition,
        })
        .collect();

    UniversityCatalog::from_universities(universities)
}
