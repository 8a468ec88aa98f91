use super::domain::{
    AdvisingStage, ShortlistEntry, Task, TaskId, University, UniversityId, UserId, UserProfile,
    UserState,
};

/// Read-only catalog abstraction the engine fetches candidates through.
pub trait UniversityDirectory: Send + Sync {
    /// Fetch candidates matching any of the given countries with tuition at
    /// or under `max_tuition`, sorted by rank ascending with unranked rows
    /// last. No matches is an empty vec, never an error.
    fn fetch_by_criteria(
        &self,
        countries: &[String],
        max_tuition: Option<u32>,
        limit: usize,
    ) -> Result<Vec<University>, DirectoryError>;

    /// Fetch explicit rows by identifier; unknown ids are skipped.
    fn fetch_by_ids(&self, ids: &[UniversityId]) -> Result<Vec<University>, DirectoryError>;
}

/// Failure of the candidate source. Timeouts surface through the same
/// variant so read paths can degrade uniformly to an empty pool.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("university directory unavailable: {0}")]
    Unavailable(String),
}

/// Storage abstraction for all per-user advising state.
///
/// Implementations must apply `lock_exclusive` and `release_lock` as single
/// atomic units so lock uniqueness and stage never diverge.
pub trait AdvisingStore: Send + Sync {
    fn fetch_profile(&self, user: UserId) -> Result<Option<UserProfile>, StoreError>;
    fn fetch_profile_by_email(&self, email: &str) -> Result<Option<UserProfile>, StoreError>;
    fn upsert_profile(&self, profile: UserProfile) -> Result<UserProfile, StoreError>;

    /// Get the user's pipeline state, creating it at the initial stage on
    /// first access.
    fn state(&self, user: UserId) -> Result<UserState, StoreError>;
    fn set_stage(&self, user: UserId, stage: AdvisingStage) -> Result<UserState, StoreError>;

    fn shortlist(&self, user: UserId) -> Result<Vec<ShortlistEntry>, StoreError>;
    fn upsert_shortlist_entry(&self, entry: ShortlistEntry) -> Result<ShortlistEntry, StoreError>;
    fn remove_shortlist_entry(
        &self,
        user: UserId,
        university: UniversityId,
    ) -> Result<(), StoreError>;
    fn locked_entry(&self, user: UserId) -> Result<Option<ShortlistEntry>, StoreError>;

    /// Unlock every entry, lock the given one, move the stage, and replace
    /// the task set — as one atomic unit.
    fn lock_exclusive(
        &self,
        user: UserId,
        university: UniversityId,
        stage: AdvisingStage,
        tasks: Vec<Task>,
    ) -> Result<ShortlistEntry, StoreError>;

    /// Release any lock, move the stage, and clear the task set — as one
    /// atomic unit.
    fn release_lock(&self, user: UserId, stage: AdvisingStage) -> Result<(), StoreError>;

    fn tasks(&self, user: UserId) -> Result<Vec<Task>, StoreError>;
    fn complete_task(&self, user: UserId, task: TaskId) -> Result<Task, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,
    #[error("record already exists")]
    Conflict,
    #[error("advising store unavailable: {0}")]
    Unavailable(String),
}
