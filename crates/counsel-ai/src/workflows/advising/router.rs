use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{RiskTier, ShortlistEntry, Task, TaskId, UniversityId, UserId};
use super::repository::{AdvisingStore, StoreError, UniversityDirectory};
use super::service::{AdvisingService, AdvisingServiceError, ProfileDraft};

/// Router builder exposing the advising pipeline over HTTP.
pub fn advising_router<D, S>(service: Arc<AdvisingService<D, S>>) -> Router
where
    D: UniversityDirectory + 'static,
    S: AdvisingStore + 'static,
{
    Router::new()
        .route("/api/v1/advising/profiles", post(upsert_profile::<D, S>))
        .route(
            "/api/v1/advising/users/:user_id/complete",
            post(complete_profile::<D, S>),
        )
        .route(
            "/api/v1/advising/users/:user_id/state",
            get(current_state::<D, S>),
        )
        .route(
            "/api/v1/advising/users/:user_id/recommendations",
            get(recommendations::<D, S>),
        )
        .route(
            "/api/v1/advising/users/:user_id/strength",
            get(strength::<D, S>),
        )
        .route(
            "/api/v1/advising/users/:user_id/shortlist",
            get(shortlist::<D, S>).post(add_to_shortlist::<D, S>),
        )
        .route(
            "/api/v1/advising/users/:user_id/shortlist/:university_id",
            delete(remove_from_shortlist::<D, S>),
        )
        .route("/api/v1/advising/users/:user_id/lock", post(lock::<D, S>))
        .route(
            "/api/v1/advising/users/:user_id/unlock",
            post(unlock::<D, S>),
        )
        .route("/api/v1/advising/users/:user_id/tasks", get(tasks::<D, S>))
        .route(
            "/api/v1/advising/users/:user_id/tasks/:task_id/complete",
            post(complete_task::<D, S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShortlistRequest {
    pub(crate) university_id: u32,
    #[serde(default)]
    pub(crate) tier: Option<RiskTier>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LockRequest {
    pub(crate) university_id: u32,
}

pub(crate) async fn upsert_profile<D, S>(
    State(service): State<Arc<AdvisingService<D, S>>>,
    axum::Json(draft): axum::Json<ProfileDraft>,
) -> Response
where
    D: UniversityDirectory + 'static,
    S: AdvisingStore + 'static,
{
    match service.upsert_profile(draft) {
        Ok(profile) => {
            let payload = json!({
                "user_id": profile.id,
                "email": profile.email,
                "name": profile.name,
                "profile_complete": profile.profile_complete,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn complete_profile<D, S>(
    State(service): State<Arc<AdvisingService<D, S>>>,
    Path(user_id): Path<u64>,
) -> Response
where
    D: UniversityDirectory + 'static,
    S: AdvisingStore + 'static,
{
    let user = UserId(user_id);
    let profile = match service.complete_profile(user) {
        Ok(profile) => profile,
        Err(error) => return error_response(error),
    };
    let state = match service.current_state(user) {
        Ok(state) => state,
        Err(error) => return error_response(error),
    };
    let payload = json!({
        "user_id": profile.id,
        "profile_complete": profile.profile_complete,
        "current_stage": state.current_stage.label(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn current_state<D, S>(
    State(service): State<Arc<AdvisingService<D, S>>>,
    Path(user_id): Path<u64>,
) -> Response
where
    D: UniversityDirectory + 'static,
    S: AdvisingStore + 'static,
{
    match service.current_state(UserId(user_id)) {
        Ok(state) => {
            let payload = json!({
                "user_id": state.user_id,
                "current_stage": state.current_stage.label(),
                "updated_at": state.updated_at,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recommendations<D, S>(
    State(service): State<Arc<AdvisingService<D, S>>>,
    Path(user_id): Path<u64>,
) -> Response
where
    D: UniversityDirectory + 'static,
    S: AdvisingStore + 'static,
{
    match service.recommendations(UserId(user_id)) {
        Ok(tiers) => (StatusCode::OK, axum::Json(tiers)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn strength<D, S>(
    State(service): State<Arc<AdvisingService<D, S>>>,
    Path(user_id): Path<u64>,
) -> Response
where
    D: UniversityDirectory + 'static,
    S: AdvisingStore + 'static,
{
    match service.profile_strength(UserId(user_id)) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn shortlist<D, S>(
    State(service): State<Arc<AdvisingService<D, S>>>,
    Path(user_id): Path<u64>,
) -> Response
where
    D: UniversityDirectory + 'static,
    S: AdvisingStore + 'static,
{
    match service.shortlist(UserId(user_id)) {
        Ok(entries) => {
            let views: Vec<_> = entries.iter().map(shortlist_view).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn add_to_shortlist<D, S>(
    State(service): State<Arc<AdvisingService<D, S>>>,
    Path(user_id): Path<u64>,
    axum::Json(request): axum::Json<ShortlistRequest>,
) -> Response
where
    D: UniversityDirectory + 'static,
    S: AdvisingStore + 'static,
{
    match service.add_to_shortlist(
        UserId(user_id),
        UniversityId(request.university_id),
        request.tier,
    ) {
        Ok(entry) => (StatusCode::CREATED, axum::Json(shortlist_view(&entry))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn remove_from_shortlist<D, S>(
    State(service): State<Arc<AdvisingService<D, S>>>,
    Path((user_id, university_id)): Path<(u64, u32)>,
) -> Response
where
    D: UniversityDirectory + 'static,
    S: AdvisingStore + 'static,
{
    match service.remove_from_shortlist(UserId(user_id), UniversityId(university_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn lock<D, S>(
    State(service): State<Arc<AdvisingService<D, S>>>,
    Path(user_id): Path<u64>,
    axum::Json(request): axum::Json<LockRequest>,
) -> Response
where
    D: UniversityDirectory + 'static,
    S: AdvisingStore + 'static,
{
    match service.lock_university(UserId(user_id), UniversityId(request.university_id)) {
        Ok(entry) => (StatusCode::OK, axum::Json(shortlist_view(&entry))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn unlock<D, S>(
    State(service): State<Arc<AdvisingService<D, S>>>,
    Path(user_id): Path<u64>,
) -> Response
where
    D: UniversityDirectory + 'static,
    S: AdvisingStore + 'static,
{
    match service.unlock_university(UserId(user_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn tasks<D, S>(
    State(service): State<Arc<AdvisingService<D, S>>>,
    Path(user_id): Path<u64>,
) -> Response
where
    D: UniversityDirectory + 'static,
    S: AdvisingStore + 'static,
{
    match service.tasks(UserId(user_id)) {
        Ok(tasks) => {
            let views: Vec<_> = tasks.iter().map(task_view).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn complete_task<D, S>(
    State(service): State<Arc<AdvisingService<D, S>>>,
    Path((user_id, task_id)): Path<(u64, u64)>,
) -> Response
where
    D: UniversityDirectory + 'static,
    S: AdvisingStore + 'static,
{
    match service.complete_task(UserId(user_id), TaskId(task_id)) {
        Ok(task) => (StatusCode::OK, axum::Json(task_view(&task))).into_response(),
        Err(error) => error_response(error),
    }
}

fn shortlist_view(entry: &ShortlistEntry) -> serde_json::Value {
    json!({
        "university_id": entry.university_id,
        "tier": entry.tier.label(),
        "locked": entry.locked,
    })
}

fn task_view(task: &Task) -> serde_json::Value {
    json!({
        "id": task.id,
        "title": task.title,
        "description": task.description,
        "stage": task.stage.label(),
        "university_id": task.university_id,
        "completed": task.completed,
    })
}

/// Map service failures onto HTTP statuses: client faults for validation
/// and invariant violations, 404 for misses, 503 for upstream outages.
fn error_response(error: AdvisingServiceError) -> Response {
    let status = match &error {
        AdvisingServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AdvisingServiceError::NotFound(_) | AdvisingServiceError::Store(StoreError::NotFound) => {
            StatusCode::NOT_FOUND
        }
        AdvisingServiceError::Invariant(_) | AdvisingServiceError::Store(StoreError::Conflict) => {
            StatusCode::CONFLICT
        }
        AdvisingServiceError::Store(StoreError::Unavailable(_))
        | AdvisingServiceError::Directory(_) => StatusCode::SERVICE_UNAVAILABLE,
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
