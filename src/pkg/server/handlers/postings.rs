use axum::{
    extract::{Path as AxumPath, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::pkg::internal::adaptors::postings::spec::{JobPosting, SalaryRange, Status};
use crate::pkg::server::state::AppState;
use crate::prelude::Result;

/// Placeholder attribution until authenticated identities exist. The actor is
/// always threaded through as an explicit parameter so wiring in real auth is
/// a handler-only change.
pub const DEFAULT_ACTOR: &str = "Current User";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostingInput {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub job_type: Vec<String>,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub job_level: String,
    #[serde(default)]
    pub salary_range: SalaryRange,
    #[serde(default)]
    pub technical_skills: Vec<String>,
    #[serde(default)]
    pub languages_required: Vec<String>,
    pub application_deadline: DateTime<Utc>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub is_draft: bool,
    #[serde(default)]
    pub recruiter: Option<String>,
}

impl PostingInput {
    fn actor(&self) -> &str {
        self.recruiter.as_deref().unwrap_or(DEFAULT_ACTOR)
    }
}

#[derive(Deserialize)]
pub struct ChangeStatusInput {
    pub status: String,
    #[serde(default)]
    pub recruiter: Option<String>,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<JobPosting>>> {
    Ok(Json(state.ops.list().await?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<PostingInput>,
) -> Result<Json<JobPosting>> {
    let posting = state
        .ops
        .create(&input, input.is_draft, input.actor())
        .await?;
    Ok(Json(posting))
}

pub async fn update(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(input): Json<PostingInput>,
) -> Result<Json<JobPosting>> {
    let posting = state
        .ops
        .edit(&id, &input, input.is_draft, input.actor())
        .await?;
    Ok(Json(posting))
}

pub async fn remove(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<Value>> {
    state.ops.delete(&id, DEFAULT_ACTOR).await?;
    Ok(Json(json!({ "message": "Job posting deleted" })))
}

pub async fn duplicate(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<Json<JobPosting>> {
    let posting = state.ops.duplicate(&id, DEFAULT_ACTOR).await?;
    Ok(Json(posting))
}

pub async fn change_status(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
    Json(input): Json<ChangeStatusInput>,
) -> Result<Json<JobPosting>> {
    let actor = input.recruiter.as_deref().unwrap_or(DEFAULT_ACTOR);
    let posting = state.ops.change_status(&id, &input.status, actor).await?;
    Ok(Json(posting))
}
