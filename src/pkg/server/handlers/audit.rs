use axum::{
    extract::{Path as AxumPath, State},
    Json,
};

use crate::pkg::internal::adaptors::audit::spec::AuditEntry;
use crate::pkg::server::state::AppState;
use crate::prelude::Result;

/// `job_id` may be the literal `all` to fetch the whole trail.
pub async fn trail(
    State(state): State<AppState>,
    AxumPath(job_id): AxumPath<String>,
) -> Result<Json<Vec<AuditEntry>>> {
    Ok(Json(state.ops.audit_trail(&job_id).await?))
}
