use axum::{Router, extract::State, routing::get};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;
use varsity_core::{ApiResponse, AppError, ErrorResponse};

use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    /// `postgres` or `memory`.
    pub storage: String,
    pub student_count: i64,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and storage are reachable", body = ApiResponse<HealthStatus>),
        (status = 500, description = "Storage is unreachable", body = ErrorResponse)
    ),
    tag = "Health"
)]
#[instrument(skip(state))]
pub async fn health(State(state): State<AppState>) -> Result<ApiResponse<HealthStatus>, AppError> {
    let student_count = state.students.count_all().await?;

    Ok(ApiResponse::ok(
        "Service is healthy",
        HealthStatus {
            status: "ok".to_string(),
            storage: state.students.backend_name().to_string(),
            student_count,
        },
    ))
}

pub fn init_health_router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
