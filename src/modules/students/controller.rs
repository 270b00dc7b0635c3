use axum::extract::{Path, State};
use tracing::instrument;
use varsity_core::{ApiResponse, AppError, ErrorResponse};

use crate::modules::students::model::{CreateStudentPayload, Student, UpdateAck};
use crate::modules::students::service::StudentService;
use crate::state::AppState;
use crate::validator::JsonBody;

#[utoipa::path(
    get,
    path = "/api/v1/students",
    responses(
        (status = 200, description = "Students are retrieved successfully", body = ApiResponse<Vec<Student>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_all_students(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Student>>, AppError> {
    let students = StudentService::get_all_students(state.students.as_ref()).await?;
    Ok(ApiResponse::ok("Students are retrieved successfully", students))
}

#[utoipa::path(
    get,
    path = "/api/v1/students/{student_id}",
    params(
        ("student_id" = String, Path, description = "External student id")
    ),
    responses(
        (status = 200, description = "Student is retrieved successfully; data is null when no active student has this id", body = ApiResponse<Option<Student>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn get_single_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<ApiResponse<Option<Student>>, AppError> {
    let student = StudentService::get_single_student(state.students.as_ref(), &student_id).await?;
    Ok(ApiResponse::ok("Student is retrieved successfully", student))
}

#[utoipa::path(
    delete,
    path = "/api/v1/students/{student_id}",
    params(
        ("student_id" = String, Path, description = "External student id")
    ),
    responses(
        (status = 200, description = "Student is deleted successfully", body = ApiResponse<UpdateAck>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<ApiResponse<UpdateAck>, AppError> {
    let ack = StudentService::delete_student(state.students.as_ref(), &student_id).await?;
    Ok(ApiResponse::ok("Student is deleted successfully", ack))
}

#[utoipa::path(
    post,
    path = "/api/v1/students",
    request_body = CreateStudentPayload,
    responses(
        (status = 200, description = "Student is created successfully", body = ApiResponse<Student>),
        (status = 400, description = "Malformed body or unknown semester/department", body = ErrorResponse),
        (status = 409, description = "Student id or email already taken", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Students"
)]
#[instrument(skip(state, payload))]
pub async fn create_student(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateStudentPayload>,
) -> Result<ApiResponse<Student>, AppError> {
    let student = StudentService::create_student(
        state.students.as_ref(),
        &state.password_config,
        payload,
    )
    .await?;
    Ok(ApiResponse::ok("Student is created successfully", student))
}
