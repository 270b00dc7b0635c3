//! Persistence seam for student records.
//!
//! The service only ever talks to a `dyn StudentStore`, shared through
//! [`AppState`](crate::state::AppState). Reads return the populated
//! [`Student`] view; [`StudentStore::find_raw`] is the single unscoped,
//! unpopulated read and exists so callers can inspect what was actually
//! persisted.

use std::sync::Arc;

use async_trait::async_trait;
use varsity_core::{AppError, FieldError};

use super::model::{NewStudentRecord, StoredStudent, Student, StudentQuery, UpdateAck};

#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Short name for logs and the health endpoint.
    fn backend_name(&self) -> &'static str;

    /// Every student the query admits, populated, oldest first.
    async fn find(&self, query: &StudentQuery) -> Result<Vec<Student>, AppError>;

    async fn find_one(&self, query: &StudentQuery) -> Result<Option<Student>, AppError>;

    /// The stored row for `id`, deleted or not, with the password hash.
    async fn find_raw(&self, id: &str) -> Result<Option<StoredStudent>, AppError>;

    /// Whether an active student with `id` exists.
    async fn exists(&self, id: &str) -> Result<bool, AppError>;

    /// Persists an already hashed record.
    ///
    /// Fails with a conflict when the id, email or user is taken (by any row,
    /// including soft-deleted ones) and with a bad request when a referenced
    /// semester or department does not exist.
    async fn insert(&self, record: NewStudentRecord) -> Result<StoredStudent, AppError>;

    /// Flags the student as deleted. Never removes the row.
    async fn soft_delete(&self, id: &str) -> Result<UpdateAck, AppError>;

    /// Total number of stored rows, deleted ones included.
    async fn count_all(&self) -> Result<i64, AppError>;
}

pub type StudentStoreState = Arc<dyn StudentStore>;

pub(crate) fn duplicate_id(id: &str) -> AppError {
    AppError::conflict(anyhow::anyhow!("Student with id '{}' already exists", id))
}

pub(crate) fn duplicate_email(email: &str) -> AppError {
    AppError::conflict(anyhow::anyhow!(
        "Student with email '{}' already exists",
        email
    ))
}

pub(crate) fn duplicate_user() -> AppError {
    AppError::conflict(anyhow::anyhow!(
        "User is already linked to another student"
    ))
}

pub(crate) fn unknown_semester() -> AppError {
    AppError::bad_request(anyhow::anyhow!("Academic semester not found")).with_details(vec![
        FieldError::new("admissionSemester", "Referenced academic semester does not exist"),
    ])
}

pub(crate) fn unknown_department() -> AppError {
    AppError::bad_request(anyhow::anyhow!("Academic department not found")).with_details(vec![
        FieldError::new(
            "academicDepartment",
            "Referenced academic department does not exist",
        ),
    ])
}
