use anyhow::Context;
use tracing::instrument;
use varsity_config::PasswordConfig;
use varsity_core::{AppError, hash_password_with_cost};

use super::model::{CreateStudentPayload, Student, StudentQuery, UpdateAck, validate_student};
use super::store::{StudentStore, duplicate_id};

pub struct StudentService;

impl StudentService {
    #[instrument(skip(store))]
    pub async fn get_all_students(store: &dyn StudentStore) -> Result<Vec<Student>, AppError> {
        store.find(&StudentQuery::active()).await
    }

    /// `None` when no active student has `id`.
    #[instrument(skip(store))]
    pub async fn get_single_student(
        store: &dyn StudentStore,
        id: &str,
    ) -> Result<Option<Student>, AppError> {
        store.find_one(&StudentQuery::active().with_id(id)).await
    }

    #[instrument(skip(store))]
    pub async fn delete_student(store: &dyn StudentStore, id: &str) -> Result<UpdateAck, AppError> {
        store.soft_delete(id).await
    }

    /// Validates, rejects a taken id, hashes the password and inserts.
    ///
    /// Returns the created student as any later read would see it.
    #[instrument(skip(store, password_config, payload))]
    pub async fn create_student(
        store: &dyn StudentStore,
        password_config: &PasswordConfig,
        payload: CreateStudentPayload,
    ) -> Result<Student, AppError> {
        let student = validate_student(payload).map_err(|failure| {
            tracing::debug!(errors = %failure, "Student payload rejected");
            AppError::validation(failure.errors)
        })?;

        let id = student.profile.id.clone();
        if store.exists(&id).await? {
            return Err(duplicate_id(&id));
        }

        let cost = password_config.salt_rounds;
        let plaintext = student.password.clone();
        let password_hash =
            tokio::task::spawn_blocking(move || hash_password_with_cost(&plaintext, cost))
                .await
                .context("Password hashing task failed")
                .map_err(AppError::internal)??;

        let stored = store.insert(student.into_record(password_hash)).await?;
        tracing::info!(student_id = %stored.id, "Student created");

        store
            .find_one(&StudentQuery::active().with_id(&stored.id))
            .await?
            .ok_or_else(|| AppError::internal(anyhow::anyhow!("Created student could not be read back")))
    }
}
