use std::sync::Arc;

use varsity_config::{AppConfig, CorsConfig, PasswordConfig, StorageBackend};
use varsity_db::{init_db_pool, run_migrations};

use crate::modules::students::store::StudentStoreState;
use crate::modules::students::{MemoryStudentStore, PgStudentStore};

#[derive(Clone)]
pub struct AppState {
    pub students: StudentStoreState,
    pub password_config: PasswordConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(
        students: StudentStoreState,
        password_config: PasswordConfig,
        cors_config: CorsConfig,
    ) -> Self {
        Self {
            students,
            password_config,
            cors_config,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("students", &self.students.backend_name())
            .field("password_config", &self.password_config)
            .field("cors_config", &self.cors_config)
            .finish()
    }
}

/// Builds the state for the configured storage backend.
///
/// The postgres backend connects and applies pending migrations before
/// returning.
pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let students: StudentStoreState = match config.server.storage_backend {
        StorageBackend::Postgres => {
            let pool = init_db_pool(&config.database).await?;
            run_migrations(&pool).await?;
            Arc::new(PgStudentStore::new(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory student store; data is lost on restart");
            Arc::new(MemoryStudentStore::new())
        }
    };

    Ok(AppState::new(
        students,
        config.password,
        config.cors.clone(),
    ))
}
