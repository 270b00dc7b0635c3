//! # Varsity Config
//!
//! Configuration types for the Varsity API, loaded from environment variables:
//!
//! - [`database`]: PostgreSQL connection settings
//! - [`password`]: bcrypt cost factor for stored student passwords
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: Listen address and storage backend selection
//! - [`logging`]: Log level and log file directory
//!
//! # Example
//!
//! ```ignore
//! use varsity_config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env();
//! println!("listening on {}", config.server.socket_addr());
//! ```

pub mod cors;
pub mod database;
pub mod logging;
pub mod password;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use logging::LoggingConfig;
pub use password::PasswordConfig;
pub use server::{ServerConfig, StorageBackend};

/// All configuration sections, read once at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub password: PasswordConfig,
    pub cors: CorsConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            database: DatabaseConfig::from_env(),
            password: PasswordConfig::from_env(),
            cors: CorsConfig::from_env(),
            server: ServerConfig::from_env(),
            logging: LoggingConfig::from_env(),
        }
    }
}
