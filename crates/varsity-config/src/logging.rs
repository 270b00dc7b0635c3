use std::env;

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Level for the application's own targets (`LOG_LEVEL`, default: `info`).
    pub level: String,
    /// Directory for rolling log files (`LOG_DIR`, default: `storage/logs`).
    pub dir: String,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            dir: env::var("LOG_DIR").unwrap_or_else(|_| "storage/logs".to_string()),
        }
    }
}
