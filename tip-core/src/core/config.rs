use std::path::Path;

/// Application configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./tipview-data | working directory (database, logs) |
/// | DATABASE_PATH | {WORK_DIR}/tipview.db | SQLite document store file |
/// | HISTORY_LIMIT | 5 | records shown in the recent-payments line |
/// | LOG_LEVEL | info | tracing filter |
/// | LOG_DIR | (unset) | daily rolling log files when set |
/// | ENVIRONMENT | development | development / staging / production |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/tmp/tipview HISTORY_LIMIT=10 cargo test
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub work_dir: String,
    pub database_path: String,
    pub history_limit: usize,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// development | staging | production
    pub environment: String,
}

pub const DEFAULT_WORK_DIR: &str = "./tipview-data";
pub const DEFAULT_HISTORY_LIMIT: usize = 5;
const DATABASE_FILE: &str = "tipview.db";

impl Config {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| DEFAULT_WORK_DIR.into());
        let database_path = std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| default_database_path(&work_dir));

        Self {
            database_path,
            work_dir,
            history_limit: std::env::var("HISTORY_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_HISTORY_LIMIT),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Defaults rooted at `work_dir`, ignoring the environment
    ///
    /// Mostly for tests
    pub fn with_work_dir(work_dir: impl Into<String>) -> Self {
        let work_dir = work_dir.into();
        Self {
            database_path: default_database_path(&work_dir),
            work_dir,
            history_limit: DEFAULT_HISTORY_LIMIT,
            log_level: "info".into(),
            log_dir: None,
            environment: "development".into(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn default_database_path(work_dir: &str) -> String {
    Path::new(work_dir).join(DATABASE_FILE).to_string_lossy().into_owned()
}
