//! tipview core: tip calculation and payment history
//!
//! # Overview
//!
//! - **Calculator** (`calculator`): exact decimal tip and total, optional
//!   round-up of the total, die-roll tip suggestion
//! - **History** (`history`): saves each payment as its own document and
//!   reads back the most recent ones
//! - **Store** (`db`): `DocumentStore` seam with in-memory and SQLite backends
//! - **Facade** (`core`): `TipService`, session-gated submit and recent flow
//!
//! # Layout
//!
//! ```text
//! tip-core/src/
//! ├── calculator/   # TipCalculator, Die
//! ├── core/         # Config, TipError, TipService
//! ├── db/           # DocumentStore, memory + SQLite
//! ├── history/      # PaymentHistoryService
//! └── utils/        # logger
//! ```

pub mod calculator;
pub mod core;
pub mod db;
pub mod history;
pub mod utils;

// Re-exports
pub use crate::calculator::{Die, DieRoll, InvalidInput, TipCalculator};
pub use crate::core::{Config, Submission, TipError, TipResult, TipService};
pub use crate::db::{DocumentStore, MemoryDocumentStore, SqliteDocumentStore, StoreError, StoreResult};
pub use crate::history::{PaymentHistoryService, RecentPayments, format_recent};
pub use crate::utils::logger::{init_logger, init_logger_with_file};

pub use shared::{PaymentRecord, PaymentResult, TipRate};

/// Load `.env`, create the working directory and start logging
pub fn setup_environment() -> std::io::Result<Config> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    std::fs::create_dir_all(&config.work_dir)?;
    if let Some(dir) = &config.log_dir {
        std::fs::create_dir_all(dir)?;
    }

    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    tracing::info!(
        work_dir = %config.work_dir,
        environment = %config.environment,
        "Environment ready"
    );
    Ok(config)
}
