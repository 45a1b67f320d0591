//! Database layer: pool, schema, seed data and the repository.

pub mod pool;
pub mod repository;
pub mod seed;

pub use pool::{create_pool, run_migrations, DEFAULT_MAX_CONNECTIONS};
pub use repository::{SqliteRepository, StoreError, StoreResult, TriviaRepository};
pub use seed::seed;
