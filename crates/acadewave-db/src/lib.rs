//! # Acadewave DB
//!
//! Account storage for the Acadewave API.
//!
//! The rest of the workspace talks to storage only through the
//! [`AccountDirectory`] trait. Two implementations ship here:
//!
//! - [`MemoryAccountDirectory`]: a lock-guarded map for tests and local runs
//! - [`PgAccountDirectory`]: PostgreSQL through SQLx, with uniqueness enforced
//!   by table constraints
//!
//! # Example
//!
//! ```ignore
//! use acadewave_db::{init_db_pool, run_migrations, PgAccountDirectory};
//!
//! let pool = init_db_pool(&database_url).await?;
//! run_migrations(&pool).await?;
//! let directory = PgAccountDirectory::new(pool);
//! ```

mod directory;
mod memory;
mod postgres;

pub use directory::{AccountDirectory, DirectoryError, DuplicateField};
pub use memory::MemoryAccountDirectory;
pub use postgres::PgAccountDirectory;

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Connects a PostgreSQL pool.
///
/// Call once during startup; the returned pool is cheaply cloneable.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    sqlx::PgPool::connect(database_url).await
}

/// Applies the bundled migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
