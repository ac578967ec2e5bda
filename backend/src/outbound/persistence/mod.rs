//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin translators between Diesel row structs and domain
//! types. Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module. Connections come from a `bb8` pool of
//! `diesel-async` connections.
//!
//! # Example
//!
//! ```no_run
//! use exercise_log::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn connect() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/exercise_log")).await?;
//! let repository = DieselUserRepository::new(pool);
//! # let _ = repository;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations, run_pending_migrations_async};
pub use pool::{DbPool, PoolConfig, PoolError};
