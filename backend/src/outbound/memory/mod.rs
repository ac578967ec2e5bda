//! Process-local storage adapters.
//!
//! Used when no database URL is configured, and by tests that drive the full
//! HTTP stack without PostgreSQL.

mod in_memory_user_repository;

pub use in_memory_user_repository::InMemoryUserRepository;
