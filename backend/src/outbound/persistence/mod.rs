//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the document store ports backed by PostgreSQL
//! via Diesel with async support through `diesel-async` and `bb8` pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leave this module.
//! - **Atomic set updates**: collaborator, completion, and tag changes are
//!   single guarded `UPDATE` statements.
//!
//! # Example
//!
//! ```ignore
//! use listshare::outbound::persistence::{DbPool, DieselListRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/listshare")).await?;
//! let lists = DieselListRepository::new(pool);
//! ```

mod diesel_category_repository;
mod diesel_item_repository;
mod diesel_list_repository;
mod diesel_user_preferences_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_item_repository::DieselItemRepository;
pub use diesel_list_repository::DieselListRepository;
pub use diesel_user_preferences_repository::DieselUserPreferencesRepository;
pub use migrations::{MIGRATIONS, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
