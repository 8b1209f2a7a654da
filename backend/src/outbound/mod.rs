//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: in-process document store for local runs and tests
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **identity**: HTTP client for the external identity provider
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod identity;
pub mod memory;
pub mod persistence;
