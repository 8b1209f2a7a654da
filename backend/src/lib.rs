//! Listshare: a collaborative list-sharing backend.
//!
//! The [`domain`] holds entities, permission rules, and services; [`inbound`]
//! exposes them over HTTP; [`outbound`] provides PostgreSQL, in-memory, and
//! identity provider adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
