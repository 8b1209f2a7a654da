//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::header::AUTHORIZATION;

use crate::domain::ports::FixtureIdentityGateway;
use crate::domain::{AccessPolicy, Uid};
use crate::inbound::http::state::{HttpState, ServiceSettings, StorePorts};
use crate::outbound::memory::MemoryStore;

/// Uid granted the administrator role in handler tests.
pub const TEST_ADMIN: &str = "admin";

/// Build a uid for tests.
pub fn uid(raw: &str) -> Uid {
    Uid::new(raw).expect("valid test uid")
}

/// Compose handler state over a fresh in-memory store.
pub fn state_with_identity(gateway: FixtureIdentityGateway) -> HttpState {
    let store = Arc::new(MemoryStore::new());
    HttpState::compose(
        StorePorts {
            categories: Arc::clone(&store),
            lists: Arc::clone(&store),
            items: Arc::clone(&store),
            preferences: store,
        },
        Arc::new(gateway),
        ServiceSettings::new(AccessPolicy::new(uid(TEST_ADMIN))),
    )
}

/// State whose fixture gateway accepts any syntactically valid uid as a token.
pub fn permissive_state() -> HttpState {
    state_with_identity(FixtureIdentityGateway::permissive())
}

/// An `Authorization` header carrying the fixture token for `raw_uid`.
pub fn bearer(raw_uid: &str) -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {raw_uid}"))
}
