//! HTTP inbound adapter exposing REST endpoints under `/api/v1`.

pub mod auth;
pub mod categories;
pub mod error;
pub mod health;
pub mod items;
pub mod lists;
pub mod preferences;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
