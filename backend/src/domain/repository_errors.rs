//! Translate driven-port failures into domain errors.
//!
//! Connection failures become `ServiceUnavailable`; everything else the
//! caller cannot act on becomes `InternalError`.

use super::Error;
use super::ports::{
    CategoryRepositoryError, IdentityGatewayError, ItemRepositoryError, ListRepositoryError,
    UserPreferencesRepositoryError,
};

pub(crate) fn map_category_error(error: CategoryRepositoryError) -> Error {
    match error {
        CategoryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("category repository unavailable: {message}"))
        }
        CategoryRepositoryError::Query { message } => {
            Error::internal(format!("category repository error: {message}"))
        }
        CategoryRepositoryError::DuplicateName { name } => {
            Error::conflict(format!("a category named {name} already exists"))
        }
    }
}

pub(crate) fn map_list_error(error: ListRepositoryError) -> Error {
    match error {
        ListRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("list repository unavailable: {message}"))
        }
        ListRepositoryError::Query { message } => {
            Error::internal(format!("list repository error: {message}"))
        }
    }
}

pub(crate) fn map_item_error(error: ItemRepositoryError) -> Error {
    match error {
        ItemRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("item repository unavailable: {message}"))
        }
        ItemRepositoryError::Query { message } => {
            Error::internal(format!("item repository error: {message}"))
        }
    }
}

pub(crate) fn map_preferences_error(error: UserPreferencesRepositoryError) -> Error {
    match error {
        UserPreferencesRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("preferences repository unavailable: {message}"))
        }
        UserPreferencesRepositoryError::Query { message } => {
            Error::internal(format!("preferences repository error: {message}"))
        }
    }
}

/// Map identity failures on authoritative paths (token checks, email lookups).
pub(crate) fn map_identity_error(error: IdentityGatewayError) -> Error {
    match error {
        IdentityGatewayError::Unauthorized { message } => Error::unauthorized(message),
        IdentityGatewayError::NotFound { message } => Error::invalid_request(message),
        IdentityGatewayError::Unavailable { message } => {
            Error::service_unavailable(format!("identity provider unavailable: {message}"))
        }
        IdentityGatewayError::Protocol { message } => {
            Error::service_unavailable(format!("identity provider error: {message}"))
        }
    }
}
