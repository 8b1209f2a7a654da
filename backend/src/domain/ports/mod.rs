//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, identity gateway) are implemented by
//! `crate::outbound`; driving ports are implemented by domain services and
//! consumed by `crate::inbound`.

mod macros;
pub(crate) use macros::define_port_error;

mod category_directory;
mod category_repository;
mod identity_gateway;
mod item_ledger;
mod item_repository;
mod list_registry;
mod list_repository;
mod lists_query;
mod user_preferences_command;
mod user_preferences_query;
mod user_preferences_repository;

pub use category_directory::CategoryDirectory;
#[cfg(test)]
pub use category_directory::MockCategoryDirectory;
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::{CategoryRepository, CategoryRepositoryError};
#[cfg(test)]
pub use identity_gateway::MockIdentityGateway;
pub use identity_gateway::{FixtureIdentityGateway, IdentityGateway, IdentityGatewayError};
pub use item_ledger::ItemLedger;
#[cfg(test)]
pub use item_ledger::MockItemLedger;
#[cfg(test)]
pub use item_repository::MockItemRepository;
pub use item_repository::{ItemRepository, ItemRepositoryError};
pub use list_registry::ListRegistry;
#[cfg(test)]
pub use list_registry::MockListRegistry;
#[cfg(test)]
pub use list_repository::MockListRepository;
pub use list_repository::{ListRepository, ListRepositoryError};
pub use lists_query::ListsQuery;
#[cfg(test)]
pub use lists_query::MockListsQuery;
#[cfg(test)]
pub use user_preferences_command::MockUserPreferencesCommand;
pub use user_preferences_command::{UpdatePreferencesRequest, UserPreferencesCommand};
#[cfg(test)]
pub use user_preferences_query::MockUserPreferencesQuery;
pub use user_preferences_query::{FixtureUserPreferencesQuery, UserPreferencesQuery};
#[cfg(test)]
pub use user_preferences_repository::MockUserPreferencesRepository;
pub use user_preferences_repository::{
    FixtureUserPreferencesRepository, UserPreferencesRepository, UserPreferencesRepositoryError,
};
