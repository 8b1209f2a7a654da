//! Domain entities, permission rules, ports, and services.
//!
//! Purpose: hold every rule about categories, shared lists, items, and
//! preferences independent of transport and storage. Inbound adapters call
//! the driving ports in [`ports`]; outbound adapters implement the driven
//! ones.
//!
//! Public surface:
//! - Entities: [`Category`], [`SharedList`], [`Item`], [`UserPreferences`].
//! - Identity: [`Uid`], [`UserProfile`], [`VerifiedIdentity`].
//! - Rules: [`AccessPolicy`], [`is_visible_to`], [`apply_show_public`].
//! - Services: [`CategoryDirectoryService`], [`ListRegistryService`],
//!   [`ItemLedgerService`], [`VisibilityResolverService`],
//!   [`UserPreferencesService`].
//! - Errors: [`Error`] and [`ErrorCode`].

pub mod access;
pub mod category;
pub mod error;
pub mod ids;
pub mod item;
pub mod list;
pub mod ports;
pub mod preferences;
pub mod profile;
pub mod trace_id;
pub mod uid;
pub mod visibility;

mod category_service;
mod item_service;
mod list_service;
mod preferences_service;
mod repository_errors;
mod visibility_service;

pub use self::access::AccessPolicy;
pub use self::category::{
    Category, DEFAULT_SEED_CATEGORIES, FALLBACK_CATEGORY_NAME, SubCategoryTags, name_key,
};
pub use self::category_service::CategoryDirectoryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{CategoryId, ItemId, ListId};
pub use self::item::{
    DEFAULT_SUB_CATEGORY, Item, ItemPatch, ItemView, NewItem, normalise_sub_category,
};
pub use self::item_service::ItemLedgerService;
pub use self::list::{CategoryRef, CollaboratorRef, ListPatch, NewList, SharedList};
pub use self::list_service::ListRegistryService;
pub use self::preferences::UserPreferences;
pub use self::preferences_service::UserPreferencesService;
pub use self::profile::{ListView, UserProfile, VerifiedIdentity};
pub(crate) use self::repository_errors::map_identity_error;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::uid::{UID_MAX, Uid, UidSet, UidValidationError};
pub use self::visibility::{apply_show_public, is_visible_to};
pub use self::visibility_service::{DEFAULT_ENRICHMENT_TIMEOUT, VisibilityResolverService};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use listshare::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
