//! In-process document store implementing every repository port.
//!
//! Used when no database URL is configured and by integration tests. Each
//! collection sits behind its own mutex and every set mutation completes
//! under a single lock acquisition, matching the atomicity the Diesel
//! adapters get from guarded `UPDATE` statements.

mod category;
mod item;
mod list;
mod preferences;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::{Category, CategoryId, Item, ItemId, ListId, SharedList, Uid, UserPreferences};

/// Shared in-memory store.
///
/// Wrap it in an `Arc` and hand the same instance to every service that
/// needs one of the repository ports.
#[derive(Debug, Default)]
pub struct MemoryStore {
    categories: Mutex<HashMap<CategoryId, Category>>,
    lists: Mutex<HashMap<ListId, SharedList>>,
    items: Mutex<HashMap<ItemId, Item>>,
    preferences: Mutex<HashMap<Uid, UserPreferences>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Lock a collection, reporting poisoning as a plain message.
fn lock<T>(collection: &Mutex<T>) -> Result<MutexGuard<'_, T>, String> {
    collection
        .lock()
        .map_err(|_| "memory store lock poisoned".to_owned())
}

#[cfg(test)]
mod tests;
