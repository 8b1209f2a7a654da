//! Per-user display preferences.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Uid;

/// Display preferences for one user.
///
/// `show_public` is advisory: consumers may hide public lists the user has no
/// relationship with. It never affects authorisation.
///
/// # Examples
/// ```
/// use listshare::domain::{Uid, UserPreferences};
///
/// let prefs = UserPreferences::new_default(Uid::new("alice").expect("uid"));
/// assert!(prefs.show_public);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    /// Owner of the preferences.
    pub uid: Uid,
    /// Whether unrelated public lists are shown.
    pub show_public: bool,
    /// Last change.
    pub updated_at: DateTime<Utc>,
}

impl UserPreferences {
    /// Preferences assigned to a user who never saved any.
    pub fn new_default(uid: Uid) -> Self {
        Self::new(uid, true)
    }

    /// Preferences with an explicit `show_public` flag.
    pub fn new(uid: Uid, show_public: bool) -> Self {
        Self {
            uid,
            show_public,
            updated_at: Utc::now(),
        }
    }
}
