//! Identity-provider profiles and the enriched list projection.

use serde::{Deserialize, Serialize};

use super::{SharedList, Uid};

/// Public profile data resolved from the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub uid: Uid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl UserProfile {
    /// A profile carrying only the uid, used when enrichment is unavailable.
    ///
    /// # Examples
    /// ```
    /// use listshare::domain::{Uid, UserProfile};
    ///
    /// let profile = UserProfile::bare(Uid::new("u1").expect("uid"));
    /// assert!(profile.email.is_none());
    /// ```
    pub fn bare(uid: Uid) -> Self {
        Self {
            uid,
            email: None,
            display_name: None,
        }
    }
}

/// Principal established by a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedIdentity {
    pub uid: Uid,
    #[serde(default)]
    pub email: Option<String>,
}

/// A visible list with owner, collaborator, and category details resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    pub list: SharedList,
    /// `None` when the category no longer exists or could not be loaded.
    pub category_name: Option<String>,
    pub owner: UserProfile,
    pub collaborators: Vec<UserProfile>,
}
