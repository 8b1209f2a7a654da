//! Driving port for updating user preferences.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Uid, UserPreferences};

/// Request to update user preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreferencesRequest {
    /// The user whose preferences are being updated.
    pub uid: Uid,
    /// Whether unrelated public lists are shown.
    pub show_public: bool,
}

/// Driving port for user preferences updates. Writes are last-write-wins.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserPreferencesCommand: Send + Sync {
    async fn update(&self, request: UpdatePreferencesRequest) -> Result<UserPreferences, Error>;
}
