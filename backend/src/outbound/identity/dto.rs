//! Wire DTOs for the identity provider's JSON API.
//!
//! Responses decode into these transport types first and are then mapped
//! into domain values in one pass.

use serde::{Deserialize, Serialize};

use crate::domain::{Uid, UserProfile, VerifiedIdentity};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct VerifyTokenRequest<'a> {
    pub(super) id_token: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct VerifyTokenResponse {
    pub(super) uid: String,
    #[serde(default)]
    pub(super) email: Option<String>,
}

impl VerifyTokenResponse {
    pub(super) fn into_domain(self) -> Result<VerifiedIdentity, String> {
        let uid = Uid::new(self.uid).map_err(|err| err.to_string())?;
        Ok(VerifiedIdentity {
            uid,
            email: self.email,
        })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct BatchGetRequest<'a> {
    pub(super) uids: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(super) struct BatchGetResponse {
    #[serde(default)]
    pub(super) users: Vec<UserRecordDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserRecordDto {
    pub(super) uid: String,
    #[serde(default)]
    pub(super) email: Option<String>,
    #[serde(default)]
    pub(super) display_name: Option<String>,
}

impl BatchGetResponse {
    /// Map records into profiles, skipping entries with malformed uids.
    pub(super) fn into_profiles(self) -> Vec<UserProfile> {
        self.users
            .into_iter()
            .filter_map(|record| {
                let uid = Uid::new(record.uid).ok()?;
                Some(UserProfile {
                    uid,
                    email: record.email,
                    display_name: record.display_name,
                })
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct UserByEmailResponse {
    pub(super) uid: String,
}
