//! Reqwest-backed identity provider adapter.
//!
//! Owns transport details only: endpoint resolution, request timeout, HTTP
//! status mapping, and JSON decoding into domain values.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{
    BatchGetRequest, BatchGetResponse, UserByEmailResponse, VerifyTokenRequest,
    VerifyTokenResponse,
};
use crate::domain::ports::{IdentityGateway, IdentityGatewayError};
use crate::domain::{Uid, UserProfile, VerifiedIdentity};

const VERIFY_TOKEN_PATH: &str = "v1/tokens:verify";
const BATCH_GET_PATH: &str = "v1/users:batchGet";
const BY_EMAIL_PATH: &str = "v1/users:byEmail";

/// Identity gateway speaking JSON to one provider base URL.
pub struct HttpIdentityGateway {
    client: Client,
    base: Url,
}

impl HttpIdentityGateway {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base: with_trailing_slash(base),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, IdentityGatewayError> {
        self.base
            .join(path)
            .map_err(|err| IdentityGatewayError::protocol(format!("bad endpoint {path}: {err}")))
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, IdentityGatewayError> {
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        serde_json::from_slice(body.as_ref()).map_err(|err| {
            IdentityGatewayError::protocol(format!("invalid identity payload: {err}"))
        })
    }
}

fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

#[async_trait]
impl IdentityGateway for HttpIdentityGateway {
    async fn verify_token(&self, token: &str) -> Result<VerifiedIdentity, IdentityGatewayError> {
        let response = self
            .client
            .post(self.endpoint(VERIFY_TOKEN_PATH)?)
            .json(&VerifyTokenRequest { id_token: token })
            .send()
            .await
            .map_err(map_transport_error)?;
        let decoded: VerifyTokenResponse = Self::decode(response).await?;
        decoded.into_domain().map_err(IdentityGatewayError::protocol)
    }

    async fn get_users_by_uid(
        &self,
        uids: &[Uid],
    ) -> Result<HashMap<Uid, UserProfile>, IdentityGatewayError> {
        if uids.is_empty() {
            return Ok(HashMap::new());
        }
        let request = BatchGetRequest {
            uids: uids.iter().map(|uid| uid.as_ref()).collect(),
        };
        let response = self
            .client
            .post(self.endpoint(BATCH_GET_PATH)?)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;
        let decoded: BatchGetResponse = Self::decode(response).await?;
        let profiles: HashMap<Uid, UserProfile> = decoded
            .into_profiles()
            .into_iter()
            .map(|profile| (profile.uid.clone(), profile))
            .collect();
        debug!(
            requested = uids.len(),
            resolved = profiles.len(),
            "resolved identity profiles"
        );
        Ok(profiles)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Uid, IdentityGatewayError> {
        let response = self
            .client
            .get(self.endpoint(BY_EMAIL_PATH)?)
            .query(&[("email", email)])
            .send()
            .await
            .map_err(map_transport_error)?;
        let decoded: UserByEmailResponse = Self::decode(response).await?;
        Uid::new(decoded.uid).map_err(|err| IdentityGatewayError::protocol(err.to_string()))
    }
}

fn map_transport_error(error: reqwest::Error) -> IdentityGatewayError {
    IdentityGatewayError::unavailable(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> IdentityGatewayError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            IdentityGatewayError::unauthorized(message)
        }
        StatusCode::NOT_FOUND => IdentityGatewayError::not_found(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS => {
            IdentityGatewayError::unavailable(message)
        }
        _ if status.is_server_error() => IdentityGatewayError::unavailable(message),
        _ => IdentityGatewayError::protocol(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
