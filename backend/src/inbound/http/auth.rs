//! Bearer-token extractors used by HTTP handlers.
//!
//! Handlers never see raw credentials: [`Authenticated`] requires a verified
//! identity and [`Viewer`] resolves to an optional one. Verification goes
//! through the identity gateway held in [`HttpState`].

use std::sync::Arc;

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::ports::{IdentityGateway, IdentityGatewayError};
use crate::domain::{Error, Uid, VerifiedIdentity, map_identity_error};

use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// A request carrying a verified bearer token.
#[derive(Debug, Clone)]
pub struct Authenticated(pub VerifiedIdentity);

impl Authenticated {
    /// The verified principal.
    pub fn uid(&self) -> &Uid {
        &self.0.uid
    }
}

/// The principal behind a request, if any.
///
/// Requests without a token, or with a token the provider rejects, are
/// anonymous. Provider outages still fail the request.
#[derive(Debug, Clone, Default)]
pub struct Viewer(pub Option<Uid>);

impl Viewer {
    /// The caller's uid, `None` when anonymous.
    pub fn uid(&self) -> Option<&Uid> {
        self.0.as_ref()
    }

    /// Consume the extractor, yielding the caller's uid.
    pub fn into_uid(self) -> Option<Uid> {
        self.0
    }
}

/// Credentials found in the `Authorization` header.
#[derive(Debug, PartialEq, Eq)]
enum Credentials {
    Missing,
    Malformed,
    Bearer(String),
}

fn credentials(req: &HttpRequest) -> Credentials {
    let Some(value) = req.headers().get(AUTHORIZATION) else {
        return Credentials::Missing;
    };
    let token = value
        .to_str()
        .ok()
        .and_then(|raw| raw.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty());
    match token {
        Some(token) => Credentials::Bearer(token.to_owned()),
        None => Credentials::Malformed,
    }
}

fn identity_gateway(req: &HttpRequest) -> Result<Arc<dyn IdentityGateway>, Error> {
    req.app_data::<web::Data<HttpState>>()
        .map(|state| Arc::clone(&state.identity))
        .ok_or_else(|| Error::internal("HTTP state is not configured"))
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let gateway = identity_gateway(req);
        let credentials = credentials(req);
        Box::pin(async move {
            let gateway = gateway?;
            let token = match credentials {
                Credentials::Bearer(token) => token,
                Credentials::Missing => return Err(Error::unauthorized("missing bearer token")),
                Credentials::Malformed => {
                    return Err(Error::unauthorized("malformed authorization header"));
                }
            };
            let identity = gateway
                .verify_token(&token)
                .await
                .map_err(map_identity_error)?;
            Ok(Self(identity))
        })
    }
}

impl FromRequest for Viewer {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let gateway = identity_gateway(req);
        let credentials = credentials(req);
        Box::pin(async move {
            let Credentials::Bearer(token) = credentials else {
                return Ok(Self(None));
            };
            match gateway?.verify_token(&token).await {
                Ok(identity) => Ok(Self(Some(identity.uid))),
                Err(IdentityGatewayError::Unauthorized { message }) => {
                    debug!(%message, "treating rejected token as anonymous");
                    Ok(Self(None))
                }
                Err(other) => Err(map_identity_error(other)),
            }
        })
    }
}
