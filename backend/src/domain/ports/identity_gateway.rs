//! Port for the external identity provider.
//!
//! The provider verifies bearer tokens and resolves profile data. Token
//! verification and email lookups are authoritative; batch profile lookups
//! are used for display only and may return partial results.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{Uid, UserProfile, VerifiedIdentity};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity gateway adapters.
    pub enum IdentityGatewayError {
        /// The token is missing, malformed, expired, or revoked.
        Unauthorized { message: String } =>
            "identity token rejected: {message}",
        /// No account matches the lookup.
        NotFound { message: String } =>
            "identity not found: {message}",
        /// The provider could not be reached or timed out.
        Unavailable { message: String } =>
            "identity provider unavailable: {message}",
        /// The provider answered with an unexpected payload or status.
        Protocol { message: String } =>
            "identity provider protocol error: {message}",
    }
}

/// Driven port for the external identity provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Verify a bearer token and return the principal it identifies.
    async fn verify_token(&self, token: &str) -> Result<VerifiedIdentity, IdentityGatewayError>;

    /// Resolve profiles for `uids`; unknown uids are omitted from the map.
    async fn get_users_by_uid(
        &self,
        uids: &[Uid],
    ) -> Result<HashMap<Uid, UserProfile>, IdentityGatewayError>;

    /// Resolve an email address to a uid.
    async fn get_user_by_email(&self, email: &str) -> Result<Uid, IdentityGatewayError>;
}

/// Identity gateway for local runs and tests.
///
/// A token is accepted when it equals a registered uid; the profile email
/// defaults to `<uid>@example.test`.
#[derive(Debug, Default, Clone)]
pub struct FixtureIdentityGateway {
    profiles: HashMap<Uid, UserProfile>,
    accept_any: bool,
}

impl FixtureIdentityGateway {
    /// Gateway that accepts any well-formed uid as a token.
    pub fn permissive() -> Self {
        Self {
            profiles: HashMap::new(),
            accept_any: true,
        }
    }

    /// Register a known user.
    pub fn with_user(mut self, uid: Uid, email: impl Into<String>) -> Self {
        let profile = UserProfile {
            uid: uid.clone(),
            email: Some(email.into()),
            display_name: None,
        };
        self.profiles.insert(uid, profile);
        self
    }

    fn profile_for(&self, uid: &Uid) -> Option<UserProfile> {
        if let Some(profile) = self.profiles.get(uid) {
            return Some(profile.clone());
        }
        self.accept_any.then(|| UserProfile {
            uid: uid.clone(),
            email: Some(format!("{uid}@example.test")),
            display_name: None,
        })
    }
}

#[async_trait]
impl IdentityGateway for FixtureIdentityGateway {
    async fn verify_token(&self, token: &str) -> Result<VerifiedIdentity, IdentityGatewayError> {
        let uid = Uid::new(token).map_err(|err| IdentityGatewayError::unauthorized(err.to_string()))?;
        let profile = self
            .profile_for(&uid)
            .ok_or_else(|| IdentityGatewayError::unauthorized("unknown fixture token"))?;
        Ok(VerifiedIdentity {
            uid: profile.uid,
            email: profile.email,
        })
    }

    async fn get_users_by_uid(
        &self,
        uids: &[Uid],
    ) -> Result<HashMap<Uid, UserProfile>, IdentityGatewayError> {
        Ok(uids
            .iter()
            .filter_map(|uid| self.profile_for(uid).map(|profile| (uid.clone(), profile)))
            .collect())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Uid, IdentityGatewayError> {
        let wanted = email.trim().to_lowercase();
        if let Some(profile) = self
            .profiles
            .values()
            .find(|profile| {
                profile
                    .email
                    .as_deref()
                    .is_some_and(|email| email.to_lowercase() == wanted)
            })
        {
            return Ok(profile.uid.clone());
        }
        let synthesised = wanted
            .strip_suffix("@example.test")
            .filter(|_| self.accept_any)
            .and_then(|local| Uid::new(local).ok());
        synthesised
            .ok_or_else(|| IdentityGatewayError::not_found(format!("no account for {email}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn uid(raw: &str) -> Uid {
        Uid::new(raw).expect("uid")
    }

    #[rstest]
    #[tokio::test]
    async fn strict_fixture_rejects_unknown_tokens() {
        let gateway = FixtureIdentityGateway::default().with_user(uid("alice"), "alice@mail.test");

        let identity = gateway.verify_token("alice").await.expect("known token");
        assert_eq!(identity.uid, uid("alice"));

        let err = gateway.verify_token("mallory").await.expect_err("unknown token");
        assert!(matches!(err, IdentityGatewayError::Unauthorized { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn resolves_registered_emails_ignoring_case() {
        let gateway = FixtureIdentityGateway::default().with_user(uid("bob"), "Bob@Mail.test");

        let resolved = gateway.get_user_by_email("bob@mail.test").await.expect("email");
        assert_eq!(resolved, uid("bob"));
        assert!(matches!(
            gateway.get_user_by_email("nobody@mail.test").await,
            Err(IdentityGatewayError::NotFound { .. })
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn permissive_fixture_synthesises_profiles() {
        let gateway = FixtureIdentityGateway::permissive();

        let profiles = gateway
            .get_users_by_uid(&[uid("carol")])
            .await
            .expect("profiles");
        assert_eq!(
            profiles.get(&uid("carol")).and_then(|p| p.email.clone()),
            Some("carol@example.test".to_owned())
        );
        assert_eq!(
            gateway.get_user_by_email("carol@example.test").await.expect("uid"),
            uid("carol")
        );
    }
}
