//! Bearer-token verification via authorization server introspection
//!
//! The acceptance policy, applied in order and short-circuiting on the
//! first failure:
//!
//! 1. the introspection endpoint must not transmit credentials over
//!    plaintext to a non-loopback host (checked before any network I/O)
//! 2. the introspection exchange must succeed with HTTP 200
//! 3. the token must be `active` (covers expired, revoked, never-issued)
//! 4. the `aud` claim must contain this service's canonical URL
//!    (trailing-slash-insensitive; string and array forms both accepted)
//! 5. the token's scopes must include the required scope
//!
//! Rejection is a normal outcome, not an error: `verify_token` never fails
//! toward its caller. The reason for each rejection is logged - and only
//! logged - so an attacker probing the 401 surface learns nothing about
//! which check failed.

use async_trait::async_trait;
use tracing::{debug, error, warn};

use crate::config::AuthConfig;
use crate::introspection::{IntrospectionClient, IntrospectionResponse};
use crate::token::{AccessToken, DEFAULT_CLIENT_ID, DEFAULT_SUBJECT, mask_token};

/// Pluggable token verification
///
/// One policy implementation serves both the direct-call path in the
/// resource layer and provider-style injection (`Arc<dyn TokenVerifier>`)
/// into transport middleware.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify a bearer token taken from an Authorization header
    ///
    /// Returns the validated [`AccessToken`] or `None` on any rejection.
    async fn verify_token(&self, token: &str) -> Option<AccessToken>;
}

/// Outcome of the audience check; missing and mismatched audiences are
/// logged distinctly
enum AudienceCheck {
    Match,
    Mismatch,
    Missing,
}

/// Token verifier backed by RFC 7662 introspection
#[derive(Debug, Clone)]
pub struct IntrospectionTokenVerifier {
    /// Pooled client for the introspection exchange
    client: IntrospectionClient,
    /// Canonical URL of this service, trailing slash trimmed
    resource_url: String,
    /// Scope every caller must carry
    required_scope: String,
}

impl IntrospectionTokenVerifier {
    /// Create a verifier for a protected resource
    ///
    /// `resource_url` is this service's canonical URL; tokens minted for any
    /// other audience are rejected.
    pub fn new(client: IntrospectionClient, resource_url: &str, required_scope: String) -> Self {
        Self {
            client,
            resource_url: resource_url.trim_end_matches('/').to_string(),
            required_scope,
        }
    }

    /// Create a verifier wired from configuration
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            IntrospectionClient::from_config(config),
            &config.server_url(),
            config.required_scope.clone(),
        )
    }

    fn build_token(&self, token: &str, data: IntrospectionResponse, scopes: Vec<String>) -> AccessToken {
        AccessToken::new(
            token.to_string(),
            data.client_id
                .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string()),
            scopes,
            data.sub.unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
            data.exp,
        )
    }
}

#[async_trait]
impl TokenVerifier for IntrospectionTokenVerifier {
    async fn verify_token(&self, token: &str) -> Option<AccessToken> {
        let endpoint = self.client.endpoint();

        if self.client.ensure_endpoint_permitted().is_err() {
            error!(endpoint, "introspection endpoint must use HTTPS in production");
            return None;
        }

        let data = match self.client.introspect(token).await {
            Ok(data) => data,
            Err(err) => {
                error!(endpoint, error = %err, "token introspection failed");
                return None;
            }
        };

        if !data.active {
            warn!(token = %mask_token(token), "token is inactive or expired");
            return None;
        }

        match check_audience(data.aud.as_ref(), &self.resource_url) {
            AudienceCheck::Match => {}
            AudienceCheck::Missing => {
                error!("missing audience claim in token");
                return None;
            }
            AudienceCheck::Mismatch => {
                error!(
                    expected = %self.resource_url,
                    "audience mismatch: token was minted for a different resource"
                );
                return None;
            }
        }

        let scopes = parse_scopes(data.scope.as_deref());
        if !scopes.iter().any(|s| s == &self.required_scope) {
            error!(required = %self.required_scope, "token missing required scope");
            return None;
        }

        let validated = self.build_token(token, data, scopes);
        debug!(
            client_id = validated.client_id(),
            subject = validated.subject(),
            scopes = ?validated.scopes(),
            "token validated"
        );
        Some(validated)
    }
}

/// Audience check against the canonical resource URL
///
/// `aud` may be a single string or a list of strings. Comparison trims one
/// trailing slash from each candidate, matching how the resource URL itself
/// was normalized. An absent or empty claim is [`AudienceCheck::Missing`].
fn check_audience(aud: Option<&serde_json::Value>, resource_url: &str) -> AudienceCheck {
    let audiences: Vec<&str> = match aud {
        None => Vec::new(),
        Some(serde_json::Value::String(s)) => vec![s.as_str()],
        Some(serde_json::Value::Array(entries)) => {
            entries.iter().filter_map(|v| v.as_str()).collect()
        }
        Some(_) => Vec::new(),
    };

    if audiences.is_empty() {
        return AudienceCheck::Missing;
    }

    if audiences
        .iter()
        .any(|a| a.trim_end_matches('/') == resource_url)
    {
        AudienceCheck::Match
    } else {
        AudienceCheck::Mismatch
    }
}

/// Split the space-delimited scope string into scope tokens
fn parse_scopes(scope: Option<&str>) -> Vec<String> {
    scope
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
