//! OAuth 2.0 Token Introspection (RFC 7662)
//!
//! Wire types and the pooled HTTP client used to ask the authorization
//! server whether a presented token is currently valid.
//!
//! # Connection Pooling
//!
//! Introspection happens on every protected request. Without a shared
//! keep-alive pool each validation pays a full TCP/TLS handshake, which
//! dominates latency (roughly 100-500 ms unpooled vs 50-200 ms pooled
//! against a typical Keycloak deployment). [`IntrospectionClient`] therefore
//! owns one lazily-created `reqwest::Client` shared across all of its
//! clones; concurrent first use initializes it exactly once.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::{AuthError, Result};

/// Hard upper bound on a single introspection exchange
pub const INTROSPECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum idle keep-alive connections retained per host
const POOL_MAX_IDLE_PER_HOST: usize = 5;

/// Idle connections older than this are dropped from the pool
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Token introspection response per RFC 7662 Section 2.2
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IntrospectionResponse {
    /// Whether the token is currently active (REQUIRED)
    pub active: bool,

    /// Space-delimited scope string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// Client identifier the token was issued to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// Subject (end-user) identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration timestamp (seconds since epoch)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,

    /// Audience - a single string or a list of strings, both forms occur
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<serde_json::Value>,

    /// Additional fields
    #[serde(flatten)]
    pub additional: HashMap<String, serde_json::Value>,
}

/// Client-authenticated introspection client with a shared connection pool
///
/// The service (not the caller) authenticates to the introspection endpoint
/// with its own confidential-client credentials. Cloning is cheap and all
/// clones share one underlying pooled HTTP client.
#[derive(Clone)]
pub struct IntrospectionClient {
    /// Introspection endpoint URL
    endpoint: String,

    /// Client id for authenticating to the endpoint
    client_id: String,

    /// Client secret for authenticating to the endpoint
    client_secret: SecretString,

    /// Shared pooled HTTP client, created on first use
    http: Arc<OnceCell<reqwest::Client>>,
}

// Manual Debug impl to prevent client_secret exposure in logs
impl std::fmt::Debug for IntrospectionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntrospectionClient")
            .field("endpoint", &self.endpoint)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("http", &"<reqwest::Client>")
            .finish()
    }
}

impl IntrospectionClient {
    /// Create a new introspection client
    pub fn new(endpoint: String, client_id: String, client_secret: SecretString) -> Self {
        Self {
            endpoint,
            client_id,
            client_secret,
            http: Arc::new(OnceCell::new()),
        }
    }

    /// Create a client pointed at the configured introspection endpoint
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            config.introspection_endpoint(),
            config.client_id.clone(),
            config.client_secret.clone(),
        )
    }

    /// Introspection endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Refuse to send credentials over plaintext to a non-loopback host
    ///
    /// Plain HTTP is permitted only toward `localhost` / `127.0.0.1`, a
    /// development-only exception; everything else must be HTTPS. Checked
    /// before any network I/O.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InsecureEndpoint`] when the endpoint fails the
    /// transport policy.
    pub fn ensure_endpoint_permitted(&self) -> Result<()> {
        if endpoint_is_permitted(&self.endpoint) {
            return Ok(());
        }
        Err(AuthError::InsecureEndpoint(self.endpoint.clone()))
    }

    /// The shared pooled client, built on first use
    ///
    /// `OnceCell` guards initialization so concurrent first calls cannot
    /// create two competing pools.
    pub(crate) fn http_client(&self) -> Result<&reqwest::Client> {
        self.http.get_or_try_init(|| {
            reqwest::Client::builder()
                .timeout(INTROSPECTION_TIMEOUT)
                .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
                .pool_idle_timeout(POOL_IDLE_TIMEOUT)
                .build()
                .map_err(AuthError::from)
        })
    }

    /// Introspect a token per RFC 7662
    ///
    /// Issues a form-encoded POST carrying the token and this service's
    /// client credentials. No automatic retry: a failed or timed-out
    /// exchange is a rejection, not a candidate for transparent retry.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InsecureEndpoint`] before any network I/O when
    /// the endpoint fails the transport policy, [`AuthError::Transport`] on
    /// timeout, connection failure, or an undecodable response body, and
    /// [`AuthError::IntrospectionStatus`] when the endpoint answers anything
    /// other than 200.
    pub async fn introspect(&self, token: &str) -> Result<IntrospectionResponse> {
        self.ensure_endpoint_permitted()?;

        let http = self.http_client()?;

        let response = http
            .post(&self.endpoint)
            .form(&[
                ("token", token),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.expose_secret().as_str()),
            ])
            .send()
            .await?;

        if response.status() != reqwest::StatusCode::OK {
            return Err(AuthError::IntrospectionStatus(response.status()));
        }

        Ok(response.json::<IntrospectionResponse>().await?)
    }
}

fn endpoint_is_permitted(endpoint: &str) -> bool {
    endpoint.starts_with("https://")
        || endpoint.starts_with("http://localhost")
        || endpoint.starts_with("http://127.0.0.1")
}
