//! Discovery metadata and challenge helpers for the protected resource
//!
//! Two pure functions of configuration: the RFC 9728 Protected Resource
//! Metadata document served at the well-known path, and the
//! `WWW-Authenticate` challenge attached to every 401 so a client with no
//! prior knowledge of the authorization server can self-configure. Both are
//! cheap and recomputed per request; nothing here is cached or mutated.

use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;

/// Well-known path at which the metadata document is served
pub const WELL_KNOWN_PATH: &str = "/.well-known/oauth-protected-resource";

/// Protected Resource Metadata per RFC 9728
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedResourceMetadata {
    /// Canonical URL of this protected resource
    pub resource: String,
    /// Authorization servers a client may obtain tokens from
    pub authorization_servers: Vec<String>,
    /// Scopes this resource understands
    pub scopes_supported: Vec<String>,
    /// How bearer tokens may be presented
    pub bearer_methods_supported: Vec<String>,
}

/// Build the RFC 9728 metadata document for this service
pub fn protected_resource_metadata(config: &AuthConfig) -> ProtectedResourceMetadata {
    ProtectedResourceMetadata {
        resource: config.server_url(),
        authorization_servers: vec![config.auth_base_url().trim_end_matches('/').to_string()],
        scopes_supported: vec![config.required_scope.clone()],
        bearer_methods_supported: vec!["header".to_string()],
    }
}

/// Build the `WWW-Authenticate` value for 401 responses
///
/// Produces a header like:
/// ```text
/// Bearer realm="mcp", resource_metadata="http://localhost:3000/.well-known/oauth-protected-resource"
/// ```
///
/// The response body accompanying it must stay generic - internal rejection
/// reasons are logged, never disclosed.
pub fn www_authenticate_header(config: &AuthConfig) -> String {
    format!(
        "Bearer realm=\"mcp\", resource_metadata=\"{}{}\"",
        config.server_url(),
        WELL_KNOWN_PATH
    )
}

/// Extract the bearer token from an `Authorization` header value
///
/// Accepts a case-insensitive `Bearer` scheme followed by exactly one
/// non-empty token. Anything else yields `None`; the token itself stays
/// opaque.
pub fn extract_bearer_token(authorization_header: &str) -> Option<&str> {
    let mut parts = authorization_header.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;

    if !scheme.eq_ignore_ascii_case("bearer") || parts.next().is_some() {
        return None;
    }

    Some(token)
}
