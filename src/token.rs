//! Validated access token value
//!
//! An [`AccessToken`] exists only as the result of a successful validation
//! and is guaranteed to have satisfied every acceptance check at the moment
//! of construction. It carries no further trust decisions - callers may
//! consult scope membership but must not re-derive authorization from it.

/// Sentinel client id when the introspection response omits `client_id`
pub const DEFAULT_CLIENT_ID: &str = "unknown";
/// Sentinel subject when the introspection response omits `sub`
pub const DEFAULT_SUBJECT: &str = "unknown";

/// Length of the token prefix retained when logging
const MASK_PREFIX_LEN: usize = 8;

/// Immutable, request-scoped result of a successful token validation
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AccessToken {
    /// The raw token string
    token: String,
    /// Client id that owns the token
    client_id: String,
    /// Granted scopes (membership is what matters; order is incidental)
    scopes: Vec<String>,
    /// Subject (end-user) identifier; absent in client-credentials tokens
    subject: String,
    /// Expiration epoch seconds; informational, liveness was already
    /// established by introspection
    expires_at: Option<u64>,
}

// Manual Debug impl to prevent raw token exposure in logs
impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &mask_token(&self.token))
            .field("client_id", &self.client_id)
            .field("scopes", &self.scopes)
            .field("subject", &self.subject)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl AccessToken {
    /// Construct a validated token; only the verifier does this
    pub(crate) fn new(
        token: String,
        client_id: String,
        scopes: Vec<String>,
        subject: String,
        expires_at: Option<u64>,
    ) -> Self {
        Self {
            token,
            client_id,
            scopes,
            subject,
            expires_at,
        }
    }

    /// The raw token string
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Client id that owns the token
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Granted scopes
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Subject identifier ([`DEFAULT_SUBJECT`] when the claim was absent)
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Expiration epoch seconds, if the authorization server reported one
    pub fn expires_at(&self) -> Option<u64> {
        self.expires_at
    }

    /// Whether the token carries a specific scope
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }
}

/// Masked token prefix safe for logging
pub(crate) fn mask_token(token: &str) -> String {
    let prefix: String = token.chars().take(MASK_PREFIX_LEN).collect();
    format!("{prefix}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AccessToken {
        AccessToken::new(
            "opaque-token-value-1234567890".to_string(),
            "c1".to_string(),
            vec!["mcp:tools".to_string(), "read".to_string()],
            "u1".to_string(),
            Some(9_999_999_999),
        )
    }

    #[test]
    fn test_has_scope() {
        let token = sample();
        assert!(token.has_scope("mcp:tools"));
        assert!(token.has_scope("read"));
        assert!(!token.has_scope("write"));
    }

    #[test]
    fn test_debug_masks_raw_token() {
        let token = sample();
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("opaque-token-value-1234567890"));
        assert!(rendered.contains("opaque-t..."));
    }

    #[test]
    fn test_equality() {
        assert_eq!(sample(), sample());

        let other = AccessToken::new(
            "different".to_string(),
            "c1".to_string(),
            vec!["mcp:tools".to_string()],
            "u1".to_string(),
            None,
        );
        assert_ne!(sample(), other);
    }

    #[test]
    fn test_mask_short_token() {
        // Shorter than the prefix length must not panic
        assert_eq!(mask_token("abc"), "abc...");
    }
}
