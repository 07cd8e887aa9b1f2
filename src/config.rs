//! OAuth configuration for the protected calendar MCP server
//!
//! Settings are read once at startup from the environment and are immutable
//! thereafter. All endpoint URLs are derived here so every consumer computes
//! the same values from one source of truth. Reachability of the
//! authorization server is deliberately not checked at this layer - an
//! unreachable server surfaces later as an introspection failure.

use std::env;

use secrecy::{ExposeSecret, SecretString};

use crate::error::{AuthError, Result};

/// Default host for the protected MCP server
pub const DEFAULT_HOST: &str = "localhost";
/// Default port for the protected MCP server
pub const DEFAULT_PORT: u16 = 3000;
/// Default authorization server host
pub const DEFAULT_AUTH_HOST: &str = "localhost";
/// Default authorization server port
pub const DEFAULT_AUTH_PORT: u16 = 8080;
/// Default authorization server realm
pub const DEFAULT_AUTH_REALM: &str = "master";
/// Default OAuth client id this service uses to authenticate introspection calls
pub const DEFAULT_CLIENT_ID: &str = "mcp-server";
/// Default scope gating access to calendar tools
pub const DEFAULT_SCOPE: &str = "mcp:tools";

/// Process-wide OAuth configuration
///
/// # Security
///
/// The client secret is this service's own confidential-client credential
/// used to authenticate to the introspection endpoint (RFC 7662 Section 2.1).
/// It is held as a [`SecretString`] and never appears in `Debug` output.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Host of the protected MCP server
    pub host: String,
    /// Port of the protected MCP server
    pub port: u16,
    /// Authorization server host
    pub auth_host: String,
    /// Authorization server port
    pub auth_port: u16,
    /// Authorization server realm
    pub auth_realm: String,
    /// OAuth client id for introspection calls
    pub client_id: String,
    /// OAuth client secret for introspection calls
    pub client_secret: SecretString,
    /// Scope required for tool access
    pub required_scope: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            auth_host: DEFAULT_AUTH_HOST.to_string(),
            auth_port: DEFAULT_AUTH_PORT,
            auth_realm: DEFAULT_AUTH_REALM.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            client_secret: SecretString::new(String::new()),
            required_scope: DEFAULT_SCOPE.to_string(),
        }
    }
}

impl AuthConfig {
    /// Resolve configuration from the environment
    ///
    /// Reads `HOST`, `PORT`, `AUTH_HOST`, `AUTH_PORT`, `AUTH_REALM`,
    /// `OAUTH_CLIENT_ID`, `OAUTH_CLIENT_SECRET`, and `MCP_SCOPE`, falling
    /// back to the documented defaults for anything unset.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidSetting`] when a port variable is not a
    /// valid `u16`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env_or("HOST", DEFAULT_HOST),
            port: parse_port("PORT", env::var("PORT").ok(), DEFAULT_PORT)?,
            auth_host: env_or("AUTH_HOST", DEFAULT_AUTH_HOST),
            auth_port: parse_port("AUTH_PORT", env::var("AUTH_PORT").ok(), DEFAULT_AUTH_PORT)?,
            auth_realm: env_or("AUTH_REALM", DEFAULT_AUTH_REALM),
            client_id: env_or("OAUTH_CLIENT_ID", DEFAULT_CLIENT_ID),
            client_secret: SecretString::new(
                env::var("OAUTH_CLIENT_SECRET").unwrap_or_default(),
            ),
            required_scope: env_or("MCP_SCOPE", DEFAULT_SCOPE),
        })
    }

    /// Fail startup when no client secret is configured
    ///
    /// The introspection exchange authenticates this service to the
    /// authorization server; running without a secret would silently
    /// downgrade to unauthenticated operation.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingClientSecret`] when the secret is empty.
    pub fn ensure_confidential(&self) -> Result<()> {
        if self.client_secret.expose_secret().is_empty() {
            return Err(AuthError::MissingClientSecret);
        }
        Ok(())
    }

    /// Canonical URL of the protected MCP server (the expected audience)
    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Authorization server realm base URL (with trailing slash)
    pub fn auth_base_url(&self) -> String {
        format!(
            "http://{}:{}/realms/{}/",
            self.auth_host, self.auth_port, self.auth_realm
        )
    }

    /// Token introspection endpoint (RFC 7662)
    pub fn introspection_endpoint(&self) -> String {
        format!(
            "{}protocol/openid-connect/token/introspect",
            self.auth_base_url()
        )
    }

    /// Authorization endpoint
    pub fn authorization_endpoint(&self) -> String {
        format!("{}protocol/openid-connect/auth", self.auth_base_url())
    }

    /// Token endpoint
    pub fn token_endpoint(&self) -> String {
        format!("{}protocol/openid-connect/token", self.auth_base_url())
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_port(name: &'static str, value: Option<String>, default: u16) -> Result<u16> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| AuthError::InvalidSetting { name, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_derived_urls() {
        let config = AuthConfig::default();

        assert_eq!(config.server_url(), "http://localhost:3000");
        assert_eq!(config.auth_base_url(), "http://localhost:8080/realms/master/");
        assert_eq!(
            config.introspection_endpoint(),
            "http://localhost:8080/realms/master/protocol/openid-connect/token/introspect"
        );
        assert_eq!(
            config.authorization_endpoint(),
            "http://localhost:8080/realms/master/protocol/openid-connect/auth"
        );
        assert_eq!(
            config.token_endpoint(),
            "http://localhost:8080/realms/master/protocol/openid-connect/token"
        );
    }

    #[test]
    fn test_derived_urls_share_one_base() {
        let config = AuthConfig {
            auth_host: "auth".to_string(),
            auth_port: 8443,
            auth_realm: "university".to_string(),
            ..AuthConfig::default()
        };

        let base = config.auth_base_url();
        assert!(config.introspection_endpoint().starts_with(&base));
        assert!(config.authorization_endpoint().starts_with(&base));
        assert!(config.token_endpoint().starts_with(&base));
    }

    #[test]
    fn test_parse_port() {
        assert_eq!(parse_port("PORT", None, 3000).unwrap(), 3000);
        assert_eq!(parse_port("PORT", Some("9000".to_string()), 3000).unwrap(), 9000);
        assert!(parse_port("PORT", Some("nope".to_string()), 3000).is_err());
    }

    #[test]
    fn test_ensure_confidential() {
        let config = AuthConfig::default();
        assert!(matches!(
            config.ensure_confidential(),
            Err(AuthError::MissingClientSecret)
        ));

        let config = AuthConfig {
            client_secret: SecretString::new("s3cret".to_string()),
            ..AuthConfig::default()
        };
        assert!(config.ensure_confidential().is_ok());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AuthConfig {
            client_secret: SecretString::new("hunter2".to_string()),
            ..AuthConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2"));
    }
}
