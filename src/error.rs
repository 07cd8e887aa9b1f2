//! Error taxonomy for token validation and configuration
//!
//! Configuration-time faults ([`AuthError::MissingClientSecret`], invalid
//! settings) are fatal and surface at startup. Transport and protocol faults
//! during introspection are ordinary errors from [`IntrospectionClient`]
//! that the verifier recovers locally as a rejection - they never reach the
//! protected-resource layer.
//!
//! [`IntrospectionClient`]: crate::introspection::IntrospectionClient

use thiserror::Error;

/// Errors produced by configuration resolution and the introspection exchange
#[derive(Debug, Error)]
pub enum AuthError {
    /// Server-to-server introspection requires a confidential client secret;
    /// operating without one must fail at startup, not degrade silently.
    #[error("OAUTH_CLIENT_SECRET must be set for token introspection")]
    MissingClientSecret,

    /// A setting could not be parsed (for example a non-numeric port)
    #[error("invalid value for {name}: {value:?}")]
    InvalidSetting {
        /// Environment variable name
        name: &'static str,
        /// The offending raw value
        value: String,
    },

    /// The introspection endpoint would transmit client credentials over
    /// plaintext to a non-loopback host
    #[error("introspection endpoint must use https outside localhost: {0}")]
    InsecureEndpoint(String),

    /// HTTP-level failure during introspection (timeout, DNS, TLS,
    /// connection refusal, or an undecodable response body)
    #[error("introspection request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The introspection endpoint answered with a non-200 status
    #[error("introspection endpoint returned {0}")]
    IntrospectionStatus(reqwest::StatusCode),
}

/// Result alias used throughout this crate
pub type Result<T> = std::result::Result<T, AuthError>;
