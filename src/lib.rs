//! # Calendar MCP Auth - Bearer Token Protection for the Calendar MCP Server
//!
//! Standards-compliant resource-server authentication for the calendar MCP
//! server: every inbound request presents an opaque bearer token, and this
//! crate decides whether that token is authentic, unexpired, intended for
//! this exact service, and carries the required scope.
//!
//! ## Architecture
//!
//! - [`config`] - Environment-driven configuration and derived endpoint URLs
//! - [`error`] - Error taxonomy ([`AuthError`])
//! - [`introspection`] - RFC 7662 wire types and the pooled introspection client
//! - [`verifier`] - The [`TokenVerifier`] trait and its introspection-backed
//!   implementation (the acceptance policy)
//! - [`token`] - [`AccessToken`], the immutable result of a successful validation
//! - [`server`] - RFC 9728 Protected Resource Metadata and the
//!   `WWW-Authenticate` challenge for 401 responses
//!
//! ## Validation Flow
//!
//! The hosting resource layer extracts the bearer token from the
//! `Authorization` header ([`server::extract_bearer_token`]) and hands it to a
//! [`TokenVerifier`]. The verifier introspects the token against the
//! authorization server over a shared, pooled HTTP client and applies the
//! acceptance policy (active, audience, scope). On success the caller receives
//! an [`AccessToken`]; on any rejection it receives `None` and answers 401
//! with [`server::www_authenticate_header`]. Rejection reasons are logged but
//! never disclosed to the caller.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use calendar_mcp_auth::{AuthConfig, IntrospectionTokenVerifier, TokenVerifier};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AuthConfig::from_env()?;
//! config.ensure_confidential()?;
//!
//! let verifier = IntrospectionTokenVerifier::from_config(&config);
//!
//! match verifier.verify_token("opaque-bearer-token").await {
//!     Some(token) => println!("validated for client {}", token.client_id()),
//!     None => println!("rejected; answer 401 with the discovery challenge"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Standards Compliance
//!
//! - **RFC 7662** - OAuth 2.0 Token Introspection
//! - **RFC 9728** - OAuth 2.0 Protected Resource Metadata

pub mod config;
pub mod error;
pub mod introspection;
pub mod server;
pub mod token;
pub mod verifier;

#[doc(inline)]
pub use config::AuthConfig;

#[doc(inline)]
pub use error::{AuthError, Result};

#[doc(inline)]
pub use introspection::{IntrospectionClient, IntrospectionResponse};

#[doc(inline)]
pub use token::AccessToken;

#[doc(inline)]
pub use verifier::{IntrospectionTokenVerifier, TokenVerifier};

#[doc(inline)]
pub use server::{ProtectedResourceMetadata, protected_resource_metadata, www_authenticate_header};
