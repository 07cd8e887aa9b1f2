//! Common test utilities for integration tests
//!
//! Provides a mock Keycloak-style authorization server exposing an RFC 7662
//! introspection endpoint.

#![allow(dead_code)]

use secrecy::SecretString;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

use calendar_mcp_auth::{IntrospectionClient, IntrospectionTokenVerifier};

/// Mock authorization server with an introspection endpoint
pub struct MockAuthServer {
    pub server: MockServer,
    pub introspection_endpoint: String,
}

impl MockAuthServer {
    /// Start a new mock authorization server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let introspection_endpoint = format!("{}/introspect", server.uri());

        Self {
            server,
            introspection_endpoint,
        }
    }

    /// Mock the introspection endpoint with a fixed JSON response
    pub async fn mock_introspection(&self, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/introspect"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mock the introspection endpoint with an error status
    pub async fn mock_introspection_status(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/introspect"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Build a verifier pointed at this mock server
    pub fn verifier(&self, resource_url: &str, required_scope: &str) -> IntrospectionTokenVerifier {
        let client = IntrospectionClient::new(
            self.introspection_endpoint.clone(),
            "mcp-server".to_string(),
            SecretString::new("test-secret".to_string()),
        );
        IntrospectionTokenVerifier::new(client, resource_url, required_scope.to_string())
    }
}

/// An introspection response that passes every check for a service at
/// `http://svc:3000` requiring `mcp:tools`
pub fn valid_introspection_body() -> serde_json::Value {
    json!({
        "active": true,
        "aud": "http://svc:3000",
        "scope": "mcp:tools read",
        "client_id": "c1",
        "sub": "u1",
        "exp": 9_999_999_999u64,
    })
}
