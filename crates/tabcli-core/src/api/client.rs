use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::config::Credentials;

use super::error::error_detail;
use super::{ApiError, AuthError};

// ============================================================================
// Constants
// ============================================================================

/// REST API version appended to the server base URL
const API_VERSION: &str = "3.22";

/// Token header name for authenticated requests
const AUTH_HEADER: &str = "X-Tableau-Auth";

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for a CLI.
const REQUEST_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Sign-in seam
// ============================================================================

/// Flat view of a successful sign-in response.
#[derive(Debug, Clone)]
pub struct SignInResponse {
    pub token: String,
    pub site_id: String,
    pub site_name: Option<String>,
    pub user_id: String,
    pub user_name: Option<String>,
}

/// The two unauthenticated calls the authenticator makes. Split out as a
/// trait so tests can count sign-in attempts without a server.
#[async_trait]
pub trait SignInApi: Send + Sync {
    /// Exchange personal access token credentials for a session token.
    /// This call must never itself require an existing session.
    async fn sign_in(&self, credentials: &Credentials) -> Result<SignInResponse, AuthError>;

    /// Invalidate the given token server-side.
    async fn sign_out(&self, token: &str) -> Result<(), ApiError>;
}

// ============================================================================
// Wire shapes for the auth endpoints
// ============================================================================

#[derive(Serialize)]
struct SignInRequest<'a> {
    credentials: SignInCredentials<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInCredentials<'a> {
    personal_access_token_name: &'a str,
    personal_access_token_secret: &'a str,
    site: SiteRef<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SiteRef<'a> {
    content_url: &'a str,
}

#[derive(Deserialize)]
struct SignInEnvelope {
    credentials: TokenCredentials,
}

#[derive(Deserialize)]
struct TokenCredentials {
    token: String,
    site: WireRef,
    user: WireRef,
}

#[derive(Deserialize)]
struct WireRef {
    id: String,
    name: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

/// REST API client.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client for the given server base URL.
    pub fn new(server_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: format!("{}/api/{}", server_url.trim_end_matches('/'), API_VERSION),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body));
        }
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Authenticated GET returning parsed JSON.
    pub async fn get<T: DeserializeOwned>(&self, token: &str, endpoint: &str) -> Result<T, ApiError> {
        debug!(endpoint, "GET");
        let response = self
            .client
            .get(self.url(endpoint))
            .header(AUTH_HEADER, token)
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Authenticated POST with an empty body, returning parsed JSON.
    pub async fn post<T: DeserializeOwned>(&self, token: &str, endpoint: &str) -> Result<T, ApiError> {
        debug!(endpoint, "POST");
        let response = self
            .client
            .post(self.url(endpoint))
            .header(AUTH_HEADER, token)
            .json(&serde_json::json!({}))
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Authenticated PUT with a JSON body, returning parsed JSON.
    pub async fn put<T: DeserializeOwned>(
        &self,
        token: &str,
        endpoint: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        debug!(endpoint, "PUT");
        let response = self
            .client
            .put(self.url(endpoint))
            .header(AUTH_HEADER, token)
            .json(body)
            .send()
            .await?;
        Self::parse(response).await
    }

    /// Authenticated DELETE, returning the status code. The API answers
    /// deletions with 204 and no body.
    pub async fn delete(&self, token: &str, endpoint: &str) -> Result<StatusCode, ApiError> {
        debug!(endpoint, "DELETE");
        let response = self
            .client
            .request(Method::DELETE, self.url(endpoint))
            .header(AUTH_HEADER, token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body));
        }
        Ok(status)
    }
}

#[async_trait]
impl SignInApi for ApiClient {
    async fn sign_in(&self, credentials: &Credentials) -> Result<SignInResponse, AuthError> {
        let payload = SignInRequest {
            credentials: SignInCredentials {
                personal_access_token_name: &credentials.pat_name,
                personal_access_token_secret: &credentials.pat_secret,
                site: SiteRef {
                    content_url: &credentials.site_content_url,
                },
            },
        };

        debug!(site = %credentials.site_content_url, "Signing in");
        let response = self
            .client
            .post(self.url("/auth/signin"))
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Authentication {
                status: status.as_u16(),
                message: error_detail(&body),
            });
        }

        let envelope: SignInEnvelope =
            response
                .json()
                .await
                .map_err(|e| AuthError::Authentication {
                    status: status.as_u16(),
                    message: format!("Unusable sign-in response: {}", e),
                })?;

        Ok(SignInResponse {
            token: envelope.credentials.token,
            site_id: envelope.credentials.site.id,
            site_name: envelope.credentials.site.name,
            user_id: envelope.credentials.user.id,
            user_name: envelope.credentials.user.name,
        })
    }

    async fn sign_out(&self, token: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url("/auth/signout"))
            .header(AUTH_HEADER, token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let client = ApiClient::new("https://tableau.example.com/").expect("client build failed");
        assert_eq!(
            client.url("/sites"),
            "https://tableau.example.com/api/3.22/sites"
        );
    }

    #[test]
    fn test_sign_in_payload_shape() {
        let payload = SignInRequest {
            credentials: SignInCredentials {
                personal_access_token_name: "ci-token",
                personal_access_token_secret: "secret",
                site: SiteRef {
                    content_url: "marketing",
                },
            },
        };
        let value = serde_json::to_value(&payload).expect("serialize failed");
        assert_eq!(value["credentials"]["personalAccessTokenName"], "ci-token");
        assert_eq!(value["credentials"]["site"]["contentUrl"], "marketing");
    }

    #[test]
    fn test_parse_sign_in_envelope() {
        let json = r#"{"credentials": {
            "token": "abc123",
            "site": {"id": "site-1", "name": "Marketing", "contentUrl": "marketing"},
            "user": {"id": "user-1", "name": "svc-account"}
        }}"#;
        let envelope: SignInEnvelope =
            serde_json::from_str(json).expect("Failed to parse sign-in test JSON");
        assert_eq!(envelope.credentials.token, "abc123");
        assert_eq!(envelope.credentials.site.id, "site-1");
        assert_eq!(envelope.credentials.user.name.as_deref(), Some("svc-account"));
    }

    #[test]
    fn test_sign_in_envelope_missing_token_fails() {
        let json = r#"{"credentials": {"site": {"id": "s"}, "user": {"id": "u"}}}"#;
        assert!(serde_json::from_str::<SignInEnvelope>(json).is_err());
    }
}
