// HTTP request primitive for the DevRev REST API
//
// Design Decision: One narrow trait over raw reqwest calls
//
// Rationale: Every tool reduces to "POST this JSON to that endpoint and give
// me back status + body text". Hiding reqwest behind a trait keeps the
// dispatch and resolver logic testable without a network, and keeps the
// credential an explicit constructor input instead of ambient state read at
// call time.
//
// Trade-offs:
// - The trait returns the undecoded body; callers decide whether JSON-ness
//   matters (a 2xx with a broken body is still a success at this layer)
// - Transport failures (connect, timeout) are Err; HTTP status failures are
//   Ok responses carrying the status, because they are tool results

use crate::config::ApiConfig;
use crate::error::Result;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use serde_json::Value;

/// URL namespace of a DevRev endpoint
///
/// Public endpoints live at `{base}/{endpoint}`, internal (undocumented)
/// endpoints at `{base}/internal/{endpoint}`. The request contract is
/// otherwise identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiNamespace {
    Public,
    Internal,
}

/// Undecoded remote response: status code plus raw body text
///
/// Decoding is deliberately lazy. The interpreter decides per call whether
/// the body must parse, so this type never fails construction on bad JSON.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub text: String,
}

impl ApiResponse {
    pub fn new(status: u16, text: impl Into<String>) -> Self {
        Self {
            status,
            text: text.into(),
        }
    }

    /// True for any 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON
    ///
    /// # Errors
    /// - Body is empty or not valid JSON
    pub fn json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.text)
    }
}

/// Authenticated POST access to the DevRev API
///
/// The single seam between tool logic and the network. Production uses
/// [`HttpDevRevClient`]; tests substitute a mock or a scripted stub.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DevRevClient: Send + Sync {
    /// POST `payload` as JSON to `endpoint` in the given namespace
    ///
    /// Returns the response for every HTTP status. Only transport-level
    /// failures (connect, timeout, TLS) produce an error.
    async fn post(
        &self,
        namespace: ApiNamespace,
        endpoint: &str,
        payload: Value,
    ) -> Result<ApiResponse>;
}

/// reqwest-backed client for the real DevRev API
///
/// The access token is sent verbatim in the Authorization header; DevRev
/// personal access tokens carry no `Bearer ` prefix.
pub struct HttpDevRevClient {
    http: Client,
    config: ApiConfig,
}

impl HttpDevRevClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    fn endpoint_url(&self, namespace: ApiNamespace, endpoint: &str) -> String {
        match namespace {
            ApiNamespace::Public => format!("{}/{}", self.config.base_url, endpoint),
            ApiNamespace::Internal => format!("{}/internal/{}", self.config.base_url, endpoint),
        }
    }
}

#[async_trait]
impl DevRevClient for HttpDevRevClient {
    async fn post(
        &self,
        namespace: ApiNamespace,
        endpoint: &str,
        payload: Value,
    ) -> Result<ApiResponse> {
        let url = self.endpoint_url(namespace, endpoint);
        tracing::debug!(%url, "posting to DevRev API");

        let response = self
            .http
            .post(&url)
            .header("Authorization", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;

        if !(200..300).contains(&status) {
            tracing::warn!(%url, status, "DevRev API returned a failure status");
        }

        Ok(ApiResponse { status, text })
    }
}
