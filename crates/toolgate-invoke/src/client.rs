// client.rs — Gateway invocation client.
//
// POSTs `{tool, args}` to `<base>/tools/invoke` and passes the gateway's
// JSON result through verbatim. HTTP error responses are shaped into a
// textual Failure outcome so callers can print them instead of crashing.

use serde::Serialize;

use crate::error::InvokeError;

/// What the gateway said about an invocation.
#[derive(Debug, Clone)]
pub enum InvokeOutcome {
    /// 2xx — the gateway's JSON result, passed through verbatim.
    Success(serde_json::Value),
    /// Non-2xx — surfaced as text for the caller.
    Failure { status: u16, detail: String },
}

#[derive(Serialize)]
struct InvokeRequest<'a> {
    tool: &'a str,
    args: &'a serde_json::Value,
}

/// Client for the downstream tool-invocation endpoint.
pub struct InvokeClient {
    base_url: String,
    http: reqwest::Client,
}

impl InvokeClient {
    /// Create a client for a gateway base URL (trailing slash tolerated).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// The normalized base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Forward one allowed invocation to the gateway.
    #[tracing::instrument(skip(self, args))]
    pub async fn invoke(
        &self,
        tool: &str,
        args: &serde_json::Value,
    ) -> Result<InvokeOutcome, InvokeError> {
        let url = format!("{}/tools/invoke", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(&InvokeRequest { tool, args })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            tracing::warn!(%status, tool, "gateway rejected invocation");
            return Ok(InvokeOutcome::Failure {
                status: status.as_u16(),
                detail,
            });
        }

        // Tolerate empty or non-JSON bodies from permissive gateways.
        let body = resp.text().await.unwrap_or_default();
        let value = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
        Ok(InvokeOutcome::Success(value))
    }
}
