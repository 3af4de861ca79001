//! HTTP boundary consumed by the synchronizer.
//!
//! The synchronizer only needs "GET a path, get JSON back" and "POST JSON to a
//! path, get JSON back". Status codes are not inspected: the backend reports
//! failures through the JSON error envelope, so a 401 body is just another
//! payload to classify.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;

use dashboard_core::DashboardConfig;

use crate::error::TransportError;

/// Issues requests against the dashboard backend.
pub trait Transport: Send + Sync + 'static {
    /// `GET path` and decode the body as JSON.
    fn get(&self, path: &str) -> impl Future<Output = Result<Value, TransportError>> + Send;

    /// `POST path` with a JSON body and decode the response as JSON. An empty
    /// response body decodes to `Value::Null`.
    fn post(
        &self,
        path: &str,
        body: &Value,
    ) -> impl Future<Output = Result<Value, TransportError>> + Send;
}

/// `ureq`-backed transport. Requests run on tokio's blocking pool.
#[derive(Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.base_url.clone(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Value, TransportError> {
        let agent = self.agent.clone();
        let url = self.url_for(path);
        tokio::task::spawn_blocking(move || {
            let request = agent.get(&url).set("Accept", "application/json");
            read_json(&url, request.call())
        })
        .await
        .map_err(|e| TransportError::Worker(e.to_string()))?
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        let agent = self.agent.clone();
        let url = self.url_for(path);
        let payload = serde_json::to_string(body)?;
        tokio::task::spawn_blocking(move || {
            let request = agent
                .post(&url)
                .set("Accept", "application/json")
                .set("Content-Type", "application/json");
            read_json(&url, request.send_string(&payload))
        })
        .await
        .map_err(|e| TransportError::Worker(e.to_string()))?
    }
}

/// Decode a response body regardless of its status code.
fn read_json(
    url: &str,
    result: Result<ureq::Response, ureq::Error>,
) -> Result<Value, TransportError> {
    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(code, response)) => {
            tracing::debug!(url, status = code, "non-success status, decoding body");
            response
        }
        Err(err) => {
            return Err(TransportError::Request {
                url: url.to_string(),
                source: Box::new(err),
            })
        }
    };

    let text = response.into_string().map_err(|e| TransportError::Io {
        url: url.to_string(),
        source: e,
    })?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| TransportError::Json {
        url: url.to_string(),
        source: e,
    })
}
