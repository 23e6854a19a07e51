//! `ReqwestTransport` — the [`HttpTransport`] implementation.

use std::future::Future;
use std::time::Duration;

use thingif_app::ports::{ApiRequest, ApiResponse, HttpTransport, Method};
use thingif_domain::error::ThingIfError;

use crate::config::HttpConfig;
use crate::error::TransportError;

/// Sends requests through a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Build`] if the client cannot be initialised
    /// (e.g. the TLS backend fails to load).
    pub fn new(config: &HttpConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder.build().map_err(TransportError::Build)?;
        Ok(Self { client })
    }

    /// Wrap an already configured client.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.client.request(method, &request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            // Sent as raw bytes so the caller's vendor Content-Type is kept.
            let bytes = serde_json::to_vec(body).map_err(TransportError::Encode)?;
            builder = builder.body(bytes);
        }

        let response = builder.send().await.map_err(TransportError::Request)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(TransportError::Request)?;
        tracing::trace!(status, len = bytes.len(), "response received");
        Ok(ApiResponse::new(status, decode_body(&bytes)))
    }
}

/// Empty bodies become `None`; non-JSON bodies are kept as a JSON string.
fn decode_body(bytes: &[u8]) -> Option<serde_json::Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    Some(serde_json::from_slice(bytes).unwrap_or_else(|_| {
        serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned())
    }))
}

impl HttpTransport for ReqwestTransport {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, ThingIfError>> + Send {
        async move { self.execute(request).await.map_err(ThingIfError::from) }
    }
}
