//! Default `Transport` backed by a blocking `ureq::Agent`.

use std::time::Duration;

use tracing::trace;
use ureq::{Agent, RequestBuilder};

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

/// Executes `HttpRequest` values with ureq.
///
/// The agent is configured with `http_status_as_error(false)` so 4xx/5xx
/// responses are returned as data rather than `Err`, leaving status
/// interpretation to `PassClient`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::with_timeout(None)
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        trace!(method = %req.method, url = %req.url, "executing request");

        let result = match (req.method, req.body) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(&req.url), &req.headers).call(),
            (HttpMethod::Delete, _) => with_headers(self.agent.delete(&req.url), &req.headers).call(),
            (HttpMethod::Post, Some(body)) => {
                with_headers(self.agent.post(&req.url), &req.headers).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => with_headers(self.agent.post(&req.url), &req.headers).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                with_headers(self.agent.put(&req.url), &req.headers).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => with_headers(self.agent.put(&req.url), &req.headers).send_empty(),
        };
        let mut response = result.map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        trace!(status, "received response");
        Ok(HttpResponse { status, headers, body })
    }
}
