//! Request builders and response parsers for the PassNinja API.
//!
//! # Design
//! `PassClient` holds its credentials, the service origin and a shared
//! transport. None of it changes after construction. Each remote call is
//! split into a `build_*` method that produces an `HttpRequest` and a
//! `parse_*` method that consumes an `HttpResponse`; both are pure, so they
//! are tested without any I/O. The operation groups in `resources` glue the
//! two halves together through the transport.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::config::ClientConfig;
use crate::error::{PassNinjaError, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::resources::{PassTemplates, Passes};
use crate::transport::UreqTransport;
use crate::types::{
    ClientPassData, CreatePassResponse, CreatedPass, DecryptPayload, FindPassesResponse, PassPayload,
    RequiredKeysResponse,
};

pub const ACCOUNT_ID_HEADER: &str = "x-account-id";
pub const API_KEY_HEADER: &str = "x-api-key";

/// Client for the PassNinja pass-issuing service.
///
/// Cheap to clone; clones share one transport.
#[derive(Clone)]
pub struct PassClient {
    account_id: String,
    api_key: String,
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl PassClient {
    /// Client for the public service using the default ureq transport.
    pub fn new(account_id: &str, api_key: &str) -> Result<Self, PassNinjaError> {
        Self::from_config(&ClientConfig::new(account_id, api_key))
    }

    /// Client for the public service using a caller-supplied transport.
    pub fn with_transport(
        account_id: &str,
        api_key: &str,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, PassNinjaError> {
        Self::from_config_with_transport(&ClientConfig::new(account_id, api_key), transport)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, PassNinjaError> {
        let transport = Arc::new(UreqTransport::with_timeout(config.timeout));
        Self::from_config_with_transport(config, transport)
    }

    pub fn from_config_with_transport(
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, PassNinjaError> {
        if config.account_id.is_empty() || config.api_key.is_empty() {
            return Err(PassNinjaError::invalid(
                "Must provide both accountId and apiKey to PassClient constructor.",
            ));
        }
        Ok(Self {
            account_id: config.account_id.clone(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            transport,
        })
    }

    /// Operations on issued passes.
    pub fn pass(&self) -> Passes<'_> {
        Passes::new(self)
    }

    /// Operations on pass templates.
    pub fn pass_template(&self) -> PassTemplates<'_> {
        PassTemplates::new(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    // -----------------------------------------------------------------------
    // Request builders
    // -----------------------------------------------------------------------

    pub fn build_required_keys(&self, pass_type: &str) -> HttpRequest {
        self.request(HttpMethod::Get, format!("/v1/passtypes/keys/{}", encode(pass_type)), None)
    }

    pub fn build_create_pass(&self, pass_type: &str, data: &ClientPassData) -> Result<HttpRequest, TransportError> {
        let body = to_json(&PassPayload { pass_type, pass: data })?;
        Ok(self.request(HttpMethod::Post, "/v1/passes".to_string(), Some(body)))
    }

    pub fn build_get_pass(&self, pass_type: &str, serial_number: &str) -> HttpRequest {
        self.request(HttpMethod::Get, pass_path(pass_type, serial_number), None)
    }

    pub fn build_put_pass(
        &self,
        pass_type: &str,
        serial_number: &str,
        data: &ClientPassData,
    ) -> Result<HttpRequest, TransportError> {
        let body = to_json(&PassPayload { pass_type, pass: data })?;
        Ok(self.request(HttpMethod::Put, pass_path(pass_type, serial_number), Some(body)))
    }

    pub fn build_delete_pass(&self, pass_type: &str, serial_number: &str) -> HttpRequest {
        self.request(HttpMethod::Delete, pass_path(pass_type, serial_number), None)
    }

    pub fn build_find_passes(&self, pass_type: &str) -> HttpRequest {
        self.request(HttpMethod::Get, format!("/v1/passes/{}", encode(pass_type)), None)
    }

    pub fn build_decrypt_pass(&self, pass_type: &str, payload: &str) -> Result<HttpRequest, TransportError> {
        let body = to_json(&DecryptPayload { payload })?;
        Ok(self.request(
            HttpMethod::Post,
            format!("/v1/passes/{}/decrypt", encode(pass_type)),
            Some(body),
        ))
    }

    pub fn build_find_pass_template(&self, template_id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, format!("/v1/pass_templates/{}", encode(template_id)), None)
    }

    // -----------------------------------------------------------------------
    // Response parsers
    // -----------------------------------------------------------------------

    pub fn parse_required_keys(&self, response: HttpResponse) -> Result<BTreeSet<String>, TransportError> {
        let raw: RequiredKeysResponse = decode(response)?;
        Ok(raw.keys.into_iter().collect())
    }

    pub fn parse_create_pass(&self, response: HttpResponse) -> Result<CreatedPass, TransportError> {
        let raw: CreatePassResponse = decode(response)?;
        Ok(raw.into())
    }

    /// Full decoded body of a get, put, decrypt or template lookup.
    pub fn parse_pass(&self, response: HttpResponse) -> Result<Value, TransportError> {
        decode(response)
    }

    pub fn parse_find_passes(&self, response: HttpResponse) -> Result<Vec<Value>, TransportError> {
        let raw: FindPassesResponse = decode(response)?;
        Ok(raw.passes)
    }

    /// Only the status matters; the body is ignored.
    pub fn parse_delete_pass(&self, response: HttpResponse) -> Result<(), TransportError> {
        check_status(&response)
    }

    // -----------------------------------------------------------------------
    // Execution
    // -----------------------------------------------------------------------

    /// Send `request` and hand the response to `parse`, wrapping any failure
    /// as `OperationFailed` tagged with `action`.
    pub(crate) fn round_trip<T>(
        &self,
        action: &'static str,
        request: Result<HttpRequest, TransportError>,
        parse: impl FnOnce(&Self, HttpResponse) -> Result<T, TransportError>,
    ) -> Result<T, PassNinjaError> {
        let result = request
            .and_then(|req| {
                debug!(method = %req.method, url = %req.url, action, "sending request");
                self.transport.execute(req)
            })
            .and_then(|response| {
                debug!(status = response.status, action, "received response");
                parse(self, response)
            });
        result.map_err(|source| {
            warn!(action, error = %source, "operation failed");
            PassNinjaError::failed(action, source)
        })
    }

    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                (ACCOUNT_ID_HEADER.to_string(), self.account_id.clone()),
                (API_KEY_HEADER.to_string(), self.api_key.clone()),
            ],
            body,
        }
    }
}

impl fmt::Debug for PassClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PassClient")
            .field("account_id", &self.account_id)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Form-urlencode a single path segment.
fn encode(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes()).collect()
}

fn pass_path(pass_type: &str, serial_number: &str) -> String {
    format!("/v1/passes/{}/{}", encode(pass_type), encode(serial_number))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, TransportError> {
    serde_json::to_string(value).map_err(|e| TransportError::Serialization(e.to_string()))
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, TransportError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| TransportError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `TransportError` variant.
fn check_status(response: &HttpResponse) -> Result<(), TransportError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(TransportError::NotFound);
    }
    Err(TransportError::HttpStatus {
        status: response.status,
        body: response.body.clone(),
    })
}
