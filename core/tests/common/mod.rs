//! Canned-response `Transport` double shared by the integration test files.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use passninja_core::{ClientConfig, HttpRequest, HttpResponse, PassClient, Transport, TransportError};

pub const BASE_URL: &str = "https://api.passninja.test";
pub const ACCOUNT_ID: &str = "dummy-account-id";
pub const API_KEY: &str = "dummy-api-key";

/// Replays queued responses in order and records every request it sees.
/// Running out of responses is reported as a network failure.
#[derive(Default)]
pub struct CannedTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl CannedTransport {
    pub fn new(responses: impl IntoIterator<Item = HttpResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn empty() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for CannedTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TransportError::Network("no canned response left".to_string()))
    }
}

pub fn ok(body: &str) -> HttpResponse {
    status(200, body)
}

pub fn status(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        headers: Vec::new(),
        body: body.to_string(),
    }
}

pub fn client_with(transport: &Arc<CannedTransport>) -> PassClient {
    let config = ClientConfig::new(ACCOUNT_ID, API_KEY).with_base_url(BASE_URL);
    PassClient::from_config_with_transport(&config, transport.clone()).unwrap()
}
