//! Client configuration.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `PASSNINJA_ACCOUNT_ID` | Account id sent as `x-account-id` | Required |
//! | `PASSNINJA_API_KEY` | API key sent as `x-api-key` | Required |
//! | `PASSNINJA_BASE_URL` | Service origin | `https://api.passninja.com` |
//! | `PASSNINJA_TIMEOUT_SECS` | Whole-request timeout for the default transport | none |

use std::fmt;
use std::time::Duration;

use crate::error::PassNinjaError;

pub const DEFAULT_BASE_URL: &str = "https://api.passninja.com";

pub const ACCOUNT_ID_ENV: &str = "PASSNINJA_ACCOUNT_ID";
pub const API_KEY_ENV: &str = "PASSNINJA_API_KEY";
pub const BASE_URL_ENV: &str = "PASSNINJA_BASE_URL";
pub const TIMEOUT_SECS_ENV: &str = "PASSNINJA_TIMEOUT_SECS";

/// Credentials and endpoint settings for a `PassClient`.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub account_id: String,
    pub api_key: String,
    pub base_url: String,
    /// Only applied by the default transport.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(account_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, PassNinjaError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PassNinjaError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| PassNinjaError::invalid(format!("{name} must be set")))
        };
        let mut config = Self::new(required(ACCOUNT_ID_ENV)?, required(API_KEY_ENV)?);

        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.is_empty()) {
            config.base_url = base_url;
        }
        if let Some(raw) = lookup(TIMEOUT_SECS_ENV).filter(|v| !v.is_empty()) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                PassNinjaError::invalid(format!("{TIMEOUT_SECS_ENV} must be a whole number of seconds, got {raw:?}"))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("account_id", &self.account_id)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
