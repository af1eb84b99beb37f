//! Client construction options and service defaults.

use std::time::Duration;

/// Canonical RapidAPI hostname for the service.
pub const DEFAULT_HOST: &str = "vericorp-invoice-api.p.rapidapi.com";

/// Canonical HTTPS origin for the service.
pub const DEFAULT_BASE_URL: &str = "https://vericorp-invoice-api.p.rapidapi.com";

/// Invoice processing takes longer than a typical API call.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// One retry by default, so up to two total attempts.
pub(crate) const DEFAULT_MAX_RETRIES: u32 = 1;

/// Options for [`VeriCorpInvoice::new`](crate::VeriCorpInvoice::new).
///
/// Only the API key is required; everything else falls back to the service
/// defaults. The key is validated when the client is constructed.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub(crate) api_key: String,
    pub(crate) host: String,
    pub(crate) base_url: String,
    pub(crate) timeout: Duration,
    pub(crate) max_retries: u32,
}

impl ClientOptions {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            host: DEFAULT_HOST.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Override the `X-RapidAPI-Host` header value.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Point the client at a different origin (e.g. a staging deployment).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Wall-clock deadline for one call, retries included.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retries after the initial attempt; 0 disables retrying.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}
