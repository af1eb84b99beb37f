//! Error types for the VeriCorp Invoice client.

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::ApiErrorBody;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the client.
///
/// Every service-reported failure maps to exactly one variant; the stable
/// machine code is available via [`Error::code`] and the nominal HTTP status
/// via [`Error::status`] for programmatic branching.
#[derive(Error, Debug)]
pub enum Error {
    /// The service is throttling requests.
    #[error("{0}")]
    RateLimit(String),

    /// The submitted file is malformed, unsupported, or missing.
    #[error("{0}")]
    InvalidFile(String),

    /// The service processed the request but could not extract invoice data.
    #[error("{0}")]
    ExtractionFailed(String),

    /// The server-side processing budget is depleted.
    #[error("{0}")]
    BudgetExhausted(String),

    /// The call did not complete within the configured wall-clock timeout.
    #[error("Request timed out")]
    Timeout,

    /// Any other error reported by the service, with the original message,
    /// code and HTTP status preserved for diagnostics.
    #[error("{message}")]
    Api {
        message: String,
        code: String,
        status: u16,
    },

    /// Invalid client configuration, rejected at construction time.
    #[error("configuration error: {0}")]
    Config(String),

    /// The request never produced an HTTP response (connection failure,
    /// aborted stream) or a response body failed to decode.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &str {
        match self {
            Error::RateLimit(_) => "RATE_LIMITED",
            Error::InvalidFile(_) => "INVALID_FILE",
            Error::ExtractionFailed(_) => "EXTRACTION_FAILED",
            Error::BudgetExhausted(_) => "BUDGET_EXHAUSTED",
            Error::Timeout => "TIMEOUT",
            Error::Api { code, .. } => code,
            Error::Config(_) => "CONFIG",
            Error::Http(_) => "HTTP",
        }
    }

    /// Nominal HTTP status for this error; 0 for non-HTTP failures.
    pub fn status(&self) -> u16 {
        match self {
            Error::RateLimit(_) => 429,
            Error::InvalidFile(_) => 400,
            Error::ExtractionFailed(_) => 422,
            Error::BudgetExhausted(_) => 503,
            Error::Api { status, .. } => *status,
            Error::Timeout | Error::Config(_) | Error::Http(_) => 0,
        }
    }

    /// Maps a decoded error body to its typed variant.
    ///
    /// Unrecognized codes keep the original message, code and status in
    /// [`Error::Api`]. A blank message falls back to the per-kind default.
    pub(crate) fn from_api(status: StatusCode, body: ApiErrorBody) -> Error {
        let ApiErrorBody { error, code } = body;
        match code.as_str() {
            "RATE_LIMITED" => Error::RateLimit(or_default(error, "Too many requests")),
            "INVALID_FILE" | "UNSUPPORTED_FORMAT" | "MISSING_FILE" => {
                Error::InvalidFile(or_default(error, "Invalid file"))
            }
            "EXTRACTION_FAILED" => {
                Error::ExtractionFailed(or_default(error, "Failed to extract invoice data"))
            }
            "BUDGET_EXHAUSTED" => {
                Error::BudgetExhausted(or_default(error, "Source temporarily unavailable"))
            }
            _ => Error::Api {
                message: error,
                code,
                status: status.as_u16(),
            },
        }
    }
}

fn or_default(message: String, fallback: &str) -> String {
    if message.is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
