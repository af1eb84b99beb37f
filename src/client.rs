//! Client for the VeriCorp Invoice extraction API.

use log::debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response, multipart};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::ClientOptions;
use crate::error::{Error, Result};
use crate::retry::send_with_retry;
use crate::types::{
    ApiErrorBody, ExtractOptions, HealthResponse, InvoiceResponse, SupportedFormatsResponse,
};

const API_KEY_HEADER: &str = "X-RapidAPI-Key";
const API_HOST_HEADER: &str = "X-RapidAPI-Host";

/// Client for the VeriCorp Invoice extraction API.
///
/// Configuration is immutable once constructed, so one client can serve any
/// number of concurrent calls; each call owns its own request state.
pub struct VeriCorpInvoice {
    http: Client,
    api_key: String,
    host: String,
    base_url: String,
    timeout: Duration,
    max_retries: u32,
}

impl VeriCorpInvoice {
    /// Creates a client from validated options.
    ///
    /// Fails with [`Error::Config`] when the API key is empty. No network
    /// activity happens here.
    pub fn new(options: ClientOptions) -> Result<Self> {
        if options.api_key.is_empty() {
            return Err(Error::Config("api_key is required".to_string()));
        }

        Ok(Self {
            http: Client::new(),
            api_key: options.api_key,
            host: options.host,
            base_url: options.base_url,
            timeout: options.timeout,
            max_retries: options.max_retries,
        })
    }

    /// Extracts structured data from an invoice file (PDF or image).
    #[tracing::instrument(skip(self, file))]
    pub async fn extract(
        &self,
        file: Vec<u8>,
        options: ExtractOptions,
    ) -> Result<InvoiceResponse> {
        let url = format!("{}/v1/extract", self.base_url);

        self.request("POST /v1/extract", || {
            self.http
                .post(&url)
                .header(API_KEY_HEADER, &self.api_key)
                .header(API_HOST_HEADER, &self.host)
                // No explicit content type: reqwest attaches the
                // boundary-bearing multipart/form-data value itself.
                .multipart(extract_form(&file, &options))
        })
        .await
    }

    /// Checks API health and budget status.
    #[tracing::instrument(skip(self))]
    pub async fn health(&self) -> Result<HealthResponse> {
        self.get_json("/v1/health").await
    }

    /// Lists supported file formats and size limits.
    #[tracing::instrument(skip(self))]
    pub async fn supported_formats(&self) -> Result<SupportedFormatsResponse> {
        self.get_json("/v1/supported-formats").await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        self.request(path, || {
            self.http
                .get(&url)
                .header(API_KEY_HEADER, &self.api_key)
                .header(API_HOST_HEADER, &self.host)
                .header(CONTENT_TYPE, "application/json")
        })
        .await
    }

    /// Shared request path: one wall-clock deadline around transport,
    /// retries and body decode.
    async fn request<F, T>(&self, operation_name: &str, build_request: F) -> Result<T>
    where
        F: Fn() -> RequestBuilder,
        T: DeserializeOwned,
    {
        debug!("{}: dispatching", operation_name);

        match tokio::time::timeout(self.timeout, self.dispatch(operation_name, build_request))
            .await
        {
            Ok(outcome) => outcome,
            // The elapsed deadline drops the in-flight attempt along with
            // any pending backoff; timeout supersedes other classification.
            Err(_) => Err(Error::Timeout),
        }
    }

    async fn dispatch<F, T>(&self, operation_name: &str, build_request: F) -> Result<T>
    where
        F: Fn() -> RequestBuilder,
        T: DeserializeOwned,
    {
        let response = send_with_retry(operation_name, build_request, self.max_retries).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::from_api(status, decode_error_body(response).await));
        }

        Ok(response.json::<T>().await?)
    }
}

/// Decodes the wire error body, synthesizing a generic one when it does not
/// parse as JSON.
async fn decode_error_body(response: Response) -> ApiErrorBody {
    let status = response.status();

    response
        .json::<ApiErrorBody>()
        .await
        .unwrap_or_else(|_| ApiErrorBody {
            error: status.canonical_reason().unwrap_or("unknown error").to_string(),
            code: "UNKNOWN".to_string(),
        })
}

/// Builds the multipart body for an extract call.
///
/// Flag fields ride along only when they deviate from the service defaults.
fn extract_form(file: &[u8], options: &ExtractOptions) -> multipart::Form {
    let file_name = options
        .file_name
        .clone()
        .unwrap_or_else(|| "invoice".to_string());

    let mut form = multipart::Form::new()
        .part("file", multipart::Part::bytes(file.to_vec()).file_name(file_name));

    if options.validate_nif == Some(false) {
        form = form.text("validate_nif", "false");
    }
    if options.validate_iban == Some(false) {
        form = form.text("validate_iban", "false");
    }
    if options.include_raw_text {
        form = form.text("include_raw_text", "true");
    }

    form
}
