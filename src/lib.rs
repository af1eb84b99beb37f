//! Rust client for the VeriCorp Invoice extraction API.
//!
//! Submits invoice files (PDF or image) to the remote extraction service and
//! returns structured, validated invoice data. Transient failures (HTTP 429
//! and 503, connection errors) are retried with capped exponential backoff,
//! every call is bounded by a single wall-clock timeout, and service errors
//! surface as a closed set of typed variants.
//!
//! ```no_run
//! use vericorp_invoice::{ClientOptions, ExtractOptions, VeriCorpInvoice};
//!
//! # async fn run() -> vericorp_invoice::Result<()> {
//! let client = VeriCorpInvoice::new(ClientOptions::new("my-api-key"))?;
//! let file = std::fs::read("invoice.pdf").expect("readable file");
//!
//! let invoice = client.extract(file, ExtractOptions::default()).await?;
//! println!("total: {:?}", invoice.totals.total);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
mod retry;
pub mod types;

pub use client::VeriCorpInvoice;
pub use config::{ClientOptions, DEFAULT_BASE_URL, DEFAULT_HOST};
pub use error::{Error, Result};
pub use types::{
    ApiErrorBody, CacheHealth, CacheStatus, DocumentType, ExtractOptions, ExtractionMetadata,
    HealthResponse, HealthStatus, InvoiceResponse, IssueSeverity, LineItem, NeuronBudget,
    Party, PaymentInfo, QualityIssue, QualityLevel, QualityResult, SupportedFormatsResponse,
    Totals, TotalsValidation, VatBreakdown,
};
