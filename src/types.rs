//! Wire types for the VeriCorp Invoice API.
//!
//! Response payloads are marshaled field-for-field from the service
//! contract; they carry no behavior.

use serde::{Deserialize, Serialize};

/// Options for [`extract`](crate::VeriCorpInvoice::extract).
///
/// NIF and IBAN validation are on by default server-side, so the matching
/// form fields are only sent when validation is explicitly disabled;
/// `include_raw_text` is off by default and only sent when enabled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractOptions {
    /// Filename reported in the multipart body; defaults to "invoice".
    pub file_name: Option<String>,
    pub validate_nif: Option<bool>,
    pub validate_iban: Option<bool>,
    pub include_raw_text: bool,
}

/// Structured data extracted from one invoice document.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct InvoiceResponse {
    pub document_type: DocumentType,
    pub confidence: f64,
    pub issuer: Party,
    pub recipient: Party,
    pub invoice_number: Option<String>,
    pub issue_date: Option<String>,
    pub due_date: Option<String>,
    pub currency: Option<String>,
    pub line_items: Vec<LineItem>,
    pub totals: Totals,
    pub payment: PaymentInfo,
    pub metadata: ExtractionMetadata,
    pub quality: QualityResult,
    pub raw_text: Option<String>,
}

/// Kind of document the service recognized.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Invoice,
    CreditNote,
    DebitNote,
    Receipt,
    #[serde(other)]
    Unknown,
}

/// A party (issuer or recipient) on the invoice.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Party {
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub tax_id_valid: Option<bool>,
    pub tax_id_country: Option<String>,
    pub address: Option<String>,
    pub iban: Option<String>,
    pub iban_valid: Option<bool>,
    pub iban_formatted: Option<String>,
    pub bank_name: Option<String>,
    pub bank_bic: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LineItem {
    pub description: Option<String>,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub vat_rate: Option<f64>,
    pub amount: Option<f64>,
    pub confidence: f64,
}

/// Invoice totals with the service's cross-check results.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Totals {
    pub subtotal: Option<f64>,
    pub vat_amount: Option<f64>,
    pub total: Option<f64>,
    pub vat_breakdown: Vec<VatBreakdown>,
    pub validation: TotalsValidation,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct VatBreakdown {
    pub rate: f64,
    pub base: f64,
    pub amount: f64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TotalsValidation {
    pub line_items_match: Option<bool>,
    pub vat_match: Option<bool>,
    pub total_match: Option<bool>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PaymentInfo {
    pub iban: Option<String>,
    pub iban_valid: Option<bool>,
    pub iban_formatted: Option<String>,
    pub bank_name: Option<String>,
    pub bank_bic: Option<String>,
    pub reference: Option<String>,
    pub method: Option<String>,
}

/// How the extraction ran: model, cost, timing, caching.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ExtractionMetadata {
    pub model: String,
    pub neurons_used: u64,
    pub processing_time_ms: u64,
    pub pages: u32,
    pub retries: u32,
    pub cached: bool,
    pub file_hash: String,
}

/// Input quality assessment for the submitted document.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct QualityResult {
    pub level: QualityLevel,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub estimated_dpi: Option<u32>,
    pub file_type: String,
    pub file_size: u64,
    pub warning: Option<String>,
    pub issues: Vec<QualityIssue>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QualityLevel {
    High,
    Medium,
    Low,
    VeryLow,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct QualityIssue {
    pub field: String,
    pub issue: String,
    pub severity: IssueSeverity,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Warning,
    Error,
}

/// Service health and remaining processing budget.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: String,
    pub budget: NeuronBudget,
    pub cache: CacheHealth,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct NeuronBudget {
    pub used: u64,
    pub limit: u64,
    pub remaining: u64,
    pub reset_at: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CacheHealth {
    pub status: CacheStatus,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CacheStatus {
    Up,
    Down,
}

/// Accepted MIME types and size limits.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SupportedFormatsResponse {
    pub supported_formats: Vec<String>,
    pub max_file_size: u64,
    pub max_file_size_human: String,
}

/// Wire shape of a service failure.
///
/// Fields default so that partially-formed error bodies still classify.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub code: String,
}
