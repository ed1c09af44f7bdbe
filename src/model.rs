// Core structs: RawDeal, DealRecord, DealView and the per-stage errors
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One pattern match as it appears in the document text, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDeal {
    pub company_name: String,
    pub expire_date: String,
    pub offer_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealRecord {
    pub company_name: String,
    pub offer_percent: u8,
    /// `MM/DD/YY`, kept as text.
    pub expire_date: String,
    pub canonical_key: String,
}

/// A record enriched with its logo, ready for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DealView {
    pub company: String,
    pub offer: u8,
    pub expire_date: String,
    pub logo: String,
    pub clean_name: String,
}

impl DealView {
    pub fn new(record: DealRecord, logo: String) -> Self {
        Self {
            company: record.company_name,
            offer: record.offer_percent,
            expire_date: record.expire_date,
            logo,
            clean_name: record.canonical_key,
        }
    }
}

/// Outcome of one parse → normalize → save run.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionSummary {
    pub pages: usize,
    pub matched: usize,
    pub saved: usize,
    pub skipped: usize,
    pub extracted_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("cannot open document {path}: {reason}")]
    Open { path: String, reason: String },
    #[error("cannot load document {path}: {reason}")]
    Load { path: String, reason: String },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("company name is empty")]
    EmptyCompany,
    #[error("offer {0:?} is not a whole number")]
    InvalidOffer(String),
    #[error("offer {0} is outside 0..=100")]
    OfferOutOfRange(u64),
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store csv error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum LogoError {
    #[error("logo request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("logo endpoint answered {0}")]
    Status(reqwest::StatusCode),
    #[error("cannot write logo: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("pipeline task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
