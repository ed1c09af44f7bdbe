use crate::config::AppConfig;
use crate::logo::LogoResolver;
use crate::model::{DealRecord, DealView, ExtractionSummary, ServiceError};
use crate::normalizer::{canonical_key, normalize_all};
use crate::parser::{DocumentReader, Parser, extract_deals};
use crate::storage::{CsvStorage, LoadOutcome};

use chrono::Utc;
use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Ties the pipeline together: document → records → store → views.
pub struct DealService {
    document_path: PathBuf,
    extract_on_request: bool,
    reader: Arc<dyn DocumentReader>,
    parser: Arc<dyn Parser + Send + Sync>,
    resolver: Arc<dyn LogoResolver>,
    // serializes writers and readers of the cache file
    storage: Arc<Mutex<CsvStorage>>,
}

impl DealService {
    pub fn new(
        config: &AppConfig,
        reader: Box<dyn DocumentReader>,
        parser: Box<dyn Parser + Send + Sync>,
        resolver: Arc<dyn LogoResolver>,
    ) -> Self {
        Self {
            document_path: config.document_path.clone(),
            extract_on_request: config.extract_on_request,
            reader: Arc::from(reader),
            parser: Arc::from(parser),
            resolver,
            storage: Arc::new(Mutex::new(CsvStorage::new(config.cache_path.clone()))),
        }
    }

    /// Re-extracts the document and overwrites the store with the result.
    /// PDF parsing and the file write run on the blocking pool.
    pub async fn refresh(&self) -> Result<ExtractionSummary, ServiceError> {
        info!("Extracting deals from {}", self.document_path.display());
        let storage = self.storage.clone().lock_owned().await;
        let reader = self.reader.clone();
        let parser = self.parser.clone();
        let document_path = self.document_path.clone();

        let (extraction, records) = tokio::task::spawn_blocking(move || {
            let extraction = extract_deals(reader.as_ref(), parser.as_ref(), &document_path)?;
            let records = normalize_all(&extraction.deals);
            storage.save(&records)?;
            Ok::<_, ServiceError>((extraction, records))
        })
        .await??;

        let summary = ExtractionSummary {
            pages: extraction.pages,
            matched: extraction.deals.len(),
            saved: records.len(),
            skipped: extraction.deals.len() - records.len(),
            extracted_at: Utc::now(),
        };
        info!(
            "Extraction done: {} pages, {} matched, {} saved, {} skipped",
            summary.pages, summary.matched, summary.saved, summary.skipped
        );
        Ok(summary)
    }

    /// All deals in store order, optionally limited to companies containing `filter`
    /// (case-insensitive).
    pub async fn list(&self, filter: Option<&str>) -> Result<Vec<DealView>, ServiceError> {
        if self.extract_on_request {
            self.refresh().await?;
        }

        let mut records = self.load_records().await?;
        if let Some(needle) = filter.map(str::trim).filter(|f| !f.is_empty()) {
            let needle = needle.to_lowercase();
            records.retain(|r| r.company_name.to_lowercase().contains(&needle));
        }

        Ok(self.resolve_views(records).await)
    }

    /// The first deal whose company shares `name`'s canonical key.
    pub async fn get_by_key(&self, name: &str) -> Result<Option<DealView>, ServiceError> {
        let key = canonical_key(name);
        if key.is_empty() {
            return Ok(None);
        }

        let found = self
            .load_records()
            .await?
            .into_iter()
            .find(|r| r.canonical_key == key);

        match found {
            Some(record) => {
                let logo = self.resolver.resolve(&record.company_name).await;
                Ok(Some(DealView::new(record, logo)))
            }
            None => {
                info!("No deal for '{}'", name);
                Ok(None)
            }
        }
    }

    async fn load_records(&self) -> Result<Vec<DealRecord>, ServiceError> {
        let storage = self.storage.clone().lock_owned().await;
        let outcome = tokio::task::spawn_blocking(move || storage.load()).await??;
        if let LoadOutcome::Empty = outcome {
            warn!("No deals available. Check the document extraction.");
        }
        Ok(outcome.into_records())
    }

    /// Logos are independent, so they are fetched concurrently; output keeps input order.
    async fn resolve_views(&self, records: Vec<DealRecord>) -> Vec<DealView> {
        let logos = join_all(
            records
                .iter()
                .map(|r| self.resolver.resolve(&r.company_name)),
        )
        .await;

        records
            .into_iter()
            .zip(logos)
            .map(|(record, logo)| DealView::new(record, logo))
            .collect()
    }
}
