use crate::model::{DealRecord, StorageError};
use crate::normalizer::{canonical_key, parse_offer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const HEADERS: [&str; 3] = ["Company", "Offer", "Expire Date"];

/// What a read of the store produced.
#[derive(Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Records(Vec<DealRecord>),
    /// Missing file, no rows, or no usable rows.
    Empty,
}

impl LoadOutcome {
    pub fn into_records(self) -> Vec<DealRecord> {
        match self {
            LoadOutcome::Records(records) => records,
            LoadOutcome::Empty => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, LoadOutcome::Empty)
    }
}

/// Flat-file cache of normalized deals. Single writer; callers serialize access.
pub struct CsvStorage {
    path: PathBuf,
}

impl CsvStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the whole store with `records`.
    pub fn save(&self, records: &[DealRecord]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(HEADERS)?;
        for record in records {
            let offer = record.offer_percent.to_string();
            writer.write_record([
                record.company_name.as_str(),
                offer.as_str(),
                record.expire_date.as_str(),
            ])?;
        }
        writer.flush()?;

        info!("Saved {} deals to {}", records.len(), self.path.display());
        Ok(())
    }

    /// Reads the store back. Unreadable rows and rows with an unusable offer are skipped.
    pub fn load(&self) -> Result<LoadOutcome, StorageError> {
        if !self.path.exists() {
            warn!("Store {} does not exist yet", self.path.display());
            return Ok(LoadOutcome::Empty);
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;
        let headers = reader.headers()?.clone();
        let column = |name: &str| headers.iter().position(|h| h.trim() == name);
        let (company_col, offer_col, date_col) = (
            column(HEADERS[0]).unwrap_or(0),
            column(HEADERS[1]).unwrap_or(1),
            column(HEADERS[2]).unwrap_or(2),
        );

        let mut records = Vec::new();
        for (idx, row) in reader.byte_records().enumerate() {
            let row = match row.map(csv::StringRecord::from_byte_record) {
                Ok(Ok(row)) => row,
                Ok(Err(e)) => {
                    warn!("Skipping store row {}: not valid UTF-8 ({})", idx + 1, e.utf8_error());
                    continue;
                }
                Err(e) => {
                    warn!("Skipping store row {}: {}", idx + 1, e);
                    continue;
                }
            };
            let field = |col: usize| row.get(col).map(str::trim).filter(|s| !s.is_empty());

            let (Some(company), Some(offer), Some(date)) =
                (field(company_col), field(offer_col), field(date_col))
            else {
                warn!("Skipping store row {}: missing field", idx + 1);
                continue;
            };

            match parse_offer(offer) {
                Ok(offer_percent) => records.push(DealRecord {
                    company_name: company.to_string(),
                    offer_percent,
                    expire_date: date.to_string(),
                    canonical_key: canonical_key(company),
                }),
                Err(e) => warn!("Skipping store row {} ({}): {}", idx + 1, company, e),
            }
        }

        if records.is_empty() {
            warn!("Store {} is empty", self.path.display());
            return Ok(LoadOutcome::Empty);
        }
        Ok(LoadOutcome::Records(records))
    }
}
