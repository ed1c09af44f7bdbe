pub mod deal_parser;
pub mod document;

pub use deal_parser::{DealParser, Parser};
pub use document::{DocumentReader, PdfDocumentReader};

use crate::model::{ExtractionError, RawDeal};
use std::path::Path;

/// Raw tuples pulled from one document.
#[derive(Debug, Default)]
pub struct Extraction {
    pub pages: usize,
    pub deals: Vec<RawDeal>,
}

/// Reads every page and concatenates the matches in page order.
/// Pages without text contribute nothing.
pub fn extract_deals(
    reader: &dyn DocumentReader,
    parser: &dyn Parser,
    path: &Path,
) -> Result<Extraction, ExtractionError> {
    let pages = reader.read_pages(path)?;
    let deals = pages
        .iter()
        .flatten()
        .flat_map(|text| parser.parse(text))
        .collect();

    Ok(Extraction {
        pages: pages.len(),
        deals,
    })
}
