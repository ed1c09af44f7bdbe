// Paginated document access: one text blob per page
use crate::model::ExtractionError;
use lopdf::Document;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub trait DocumentReader: Send + Sync {
    /// Page texts in document order. `None` marks a page whose text could not be extracted.
    fn read_pages(&self, path: &Path) -> Result<Vec<Option<String>>, ExtractionError>;
}

pub struct PdfDocumentReader;

impl PdfDocumentReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfDocumentReader {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentReader for PdfDocumentReader {
    fn read_pages(&self, path: &Path) -> Result<Vec<Option<String>>, ExtractionError> {
        let bytes = fs::read(path).map_err(|e| ExtractionError::Open {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let doc = Document::load_mem(&bytes).map_err(|e| ExtractionError::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let pages = doc.get_pages();
        info!("Loaded {} ({} pages)", path.display(), pages.len());

        // get_pages is keyed by page number, so iteration is already in document order
        let texts: Vec<Option<String>> = pages
            .keys()
            .map(|&page_num| match doc.extract_text(&[page_num]) {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!("No text from page {} of {}: {}", page_num, path.display(), e);
                    None
                }
            })
            .collect();

        Ok(texts)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};
    use std::path::PathBuf;

    /// Writes a PDF with one page per entry; each line becomes its own text object.
    pub(crate) fn write_pdf(dir: &Path, name: &str, pages: &[&[&str]]) -> PathBuf {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut kids: Vec<Object> = Vec::new();
        for lines in pages {
            let mut operations = Vec::new();
            for (i, line) in lines.iter().enumerate() {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec!["F1".into(), 10.into()]));
                operations.push(Operation::new(
                    "Td",
                    vec![40.into(), (780 - 14 * i as i64).into()],
                ));
                operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
                operations.push(Operation::new("ET", vec![]));
            }
            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => Object::Array(vec![0.into(), 0.into(), 595.into(), 842.into()]),
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let path = dir.join(name);
        doc.save(&path).unwrap();
        path
    }

    #[test]
    fn reads_pages_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pdf(
            dir.path(),
            "deals.pdf",
            &[
                &["Add this Nike deal which expires on 05/01/25 for a special 20% off"],
                &["Nothing here"],
            ],
        );

        let pages = PdfDocumentReader::new().read_pages(&path).unwrap();
        assert_eq!(pages.len(), 2);
        let first = pages[0].as_deref().unwrap();
        assert!(first.contains("Add this Nike deal which expires on 05/01/25"));
        assert!(pages[1].as_deref().unwrap().contains("Nothing here"));
    }

    #[test]
    fn zero_page_document_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_pdf(dir.path(), "empty.pdf", &[]);
        let pages = PdfDocumentReader::new().read_pages(&path).unwrap();
        assert!(pages.is_empty());
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PdfDocumentReader::new()
            .read_pages(&dir.path().join("absent.pdf"))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Open { .. }));
    }

    #[test]
    fn garbage_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"this is not a pdf").unwrap();
        let err = PdfDocumentReader::new().read_pages(&path).unwrap_err();
        assert!(matches!(err, ExtractionError::Load { .. }));
    }
}
