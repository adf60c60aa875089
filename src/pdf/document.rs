use crate::error::{ExtractError, Result};
use crate::pdf::text::{fragments_from_text, TextFragment};
use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeMap;

/// How far into the file a `%PDF-` header may start. Readers tolerate leading junk.
const HEADER_SEARCH_LIMIT: usize = 1024;

/// Check for the `%PDF-` header before handing bytes to the parser.
pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(HEADER_SEARCH_LIMIT)];
    window.windows(5).any(|w| w == b"%PDF-")
}

/// Read access to a loaded PDF, as consumed by the page and text transforms.
///
/// Page indexes are 0-based.
pub trait SourceDocument {
    fn page_count(&self) -> u32;

    fn page_text_content(&self, index: u32) -> Result<Vec<TextFragment>>;
}

pub struct PdfDocument {
    pub doc: Document,
    pages: BTreeMap<u32, ObjectId>,
}

impl PdfDocument {
    /// Parse a PDF held in memory. `name` is only used in error messages.
    pub fn load_mem(bytes: &[u8], name: &str) -> Result<Self> {
        if !looks_like_pdf(bytes) {
            return Err(ExtractError::InvalidFileType(name.to_string()));
        }

        let doc = Document::load_mem(bytes)
            .map_err(|e| ExtractError::UnreadableDocument(format!("{}: {}", name, e)))?;

        if doc.is_encrypted() {
            return Err(ExtractError::UnreadableDocument(format!(
                "{}: encrypted documents are not supported",
                name
            )));
        }

        let pages = doc.get_pages();
        tracing::debug!(name, pages = pages.len(), version = %doc.version, "loaded PDF");

        Ok(PdfDocument { doc, pages })
    }

    /// Object ID of the page at a 0-based index
    pub fn page_id(&self, index: u32) -> Result<ObjectId> {
        let page_num = index.saturating_add(1);
        self.pages.get(&page_num).copied().ok_or_else(|| {
            ExtractError::ExtractionFailure(format!(
                "page {} is out of range (1-{})",
                page_num,
                self.page_count()
            ))
        })
    }

    /// Get metadata from the document info dictionary
    pub fn get_info(&self) -> PdfInfo {
        let mut info = PdfInfo {
            page_count: self.page_count(),
            ..Default::default()
        };

        let dict = match self.doc.trailer.get(b"Info") {
            Ok(Object::Reference(info_ref)) => self.doc.get_dictionary(*info_ref).ok(),
            Ok(Object::Dictionary(dict)) => Some(dict),
            _ => None,
        };

        if let Some(dict) = dict {
            info.title = get_string_from_dict(dict, b"Title");
            info.author = get_string_from_dict(dict, b"Author");
        }

        info
    }
}

impl SourceDocument for PdfDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Text drawn inside Form XObjects (`Do`) is not included.
    fn page_text_content(&self, index: u32) -> Result<Vec<TextFragment>> {
        self.page_id(index)?;
        let page_num = index + 1;

        let text = self.doc.extract_text(&[page_num]).map_err(|e| {
            ExtractError::ExtractionFailure(format!("page {}: {}", page_num, e))
        })?;

        Ok(fragments_from_text(&text))
    }
}

#[derive(Debug, Default, Clone)]
pub struct PdfInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub page_count: u32,
}

fn get_string_from_dict(dict: &lopdf::Dictionary, key: &[u8]) -> Option<String> {
    dict.get(key).ok().and_then(|obj| match obj {
        Object::String(bytes, _) => decode_pdf_string(bytes),
        _ => None,
    })
}

fn decode_pdf_string(bytes: &[u8]) -> Option<String> {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        // UTF-16 BE
        let u16_chars: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
            .collect();
        String::from_utf16(&u16_chars).ok()
    } else {
        // PDFDocEncoding, treated as Latin-1
        Some(bytes.iter().map(|&b| b as char).collect())
    }
}
