use crate::error::{ExtractError, Result};
use crate::pdf::text::join_fragments;
use crate::pdf::{PdfBuilder, PdfDocument, SourceDocument};

fn page_index(page: u32) -> Result<u32> {
    page.checked_sub(1).ok_or_else(|| {
        ExtractError::ExtractionFailure("page numbers start at 1".to_string())
    })
}

/// Copy the given 1-based pages, in the given order, into a new PDF and return its bytes.
pub fn extract_pages_as_document(source: &PdfDocument, pages: &[u32]) -> Result<Vec<u8>> {
    let mut builder = PdfBuilder::create_empty();

    for &page in pages {
        let copied = builder.copy_page_from(source, page_index(page)?)?;
        builder.append_page(copied);
    }

    tracing::debug!(pages = builder.page_count(), "serializing extracted document");
    builder.serialize()
}

/// Concatenate the text of the given 1-based pages, each under a `--- Page N ---` marker.
pub fn extract_pages_as_text<S: SourceDocument>(source: &S, pages: &[u32]) -> Result<String> {
    let mut output = String::new();

    for &page in pages {
        let fragments = source.page_text_content(page_index(page)?)?;
        let text = join_fragments(&fragments);
        output.push_str(&format!("--- Page {} ---\n\n{}\n\n", page, text));
    }

    Ok(output)
}
