use crate::error::{ExtractError, Result};
use crate::page_range::{parse_range, range_descriptor};
use crate::pdf::document::PdfInfo;
use crate::pdf::{PdfDocument, SourceDocument};
use crate::transform::{extract_pages_as_document, extract_pages_as_text};
use std::path::Path;

/// A PDF as handed over by a front end: its file name and raw bytes.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub async fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(SourceFile { name, bytes })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Document,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    Document(Vec<u8>),
    Text(String),
}

impl Artifact {
    pub fn extension(&self) -> &'static str {
        match self {
            Artifact::Document(_) => "pdf",
            Artifact::Text(_) => "txt",
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Artifact::Document(bytes) => bytes.as_slice(),
            Artifact::Text(text) => text.as_bytes(),
        }
    }
}

/// The result of one extraction, ready for delivery
#[derive(Debug, Clone)]
pub struct Extraction {
    pub artifact: Artifact,
    pub pages: Vec<u32>,
    pub total_pages: u32,
    /// Suggested name, `<base>_pages_<descriptor>.<ext>`
    pub file_name: String,
}

impl Extraction {
    pub async fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        tokio::fs::write(path, self.artifact.as_bytes()).await?;
        Ok(())
    }
}

/// Parse `range` against `source` and produce a new PDF or a text dump of the selected pages.
///
/// The work runs on the blocking pool. Pages are processed one at a time and the first failure
/// aborts the whole extraction.
pub async fn extract(source: SourceFile, range: String, kind: OutputKind) -> Result<Extraction> {
    tokio::task::spawn_blocking(move || extract_blocking(&source, &range, kind))
        .await
        .map_err(|e| ExtractError::ExtractionFailure(format!("extraction task failed: {}", e)))?
}

/// Load `source` and read its page count and metadata.
pub async fn inspect(source: SourceFile) -> Result<PdfInfo> {
    tokio::task::spawn_blocking(move || {
        PdfDocument::load_mem(&source.bytes, &source.name).map(|doc| doc.get_info())
    })
    .await
    .map_err(|e| ExtractError::ExtractionFailure(format!("inspection task failed: {}", e)))?
}

fn extract_blocking(source: &SourceFile, range: &str, kind: OutputKind) -> Result<Extraction> {
    let doc = PdfDocument::load_mem(&source.bytes, &source.name)?;
    let total_pages = doc.page_count();

    let pages = parse_range(range, total_pages);
    if pages.is_empty() {
        return Err(ExtractError::EmptyOrInvalidRange {
            range: range.to_string(),
            total: total_pages,
        });
    }

    tracing::debug!(
        name = %source.name,
        ?kind,
        selected = pages.len(),
        total_pages,
        "extracting pages"
    );

    let artifact = match kind {
        OutputKind::Document => Artifact::Document(extract_pages_as_document(&doc, &pages)?),
        OutputKind::Text => Artifact::Text(extract_pages_as_text(&doc, &pages)?),
    };
    let file_name = output_file_name(&source.name, &pages, total_pages, artifact.extension());

    Ok(Extraction {
        artifact,
        pages,
        total_pages,
        file_name,
    })
}

/// Name for a delivered artifact, e.g. `report_pages_2-4,7.pdf` or `report_pages_all.txt`
pub fn output_file_name(source_name: &str, pages: &[u32], total_pages: u32, ext: &str) -> String {
    format!(
        "{}_pages_{}.{}",
        base_name(source_name),
        range_descriptor(pages, total_pages),
        ext
    )
}

fn base_name(name: &str) -> &str {
    let cut = name.len().saturating_sub(4);
    match name.get(cut..) {
        Some(ext) if cut > 0 && ext.eq_ignore_ascii_case(".pdf") => &name[..cut],
        _ => name,
    }
}
