use crate::pipeline::{extract, OutputKind, SourceFile};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Write the selected pages to a new PDF and return where it went.
pub async fn run<P: AsRef<Path>>(
    input: P,
    pages: &str,
    output: Option<PathBuf>,
    output_dir: &Path,
) -> Result<PathBuf> {
    let input = input.as_ref();
    let source = SourceFile::read(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let extraction = extract(source, pages.to_string(), OutputKind::Document).await?;

    let output = output.unwrap_or_else(|| output_dir.join(&extraction.file_name));
    extraction
        .write_to(&output)
        .await
        .with_context(|| format!("Failed to save PDF: {}", output.display()))?;

    println!(
        "Extracted {} of {} page(s) to {}",
        extraction.pages.len(),
        extraction.total_pages,
        output.display()
    );

    Ok(output)
}
