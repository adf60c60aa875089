use crate::pipeline::{extract, Artifact, OutputKind, SourceFile};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub async fn run<P: AsRef<Path>>(input: P, pages: &str, output: Option<PathBuf>) -> Result<()> {
    let input = input.as_ref();
    let source = SourceFile::read(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let extraction = extract(source, pages.to_string(), OutputKind::Text).await?;

    match output {
        Some(output) => {
            extraction
                .write_to(&output)
                .await
                .with_context(|| format!("Failed to write text: {}", output.display()))?;
            println!(
                "Wrote text of {} page(s) to {}",
                extraction.pages.len(),
                output.display()
            );
        }
        None => {
            if let Artifact::Text(text) = &extraction.artifact {
                print!("{}", text);
            }
        }
    }

    Ok(())
}
