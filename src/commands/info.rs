use crate::pipeline::{inspect, SourceFile};
use anyhow::{Context, Result};
use std::path::Path;

pub async fn run<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let source = SourceFile::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let info = inspect(source).await?;

    println!("File: {}", path.display());
    println!("Pages: {}", info.page_count);

    if let Some(title) = &info.title {
        println!("Title: {}", title);
    }
    if let Some(author) = &info.author {
        println!("Author: {}", author);
    }

    Ok(())
}
