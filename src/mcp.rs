use anyhow::Result;
use rmcp::{
    ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::pipeline::{extract, inspect, Artifact, OutputKind, SourceFile};

// Request structs for tools

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PathRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfReadPagesRequest {
    #[schemars(description = "Path to the PDF file")]
    pub path: String,
    #[schemars(description = "Pages to read (e.g., '1, 3, 5-10, 15')")]
    pub pages: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct PdfExtractRequest {
    #[schemars(description = "Path to the source PDF file")]
    pub path: String,
    #[schemars(description = "Pages to keep (e.g., '1, 3, 5-10, 15')")]
    pub pages: String,
    #[schemars(
        description = "Output file path (default: <name>_pages_<range>.pdf next to the source)"
    )]
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PdfServer {
    tool_router: ToolRouter<Self>,
}

impl PdfServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }
}

impl Default for PdfServer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("Error: {}", e))
}

#[tool_router]
impl PdfServer {
    #[tool(description = "Get the page count, title and author of a PDF")]
    async fn pdf_info(&self, Parameters(PathRequest { path }): Parameters<PathRequest>) -> String {
        let source = match SourceFile::read(&path).await {
            Ok(s) => s,
            Err(e) => return format!("Error: {}", e),
        };

        match inspect(source).await {
            Ok(info) => to_json(&PdfInfoResult {
                path,
                page_count: info.page_count,
                title: info.title,
                author: info.author,
            }),
            Err(e) => format!("Error: {}", e),
        }
    }

    #[tool(description = "Extract the text of selected pages of a PDF. Pages use syntax like '1, 3, 5-10'; invalid or out-of-range entries are ignored.")]
    async fn pdf_read_pages(&self, Parameters(req): Parameters<PdfReadPagesRequest>) -> String {
        let source = match SourceFile::read(&req.path).await {
            Ok(s) => s,
            Err(e) => return format!("Error: {}", e),
        };

        match extract(source, req.pages, OutputKind::Text).await {
            Ok(extraction) => {
                let text = match extraction.artifact {
                    Artifact::Text(text) => text,
                    Artifact::Document(_) => {
                        return "Error: text extraction produced a PDF".to_string();
                    }
                };
                to_json(&ReadPagesResult {
                    pages: extraction.pages,
                    total_pages: extraction.total_pages,
                    text,
                })
            }
            Err(e) => format!("Error: {}", e),
        }
    }

    #[tool(description = "Copy selected pages of a PDF into a new PDF file. Pages use syntax like '1, 3, 5-10'; invalid or out-of-range entries are ignored.")]
    async fn pdf_extract(&self, Parameters(req): Parameters<PdfExtractRequest>) -> String {
        let source = match SourceFile::read(&req.path).await {
            Ok(s) => s,
            Err(e) => return format!("Error: {}", e),
        };

        let extraction = match extract(source, req.pages, OutputKind::Document).await {
            Ok(e) => e,
            Err(e) => return format!("Error: {}", e),
        };

        let output = match req.output {
            Some(output) => PathBuf::from(output),
            None => Path::new(&req.path)
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(&extraction.file_name),
        };

        if let Err(e) = extraction.write_to(&output).await {
            return format!("Error: {}", e);
        }

        to_json(&ExtractResult {
            output_path: output.display().to_string(),
            file_name: extraction.file_name,
            pages: extraction.pages,
        })
    }
}

// Result types for MCP tools

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct PdfInfoResult {
    pub path: String,
    pub page_count: u32,
    pub title: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ReadPagesResult {
    pub pages: Vec<u32>,
    pub total_pages: u32,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ExtractResult {
    pub output_path: String,
    pub file_name: String,
    pub pages: Vec<u32>,
}

#[tool_handler]
impl ServerHandler for PdfServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Cut pages out of local PDF files. Use pdf_info for the page count, \
                 pdf_read_pages to get the text of selected pages, and pdf_extract to write \
                 selected pages to a new PDF."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

pub async fn run_server() -> Result<()> {
    let server = PdfServer::new();
    tracing::info!("serving MCP tools over stdio");

    let service = server.serve((tokio::io::stdin(), tokio::io::stdout())).await?;

    service.waiting().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::testing::sample_pdf;
    use rmcp::model::CallToolRequestParams;

    #[tokio::test]
    async fn test_pdf_read_pages() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.pdf");
        std::fs::write(&input, sample_pdf(4)).unwrap();

        let server = PdfServer::new();
        let json = server
            .pdf_read_pages(Parameters(PdfReadPagesRequest {
                path: input.display().to_string(),
                pages: "4,1".to_string(),
            }))
            .await;
        let result: ReadPagesResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result.pages, vec![1, 4]);
        assert_eq!(result.total_pages, 4);
        assert!(result.text.starts_with("--- Page 1 ---"));
    }

    #[tokio::test]
    async fn test_pdf_extract_default_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.pdf");
        std::fs::write(&input, sample_pdf(4)).unwrap();

        let server = PdfServer::new();
        let json = server
            .pdf_extract(Parameters(PdfExtractRequest {
                path: input.display().to_string(),
                pages: "1-4".to_string(),
                output: None,
            }))
            .await;
        let result: ExtractResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result.file_name, "doc_pages_all.pdf");
        assert!(dir.path().join("doc_pages_all.pdf").exists());
    }

    #[tokio::test]
    async fn test_tools_served_over_transport() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join("doc.pdf");
        std::fs::write(&input, sample_pdf(3))?;

        let (server_transport, client_transport) = tokio::io::duplex(64 * 1024);
        let server_handle = tokio::spawn(async move {
            PdfServer::new().serve(server_transport).await?.waiting().await?;
            anyhow::Ok(())
        });
        let client = ().serve(client_transport).await?;

        let mut names: Vec<String> = client
            .list_all_tools()
            .await?
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["pdf_extract", "pdf_info", "pdf_read_pages"]);

        let result = client
            .call_tool(CallToolRequestParams {
                meta: None,
                name: "pdf_read_pages".into(),
                arguments: Some(
                    serde_json::json!({
                        "path": input.display().to_string(),
                        "pages": "3, 1",
                    })
                    .as_object()
                    .unwrap()
                    .clone(),
                ),
                task: None,
            })
            .await?;
        let json = result
            .content
            .first()
            .and_then(|content| content.raw.as_text())
            .map(|text| text.text.clone())
            .expect("text content");
        let pages: ReadPagesResult = serde_json::from_str(&json)?;
        assert_eq!(pages.pages, vec![1, 3]);
        assert_eq!(pages.total_pages, 3);
        assert!(pages.text.contains("--- Page 3 ---\n\nPage 3 heading"));

        client.cancel().await?;
        server_handle.await??;
        Ok(())
    }

    #[tokio::test]
    async fn test_errors_are_reported_as_text() {
        let server = PdfServer::new();
        let reply = server
            .pdf_info(Parameters(PathRequest {
                path: "/nonexistent/missing.pdf".to_string(),
            }))
            .await;
        assert!(reply.starts_with("Error: "));
    }
}
