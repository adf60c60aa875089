use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("{0} is not a PDF file")]
    InvalidFileType(String),

    #[error("Failed to read PDF: {0}")]
    UnreadableDocument(String),

    #[error("No valid pages in range \"{range}\" (document has {total} page(s))")]
    EmptyOrInvalidRange { range: String, total: u32 },

    #[error("Failed to extract pages: {0}")]
    ExtractionFailure(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
