pub mod builder;
pub mod document;
pub mod text;

#[cfg(test)]
pub mod testing;

pub use builder::PdfBuilder;
pub use document::{PdfDocument, SourceDocument};
