//! Document text extraction

mod extractor;

pub use extractor::{ExtractionError, PdfTextExtractor, TextExtractor};
