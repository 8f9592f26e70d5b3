//! Text processing for uploaded documents: upload validation, PDF text
//! extraction and the keyword-frequency analyzer used when no summary is available.

pub mod document;
pub mod keywords;
pub mod validator;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

pub use document::{ExtractionError, PdfTextExtractor, TextExtractor};
pub use keywords::{KeywordAnalyzer, STOPWORDS};
pub use validator::{UploadValidator, ValidationError};
