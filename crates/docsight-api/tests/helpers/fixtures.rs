//! Test fixtures: PDFs with known text and multipart forms wrapping them.

use axum_test::multipart::{MultipartForm, Part};

use docsight_processing::fixtures::create_text_pdf;

/// Multipart form with a single `file` field.
pub fn file_form(filename: &str, mime_type: &str, data: Vec<u8>) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from(data))
        .file_name(filename.to_string())
        .mime_type(mime_type.to_string());
    MultipartForm::new().add_part("file", part)
}

/// Multipart form carrying a one-page PDF with the given text.
pub fn pdf_form(filename: &str, text: &str) -> MultipartForm {
    file_form(filename, "application/pdf", create_text_pdf(text))
}
