/// Upload validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid file type. Only PDFs are allowed.")]
    InvalidExtension { extension: Option<String> },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),
}

/// Checks client-supplied file names before anything touches disk.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    allowed_extensions: Vec<String>,
}

impl Default for UploadValidator {
    fn default() -> Self {
        Self::pdf_only()
    }
}

impl UploadValidator {
    pub fn new(allowed_extensions: Vec<String>) -> Self {
        Self {
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.to_lowercase())
                .collect(),
        }
    }

    pub fn pdf_only() -> Self {
        Self::new(vec!["pdf".to_string()])
    }

    /// Validate file extension (case-insensitive)
    pub fn validate_extension(&self, filename: &str) -> Result<(), ValidationError> {
        if filename.trim().is_empty() {
            return Err(ValidationError::InvalidFilename(
                "file name is empty".to_string(),
            ));
        }

        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase());

        match extension {
            Some(ext) if self.allowed_extensions.contains(&ext) => Ok(()),
            other => Err(ValidationError::InvalidExtension { extension: other }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_extension_any_case() {
        let validator = UploadValidator::pdf_only();
        assert!(validator.validate_extension("resume.pdf").is_ok());
        assert!(validator.validate_extension("RESUME.PDF").is_ok());
        assert!(validator.validate_extension("cv.final.Pdf").is_ok());
        assert!(validator.validate_extension(".pdf").is_ok());
    }

    #[test]
    fn test_other_extensions_rejected() {
        let validator = UploadValidator::pdf_only();
        for name in ["notes.txt", "resume.pdf.exe", "resume", "pdf", ".pdf.docx", "resume.pdf "] {
            assert!(
                matches!(
                    validator.validate_extension(name),
                    Err(ValidationError::InvalidExtension { .. })
                ),
                "expected rejection for {}",
                name
            );
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(matches!(
            UploadValidator::default().validate_extension("  "),
            Err(ValidationError::InvalidFilename(_))
        ));
    }

    #[test]
    fn test_message_is_client_facing() {
        let err = UploadValidator::default()
            .validate_extension("notes.txt")
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid file type. Only PDFs are allowed.");
    }
}
