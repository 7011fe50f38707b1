//! Upload policies for binary payloads attached to records

use crate::error::DomainError;

const MIB: u64 = 1024 * 1024;

/// Content types that tell us nothing and fall back to the file extension
const GENERIC_CONTENT_TYPES: [&str; 2] = ["application/octet-stream", "binary/octet-stream"];

/// A file received from a client, not yet validated or stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl IncomingFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Lower-cased extension of the client file name
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
    }

    /// Declared content type, or a guess from the file name when the client sent none
    pub fn effective_content_type(&self) -> Option<String> {
        let declared = self
            .content_type
            .as_deref()
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase())
            .filter(|ct| !ct.is_empty() && !GENERIC_CONTENT_TYPES.contains(&ct.as_str()));

        declared.or_else(|| {
            mime_guess::from_path(&self.file_name)
                .first()
                .map(|mime| mime.essence_str().to_string())
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Accept {
    Pdf,
    Image,
}

/// Accepted type and maximum size for one kind of upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    accept: Accept,
    max_mb: u64,
}

impl UploadPolicy {
    /// PDF documents
    pub fn document(max_mb: u64) -> Self {
        Self {
            accept: Accept::Pdf,
            max_mb,
        }
    }

    /// Event images and gallery photos
    pub fn image(max_mb: u64) -> Self {
        Self {
            accept: Accept::Image,
            max_mb,
        }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_mb * MIB
    }

    /// Validate type first, then size
    pub fn check(&self, file: &IncomingFile) -> Result<(), DomainError> {
        let content_type = file.effective_content_type().unwrap_or_default();

        match self.accept {
            Accept::Pdf => {
                if content_type != "application/pdf" {
                    return Err(DomainError::UnsupportedFileType(
                        "Only PDF files are allowed".to_string(),
                    ));
                }
                if file.size() > self.max_bytes() {
                    return Err(DomainError::FileTooLarge(format!(
                        "File size must be less than {}MB",
                        self.max_mb
                    )));
                }
            }
            Accept::Image => {
                if !content_type.starts_with("image/") {
                    return Err(DomainError::UnsupportedFileType(
                        "Only image files are allowed".to_string(),
                    ));
                }
                if file.size() > self.max_bytes() {
                    return Err(DomainError::FileTooLarge(format!(
                        "Image size must be less than {}MB",
                        self.max_mb
                    )));
                }
            }
        }

        if file.bytes.is_empty() {
            return Err(DomainError::validation("Uploaded file is empty"));
        }
        Ok(())
    }
}
