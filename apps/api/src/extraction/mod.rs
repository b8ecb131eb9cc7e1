//! Document Text Extractor — turns an uploaded resume into one plain string.
//!
//! Dispatch is a registry keyed by `DocumentFormat`. Which formats are registered
//! comes from `ACCEPTED_FORMATS`, so the PDF-only deployment and the PDF+DOCX
//! deployment are the same binary. Parsing is CPU-bound and runs inside
//! `tokio::task::spawn_blocking`.

pub mod docx;
#[cfg(test)]
pub mod fixtures;
pub mod pdf;

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, info};

use self::docx::DocxExtractor;
use self::pdf::PdfExtractor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }

    /// Case-insensitive lookup by bare extension (`"PDF"`, `"docx"`).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for DocumentFormat {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentFormat::from_extension(s.trim()).ok_or_else(|| ExtractError::Unsupported {
            extension: s.trim().to_string(),
            accepted: "pdf, docx".to_string(),
        })
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("'.{extension}' files are not supported; please upload one of: {accepted}")]
    Unsupported { extension: String, accepted: String },

    #[error("could not read the {format} document: {message}")]
    Malformed {
        format: DocumentFormat,
        message: String,
    },

    #[error("no text could be extracted from the {0} document")]
    Empty(DocumentFormat),

    #[error("{0}")]
    Task(String),
}

/// Identity of an upload, used only to decide whether a new upload is a different file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentFingerprint {
    pub file_name: String,
    pub size: usize,
    pub sha256: String,
}

/// Raw upload plus the format it was accepted as.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: String,
    pub format: DocumentFormat,
    pub bytes: Bytes,
}

impl UploadedDocument {
    pub fn fingerprint(&self) -> DocumentFingerprint {
        let mut hasher = Sha256::new();
        hasher.update(&self.bytes);
        DocumentFingerprint {
            file_name: self.file_name.clone(),
            size: self.bytes.len(),
            sha256: hex::encode(hasher.finalize()),
        }
    }
}

/// One format reader. Implementations are synchronous; the registry moves them
/// onto the blocking pool.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

pub struct ExtractorRegistry {
    extractors: HashMap<DocumentFormat, Arc<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    /// Registers the built-in reader for every accepted format.
    pub fn new(accepted: &[DocumentFormat]) -> Self {
        let extractors = accepted
            .iter()
            .map(|format| {
                let extractor: Arc<dyn TextExtractor> = match format {
                    DocumentFormat::Pdf => Arc::new(PdfExtractor),
                    DocumentFormat::Docx => Arc::new(DocxExtractor),
                };
                (*format, extractor)
            })
            .collect();
        Self { extractors }
    }

    /// Accepted formats in a stable order, for error messages and the UI config.
    pub fn accepted_formats(&self) -> Vec<DocumentFormat> {
        let mut formats: Vec<_> = self.extractors.keys().copied().collect();
        formats.sort_by_key(|f| f.extension());
        formats
    }

    /// Validates the file name's extension against the accepted set.
    /// Runs before any parsing, so a rejected upload never reaches the LLM.
    pub fn accept(&self, file_name: &str, bytes: Bytes) -> Result<UploadedDocument, ExtractError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        let format = DocumentFormat::from_extension(extension)
            .filter(|f| self.extractors.contains_key(f))
            .ok_or_else(|| ExtractError::Unsupported {
                extension: extension.to_string(),
                accepted: self
                    .accepted_formats()
                    .iter()
                    .map(|f| f.extension())
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;

        Ok(UploadedDocument {
            file_name: file_name.to_string(),
            format,
            bytes,
        })
    }

    pub async fn extract(&self, document: &UploadedDocument) -> Result<String, ExtractError> {
        let extractor = self
            .extractors
            .get(&document.format)
            .cloned()
            .ok_or_else(|| ExtractError::Unsupported {
                extension: document.format.extension().to_string(),
                accepted: String::new(),
            })?;

        let format = document.format;
        let bytes = document.bytes.clone();
        debug!(%format, size = bytes.len(), "Extracting resume text");

        // Parser panics on malformed input surface here as a JoinError.
        let text = tokio::task::spawn_blocking(move || extractor.extract(&bytes))
            .await
            .map_err(|e| {
                if e.is_panic() {
                    ExtractError::Malformed {
                        format,
                        message: "parser aborted on this file".to_string(),
                    }
                } else {
                    ExtractError::Task(format!("{format} extraction cancelled: {e}"))
                }
            })??;

        if text.trim().is_empty() {
            return Err(ExtractError::Empty(format));
        }

        info!(%format, chars = text.len(), "Resume text extracted");
        Ok(text)
    }
}
