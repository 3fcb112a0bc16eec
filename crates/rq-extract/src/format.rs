use serde::{Deserialize, Serialize};
use std::fmt;

/// All file extensions the extractor accepts, dotted lowercase.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = [".pdf", ".docx", ".doc", ".xlsx", ".xls"];

/// Supported document format, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Doc,
    Xlsx,
    Xls,
}

impl DocumentFormat {
    /// Resolve a dotted extension, case-insensitively. The leading dot
    /// is required; anything outside the closed set is `None`.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            ".pdf" => Some(Self::Pdf),
            ".docx" => Some(Self::Docx),
            ".doc" => Some(Self::Doc),
            ".xlsx" => Some(Self::Xlsx),
            ".xls" => Some(Self::Xls),
            _ => None,
        }
    }

    /// Canonical dotted lowercase extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => ".pdf",
            Self::Docx => ".docx",
            Self::Doc => ".doc",
            Self::Xlsx => ".xlsx",
            Self::Xls => ".xls",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
