//! Format dispatch and output normalization.

use crate::backends::{
    LegacyBackend, PaginatedBackend, SpreadsheetBackend, StructuredBackend, StructuredDocument,
    Workbook,
};
use crate::format::{DocumentFormat, SUPPORTED_EXTENSIONS};
use rq_core::{Result, RqError};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Classification of an uploaded file. Never fails; `is_supported`
/// tells the caller whether `extract` would accept it.
#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    pub filename: String,
    pub file_size_mb: f64,
    pub file_extension: String,
    pub is_supported: bool,
}

/// Normalizes heterogeneous document formats into one plain-text
/// shape. Stateless apart from the injected parser backends; safe to
/// share across concurrent requests.
pub struct FileTextExtractor {
    paginated: Arc<dyn PaginatedBackend>,
    structured: Arc<dyn StructuredBackend>,
    legacy: Arc<dyn LegacyBackend>,
    spreadsheet: Arc<dyn SpreadsheetBackend>,
}

impl FileTextExtractor {
    pub fn new(
        paginated: Arc<dyn PaginatedBackend>,
        structured: Arc<dyn StructuredBackend>,
        legacy: Arc<dyn LegacyBackend>,
        spreadsheet: Arc<dyn SpreadsheetBackend>,
    ) -> Self {
        Self {
            paginated,
            structured,
            legacy,
            spreadsheet,
        }
    }

    /// Extract normalized text from `bytes` according to the dotted
    /// file extension. An unrecognized extension fails before any
    /// backend runs; a backend failure is rewrapped with its cause
    /// text preserved. An empty result is a valid result.
    pub fn extract(&self, bytes: &[u8], extension: &str) -> Result<String> {
        let format = DocumentFormat::from_extension(extension).ok_or_else(|| {
            RqError::UnsupportedFormat {
                extension: extension.to_string(),
            }
        })?;
        debug!(format = %format, size = bytes.len(), "extracting text");

        let wrap = |cause: anyhow::Error| RqError::ExtractionFailure {
            format: format.to_string(),
            cause: cause.to_string(),
        };

        match format {
            DocumentFormat::Pdf => {
                let pages = self.paginated.extract_pages(bytes).map_err(wrap)?;
                Ok(normalize_pages(&pages))
            }
            DocumentFormat::Docx => {
                let doc = self.structured.parse_document(bytes).map_err(wrap)?;
                Ok(normalize_structured(&doc))
            }
            DocumentFormat::Doc => {
                let raw = self.legacy.extract_raw_text(bytes).map_err(wrap)?;
                Ok(raw.trim().to_string())
            }
            DocumentFormat::Xlsx | DocumentFormat::Xls => {
                let workbook = self.spreadsheet.load_workbook(bytes).map_err(wrap)?;
                Ok(normalize_workbook(&workbook))
            }
        }
    }

    /// Size gate, boundary inclusive. Not called by `extract`; the
    /// upload boundary decides when to enforce it.
    pub fn validate_size(bytes: &[u8], max_size_mb: u64) -> bool {
        bytes.len() as u64 <= max_size_mb * 1024 * 1024
    }

    /// Classify a file without extracting anything.
    pub fn describe(bytes: &[u8], filename: &str) -> FileInfo {
        let size_mb = bytes.len() as f64 / (1024.0 * 1024.0);
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();
        let is_supported = DocumentFormat::from_extension(&format!(".{extension}")).is_some();
        FileInfo {
            filename: filename.to_string(),
            file_size_mb: (size_mb * 100.0).round() / 100.0,
            file_extension: extension,
            is_supported,
        }
    }

    /// Supported dotted extensions, for error messages.
    pub fn supported_extensions() -> &'static [&'static str] {
        &SUPPORTED_EXTENSIONS
    }
}

/// One newline after every page, leading/trailing whitespace trimmed.
fn normalize_pages(pages: &[String]) -> String {
    let mut text = String::new();
    for page in pages {
        text.push_str(page);
        text.push('\n');
    }
    text.trim().to_string()
}

/// Paragraphs one per line in document order, then every table row as
/// tab-joined cells, one row per line.
fn normalize_structured(doc: &StructuredDocument) -> String {
    let mut lines: Vec<String> = doc.paragraphs.clone();
    for table in &doc.tables {
        for row in &table.rows {
            lines.push(row.join("\t"));
        }
    }
    lines.join("\n").trim().to_string()
}

/// Per sheet: a header line naming the sheet, then each row's non-empty
/// cells tab-joined (rows that filter to nothing are skipped), then a
/// blank line.
fn normalize_workbook(workbook: &Workbook) -> String {
    let mut text = String::new();
    for sheet in &workbook.sheets {
        text.push_str(&format!("Sheet: {}\n", sheet.name));
        for row in &sheet.rows {
            let cells: Vec<&str> = row.iter().flatten().map(String::as_str).collect();
            if !cells.is_empty() {
                text.push_str(&cells.join("\t"));
                text.push('\n');
            }
        }
        text.push('\n');
    }
    text.trim().to_string()
}
