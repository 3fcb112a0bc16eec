//! Seams for the low-level binary parsers.
//!
//! The extractor never parses binary formats itself; it hands the raw
//! bytes to one of these backends and normalizes whatever comes back.
//! Implementations wrap the actual parser libraries and are injected
//! into [`crate::FileTextExtractor`] at construction.

use anyhow::Result;

/// Structured document: paragraphs in order, then tables in order.
#[derive(Debug, Clone, Default)]
pub struct StructuredDocument {
    pub paragraphs: Vec<String>,
    pub tables: Vec<TableData>,
}

/// One table, rows of already-textual cells.
#[derive(Debug, Clone, Default)]
pub struct TableData {
    pub rows: Vec<Vec<String>>,
}

/// A spreadsheet workbook in sheet order.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

/// One sheet. Cells are pre-stringified; `None` is an empty cell.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Option<String>>>,
}

/// Parser for paginated documents (PDF).
pub trait PaginatedBackend: Send + Sync {
    /// Extract per-page text, in page order.
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>>;
}

/// Parser for structured documents with paragraphs and tables (DOCX).
pub trait StructuredBackend: Send + Sync {
    fn parse_document(&self, bytes: &[u8]) -> Result<StructuredDocument>;
}

/// Converter for legacy documents that only yields raw text (DOC).
pub trait LegacyBackend: Send + Sync {
    fn extract_raw_text(&self, bytes: &[u8]) -> Result<String>;
}

/// Parser for tabular spreadsheets (XLSX/XLS).
pub trait SpreadsheetBackend: Send + Sync {
    fn load_workbook(&self, bytes: &[u8]) -> Result<Workbook>;
}
