//! Text extraction for reqsmith.
//!
//! Dispatches uploaded document bytes to a format-specific parser
//! backend and normalizes the output into a single plain-text shape.

pub mod backends;
pub mod extractor;
pub mod format;

pub use backends::{
    LegacyBackend, PaginatedBackend, Sheet, SpreadsheetBackend, StructuredBackend,
    StructuredDocument, TableData, Workbook,
};
pub use extractor::{FileInfo, FileTextExtractor};
pub use format::DocumentFormat;
