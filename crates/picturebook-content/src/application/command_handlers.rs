//! Command handlers for picture book content.
//!
//! Ingestion parses authored text into a [`RawBook`], compilation validates
//! and freezes it into a [`Book`]. The `load_*` helpers run both steps.

use std::path::Path;

use picturebook_core::error::BookError;

use crate::domain::aggregates::Book;
use crate::domain::raw::RawBook;

/// Parses an authored YAML book.
///
/// # Errors
///
/// Returns `BookError::Parse` if the text is not a well-formed book.
pub fn ingest_yaml(source: &str) -> Result<RawBook, BookError> {
    serde_yaml::from_str(source).map_err(|e| BookError::Parse {
        format: "yaml",
        message: e.to_string(),
    })
}

/// Parses an authored JSON book.
///
/// # Errors
///
/// Returns `BookError::Parse` if the text is not a well-formed book.
pub fn ingest_json(source: &str) -> Result<RawBook, BookError> {
    serde_json::from_str(source).map_err(|e| BookError::Parse {
        format: "json",
        message: e.to_string(),
    })
}

/// Validates and compiles an ingested book.
///
/// # Errors
///
/// Returns `BookError::Content` if the book has an authoring defect.
pub fn compile(raw: RawBook) -> Result<Book, BookError> {
    Book::compile(raw)
}

/// Ingests and compiles a YAML book.
///
/// # Errors
///
/// Returns `BookError` if parsing or validation fails.
pub fn load_book_from_yaml(source: &str) -> Result<Book, BookError> {
    compile(ingest_yaml(source)?)
}

/// Ingests and compiles a JSON book.
///
/// # Errors
///
/// Returns `BookError` if parsing or validation fails.
pub fn load_book_from_json(source: &str) -> Result<Book, BookError> {
    compile(ingest_json(source)?)
}

/// Reads, ingests and compiles a book file, picking the parser from the
/// file extension (`.yaml`, `.yml` or `.json`).
///
/// # Errors
///
/// Returns `BookError::Io` if the file cannot be read,
/// `BookError::UnsupportedFormat` for any other extension, and
/// `BookError::Parse`/`BookError::Content` if the content is malformed.
pub fn load_book_from_path(path: &Path) -> Result<Book, BookError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let source = std::fs::read_to_string(path)?;
    tracing::info!(path = %path.display(), "loading book");
    match extension.as_str() {
        "yaml" | "yml" => load_book_from_yaml(&source),
        "json" => load_book_from_json(&source),
        _ => Err(BookError::UnsupportedFormat(extension)),
    }
}
