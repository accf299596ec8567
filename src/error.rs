//! # Error Types
//!
//! This module defines error types used throughout the etiqueta library.
//!
//! Most of the pipeline degrades locally instead of erroring: a malformed
//! shape renders as an empty group, a QR or barcode that fails to encode
//! keeps its placeholder. Only input parsing and PDF conversion can fail a
//! whole call, so those are the variants here.

use thiserror::Error;

/// Main error type for etiqueta operations
#[derive(Debug, Error)]
pub enum EtiquetaError {
    /// Malformed or unreadable label template
    #[error("Template error: {0}")]
    Template(String),

    /// SVG to PDF conversion failed (fatal to the export call)
    #[error("PDF conversion failed: {0}")]
    PdfConversion(String),

    /// Server-level errors (bind, listener I/O)
    #[error("Server error: {0}")]
    Server(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
