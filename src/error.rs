//! # Error Types
//!
//! This module defines error types used throughout the renglon library.
//!
//! Layout anomalies (missing values, oversized fields, zero widths) are not
//! errors — they degrade to fillers, truncation or unchanged text. Errors are
//! reserved for contract violations between a template and its data-binding
//! code, and for extra items handed data they cannot encode.

use thiserror::Error;

/// Main error type for renglon operations
#[derive(Debug, Error)]
pub enum RenglonError {
    /// A template was composed against the wrong number of field results
    #[error("Field count mismatch: template has {expected} value slots, {supplied} results supplied")]
    FieldCount { expected: usize, supplied: usize },

    /// Barcode data rejected by the symbology's character-set/length rules
    #[error("Invalid {symbology} barcode data: {data:?}")]
    InvalidBarcode { symbology: &'static str, data: String },

    /// QR data empty or too long for the storage command
    #[error("Invalid QR data: {0}")]
    InvalidQr(String),

    /// Item that only makes sense on continuous paper used in a paged report
    #[error("{0} cannot be used in a paged report")]
    NotPageable(&'static str),

    /// Row data that is not valid JSON
    #[error("Invalid row data: {0}")]
    Rows(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
