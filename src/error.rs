//! Error types for the pdf2pptx library.
//!
//! Two distinct error types reflect two distinct audiences:
//!
//! * [`ConvertError`] — **Internal**: what actually went wrong (engine bind
//!   failure, corrupt PDF, HTTP 500, …). Returned by the pipeline functions
//!   and logged via `tracing`; never shown to the user verbatim.
//!
//! * [`ViewError`] — **User-visible**: the single non-blocking inline message
//!   the converter view surfaces. Exactly four variants, one per message the
//!   UI can show. Every upload failure, whatever its cause, collapses to
//!   [`ViewError::Upload`]; the detail survives only in the log.
//!
//! The separation keeps the view's error slot trivially comparable and
//! clonable while the pipeline retains full diagnostic fidelity.

use std::path::PathBuf;
use thiserror::Error;

/// Internal failure causes for the conversion pipeline.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Rendering errors ──────────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\
         Set PDFIUM_DYNAMIC_LIB_PATH or install libpdfium on the system path."
    )]
    EngineBindFailed(String),

    /// The byte buffer could not be decoded as a PDF document.
    #[error("Could not decode PDF document: {detail}")]
    CorruptPdf { detail: String },

    /// The document decoded but contains no pages to preview.
    #[error("PDF document has no pages")]
    EmptyDocument,

    /// pdfium returned an error while rasterising the first page.
    #[error("Rasterisation of page 1 failed: {detail}")]
    RasterisationFailed { detail: String },

    /// The rendered bitmap could not be encoded as PNG.
    #[error("Thumbnail encoding failed: {source}")]
    EncodingFailed {
        #[source]
        source: image::ImageError,
    },

    // ── Upload errors ─────────────────────────────────────────────────────
    /// The multipart request could not be constructed or sent.
    #[error("Conversion request to '{endpoint}' failed: {reason}")]
    RequestFailed { endpoint: String, reason: String },

    /// The service answered with a non-success status code.
    #[error("Conversion service returned HTTP {status}")]
    ServiceStatus { status: u16 },

    /// The service answered 2xx but the body was unusable.
    #[error("Conversion service returned an empty response body")]
    EmptyResponse,

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not write a downloaded artifact or thumbnail to disk.
    #[error("Failed to write '{path}': {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error (task panic, runtime failure).
    #[error("Internal error: {0}")]
    Internal(String),
}

/// The inline message shown by the converter view.
///
/// Display strings match the original UI wording so downstream consumers can
/// render them directly. All variants are local and recoverable: the next
/// relevant action overwrites the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum ViewError {
    /// Selected or dropped input is not a PDF.
    #[error("Please upload a valid PDF file.")]
    NotAPdf,

    /// Decode or render of page 1 failed.
    #[error("Failed to generate thumbnail.")]
    Thumbnail,

    /// The conversion request failed or returned an unusable response.
    #[error("Upload failed.")]
    Upload,

    /// Convert was triggered with no file selected.
    #[error("Select a PDF file first!")]
    NoFileSelected,
}
