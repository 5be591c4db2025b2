//! # pdf2pptx
//!
//! Client for a PDF → slide-deck conversion service: validate a chosen PDF,
//! preview its first page as a thumbnail, submit it for conversion, and
//! download the resulting deck — with a session history of past conversions.
//!
//! ## Why this crate?
//!
//! The conversion itself happens on a remote service; everything a client
//! has to get right is state management around two racy asynchronous
//! operations (a CPU-bound preview render and a network-bound upload). This
//! crate implements that flow once, as a headless state machine, so any
//! front end — CLI, desktop shell, web layer — drives the same logic instead
//! of re-implementing it per look.
//!
//! ## Flow Overview
//!
//! ```text
//! file handle
//!  │
//!  ├─ 1. Intake     accept iff declared type is application/pdf
//!  ├─ 2. Preview    rasterise page 1 via pdfium at 0.3× (spawn_blocking)
//!  ├─ 3. Convert    one multipart POST, binary response
//!  ├─ 4. Download   blob saved under name with extension → .pptx
//!  └─ 5. History    append-only session list, explicit clear
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2pptx::{ClientConfig, ConverterSession, FileInput};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::builder()
//!         .endpoint("http://localhost:5000/convert")
//!         .build()?;
//!     let session = ConverterSession::new(config)?;
//!
//!     let bytes = std::fs::read("report.pdf")?;
//!     session
//!         .select_file(FileInput::new("report.pdf", "application/pdf", bytes))
//!         .await;
//!
//!     if let Some(result) = session.convert().await {
//!         println!("converted: {}", result.name);
//!         result.data.save_to(&result.name).await?;
//!     } else if let Some(err) = session.snapshot().await.error {
//!         eprintln!("{err}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2pptx` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pdf2pptx = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod blob;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod session;
pub mod theme;
pub mod view;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use blob::{derive_output_name, Blob};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_ENDPOINT, DEFAULT_THUMBNAIL_SCALE};
pub use error::{ConvertError, ViewError};
pub use pipeline::intake::{FileInput, PDF_MEDIA_TYPE};
pub use pipeline::thumbnail::{init_engine, Thumbnail};
pub use pipeline::upload::{ConvertService, HttpConvertService};
pub use session::ConverterSession;
pub use theme::Theme;
pub use view::{ConversionResult, ConverterView, HistoryEntry, SelectedFile, Snapshot};
