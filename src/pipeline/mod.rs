//! Pipeline stages for the conversion flow.
//!
//! Each submodule implements exactly one of the view's two asynchronous
//! operations. Keeping them separate from the state machine means the
//! machine stays pure and synchronous while the stages own all I/O.
//!
//! ## Data Flow
//!
//! ```text
//! intake ──▶ thumbnail            (local, CPU-bound, spawn_blocking)
//!    └─────▶ upload ──▶ download  (network-bound, single POST)
//! ```
//!
//! 1. [`intake`]    — validate a selected or dropped file handle
//! 2. [`thumbnail`] — rasterise page 1 via pdfium and encode as PNG
//! 3. [`upload`]    — multipart POST to the conversion service; the only
//!    stage with network I/O

pub mod intake;
pub mod thumbnail;
pub mod upload;
