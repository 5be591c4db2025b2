//! Thumbnail generation: rasterise page 1 to a PNG preview via pdfium.
//!
//! ## Why spawn_blocking?
//!
//! The `pdfium-render` crate wraps the pdfium C++ library, which uses
//! thread-local state internally and is not safe to call from async contexts.
//! `tokio::task::spawn_blocking` moves the decode/render work onto the
//! blocking thread pool so the Tokio worker threads never stall on a large
//! first page.
//!
//! ## Why a fixed zoom instead of a fixed pixel size?
//!
//! The preview mirrors the page's own aspect ratio: the viewport is the page
//! size in points multiplied by the configured zoom (0.3× by default),
//! exactly the viewport the original client asked its renderer for. A fixed
//! pixel box would letterbox unusual page shapes.

use crate::blob::Blob;
use crate::error::ConvertError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use once_cell::sync::OnceCell;
use pdfium_render::prelude::*;
use std::io::Cursor;
use tracing::{debug, info};

/// Records the first successful engine bind so startup can fail early.
static ENGINE_READY: OnceCell<()> = OnceCell::new();

/// Overrides the library search: directory containing (or full path to) a
/// pdfium library, checked before the system path.
const PDFIUM_LIB_ENV: &str = "PDFIUM_DYNAMIC_LIB_PATH";

/// An encoded raster preview of a document's first page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    /// Rendered width in pixels (page width in points × zoom).
    pub width: u32,
    /// Rendered height in pixels.
    pub height: u32,
    /// PNG-encoded pixels.
    pub png: Blob,
}

impl Thumbnail {
    /// The displayable `data:image/png;base64,…` form of the preview —
    /// what the original client obtained from `canvas.toDataURL()`.
    pub fn to_data_uri(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(self.png.as_bytes()))
    }
}

/// Validate the pdfium engine binding once, process-wide.
///
/// Each render task binds its own handle (document objects borrow the
/// binding, so the blocking task owns both); this records the first
/// successful bind so a host application can surface a missing-library
/// error at startup instead of on the first file selection. Idempotent,
/// no teardown.
pub fn init_engine() -> Result<(), ConvertError> {
    ENGINE_READY.get_or_try_init(|| bind_engine().map(drop)).map(drop)
}

/// Bind to a pdfium library: `PDFIUM_DYNAMIC_LIB_PATH` when set, else the
/// system path, else alongside the executable.
fn bind_engine() -> Result<Pdfium, ConvertError> {
    bind_with_override(std::env::var(PDFIUM_LIB_ENV).ok().as_deref())
}

fn bind_with_override(override_path: Option<&str>) -> Result<Pdfium, ConvertError> {
    if let Some(dir) = override_path {
        // The variable may name the directory or the library file itself.
        return Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
            .or_else(|_| Pdfium::bind_to_library(dir))
            .map(Pdfium::new)
            .map_err(|e| {
                ConvertError::EngineBindFailed(format!("{PDFIUM_LIB_ENV}={dir}: {e:?}"))
            });
    }

    Pdfium::bind_to_system_library()
        .or_else(|_| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        })
        .map(Pdfium::new)
        .map_err(|e| ConvertError::EngineBindFailed(format!("{e:?}")))
}

/// Rasterise the first page of `data` at `scale` and encode it as PNG.
///
/// Runs inside `spawn_blocking`; the caller treats it as fire-and-forget and
/// applies the result to view state when it resolves.
pub async fn generate(data: Blob, scale: f32) -> Result<Thumbnail, ConvertError> {
    tokio::task::spawn_blocking(move || generate_blocking(data.as_bytes(), scale))
        .await
        .map_err(|e| ConvertError::Internal(format!("Thumbnail task panicked: {}", e)))?
}

/// Blocking implementation of thumbnail rendering.
fn generate_blocking(data: &[u8], scale: f32) -> Result<Thumbnail, ConvertError> {
    let pdfium = bind_engine()?;
    let _ = ENGINE_READY.set(());

    let document = pdfium
        .load_pdf_from_byte_slice(data, None)
        .map_err(|e| ConvertError::CorruptPdf {
            detail: format!("{:?}", e),
        })?;

    let pages = document.pages();
    if pages.is_empty() {
        return Err(ConvertError::EmptyDocument);
    }
    info!("PDF decoded: {} pages", pages.len());

    let page = pages.first().map_err(|e| ConvertError::RasterisationFailed {
        detail: format!("{:?}", e),
    })?;

    // Viewport at the fixed zoom: page size in points scaled to pixels.
    let width = (page.width().value * scale).round().max(1.0) as i32;
    let height = (page.height().value * scale).round().max(1.0) as i32;

    let render_config = PdfRenderConfig::new()
        .set_target_width(width)
        .set_target_height(height);

    let image = page
        .render_with_config(&render_config)
        .map_err(|e| ConvertError::RasterisationFailed {
            detail: format!("{:?}", e),
        })?
        .as_image();

    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| ConvertError::EncodingFailed { source: e })?;

    debug!(
        "Rendered page 1 → {}x{} px, {} bytes PNG",
        image.width(),
        image.height(),
        buf.len()
    );

    Ok(Thumbnail {
        width: image.width(),
        height: image.height(),
        png: Blob::new(buf),
    })
}
