//! The converter view: one state machine for intake → preview → convert →
//! result/error.
//!
//! The original client shipped five near-identical copies of this logic, one
//! per visual theme. Here the machine exists exactly once, is pure and
//! synchronous, and knows nothing about pdfium, HTTP, or themes: the two
//! asynchronous operations hand back *request* values
//! ([`ThumbnailRequest`], [`UploadRequest`]) that a driver executes, and
//! their completions are applied through explicit methods. That split is what
//! makes every property of the flow unit-testable without I/O.
//!
//! ## Why a generation counter?
//!
//! Thumbnail generation is fire-and-forget, so a slow render for file A can
//! resolve after the user has already picked file B. The original let the
//! last *resolved* task win; this machine stamps every request with a
//! generation number and [`apply_thumbnail`](ConverterView::apply_thumbnail)
//! discards completions whose stamp is stale — last *requested* wins.

use crate::blob::{derive_output_name, Blob};
use crate::config::ClientConfig;
use crate::error::{ConvertError, ViewError};
use crate::pipeline::intake::FileInput;
use crate::pipeline::thumbnail::Thumbnail;
use serde::Serialize;
use tracing::{debug, info, warn};

/// The currently chosen PDF. Exists from selection until replaced or cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub data: Blob,
}

/// A downloadable converted artifact plus its derived output filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub name: String,
    pub data: Blob,
}

/// Record of one past successful conversion, session-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub name: String,
    pub data: Blob,
}

/// A thumbnail task handed to the driver. The generation stamp must be
/// passed back unchanged with the completion.
#[derive(Debug, Clone)]
pub struct ThumbnailRequest {
    pub generation: u64,
    pub data: Blob,
}

/// An upload handed to the driver after `begin_upload` accepted it.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file_name: String,
    pub media_type: String,
    pub data: Blob,
}

/// Serializable read-only picture of the view, for rendering and `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub selected: Option<String>,
    pub thumbnail_px: Option<(u32, u32)>,
    pub result: Option<String>,
    pub error: Option<ViewError>,
    pub loading: bool,
    pub history: Vec<String>,
}

/// The single underlying state machine behind all visual variants.
#[derive(Debug)]
pub struct ConverterView {
    target_extension: String,
    selected: Option<SelectedFile>,
    thumbnail: Option<Thumbnail>,
    result: Option<ConversionResult>,
    error: Option<ViewError>,
    loading: bool,
    generation: u64,
    // Name of the file the in-flight upload was issued for. Captured at
    // `begin_upload` so a selection made mid-upload cannot rename the result.
    pending_upload: Option<String>,
    history: Vec<HistoryEntry>,
}

impl ConverterView {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            target_extension: config.target_extension.clone(),
            selected: None,
            thumbnail: None,
            result: None,
            error: None,
            loading: false,
            generation: 0,
            pending_upload: None,
            history: Vec::new(),
        }
    }

    // ── File intake ───────────────────────────────────────────────────────

    /// Validate and store a selected or dropped file.
    ///
    /// On acceptance the prior error is cleared and a [`ThumbnailRequest`]
    /// with a fresh generation stamp is returned for the driver to run.
    /// On rejection the selection and thumbnail are cleared and the
    /// validation error is surfaced; no request is issued.
    pub fn select_file(&mut self, file: FileInput) -> Option<ThumbnailRequest> {
        if !file.is_pdf() {
            warn!("Rejected non-PDF input '{}'", file.name);
            self.selected = None;
            self.thumbnail = None;
            self.error = Some(ViewError::NotAPdf);
            // Invalidate any render still in flight for the old selection.
            self.generation += 1;
            return None;
        }

        info!("Selected '{}' ({} bytes)", file.name, file.data.len());
        let data = file.data.clone();
        self.selected = Some(SelectedFile {
            name: file.name,
            media_type: file.media_type,
            data: data.clone(),
        });
        self.error = None;
        self.generation += 1;

        Some(ThumbnailRequest {
            generation: self.generation,
            data,
        })
    }

    // ── Thumbnail completion ──────────────────────────────────────────────

    /// Apply a finished thumbnail task.
    ///
    /// Completions stamped with anything but the current generation belong
    /// to a superseded selection (or arrived after a reset) and are dropped.
    /// A failure surfaces the thumbnail error without invalidating the
    /// selected file.
    pub fn apply_thumbnail(&mut self, generation: u64, outcome: Result<Thumbnail, ConvertError>) {
        if generation != self.generation {
            debug!(
                "Discarding stale thumbnail (generation {} != current {})",
                generation, self.generation
            );
            return;
        }

        match outcome {
            Ok(thumb) => {
                debug!("Thumbnail ready: {}x{} px", thumb.width, thumb.height);
                self.thumbnail = Some(thumb);
            }
            Err(e) => {
                warn!("Thumbnail generation failed: {}", e);
                self.error = Some(ViewError::Thumbnail);
            }
        }
    }

    // ── Conversion ────────────────────────────────────────────────────────

    /// Start a conversion if one can start.
    ///
    /// Fails fast with [`ViewError::NoFileSelected`] when nothing is
    /// selected — no request is issued, so the driver makes no network call.
    /// Returns `None` silently while a conversion is already in flight; the
    /// trigger control is disabled in that state and a second click is a
    /// no-op, not an error.
    pub fn begin_upload(&mut self) -> Option<UploadRequest> {
        if self.loading {
            warn!("Ignoring convert while a conversion is in flight");
            return None;
        }

        let Some(selected) = &self.selected else {
            self.error = Some(ViewError::NoFileSelected);
            return None;
        };

        self.error = None;
        self.loading = true;
        self.pending_upload = Some(selected.name.clone());
        Some(UploadRequest {
            file_name: selected.name.clone(),
            media_type: selected.media_type.clone(),
            data: selected.data.clone(),
        })
    }

    /// Apply the outcome of the upload started by `begin_upload`.
    ///
    /// Success replaces the current result (releasing the previous blob
    /// handle) and appends exactly one history entry. The output name is
    /// derived from the file the upload was issued for, so replacing the
    /// selection or resetting while the request is in flight does not
    /// mislabel the artifact. Failure surfaces the generic upload error and
    /// leaves any prior result in place. The loading flag clears in both
    /// arms.
    pub fn finish_upload(&mut self, outcome: Result<Blob, ConvertError>) {
        self.loading = false;
        let uploaded = self.pending_upload.take();

        match outcome {
            Ok(data) => {
                let name = uploaded
                    .map(|n| derive_output_name(&n, &self.target_extension))
                    .unwrap_or_else(|| format!("converted.{}", self.target_extension));

                info!("Conversion succeeded: '{}' ({} bytes)", name, data.len());
                self.history.push(HistoryEntry {
                    name: name.clone(),
                    data: data.clone(),
                });
                self.result = Some(ConversionResult { name, data });
            }
            Err(e) => {
                warn!("Conversion failed: {}", e);
                self.error = Some(ViewError::Upload);
            }
        }
    }

    // ── Delete / reset ────────────────────────────────────────────────────

    /// Unconditionally clear selection, thumbnail, result and error.
    ///
    /// History survives; only `clear_history` empties it. The generation
    /// bump ensures a thumbnail resolving after the reset cannot resurrect
    /// cleared state. An upload already in flight is not cancelled and keeps
    /// the name it was issued with.
    pub fn reset(&mut self) {
        debug!("Resetting view state");
        self.selected = None;
        self.thumbnail = None;
        self.result = None;
        self.error = None;
        self.generation += 1;
    }

    // ── History management ────────────────────────────────────────────────

    /// Empty the history list, releasing every entry's blob handle.
    pub fn clear_history(&mut self) {
        debug!("Clearing {} history entries", self.history.len());
        self.history.clear();
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn thumbnail(&self) -> Option<&Thumbnail> {
        self.thumbnail.as_ref()
    }

    pub fn result(&self) -> Option<&ConversionResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<ViewError> {
        self.error
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Current generation stamp; completions carrying an older stamp are
    /// ignored by [`apply_thumbnail`](Self::apply_thumbnail).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            selected: self.selected.as_ref().map(|s| s.name.clone()),
            thumbnail_px: self.thumbnail.as_ref().map(|t| (t.width, t.height)),
            result: self.result.as_ref().map(|r| r.name.clone()),
            error: self.error,
            loading: self.loading,
            history: self.history.iter().map(|h| h.name.clone()).collect(),
        }
    }
}
