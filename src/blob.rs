//! In-memory blob references and output-name derivation.
//!
//! ## Why `Arc<[u8]>`?
//!
//! A conversion result is referenced from up to two places at once: the
//! view's current result slot and a history entry. [`Blob`] is a cheap
//! clonable handle over shared immutable bytes, so "releasing" a reference is
//! ordinary drop semantics — when the result slot is replaced and the history
//! is cleared, the last handle drops and the backing memory is freed. Nothing
//! leaks and nothing is freed early, without any explicit registry.

use crate::error::ConvertError;
use std::path::Path;
use tracing::debug;

/// A clonable reference to immutable binary data.
///
/// Equality compares contents; two blobs built from the same bytes compare
/// equal even if allocated separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob(std::sync::Arc<[u8]>);

impl Blob {
    /// Wrap a byte buffer into a shared blob reference.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Blob(bytes.into().into())
    }

    /// The referenced bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Size of the referenced data in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of live handles to this data, including this one.
    ///
    /// Only used by tests to verify that replaced or cleared references are
    /// actually released.
    pub fn handle_count(&self) -> usize {
        std::sync::Arc::strong_count(&self.0)
    }

    /// Write the blob to `path` — the download boundary.
    ///
    /// Atomic write (temp file + rename) so a crash mid-write never leaves a
    /// truncated artifact under the suggested filename.
    pub async fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConvertError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| ConvertError::WriteFailed {
                        path: path.to_path_buf(),
                        source: e,
                    })?;
            }
        }

        let tmp_path = path.with_extension("part");
        tokio::fs::write(&tmp_path, self.as_bytes())
            .await
            .map_err(|e| ConvertError::WriteFailed {
                path: path.to_path_buf(),
                source: e,
            })?;

        tokio::fs::rename(&tmp_path, path)
            .await
            .map_err(|e| ConvertError::WriteFailed {
                path: path.to_path_buf(),
                source: e,
            })?;

        debug!("Saved {} bytes to {}", self.len(), path.display());
        Ok(())
    }
}

impl From<Vec<u8>> for Blob {
    fn from(bytes: Vec<u8>) -> Self {
        Blob::new(bytes)
    }
}

/// Derive the output filename: input name with its final extension replaced.
///
/// Mirrors the original client's `name.replace(/\.[^/.]+$/, "") + ".pptx"`:
/// only a trailing `.ext` (at least one character, no path separator) is
/// stripped, so `archive.tar.pdf` becomes `archive.tar.pptx` and a name
/// without any extension just gains one.
pub fn derive_output_name(input_name: &str, target_extension: &str) -> String {
    let stem = match input_name.rfind('.') {
        Some(pos) => {
            let tail = &input_name[pos + 1..];
            if !tail.is_empty() && !tail.contains('/') {
                &input_name[..pos]
            } else {
                input_name
            }
        }
        None => input_name,
    };
    format!("{stem}.{target_extension}")
}
