//! File intake: validate a user-selected or dropped file handle.
//!
//! The contract is deliberately exactly the original's: a file is accepted
//! iff its *declared* media type is `application/pdf`. No sniffing of magic
//! bytes — a mislabelled PDF is rejected, a mislabelled JPEG is accepted and
//! fails later in the thumbnail stage, which is where the original surfaced
//! it too. Intake is the only place the declared type is consulted.

use crate::blob::Blob;
use tracing::debug;

/// The PDF media type — the one and only accepted declared type.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// A file handle as produced by a picker or a drop event:
/// binary payload, declared media type, and original name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInput {
    pub name: String,
    pub media_type: String,
    pub data: Blob,
}

impl FileInput {
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        data: impl Into<Blob>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            data: data.into(),
        }
    }

    /// Whether the declared media type is exactly the PDF media type.
    pub fn is_pdf(&self) -> bool {
        let ok = self.media_type == PDF_MEDIA_TYPE;
        if !ok {
            debug!(
                "Rejecting '{}': declared media type '{}' is not '{}'",
                self.name, self.media_type, PDF_MEDIA_TYPE
            );
        }
        ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(media_type: &str) -> FileInput {
        FileInput::new("report.pdf", media_type, b"%PDF-1.7".to_vec())
    }

    #[test]
    fn accepts_exact_pdf_media_type() {
        assert!(file("application/pdf").is_pdf());
    }

    #[test]
    fn rejects_other_media_types() {
        assert!(!file("image/png").is_pdf());
        assert!(!file("application/octet-stream").is_pdf());
        assert!(!file("").is_pdf());
    }

    #[test]
    fn rejects_parameterised_media_type() {
        // Exact match only; "application/pdf; charset=x" is not accepted.
        assert!(!file("application/pdf; charset=binary").is_pdf());
        assert!(!file("Application/PDF").is_pdf());
    }
}
