//! Configuration for the conversion client.
//!
//! All behaviour is controlled through [`ClientConfig`], built via its
//! [`ClientConfigBuilder`]. The original client hard-coded every one of these
//! values (endpoint origin, 0.3× zoom, `.pptx`, the `file` field name);
//! keeping them in one struct preserves those literals as defaults while
//! letting tests and deployments override them without touching the pipeline.
//!
//! # Design choice: builder over constructor
//! Callers set only what they care about and rely on documented defaults for
//! the rest; adding a field later does not break existing call sites.

use crate::error::ConvertError;
use crate::pipeline::upload::ConvertService;
use std::fmt;
use std::sync::Arc;

/// Default conversion endpoint — the fixed local origin of the original client.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/convert";

/// Default viewport zoom for the page-1 thumbnail.
pub const DEFAULT_THUMBNAIL_SCALE: f32 = 0.3;

/// Configuration for a conversion session.
///
/// # Example
/// ```rust
/// use pdf2pptx::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .endpoint("http://127.0.0.1:8080/convert")
///     .thumbnail_scale(0.5)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// URL the PDF is POSTed to. Default: [`DEFAULT_ENDPOINT`].
    pub endpoint: String,

    /// Zoom factor for the first-page thumbnail viewport. Default: 0.3.
    ///
    /// 0.3× of a US-Letter page yields a ~180 × 238 px preview — large enough
    /// to recognise the page, small enough to encode in a few milliseconds.
    /// Values above 4.0 are rejected by the builder; a preview has no use for
    /// a poster-sized render.
    pub thumbnail_scale: f32,

    /// Extension given to the converted artifact. Default: `"pptx"`.
    pub target_extension: String,

    /// Name of the multipart field carrying the PDF. Default: `"file"`.
    ///
    /// Must match what the conversion service reads from the form; the
    /// reference service returns HTTP 400 for any other field name.
    pub field_name: String,

    /// Upload timeout in seconds. Default: 120.
    ///
    /// The conversion service rasterises every page before answering, so slow
    /// responses are normal for large decks. The timeout exists to bound the
    /// single attempt, not to trigger a retry — there is none.
    pub request_timeout_secs: u64,

    /// Pre-constructed conversion service. Takes precedence over `endpoint`.
    ///
    /// The injectable seam: tests substitute a stub here so the full
    /// intake → preview → convert flow runs without a network.
    pub service: Option<Arc<dyn ConvertService>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            thumbnail_scale: DEFAULT_THUMBNAIL_SCALE,
            target_extension: "pptx".to_string(),
            field_name: "file".to_string(),
            request_timeout_secs: 120,
            service: None,
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("thumbnail_scale", &self.thumbnail_scale)
            .field("target_extension", &self.target_extension)
            .field("field_name", &self.field_name)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("service", &self.service.as_ref().map(|_| "<dyn ConvertService>"))
            .finish()
    }
}

impl ClientConfig {
    /// Create a new builder for `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ClientConfig`].
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    pub fn thumbnail_scale(mut self, scale: f32) -> Self {
        self.config.thumbnail_scale = scale;
        self
    }

    pub fn target_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.target_extension = ext.into();
        self
    }

    pub fn field_name(mut self, name: impl Into<String>) -> Self {
        self.config.field_name = name.into();
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    pub fn service(mut self, service: Arc<dyn ConvertService>) -> Self {
        self.config.service = Some(service);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ClientConfig, ConvertError> {
        let c = &self.config;
        if c.endpoint.trim().is_empty() {
            return Err(ConvertError::InvalidConfig("Endpoint must not be empty".into()));
        }
        if !(c.thumbnail_scale > 0.0 && c.thumbnail_scale <= 4.0) {
            return Err(ConvertError::InvalidConfig(format!(
                "Thumbnail scale must be in (0, 4], got {}",
                c.thumbnail_scale
            )));
        }
        if c.target_extension.is_empty() || c.target_extension.starts_with('.') {
            return Err(ConvertError::InvalidConfig(format!(
                "Target extension must be bare (no dot), got '{}'",
                c.target_extension
            )));
        }
        Ok(self.config)
    }
}
