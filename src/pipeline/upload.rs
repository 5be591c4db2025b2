//! Conversion upload: a single multipart POST to the conversion service.
//!
//! ## Why a trait seam?
//!
//! The HTTP call is the one boundary the state machine cannot exercise in a
//! unit test. [`ConvertService`] is the dyn-safe seam: production wires in
//! [`HttpConvertService`], tests wire in a stub that returns canned bytes or
//! a canned failure, and everything above the seam is tested for real.
//!
//! ## Wire contract
//!
//! One multipart field (`file` by default) carrying the PDF bytes with the
//! original filename and media type; the response body is the converted
//! artifact verbatim. No retry, no cancellation — exactly one attempt per
//! call, matching the single user-initiated click it models.

use crate::blob::Blob;
use crate::config::ClientConfig;
use crate::error::ConvertError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};

/// The remote conversion capability the view depends on.
#[async_trait]
pub trait ConvertService: Send + Sync {
    /// Submit one PDF and receive the converted artifact's bytes.
    async fn convert(
        &self,
        file_name: &str,
        media_type: &str,
        data: Blob,
    ) -> Result<Blob, ConvertError>;
}

/// Production implementation: multipart POST via reqwest.
pub struct HttpConvertService {
    client: reqwest::Client,
    endpoint: String,
    field_name: String,
}

impl HttpConvertService {
    /// Build a service from the client configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ConvertError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ConvertError::RequestFailed {
                endpoint: config.endpoint.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            field_name: config.field_name.clone(),
        })
    }
}

#[async_trait]
impl ConvertService for HttpConvertService {
    async fn convert(
        &self,
        file_name: &str,
        media_type: &str,
        data: Blob,
    ) -> Result<Blob, ConvertError> {
        info!(
            "Uploading '{}' ({} bytes) to {}",
            file_name,
            data.len(),
            self.endpoint
        );

        let part = reqwest::multipart::Part::bytes(data.as_bytes().to_vec())
            .file_name(file_name.to_string())
            .mime_str(media_type)
            .map_err(|e| ConvertError::RequestFailed {
                endpoint: self.endpoint.clone(),
                reason: format!("invalid media type '{}': {}", media_type, e),
            })?;

        let form = reqwest::multipart::Form::new().part(self.field_name.clone(), part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ConvertError::RequestFailed {
                endpoint: self.endpoint.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Conversion service answered {}", status);
            return Err(ConvertError::ServiceStatus {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ConvertError::RequestFailed {
                endpoint: self.endpoint.clone(),
                reason: e.to_string(),
            })?;

        if bytes.is_empty() {
            return Err(ConvertError::EmptyResponse);
        }

        debug!("Received {} bytes of converted artifact", bytes.len());
        Ok(Blob::new(bytes.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    #[test]
    fn builds_from_default_config() {
        let service = HttpConvertService::new(&ClientConfig::default()).expect("build");
        assert_eq!(service.endpoint, "http://localhost:5000/convert");
        assert_eq!(service.field_name, "file");
    }

    #[tokio::test]
    async fn connection_failure_collapses_to_request_failed() {
        // Reserved TEST-NET-1 address: nothing listens there.
        let config = ClientConfig::builder()
            .endpoint("http://192.0.2.1:1/convert")
            .request_timeout_secs(1)
            .build()
            .unwrap();
        let service = HttpConvertService::new(&config).unwrap();

        let err = service
            .convert("report.pdf", "application/pdf", Blob::new(b"%PDF".to_vec()))
            .await
            .expect_err("must fail");

        assert!(matches!(err, ConvertError::RequestFailed { .. }), "got: {err:?}");
    }
}
