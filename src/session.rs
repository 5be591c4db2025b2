//! Async driver for the converter view.
//!
//! [`ConverterSession`] gives the pure state machine its runtime shape: one
//! shared view behind a lock, thumbnail tasks spawned fire-and-forget, and a
//! single awaited upload per convert call. All mutation goes through the
//! lock, so the view behaves as if it lived on one UI thread; the lock is
//! never held across an await.
//!
//! Thumbnail completions travel back with the generation stamp they were
//! issued with, and the view drops stale ones — a completion for a
//! superseded selection can never overwrite newer state, no matter how the
//! tasks interleave.

use crate::config::ClientConfig;
use crate::error::ConvertError;
use crate::pipeline::intake::FileInput;
use crate::pipeline::thumbnail;
use crate::pipeline::upload::{ConvertService, HttpConvertService};
use crate::view::{ConversionResult, ConverterView, Snapshot};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

/// A live conversion session: one view, one service, any number of tasks.
pub struct ConverterSession {
    view: Arc<Mutex<ConverterView>>,
    service: Arc<dyn ConvertService>,
    thumbnail_scale: f32,
}

impl ConverterSession {
    /// Create a session from the configuration.
    ///
    /// Uses the injected service when one is configured, otherwise builds the
    /// real HTTP service against `config.endpoint`.
    pub fn new(config: ClientConfig) -> Result<Self, ConvertError> {
        let service: Arc<dyn ConvertService> = match config.service.clone() {
            Some(s) => s,
            None => Arc::new(HttpConvertService::new(&config)?),
        };

        Ok(Self {
            view: Arc::new(Mutex::new(ConverterView::new(&config))),
            service,
            thumbnail_scale: config.thumbnail_scale,
        })
    }

    /// Run file intake and, on acceptance, spawn the thumbnail task.
    ///
    /// Returns the task's `JoinHandle` so callers that care (the CLI, tests)
    /// can await the preview; fire-and-forget callers just drop it.
    pub async fn select_file(&self, file: FileInput) -> Option<JoinHandle<()>> {
        let request = self.view.lock().await.select_file(file)?;

        let view = Arc::clone(&self.view);
        let scale = self.thumbnail_scale;
        Some(tokio::spawn(async move {
            let outcome = thumbnail::generate(request.data, scale).await;
            view.lock().await.apply_thumbnail(request.generation, outcome);
        }))
    }

    /// Run one conversion attempt end to end.
    ///
    /// Returns the new [`ConversionResult`] when this attempt succeeded,
    /// `None` when the view refused to start (no file, already loading) or
    /// the upload failed — in those cases the view's error slot says why.
    pub async fn convert(&self) -> Option<ConversionResult> {
        let request = self.view.lock().await.begin_upload()?;

        debug!("Dispatching conversion of '{}'", request.file_name);
        let outcome = self
            .service
            .convert(&request.file_name, &request.media_type, request.data)
            .await;
        let succeeded = outcome.is_ok();

        let mut view = self.view.lock().await;
        view.finish_upload(outcome);
        if succeeded {
            view.result().cloned()
        } else {
            None
        }
    }

    /// Unconditional reset of the view (history survives).
    pub async fn reset(&self) {
        self.view.lock().await.reset();
    }

    /// Empty the session history.
    pub async fn clear_history(&self) {
        self.view.lock().await.clear_history();
    }

    /// Read-only picture of the current view state.
    pub async fn snapshot(&self) -> Snapshot {
        self.view.lock().await.snapshot()
    }

    /// The current first-page preview, if one has been rendered.
    pub async fn thumbnail(&self) -> Option<crate::pipeline::thumbnail::Thumbnail> {
        self.view.lock().await.thumbnail().cloned()
    }

    /// Save the current result blob under its derived filename in `dir`.
    ///
    /// The download boundary: returns the written path, or `None` when there
    /// is no result to save.
    pub async fn save_result_to(
        &self,
        dir: impl AsRef<std::path::Path>,
    ) -> Result<Option<std::path::PathBuf>, ConvertError> {
        let result = {
            let view = self.view.lock().await;
            view.result().cloned()
        };
        let Some(result) = result else {
            return Ok(None);
        };

        let path = dir.as_ref().join(&result.name);
        result.data.save_to(&path).await?;
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::Blob;
    use crate::error::ViewError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Canned service: fixed reply, counts calls.
    struct StubService {
        reply: Result<Vec<u8>, u16>,
        calls: AtomicUsize,
    }

    impl StubService {
        fn ok(bytes: &[u8]) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(bytes.to_vec()),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(status),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ConvertService for StubService {
        async fn convert(
            &self,
            _file_name: &str,
            _media_type: &str,
            _data: Blob,
        ) -> Result<Blob, ConvertError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(bytes) => Ok(Blob::new(bytes.clone())),
                Err(status) => Err(ConvertError::ServiceStatus { status: *status }),
            }
        }
    }

    fn session_with(service: Arc<StubService>) -> ConverterSession {
        let config = ClientConfig::builder()
            .service(service as Arc<dyn ConvertService>)
            .build()
            .unwrap();
        ConverterSession::new(config).unwrap()
    }

    fn pdf(name: &str) -> FileInput {
        FileInput::new(name, "application/pdf", b"not really a pdf".to_vec())
    }

    #[tokio::test]
    async fn convert_without_file_makes_no_service_call() {
        let stub = StubService::ok(b"deck");
        let session = session_with(Arc::clone(&stub));

        assert!(session.convert().await.is_none());

        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.snapshot().await.error, Some(ViewError::NoFileSelected));
    }

    #[tokio::test]
    async fn successful_convert_returns_result_and_records_history() {
        let stub = StubService::ok(b"PK\x03\x04deck");
        let session = session_with(Arc::clone(&stub));

        let _ = session.select_file(pdf("quarterly report.pdf")).await;
        let result = session.convert().await.expect("conversion succeeds");

        assert_eq!(result.name, "quarterly report.pptx");
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);

        let snap = session.snapshot().await;
        assert_eq!(snap.history, vec!["quarterly report.pptx"]);
        assert!(!snap.loading);
    }

    #[tokio::test]
    async fn failed_convert_surfaces_upload_error_only() {
        let stub = StubService::failing(500);
        let session = session_with(Arc::clone(&stub));

        // Settle the thumbnail task so the error slot is deterministic.
        if let Some(task) = session.select_file(pdf("report.pdf")).await {
            task.await.unwrap();
        }
        assert!(session.convert().await.is_none());

        let snap = session.snapshot().await;
        assert_eq!(snap.error, Some(ViewError::Upload));
        assert!(snap.result.is_none());
        assert!(snap.history.is_empty());
    }

    #[tokio::test]
    async fn thumbnail_failure_does_not_invalidate_selection() {
        // The stub bytes are not a decodable PDF, so the spawned render task
        // fails whether or not a pdfium library is installed on the host.
        let session = session_with(StubService::ok(b"deck"));

        let handle = session
            .select_file(pdf("report.pdf"))
            .await
            .expect("intake accepts the declared type");
        handle.await.expect("task completes");

        let snap = session.snapshot().await;
        assert_eq!(snap.selected.as_deref(), Some("report.pdf"));
        assert!(snap.thumbnail_px.is_none());
        assert_eq!(snap.error, Some(ViewError::Thumbnail));
    }

    #[tokio::test]
    async fn rejected_file_spawns_no_task() {
        let session = session_with(StubService::ok(b"deck"));

        let handle = session
            .select_file(FileInput::new("notes.txt", "text/plain", vec![1u8]))
            .await;

        assert!(handle.is_none());
        assert_eq!(session.snapshot().await.error, Some(ViewError::NotAPdf));
    }

    #[tokio::test]
    async fn save_result_writes_artifact_under_derived_name() {
        let session = session_with(StubService::ok(b"deck-bytes"));
        let _ = session.select_file(pdf("report.pdf")).await;
        session.convert().await.expect("conversion succeeds");

        let dir = tempfile::tempdir().unwrap();
        let path = session
            .save_result_to(dir.path())
            .await
            .expect("save succeeds")
            .expect("a result exists");

        assert_eq!(path.file_name().unwrap(), "report.pptx");
        assert_eq!(std::fs::read(&path).unwrap(), b"deck-bytes");
    }

    #[tokio::test]
    async fn save_result_without_result_is_none() {
        let session = session_with(StubService::ok(b"deck"));
        let dir = tempfile::tempdir().unwrap();
        assert!(session.save_result_to(dir.path()).await.unwrap().is_none());
    }
}
