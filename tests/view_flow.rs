//! Integration tests for the full intake → preview → convert → download flow.
//!
//! The conversion service is stubbed through the `ConvertService` seam, so
//! the whole suite runs without a network and without a pdfium library.
//! Thumbnail rasterisation itself is covered by the engine-gated test in the
//! thumbnail module; here its *state effects* are exercised via the view.

use async_trait::async_trait;
use pdf2pptx::{
    Blob, ClientConfig, ConvertError, ConvertService, ConverterSession, ConverterView, FileInput,
    Theme, ViewError,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ── Test doubles ─────────────────────────────────────────────────────────────

/// Service double with a scriptable reply queue and call recording.
struct ScriptedService {
    replies: Mutex<Vec<Result<Vec<u8>, ConvertError>>>,
    calls: AtomicUsize,
    last_file_name: Mutex<Option<String>>,
}

impl ScriptedService {
    fn new(replies: Vec<Result<Vec<u8>, ConvertError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies),
            calls: AtomicUsize::new(0),
            last_file_name: Mutex::new(None),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConvertService for ScriptedService {
    async fn convert(
        &self,
        file_name: &str,
        _media_type: &str,
        _data: Blob,
    ) -> Result<Blob, ConvertError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_file_name.lock().unwrap() = Some(file_name.to_string());
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err(ConvertError::Internal("script exhausted".into()));
        }
        replies.remove(0).map(Blob::new)
    }
}

fn session(service: Arc<ScriptedService>) -> ConverterSession {
    let config = ClientConfig::builder()
        .service(service as Arc<dyn ConvertService>)
        .build()
        .expect("valid config");
    ConverterSession::new(config).expect("session builds")
}

fn pdf(name: &str) -> FileInput {
    FileInput::new(name, "application/pdf", b"%PDF-1.7 stub".to_vec())
}

/// Select a file and wait for its thumbnail task (if any) to settle, so
/// assertions about the error slot are deterministic. The stub bytes are not
/// a real PDF, so a settled task has recorded a thumbnail error — which the
/// next convert clears, exactly as in the live flow.
async fn select_and_settle(s: &ConverterSession, file: FileInput) {
    if let Some(task) = s.select_file(file).await {
        task.await.expect("thumbnail task completes");
    }
}

// ── Intake properties ────────────────────────────────────────────────────────

#[tokio::test]
async fn non_pdf_input_leaves_no_file_and_sets_validation_error() {
    let s = session(ScriptedService::new(vec![]));

    for (name, media_type) in [
        ("photo.jpg", "image/jpeg"),
        ("deck.pptx", "application/vnd.openxmlformats-officedocument.presentationml.presentation"),
        ("report.pdf", "application/octet-stream"),
    ] {
        let _ = s.select_file(FileInput::new(name, media_type, vec![1u8])).await;
        let snap = s.snapshot().await;
        assert!(snap.selected.is_none(), "{name} must be rejected");
        assert!(snap.thumbnail_px.is_none());
        assert_eq!(snap.error, Some(ViewError::NotAPdf));
    }
}

#[test]
fn valid_pdf_clears_previous_validation_error() {
    // Pure view: the error must be cleared at intake time, in the window
    // before the thumbnail task resolves.
    let mut view = ConverterView::new(&ClientConfig::default());

    assert!(view.select_file(FileInput::new("x.txt", "text/plain", vec![1u8])).is_none());
    assert_eq!(view.error(), Some(ViewError::NotAPdf));

    let request = view.select_file(pdf("report.pdf")).expect("thumbnail requested");

    assert_eq!(view.selected().map(|f| f.name.as_str()), Some("report.pdf"));
    assert!(view.error().is_none());
    assert_eq!(request.generation, view.generation());
}

// ── Conversion properties ────────────────────────────────────────────────────

#[tokio::test]
async fn convert_without_selection_never_touches_the_service() {
    let stub = ScriptedService::new(vec![Ok(b"deck".to_vec())]);
    let s = session(Arc::clone(&stub));

    assert!(s.convert().await.is_none());

    assert_eq!(stub.calls(), 0);
    assert_eq!(s.snapshot().await.error, Some(ViewError::NoFileSelected));
}

#[tokio::test]
async fn success_appends_exactly_one_entry_with_swapped_extension() {
    let stub = ScriptedService::new(vec![Ok(b"PK-deck".to_vec())]);
    let s = session(Arc::clone(&stub));

    select_and_settle(&s, pdf("report.pdf")).await;
    let result = s.convert().await.expect("success");

    assert_eq!(result.name, "report.pptx");
    assert_eq!(stub.calls(), 1);
    assert_eq!(
        stub.last_file_name.lock().unwrap().as_deref(),
        Some("report.pdf"),
        "the upload carries the original filename"
    );

    let snap = s.snapshot().await;
    assert_eq!(snap.history, vec!["report.pptx"]);
    assert_eq!(snap.result.as_deref(), Some("report.pptx"));
}

#[tokio::test]
async fn failure_appends_nothing_and_surfaces_upload_error() {
    let stub = ScriptedService::new(vec![Err(ConvertError::ServiceStatus { status: 502 })]);
    let s = session(Arc::clone(&stub));

    select_and_settle(&s, pdf("report.pdf")).await;
    assert!(s.convert().await.is_none());

    let snap = s.snapshot().await;
    assert!(snap.history.is_empty());
    assert!(snap.result.is_none());
    assert_eq!(snap.error, Some(ViewError::Upload));
    assert!(!snap.loading, "loading clears regardless of outcome");
}

#[tokio::test]
async fn mixed_outcomes_accumulate_history_in_order() {
    let stub = ScriptedService::new(vec![
        Ok(b"deck-1".to_vec()),
        Err(ConvertError::EmptyResponse),
        Ok(b"deck-2".to_vec()),
    ]);
    let s = session(Arc::clone(&stub));

    select_and_settle(&s, pdf("first.pdf")).await;
    assert!(s.convert().await.is_some());

    select_and_settle(&s, pdf("second.pdf")).await;
    assert!(s.convert().await.is_none());

    select_and_settle(&s, pdf("third.pdf")).await;
    assert!(s.convert().await.is_some());

    let snap = s.snapshot().await;
    assert_eq!(snap.history, vec!["first.pptx", "third.pptx"]);
    assert_eq!(stub.calls(), 3);
}

// ── Reset & history properties ───────────────────────────────────────────────

#[tokio::test]
async fn reset_returns_all_slots_to_initial_values() {
    let stub = ScriptedService::new(vec![Ok(b"deck".to_vec())]);
    let s = session(stub);

    select_and_settle(&s, pdf("report.pdf")).await;
    s.convert().await.expect("success");
    s.reset().await;

    let snap = s.snapshot().await;
    assert!(snap.selected.is_none());
    assert!(snap.thumbnail_px.is_none());
    assert!(snap.result.is_none());
    assert!(snap.error.is_none());
    // History is cleared only by explicit user action.
    assert_eq!(snap.history, vec!["report.pptx"]);
}

#[tokio::test]
async fn clearing_history_yields_the_empty_state() {
    let stub = ScriptedService::new(vec![Ok(b"deck".to_vec())]);
    let s = session(stub);

    select_and_settle(&s, pdf("report.pdf")).await;
    s.convert().await.expect("success");
    s.clear_history().await;

    let snap = s.snapshot().await;
    assert!(snap.history.is_empty());

    // What a renderer would show for the empty list.
    let theme = Theme::default();
    assert_eq!(theme.empty_history, "No conversions yet.");
}

// ── Thumbnail race property (pure view, deterministic) ───────────────────────

#[test]
fn last_requested_thumbnail_wins_regardless_of_completion_order() {
    use pdf2pptx::Thumbnail;

    let mut view = ConverterView::new(&ClientConfig::default());

    let slow = view.select_file(pdf("slow.pdf")).expect("accepted");
    let fast = view.select_file(pdf("fast.pdf")).expect("accepted");

    let fast_thumb = Thumbnail {
        width: 100,
        height: 140,
        png: Blob::new(vec![2u8]),
    };
    view.apply_thumbnail(fast.generation, Ok(fast_thumb.clone()));
    view.apply_thumbnail(
        slow.generation,
        Ok(Thumbnail {
            width: 900,
            height: 1200,
            png: Blob::new(vec![1u8]),
        }),
    );

    assert_eq!(view.thumbnail(), Some(&fast_thumb));
}
