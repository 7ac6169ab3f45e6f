use audio_notes_backend::client::{
    DisplayRegion, FilePicker, Notifier, UploadClient, UploadWidget,
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test double standing in for a display region or the alert surface.
#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<String>>>);

impl Recorder {
    fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl DisplayRegion for Recorder {
    fn set_text(&self, text: &str) {
        self.0.lock().unwrap().push(text.to_string());
    }
}

impl Notifier for Recorder {
    fn alert(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
}

struct FixedPicker(Option<PathBuf>);

impl FilePicker for FixedPicker {
    fn pick_file(&self) -> Option<PathBuf> {
        self.0.clone()
    }
}

/// Matches a multipart body that carries the given bytes under the given
/// field name.
struct MultipartContains {
    field: &'static str,
    bytes: Vec<u8>,
}

impl wiremock::Match for MultipartContains {
    fn matches(&self, request: &wiremock::Request) -> bool {
        let field_marker = format!("name=\"{}\"", self.field);
        let body = &request.body;
        body.windows(field_marker.len())
            .any(|w| w == field_marker.as_bytes())
            && body
                .windows(self.bytes.len())
                .any(|w| w == self.bytes.as_slice())
    }
}

struct WidgetHarness {
    widget: UploadWidget,
    transcription: Recorder,
    summary: Recorder,
    alerts: Recorder,
}

fn widget_for(base_url: &str, picker: FixedPicker) -> WidgetHarness {
    let transcription = Recorder::default();
    let summary = Recorder::default();
    let alerts = Recorder::default();

    let widget = UploadWidget::new(
        UploadClient::new(base_url),
        Box::new(picker),
        Box::new(transcription.clone()),
        Box::new(summary.clone()),
        Box::new(alerts.clone()),
    );

    WidgetHarness {
        widget,
        transcription,
        summary,
        alerts,
    }
}

fn sample_wav(dir: &Path) -> (PathBuf, Vec<u8>) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 16000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let wav_path = dir.join("memo.wav");
    let mut writer = hound::WavWriter::create(&wav_path, spec).unwrap();
    for i in 0..1600i32 {
        writer.write_sample((i % 128) as i16).unwrap();
    }
    writer.finalize().unwrap();
    let bytes = std::fs::read(&wav_path).unwrap();
    (wav_path, bytes)
}

#[tokio::test]
async fn test_dismissed_selection_sends_nothing_and_changes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut harness = widget_for(&server.uri(), FixedPicker(None));
    harness.widget.trigger_selection().await;

    assert!(harness.transcription.entries().is_empty());
    assert!(harness.summary.entries().is_empty());
    assert!(harness.alerts.entries().is_empty());
}

#[tokio::test]
async fn test_selection_posts_file_bytes_once_and_renders_reply() {
    let dir = tempfile::tempdir().unwrap();
    let (wav_path, wav_bytes) = sample_wav(dir.path());

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(MultipartContains {
            field: "audio",
            bytes: wav_bytes,
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": "Audio processed successfully",
            "transcription": "hello",
            "summary": "hi",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut harness = widget_for(&server.uri(), FixedPicker(Some(wav_path)));
    harness.widget.trigger_selection().await;

    assert_eq!(
        harness.transcription.entries(),
        vec!["Transcribed Text: hello"]
    );
    assert_eq!(harness.summary.entries(), vec!["Summary: hi"]);
    assert!(harness.alerts.entries().is_empty());
}

#[tokio::test]
async fn test_empty_reply_renders_placeholders() {
    let dir = tempfile::tempdir().unwrap();
    let (wav_path, _) = sample_wav(dir.path());

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let mut harness = widget_for(&server.uri(), FixedPicker(None));
    harness.widget.on_file_selected(Some(wav_path)).await;

    assert_eq!(
        harness.transcription.entries(),
        vec!["Transcribed Text: Transcription coming soon..."]
    );
    assert_eq!(
        harness.summary.entries(),
        vec!["Summary: Summary coming soon..."]
    );
}

#[tokio::test]
async fn test_error_status_alerts_and_leaves_display_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let (wav_path, _) = sample_wav(dir.path());

    let server = MockServer::start().await;

    // First upload succeeds and fills the display regions
    {
        let _guard = Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "transcription": "first take",
                "summary": "short",
            })))
            .expect(1)
            .mount_as_scoped(&server)
            .await;

        let mut harness = widget_for(&server.uri(), FixedPicker(None));
        harness.widget.on_file_selected(Some(wav_path.clone())).await;

        // Second upload hits a failing server
        drop(_guard);
        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        harness.widget.on_file_selected(Some(wav_path)).await;

        // One alert, and the regions still show the first result
        assert_eq!(harness.alerts.entries(), vec!["Error uploading file!"]);
        assert_eq!(
            harness.transcription.entries(),
            vec!["Transcribed Text: first take"]
        );
        assert_eq!(harness.summary.entries(), vec!["Summary: short"]);
    }
}

#[tokio::test]
async fn test_non_json_body_fails_like_transport_error() {
    let dir = tempfile::tempdir().unwrap();
    let (wav_path, _) = sample_wav(dir.path());

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let mut harness = widget_for(&server.uri(), FixedPicker(None));
    harness.widget.on_file_selected(Some(wav_path)).await;

    assert_eq!(harness.alerts.entries(), vec!["Error uploading file!"]);
    assert!(harness.transcription.entries().is_empty());
    assert!(harness.summary.entries().is_empty());
}

#[tokio::test]
async fn test_unreachable_server_alerts() {
    let dir = tempfile::tempdir().unwrap();
    let (wav_path, _) = sample_wav(dir.path());

    // Nothing listens on port 1
    let mut harness = widget_for("http://127.0.0.1:1", FixedPicker(None));
    harness.widget.on_file_selected(Some(wav_path)).await;

    assert_eq!(harness.alerts.entries(), vec!["Error uploading file!"]);
    assert!(harness.transcription.entries().is_empty());
    assert!(harness.summary.entries().is_empty());
}

#[tokio::test]
async fn test_unreadable_file_alerts_without_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut harness = widget_for(&server.uri(), FixedPicker(None));
    harness
        .widget
        .on_file_selected(Some(PathBuf::from("/nonexistent/memo.wav")))
        .await;

    assert_eq!(harness.alerts.entries(), vec!["Error uploading file!"]);
    assert!(harness.transcription.entries().is_empty());
}
