mod common;

use std::net::TcpListener;

use noduleview_core::client::{HttpBackend, InferenceBackend};
use noduleview_core::config::ServerConfig;
use noduleview_core::error::ViewerError;
use noduleview_core::handle::ImageRef;
use noduleview_core::source::ImageSource;

use common::{local_mhd, local_png, serve_once, serve_silence};

fn backend_for(base_url: &str) -> HttpBackend {
    HttpBackend::new(&ServerConfig {
        base_url: base_url.to_string(),
        timeout_secs: 10,
    })
    .unwrap()
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

#[test]
fn test_local_classify_posts_multipart_to_predict() {
    let (url, server) = serve_once(200, r#"{"prediction":"Nodule","confidence":0.87}"#);
    let result = backend_for(&url).classify(&local_png("chest.png")).unwrap();
    let request = server.join().unwrap();

    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/predict");
    assert!(request.content_type().starts_with("multipart/form-data"));
    let body = request.body_text();
    assert!(body.contains(r#"name="file""#), "body: {body}");
    assert!(body.contains(r#"filename="chest.png""#));
    assert_eq!(result.label, "Nodule");
    assert_eq!(result.confidence_text(), "87.00%");
}

#[test]
fn test_remote_classify_posts_file_id() {
    let (url, server) = serve_once(200, r#"{"class":"No Nodule","confidence":92}"#);
    let result = backend_for(&url)
        .classify(&ImageSource::remote("Case 12", "lib-012"))
        .unwrap();
    let request = server.join().unwrap();

    assert_eq!(request.path, "/predict_from_library");
    assert_eq!(request.content_type(), "application/json");
    let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(body, serde_json::json!({ "file_id": "lib-012" }));
    assert_eq!(result.label, "No Nodule");
}

#[test]
fn test_volumetric_preview_posts_to_preview() {
    let (url, server) = serve_once(200, r#"{"preview_image":"data:image/png;base64,AA=="}"#);
    let image = backend_for(&url).preview(&local_mhd("ct.mhd")).unwrap();
    let request = server.join().unwrap();

    assert_eq!(request.path, "/preview");
    assert_eq!(image, ImageRef::Server("data:image/png;base64,AA==".into()));
}

#[test]
fn test_remote_preview_uses_library_endpoint() {
    let (url, server) = serve_once(200, r#"{"preview_image":"data:image/png;base64,AA=="}"#);
    backend_for(&url)
        .preview(&ImageSource::remote("Case 1", "lib-1"))
        .unwrap();
    assert_eq!(server.join().unwrap().path, "/preview_from_library");
}

#[test]
fn test_trailing_slash_in_base_url() {
    let (url, server) = serve_once(200, r#"{"class":"Nodule"}"#);
    let backend = backend_for(&format!("{url}/"));
    assert_eq!(backend.base_url(), url);
    backend.classify(&local_png("a.png")).unwrap();
    assert_eq!(server.join().unwrap().path, "/predict");
}

#[test]
fn test_service_info() {
    let (url, server) = serve_once(
        200,
        r#"{"message":"API running","active_predictor":"predict_nodule_spatial"}"#,
    );
    let info = backend_for(&url).service_info().unwrap();
    let request = server.join().unwrap();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/");
    assert_eq!(info.message.as_deref(), Some("API running"));
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn test_error_field_with_ok_status_fails() {
    let (url, server) = serve_once(200, r#"{"error":"Failed to load image"}"#);
    let err = backend_for(&url).classify(&local_png("a.png")).unwrap_err();
    server.join().unwrap();
    assert!(matches!(err, ViewerError::Server { status: 200, .. }), "got {err:?}");
}

#[test]
fn test_non_success_status_fails() {
    let (url, server) = serve_once(500, r#"{"detail":"model crashed"}"#);
    let err = backend_for(&url).classify(&local_png("a.png")).unwrap_err();
    server.join().unwrap();
    match err {
        ViewerError::Server { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "model crashed");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_unreachable_service_is_transport_error() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let err = backend_for(&format!("http://{addr}"))
        .classify(&local_png("a.png"))
        .unwrap_err();
    assert!(matches!(err, ViewerError::Transport(_)), "got {err:?}");
}

#[test]
fn test_silent_service_times_out() {
    let backend = HttpBackend::new(&ServerConfig {
        base_url: serve_silence(),
        timeout_secs: 1,
    })
    .unwrap();
    let started = std::time::Instant::now();
    let err = backend.classify(&local_png("a.png")).unwrap_err();

    match err {
        ViewerError::Transport(message) => {
            assert!(message.contains("timed out"), "message: {message}");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(started.elapsed() < std::time::Duration::from_secs(10));
}

#[test]
fn test_no_source_is_rejected_before_network() {
    let err = backend_for("http://127.0.0.1:9")
        .classify(&ImageSource::None)
        .unwrap_err();
    assert!(matches!(err, ViewerError::NoSource));
}
