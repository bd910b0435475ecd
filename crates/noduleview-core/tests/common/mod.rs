#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::thread::JoinHandle;

use axum::extract::Request;
use axum::http::header::{CONNECTION, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{ImageFormat, Rgb, RgbImage};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};

use noduleview_core::client::{InferenceBackend, RequestKind};
use noduleview_core::error::{Result, ViewerError};
use noduleview_core::handle::ImageRef;
use noduleview_core::result::InferenceResult;
use noduleview_core::source::ImageSource;

/// Encode a small gradient image as PNG.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width.max(1)) as u8, (y * 255 / height.max(1)) as u8, 128])
    });
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).expect("encode PNG");
    buf.into_inner()
}

/// `data:image/png;base64,...` for a small PNG, as the service returns.
pub fn png_data_uri(width: u32, height: u32) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png_bytes(width, height)))
}

pub fn local_png(name: &str) -> ImageSource {
    ImageSource::local(name, png_bytes(4, 4))
}

pub fn local_mhd(name: &str) -> ImageSource {
    ImageSource::local(name, b"ObjectType = Image\nNDims = 3\n".to_vec())
}

pub fn server_image(tag: &str) -> ImageRef {
    ImageRef::Server(format!("data:image/png;base64,{tag}"))
}

/// Result shaped like scenario C: heatmap `H`, original `O`.
pub fn heatmap_result(label: &str, confidence: f64) -> InferenceResult {
    let mut result = InferenceResult::new(label, Some(confidence));
    result.heatmap_image = Some(server_image("H"));
    result.original_image = Some(server_image("O"));
    result
}

// ---------------------------------------------------------------------------
// Scripted backend
// ---------------------------------------------------------------------------

/// Backend that replays queued outcomes and records every call.
#[derive(Default)]
pub struct MockBackend {
    previews: Mutex<VecDeque<Result<ImageRef>>>,
    classifications: Mutex<VecDeque<Result<InferenceResult>>>,
    calls: Mutex<Vec<(RequestKind, String)>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_preview(&self, outcome: Result<ImageRef>) {
        self.previews.lock().unwrap().push_back(outcome);
    }

    pub fn push_classification(&self, outcome: Result<InferenceResult>) {
        self.classifications.lock().unwrap().push_back(outcome);
    }

    pub fn calls(&self) -> Vec<(RequestKind, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl InferenceBackend for MockBackend {
    fn preview(&self, source: &ImageSource) -> Result<ImageRef> {
        self.calls
            .lock()
            .unwrap()
            .push((RequestKind::Preview, source.name().to_string()));
        self.previews
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ViewerError::Transport("no scripted preview".into())))
    }

    fn classify(&self, source: &ImageSource) -> Result<InferenceResult> {
        self.calls
            .lock()
            .unwrap()
            .push((RequestKind::Classify, source.name().to_string()));
        self.classifications
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ViewerError::Transport("no scripted classification".into())))
    }
}

// ---------------------------------------------------------------------------
// One-shot HTTP responder
// ---------------------------------------------------------------------------

/// What the responder saw.
#[derive(Debug)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl CapturedRequest {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn content_type(&self) -> &str {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("build test runtime")
}

/// Serve `app` on an ephemeral port from its own thread. `finish` runs next to
/// the server and its output is what the returned handle yields.
fn spawn_server<T, F, Fut>(app: Router, finish: F) -> (String, JoinHandle<T>)
where
    T: Send + 'static,
    F: FnOnce(oneshot::Sender<()>) -> Fut + Send + 'static,
    Fut: Future<Output = T>,
{
    let (addr_tx, addr_rx) = std::sync::mpsc::channel::<SocketAddr>();
    let handle = std::thread::spawn(move || {
        runtime().block_on(async move {
            let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind responder");
            addr_tx
                .send(listener.local_addr().expect("local addr"))
                .expect("report addr");

            let (stop_tx, stop_rx) = oneshot::channel::<()>();
            let server = tokio::spawn(async move {
                axum::serve(listener, app)
                    .with_graceful_shutdown(async move {
                        let _ = stop_rx.await;
                    })
                    .await
            });
            let output = finish(stop_tx).await;
            server.await.expect("server task").expect("serve");
            output
        })
    });
    let addr = addr_rx.recv().expect("responder address");
    (format!("http://{addr}"), handle)
}

/// Answer exactly one request with `status` and a JSON `body`, and return the
/// base URL plus a handle yielding the captured request.
pub fn serve_once(status: u16, body: &str) -> (String, JoinHandle<CapturedRequest>) {
    let status = StatusCode::from_u16(status).expect("valid status");
    let body = body.to_string();
    let (capture_tx, mut capture_rx) = mpsc::channel::<CapturedRequest>(1);

    let app = Router::new().fallback(move |request: Request| {
        let capture_tx = capture_tx.clone();
        let body = body.clone();
        async move {
            let (parts, request_body) = request.into_parts();
            let bytes = axum::body::to_bytes(request_body, usize::MAX)
                .await
                .expect("read request body");
            let _ = capture_tx
                .send(CapturedRequest {
                    method: parts.method.to_string(),
                    path: parts.uri.path().to_string(),
                    headers: parts.headers,
                    body: bytes.to_vec(),
                })
                .await;
            (
                status,
                [(CONTENT_TYPE, "application/json"), (CONNECTION, "close")],
                body,
            )
        }
    });

    spawn_server(app, move |stop_tx| async move {
        let captured = capture_rx.recv().await.expect("one request");
        let _ = stop_tx.send(());
        captured
    })
}

/// Accept requests and never answer them. The server lives as long as the
/// test process.
pub fn serve_silence() -> String {
    let app = Router::new().fallback(|| std::future::pending::<()>());
    let (url, _handle) = spawn_server(app, |stop_tx| async move {
        // Holding the sender keeps graceful shutdown from firing.
        let _stop_tx = stop_tx;
        std::future::pending::<()>().await
    });
    url
}
