//! Viewer orchestrator: the state machine behind the UI.
//!
//! `Viewer` never performs I/O itself. Operations that need the network return
//! a [`Request`]; the host runs it (on a worker thread, or inline via [`drive`])
//! and hands the outcome back through `apply_preview` / `apply_classification`.
//! Outcomes carrying a superseded token are dropped.

use std::fmt;

use tracing::{info, warn};

use crate::client::{InferenceBackend, RequestKind, RequestToken, RequestTracker};
use crate::config::DisplayConfig;
use crate::consts::NO_LABEL_TEXT;
use crate::display::{resolve_display, Displayed};
use crate::error::{Result, ViewerError};
use crate::handle::{HandleTracker, ImageRef};
use crate::resolver::{PreviewResult, Resolution, SourceResolver};
use crate::result::{format_confidence, Confidence, InferenceResult};
use crate::source::ImageSource;
use crate::viewport::Viewport;

#[derive(Clone, Debug, PartialEq)]
pub struct Failure {
    pub operation: RequestKind,
    pub message: String,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.operation, self.message)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewerPhase {
    Idle,
    PreviewPending,
    PreviewReady,
    ClassifyPending,
    ClassifyReady,
    Failed(Failure),
}

impl fmt::Display for ViewerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "No image"),
            Self::PreviewPending => write!(f, "Loading preview"),
            Self::PreviewReady => write!(f, "Ready"),
            Self::ClassifyPending => write!(f, "Analyzing"),
            Self::ClassifyReady => write!(f, "Classified"),
            Self::Failed(failure) => write!(f, "{failure}"),
        }
    }
}

/// Work the host must perform on the viewer's behalf.
#[derive(Clone, Debug)]
pub enum Request {
    Preview {
        token: RequestToken,
        source: ImageSource,
    },
    Classify {
        token: RequestToken,
        source: ImageSource,
    },
}

impl Request {
    pub fn token(&self) -> RequestToken {
        match self {
            Self::Preview { token, .. } | Self::Classify { token, .. } => *token,
        }
    }

    pub fn source(&self) -> &ImageSource {
        match self {
            Self::Preview { source, .. } | Self::Classify { source, .. } => source,
        }
    }

    pub fn kind(&self) -> RequestKind {
        self.token().kind()
    }
}

/// Whether a completion changed viewer state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// The token was superseded; the outcome was discarded.
    Stale,
}

/// One-way notifications for collaborators outside the core (rating prompt).
#[derive(Clone, Debug, PartialEq)]
pub enum ViewerEvent {
    ClassificationCompleted {
        label: String,
        confidence: Option<Confidence>,
    },
}

pub struct Viewer {
    resolver: SourceResolver,
    tracker: RequestTracker,
    source: ImageSource,
    preview: Option<PreviewResult>,
    result: Option<InferenceResult>,
    heatmap_visible: bool,
    viewport: Viewport,
    phase: ViewerPhase,
    events: Vec<ViewerEvent>,
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(&DisplayConfig::default())
    }
}

impl Viewer {
    pub fn new(config: &DisplayConfig) -> Self {
        Self {
            resolver: SourceResolver::new(),
            tracker: RequestTracker::new(),
            source: ImageSource::None,
            preview: None,
            result: None,
            heatmap_visible: config.heatmap_visible,
            viewport: Viewport::new(),
            phase: ViewerPhase::Idle,
            events: Vec::new(),
        }
    }

    // -- selection and requests ---------------------------------------------

    /// Make `source` current. Anything derived from the previous source is
    /// dropped first, so no frame can show it attributed to the new one.
    pub fn select(&mut self, source: ImageSource) -> Option<Request> {
        self.tracker.supersede_all();
        self.result = None;
        self.release_preview();
        self.source = source;

        match self.resolver.plan(&self.source) {
            Ok(Resolution::Empty) => {
                self.phase = ViewerPhase::Idle;
                None
            }
            Ok(Resolution::Ready(preview)) => {
                info!(source = self.source.name(), "Preview ready");
                self.preview = Some(preview);
                self.phase = ViewerPhase::PreviewReady;
                None
            }
            Ok(Resolution::NeedsServer) => {
                let token = self.tracker.issue(RequestKind::Preview);
                info!(
                    source = self.source.name(),
                    token = token.id(),
                    "Preview requested"
                );
                self.phase = ViewerPhase::PreviewPending;
                Some(Request::Preview {
                    token,
                    source: self.source.clone(),
                })
            }
            Err(e) => {
                self.fail(RequestKind::Preview, &e);
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.select(ImageSource::None);
    }

    pub fn can_classify(&self) -> bool {
        if self.source.is_none() {
            return false;
        }
        match &self.phase {
            ViewerPhase::PreviewReady | ViewerPhase::ClassifyReady => true,
            ViewerPhase::Failed(f) => f.operation == RequestKind::Classify,
            _ => false,
        }
    }

    /// Start a classification of the current source. `None` when not allowed in
    /// the current phase (in particular while one is already running).
    pub fn classify(&mut self) -> Option<Request> {
        if !self.can_classify() {
            return None;
        }
        self.result = None;
        let token = self.tracker.issue(RequestKind::Classify);
        info!(
            source = self.source.name(),
            token = token.id(),
            "Classification requested"
        );
        self.phase = ViewerPhase::ClassifyPending;
        Some(Request::Classify {
            token,
            source: self.source.clone(),
        })
    }

    pub fn apply_preview(
        &mut self,
        token: RequestToken,
        outcome: Result<ImageRef>,
    ) -> ApplyOutcome {
        if token.kind() != RequestKind::Preview || !self.tracker.complete(token) {
            warn!(token = token.id(), "Discarding stale preview response");
            return ApplyOutcome::Stale;
        }
        match outcome {
            Ok(image) => {
                info!(source = self.source.name(), "Server preview ready");
                self.preview = Some(PreviewResult::server(image));
                self.phase = ViewerPhase::PreviewReady;
            }
            Err(e) => self.fail(RequestKind::Preview, &e),
        }
        ApplyOutcome::Applied
    }

    pub fn apply_classification(
        &mut self,
        token: RequestToken,
        outcome: Result<InferenceResult>,
    ) -> ApplyOutcome {
        if token.kind() != RequestKind::Classify || !self.tracker.complete(token) {
            warn!(token = token.id(), "Discarding stale classification response");
            return ApplyOutcome::Stale;
        }
        match outcome {
            Ok(result) => {
                info!(
                    label = %result.label,
                    confidence = %result.confidence_text(),
                    "Classification applied"
                );
                self.events.push(ViewerEvent::ClassificationCompleted {
                    label: result.label.clone(),
                    confidence: result.confidence,
                });
                self.result = Some(result);
                self.phase = ViewerPhase::ClassifyReady;
            }
            Err(e) => self.fail(RequestKind::Classify, &e),
        }
        ApplyOutcome::Applied
    }

    /// Release everything tied to the current source.
    pub fn teardown(&mut self) {
        self.tracker.supersede_all();
        self.result = None;
        self.release_preview();
        self.source = ImageSource::None;
        self.phase = ViewerPhase::Idle;
    }

    /// Drop the preview and revoke its local handle, including any clones
    /// handed out through `display()`.
    fn release_preview(&mut self) {
        if let Some(preview) = self.preview.take() {
            preview.image.release();
        }
    }

    fn fail(&mut self, operation: RequestKind, error: &ViewerError) {
        warn!(%operation, %error, "Operation failed");
        self.phase = ViewerPhase::Failed(Failure {
            operation,
            message: error.to_string(),
        });
    }

    // -- derived state ------------------------------------------------------

    /// The image to render right now.
    pub fn display(&self) -> Option<Displayed<'_>> {
        resolve_display(
            self.preview.as_ref().map(|p| &p.image),
            self.result.as_ref(),
            self.heatmap_visible,
        )
    }

    pub fn label(&self) -> &str {
        self.result
            .as_ref()
            .map(|r| r.label.as_str())
            .unwrap_or(NO_LABEL_TEXT)
    }

    pub fn confidence_text(&self) -> String {
        format_confidence(self.result.as_ref().and_then(|r| r.confidence))
    }

    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            ViewerPhase::PreviewPending | ViewerPhase::ClassifyPending
        )
    }

    /// User-facing failure message, if the last operation failed.
    pub fn banner(&self) -> Option<String> {
        match &self.phase {
            ViewerPhase::Failed(failure) => Some(failure.to_string()),
            _ => None,
        }
    }

    // -- heatmap toggle -----------------------------------------------------

    pub fn heatmap_visible(&self) -> bool {
        self.heatmap_visible
    }

    pub fn set_heatmap_visible(&mut self, visible: bool) {
        self.heatmap_visible = visible;
    }

    pub fn toggle_heatmap(&mut self) -> bool {
        self.heatmap_visible = !self.heatmap_visible;
        self.heatmap_visible
    }

    /// The toggle only means something when the result has both images.
    pub fn heatmap_toggle_available(&self) -> bool {
        self.result.as_ref().is_some_and(|r| r.has_heatmap_pair())
    }

    // -- viewport -----------------------------------------------------------

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Start a pan drag; only possible while something is displayed.
    pub fn begin_drag(&mut self, pointer_x: f32, pointer_y: f32) -> bool {
        let has_image = self.display().is_some();
        self.viewport.begin_drag(pointer_x, pointer_y, has_image)
    }

    // -- accessors ----------------------------------------------------------

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    pub fn preview(&self) -> Option<&PreviewResult> {
        self.preview.as_ref()
    }

    pub fn result(&self) -> Option<&InferenceResult> {
        self.result.as_ref()
    }

    pub fn phase(&self) -> &ViewerPhase {
        &self.phase
    }

    pub fn in_flight(&self) -> Option<RequestKind> {
        self.tracker.in_flight()
    }

    pub fn handles(&self) -> &HandleTracker {
        self.resolver.handles()
    }

    pub fn drain_events(&mut self) -> Vec<ViewerEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Drop for Viewer {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Run `request` against `backend` on the calling thread and apply the outcome.
pub fn drive(
    viewer: &mut Viewer,
    backend: &dyn InferenceBackend,
    request: Request,
) -> ApplyOutcome {
    match request {
        Request::Preview { token, source } => {
            let outcome = backend.preview(&source);
            viewer.apply_preview(token, outcome)
        }
        Request::Classify { token, source } => {
            let outcome = backend.classify(&source);
            viewer.apply_classification(token, outcome)
        }
    }
}
