use noduleview_core::client::ServiceInfo;
use noduleview_core::display::DisplayLayer;

use super::RatingState;

/// What the viewport is currently asked to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct ShownImage {
    pub key: String,
    pub layer: DisplayLayer,
}

/// Overall UI state that is not owned by the viewer core.
#[derive(Default)]
pub struct UIState {
    /// Text field for server-side library items.
    pub library_id_input: String,

    /// Last answer from `GET /`.
    pub service: Option<ServiceInfo>,

    /// Resolved once per viewer change, not per frame.
    pub shown: Option<ShownImage>,

    /// Failure banner already written to the log.
    pub reported_failure: Option<String>,

    pub rating: RatingState,
    pub show_about: bool,

    /// Log messages.
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}
