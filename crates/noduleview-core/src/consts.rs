/// Smallest zoom factor the viewport accepts.
pub const MIN_ZOOM: f32 = 0.5;

/// Largest zoom factor the viewport accepts.
pub const MAX_ZOOM: f32 = 5.0;

/// Zoom factor restored by a viewport reset.
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Zoom increment applied by the zoom-in / zoom-out buttons.
pub const ZOOM_BUTTON_STEP: f32 = 0.25;

/// Zoom increment applied per wheel notch, independent of wheel delta magnitude.
pub const WHEEL_ZOOM_STEP: f32 = 0.1;

/// Default base URL of the inference service.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Environment variable that overrides the configured service URL.
pub const API_URL_ENV: &str = "NODULEVIEW_API_URL";

/// Default request timeout. Classification of a volumetric scan can take a while
/// on CPU-only servers, so this is generous.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Multipart field name the service expects the uploaded file under.
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Extensions of formats that can only be decoded server-side.
pub const VOLUMETRIC_EXTENSIONS: &[&str] = &["mhd", "mha", "dcm"];

/// Placeholder shown in place of a confidence value that is not available.
pub const NO_CONFIDENCE_TEXT: &str = "--%";

/// Placeholder shown in place of a missing prediction label.
pub const NO_LABEL_TEXT: &str = "--";
