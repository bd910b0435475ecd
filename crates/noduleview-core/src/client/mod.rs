//! Inference client: the remote preview and classify operations.

mod http;
mod tracker;
pub mod wire;

pub use http::HttpBackend;
pub use tracker::{RequestKind, RequestToken, RequestTracker};
pub use wire::ServiceInfo;

use crate::error::{Result, ViewerError};
use crate::handle::ImageRef;
use crate::result::InferenceResult;
use crate::source::ImageSource;

/// The remote inference service as seen by the viewer.
///
/// Both operations take the source as their only input: local sources are
/// uploaded, remote ones are referenced by library id.
pub trait InferenceBackend: Send {
    /// Server-side materialisation of a preview (volumetric files, library items).
    fn preview(&self, source: &ImageSource) -> Result<ImageRef>;

    fn classify(&self, source: &ImageSource) -> Result<InferenceResult>;

    /// Download an image the server referenced by URL.
    fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        Err(ViewerError::UnsupportedFormat(format!(
            "cannot fetch remote image {url}"
        )))
    }

    fn service_info(&self) -> Result<ServiceInfo> {
        Err(ViewerError::UnsupportedFormat(
            "service info not available".into(),
        ))
    }
}
