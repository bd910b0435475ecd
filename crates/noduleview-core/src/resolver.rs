//! Source resolver: turns a selection into a renderable preview.

use tracing::{debug, info};

use crate::client::InferenceBackend;
use crate::error::{PreviewError, ViewerError};
use crate::handle::{HandleTracker, ImageRef};
use crate::source::{ImageSource, SourceFormat};

/// A renderable representation of the current source.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewResult {
    pub image: ImageRef,
    pub server_generated: bool,
}

impl PreviewResult {
    pub fn local(image: ImageRef) -> Self {
        Self {
            image,
            server_generated: false,
        }
    }

    pub fn server(image: ImageRef) -> Self {
        Self {
            image,
            server_generated: true,
        }
    }
}

/// What it takes to get a preview for a source.
#[derive(Debug)]
pub enum Resolution {
    /// Nothing selected; nothing to show.
    Empty,
    /// Produced in-process.
    Ready(PreviewResult),
    /// Must be requested from the inference service.
    NeedsServer,
}

#[derive(Clone, Debug, Default)]
pub struct SourceResolver {
    handles: HandleTracker,
}

impl SourceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handles(&self) -> &HandleTracker {
        &self.handles
    }

    /// Decide how to obtain a preview, doing the local part immediately.
    pub fn plan(&self, source: &ImageSource) -> Result<Resolution, PreviewError> {
        match source {
            ImageSource::None => Ok(Resolution::Empty),
            ImageSource::Remote { .. } => Ok(Resolution::NeedsServer),
            ImageSource::Local { name, bytes } => match SourceFormat::detect(name, bytes) {
                SourceFormat::Raster(format) => {
                    debug!(name, ?format, "Local raster preview");
                    let handle = self.handles.acquire(name, bytes.clone());
                    Ok(Resolution::Ready(PreviewResult::local(ImageRef::Local(handle))))
                }
                SourceFormat::Volumetric => Ok(Resolution::NeedsServer),
                SourceFormat::Unsupported => Err(ViewerError::UnsupportedFormat(format!(
                    "{name} is neither a displayable image nor a volumetric scan"
                ))),
            },
        }
    }

    /// Produce the preview, calling the service when needed. Blocks on the network.
    pub fn resolve(
        &self,
        source: &ImageSource,
        backend: &dyn InferenceBackend,
    ) -> Result<Option<PreviewResult>, PreviewError> {
        match self.plan(source)? {
            Resolution::Empty => Ok(None),
            Resolution::Ready(preview) => Ok(Some(preview)),
            Resolution::NeedsServer => {
                info!(source = source.name(), "Preview requires server-side conversion");
                let image = backend.preview(source)?;
                Ok(Some(PreviewResult::server(image)))
            }
        }
    }
}
