//! Image source descriptor.
//!
//! An [`ImageSource`] names the thing the user selected. It is replaced
//! wholesale on every selection; comparing two descriptors is how the viewer
//! detects that the selection changed.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use image::ImageFormat;

use crate::consts::VOLUMETRIC_EXTENSIONS;
use crate::error::Result;

/// The user's current selection.
#[derive(Clone, Default)]
pub enum ImageSource {
    /// Nothing selected.
    #[default]
    None,
    /// A file held in memory.
    Local { name: String, bytes: Arc<[u8]> },
    /// An item in the remote library, addressed by its id.
    Remote { name: String, library_id: String },
}

impl ImageSource {
    pub fn local(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::Local {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn remote(name: impl Into<String>, library_id: impl Into<String>) -> Self {
        Self::Remote {
            name: name.into(),
            library_id: library_id.into(),
        }
    }

    /// Read a file from disk into a local descriptor.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::local(name, bytes))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Display name, empty for [`ImageSource::None`].
    pub fn name(&self) -> &str {
        match self {
            Self::None => "",
            Self::Local { name, .. } | Self::Remote { name, .. } => name,
        }
    }

    /// Format of a local file; remote items are always decoded by the server.
    pub fn format(&self) -> Option<SourceFormat> {
        match self {
            Self::Local { name, bytes } => Some(SourceFormat::detect(name, bytes)),
            _ => None,
        }
    }

    pub fn byte_len(&self) -> Option<usize> {
        match self {
            Self::Local { bytes, .. } => Some(bytes.len()),
            _ => None,
        }
    }
}

impl PartialEq for ImageSource {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (
                Self::Local { name: a, bytes: ab },
                Self::Local { name: b, bytes: bb },
            ) => a == b && Arc::ptr_eq(ab, bb),
            (
                Self::Remote { library_id: a, .. },
                Self::Remote { library_id: b, .. },
            ) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Local { name, bytes } => f
                .debug_struct("Local")
                .field("name", name)
                .field("len", &bytes.len())
                .finish(),
            Self::Remote { name, library_id } => f
                .debug_struct("Remote")
                .field("name", name)
                .field("library_id", library_id)
                .finish(),
        }
    }
}

/// How a local file can be turned into something displayable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
    /// Decodable in-process.
    Raster(ImageFormat),
    /// Needs server-side conversion before it can be shown.
    Volumetric,
    Unsupported,
}

impl SourceFormat {
    /// Classify by extension first, then by magic bytes.
    pub fn detect(name: &str, bytes: &[u8]) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        if let Some(ref ext) = ext {
            if VOLUMETRIC_EXTENSIONS.contains(&ext.as_str()) {
                return Self::Volumetric;
            }
            if let Some(format) = ImageFormat::from_extension(ext) {
                if is_displayable(format) {
                    return Self::Raster(format);
                }
            }
        }

        match image::guess_format(bytes) {
            Ok(format) if is_displayable(format) => Self::Raster(format),
            _ => Self::Unsupported,
        }
    }

    pub fn needs_server(&self) -> bool {
        matches!(self, Self::Volumetric)
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raster(format) => write!(f, "{format:?} (raster)"),
            Self::Volumetric => write!(f, "Volumetric (server-side decoding)"),
            Self::Unsupported => write!(f, "Unsupported"),
        }
    }
}

fn is_displayable(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Png
            | ImageFormat::Jpeg
            | ImageFormat::Bmp
            | ImageFormat::Tiff
            | ImageFormat::Gif
            | ImageFormat::WebP
    )
}
