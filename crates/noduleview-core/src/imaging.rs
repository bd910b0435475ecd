//! Turning image references into pixels.

use std::path::Path;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::DynamicImage;

use crate::client::InferenceBackend;
use crate::error::{Result, ViewerError};
use crate::handle::ImageRef;

/// Payload of a `data:` URI.
#[derive(Clone, Debug, PartialEq)]
pub struct DataUri {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Decode `data:<mime>;base64,<payload>`. Only base64 payloads are accepted,
/// which is all the inference service emits.
pub fn decode_data_uri(uri: &str) -> Result<DataUri> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| ViewerError::MalformedResponse("not a data URI".into()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| ViewerError::MalformedResponse("data URI has no payload".into()))?;
    let mime = meta
        .strip_suffix(";base64")
        .ok_or_else(|| ViewerError::MalformedResponse("data URI is not base64-encoded".into()))?;

    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| ViewerError::MalformedResponse(format!("invalid base64 image: {e}")))?;

    Ok(DataUri {
        mime: mime.to_string(),
        bytes,
    })
}

/// Encoded bytes behind an image reference. URLs are fetched through `backend`.
/// A released local handle no longer resolves.
pub fn image_bytes(image: &ImageRef, backend: Option<&dyn InferenceBackend>) -> Result<Arc<[u8]>> {
    match image {
        ImageRef::Local(handle) => handle
            .bytes()
            .ok_or_else(|| ViewerError::Released(handle.uri().to_string())),
        ImageRef::Server(uri) if uri.starts_with("data:") => {
            Ok(decode_data_uri(uri)?.bytes.into())
        }
        ImageRef::Server(url) if url.starts_with("http://") || url.starts_with("https://") => {
            match backend {
                Some(backend) => Ok(backend.fetch_image(url)?.into()),
                None => Err(ViewerError::UnsupportedFormat(format!(
                    "no client available to fetch {url}"
                ))),
            }
        }
        ImageRef::Server(other) => Err(ViewerError::MalformedResponse(format!(
            "unrecognised image reference {}",
            other.chars().take(32).collect::<String>()
        ))),
    }
}

pub fn decode_image(
    image: &ImageRef,
    backend: Option<&dyn InferenceBackend>,
) -> Result<DynamicImage> {
    let bytes = image_bytes(image, backend)?;
    Ok(image::load_from_memory(&bytes)?)
}

/// Decode and re-encode to `path`; the output format follows the extension.
pub fn save_image(
    image: &ImageRef,
    backend: Option<&dyn InferenceBackend>,
    path: &Path,
) -> Result<()> {
    let decoded = decode_image(image, backend)?;
    decoded.save(path)?;
    Ok(())
}
