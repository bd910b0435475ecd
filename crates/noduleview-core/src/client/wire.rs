//! JSON shapes exchanged with the inference service.
//!
//! The service is loose about its responses: the label arrives as either
//! `prediction` or `class`, images are optional, and failures may come back
//! as `200 OK` with an `error` field. Everything is normalised here so the rest
//! of the crate only sees [`InferenceResult`] or a typed error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, ViewerError};
use crate::handle::ImageRef;
use crate::result::{Confidence, InferenceResult};

/// Longest slice of a non-JSON body quoted back in an error message.
const BODY_SNIPPET_LEN: usize = 200;

/// Request body of the `*_from_library` endpoints.
#[derive(Debug, Serialize)]
pub struct LibraryRequest<'a> {
    pub file_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct PreviewResponse {
    preview_image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    prediction: Option<String>,
    #[serde(rename = "class")]
    class_name: Option<String>,
    confidence: Option<f64>,
    preview_image: Option<String>,
    original_image: Option<String>,
    #[serde(default)]
    has_heatmap: bool,
}

/// Response of `GET /`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ServiceInfo {
    pub message: Option<String>,
    pub active_predictor: Option<String>,
}

/// Apply the failure rules shared by every endpoint and return the parsed body.
///
/// An `error` field means failure regardless of status; a non-2xx status means
/// failure regardless of body.
pub fn decode_envelope(status: u16, body: &str) -> Result<Value> {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    if let Some(err) = parsed
        .as_ref()
        .and_then(|v| v.get("error"))
        .filter(|e| !e.is_null())
    {
        return Err(ViewerError::Server {
            status,
            message: value_message(err),
        });
    }

    if !(200..300).contains(&status) {
        let message = parsed
            .as_ref()
            .and_then(|v| v.get("detail"))
            .map(value_message)
            .unwrap_or_else(|| snippet(body));
        return Err(ViewerError::Server { status, message });
    }

    parsed.ok_or_else(|| ViewerError::MalformedResponse("response body is not JSON".into()))
}

/// Parse a `/preview` or `/preview_from_library` response.
pub fn parse_preview(status: u16, body: &str) -> Result<ImageRef> {
    let value = decode_envelope(status, body)?;
    let response: PreviewResponse = serde_json::from_value(value)
        .map_err(|e| ViewerError::MalformedResponse(e.to_string()))?;
    response
        .preview_image
        .filter(|s| !s.is_empty())
        .map(ImageRef::Server)
        .ok_or_else(|| ViewerError::MalformedResponse("missing preview_image".into()))
}

/// Parse a `/predict` or `/predict_from_library` response.
pub fn parse_prediction(status: u16, body: &str) -> Result<InferenceResult> {
    let value = decode_envelope(status, body)?;
    let response: PredictResponse = serde_json::from_value(value)
        .map_err(|e| ViewerError::MalformedResponse(e.to_string()))?;

    let label = response
        .prediction
        .or(response.class_name)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ViewerError::MalformedResponse("missing prediction/class".into()))?;

    let preview = response
        .preview_image
        .filter(|s| !s.is_empty())
        .map(ImageRef::Server);
    let (heatmap_image, generic_image) = if response.has_heatmap {
        (preview, None)
    } else {
        (None, preview)
    };

    Ok(InferenceResult {
        label,
        confidence: response.confidence.map(Confidence::new),
        heatmap_image,
        original_image: response
            .original_image
            .filter(|s| !s.is_empty())
            .map(ImageRef::Server),
        generic_image,
    })
}

pub fn parse_service_info(status: u16, body: &str) -> Result<ServiceInfo> {
    let value = decode_envelope(status, body)?;
    serde_json::from_value(value).map_err(|e| ViewerError::MalformedResponse(e.to_string()))
}

fn value_message(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".into();
    }
    trimmed.chars().take(BODY_SNIPPET_LEN).collect()
}
