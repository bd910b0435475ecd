use std::fmt;

use crate::consts::NO_CONFIDENCE_TEXT;
use crate::handle::ImageRef;

/// Classifier confidence in whatever unit the server returned
/// (a fraction in [0, 1] or a percentage in [0, 100]).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Confidence(f64);

impl Confidence {
    pub fn new(raw: f64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> f64 {
        self.0
    }

    /// Percentage in [0, 100]. Values <= 1 are fractions. `None` for NaN/inf.
    pub fn percent(&self) -> Option<f64> {
        if !self.0.is_finite() {
            return None;
        }
        let pct = if self.0 <= 1.0 { self.0 * 100.0 } else { self.0 };
        Some(pct.clamp(0.0, 100.0))
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.percent() {
            Some(pct) => write!(f, "{pct:.2}%"),
            None => f.write_str(NO_CONFIDENCE_TEXT),
        }
    }
}

/// Badge text for an optional confidence: `"87.00%"` or `"--%"`.
pub fn format_confidence(confidence: Option<Confidence>) -> String {
    confidence
        .map(|c| c.to_string())
        .unwrap_or_else(|| NO_CONFIDENCE_TEXT.to_string())
}

/// True when a label reports a nodule ("Nodule", "nodule detected"), false for
/// negatives such as "No Nodule". Case-insensitive.
pub fn label_indicates_nodule(label: &str) -> bool {
    let lower = label.to_lowercase();
    lower.contains("nodule") && !lower.contains("no nodule")
}

/// Outcome of one completed classification.
#[derive(Clone, Debug, PartialEq)]
pub struct InferenceResult {
    pub label: String,
    pub confidence: Option<Confidence>,
    /// Attention overlay; only set when the server flagged its image as a heatmap.
    pub heatmap_image: Option<ImageRef>,
    /// The rectified source image the heatmap was computed on.
    pub original_image: Option<ImageRef>,
    /// A server image that is neither flagged as a heatmap nor paired with an original.
    pub generic_image: Option<ImageRef>,
}

impl InferenceResult {
    pub fn new(label: impl Into<String>, confidence: Option<f64>) -> Self {
        Self {
            label: label.into(),
            confidence: confidence.map(Confidence::new),
            heatmap_image: None,
            original_image: None,
            generic_image: None,
        }
    }

    /// Both halves of the heatmap toggle are available.
    pub fn has_heatmap_pair(&self) -> bool {
        self.heatmap_image.is_some() && self.original_image.is_some()
    }

    pub fn indicates_nodule(&self) -> bool {
        label_indicates_nodule(&self.label)
    }

    pub fn confidence_text(&self) -> String {
        format_confidence(self.confidence)
    }

    /// Every image the result carries, for prefetching/decoding.
    pub fn images(&self) -> impl Iterator<Item = &ImageRef> {
        [
            self.heatmap_image.as_ref(),
            self.original_image.as_ref(),
            self.generic_image.as_ref(),
        ]
        .into_iter()
        .flatten()
    }
}
