//! Display resolver: which single image is on screen.

use std::fmt;

use crate::handle::ImageRef;
use crate::result::InferenceResult;

/// Where the displayed image came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayLayer {
    Heatmap,
    Original,
    ServerImage,
    Preview,
}

impl fmt::Display for DisplayLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heatmap => write!(f, "Heatmap"),
            Self::Original => write!(f, "Original"),
            Self::ServerImage => write!(f, "Server image"),
            Self::Preview => write!(f, "Preview"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Displayed<'a> {
    pub image: &'a ImageRef,
    pub layer: DisplayLayer,
}

/// Pick the image to render. Highest precedence first:
///
/// 1. heatmap, when the result has a heatmap/original pair and the heatmap is visible
/// 2. the result's original image
/// 3. the result's only image (generic, or a heatmap without an original)
/// 4. the pre-classification preview
/// 5. nothing
pub fn resolve_display<'a>(
    local_preview: Option<&'a ImageRef>,
    result: Option<&'a InferenceResult>,
    heatmap_visible: bool,
) -> Option<Displayed<'a>> {
    if let Some(result) = result {
        if let (Some(heatmap), Some(_)) = (&result.heatmap_image, &result.original_image) {
            if heatmap_visible {
                return Some(Displayed {
                    image: heatmap,
                    layer: DisplayLayer::Heatmap,
                });
            }
        }
        if let Some(original) = &result.original_image {
            return Some(Displayed {
                image: original,
                layer: DisplayLayer::Original,
            });
        }
        if let Some(image) = result.generic_image.as_ref() {
            return Some(Displayed {
                image,
                layer: DisplayLayer::ServerImage,
            });
        }
        if let Some(image) = result.heatmap_image.as_ref() {
            return Some(Displayed {
                image,
                layer: DisplayLayer::Heatmap,
            });
        }
    }

    local_preview.map(|image| Displayed {
        image,
        layer: DisplayLayer::Preview,
    })
}
