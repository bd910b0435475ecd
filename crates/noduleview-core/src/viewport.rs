//! Viewport transform engine: zoom and pan, independent of the image shown.

use tracing::debug;

use crate::consts::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, WHEEL_ZOOM_STEP, ZOOM_BUTTON_STEP};

/// A point or offset in screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned screen rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    pub min: Point,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub fn center(&self) -> Point {
        Point::new(self.min.x + self.width / 2.0, self.min.y + self.height / 2.0)
    }
}

/// `scale(scale)` followed by `translate(translate)` in the scaled space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderTransform {
    pub scale: f32,
    pub translate: Point,
}

impl RenderTransform {
    /// Net displacement on screen. The translate is expressed in scaled units,
    /// so this equals the pan regardless of zoom.
    pub fn screen_offset(&self) -> Point {
        Point::new(self.translate.x * self.scale, self.translate.y * self.scale)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WheelOutcome {
    /// Always true: the host must not let the wheel scroll the surrounding page.
    pub consumed: bool,
    pub zoom_changed: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    zoom: f32,
    pan: Point,
    drag_anchor: Option<Point>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            pan: Point::ZERO,
            drag_anchor: None,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Set zoom, clamped to the allowed range. Returns whether it changed.
    pub fn set_zoom(&mut self, zoom: f32) -> bool {
        if !zoom.is_finite() {
            return false;
        }
        // Snap to a 1/1000 grid so repeated 0.1 steps do not drift.
        let snapped = ((zoom * 1000.0).round() / 1000.0).clamp(MIN_ZOOM, MAX_ZOOM);
        let changed = snapped != self.zoom;
        self.zoom = snapped;
        changed
    }

    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.zoom + ZOOM_BUTTON_STEP)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.zoom - ZOOM_BUTTON_STEP)
    }

    /// One fixed step per wheel event; scrolling up (negative delta) zooms in.
    pub fn on_wheel(&mut self, delta_y: f32) -> WheelOutcome {
        let direction = if delta_y < 0.0 {
            1.0
        } else if delta_y > 0.0 {
            -1.0
        } else {
            0.0
        };
        let zoom_changed =
            direction != 0.0 && self.set_zoom(self.zoom + direction * WHEEL_ZOOM_STEP);
        WheelOutcome {
            consumed: true,
            zoom_changed,
        }
    }

    /// Start a drag at the pointer. Refused when no image is displayed.
    pub fn begin_drag(&mut self, pointer_x: f32, pointer_y: f32, has_image: bool) -> bool {
        if !has_image {
            return false;
        }
        self.drag_anchor = Some(Point::new(pointer_x - self.pan.x, pointer_y - self.pan.y));
        true
    }

    /// Move the pan with the pointer. Ignored when not dragging.
    pub fn continue_drag(&mut self, pointer_x: f32, pointer_y: f32) -> bool {
        match self.drag_anchor {
            Some(anchor) => {
                self.pan = Point::new(pointer_x - anchor.x, pointer_y - anchor.y);
                true
            }
            None => false,
        }
    }

    /// Pointer released or left the viewport.
    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    pub fn reset(&mut self) {
        debug!("Viewport reset");
        self.zoom = DEFAULT_ZOOM;
        self.pan = Point::ZERO;
        self.drag_anchor = None;
    }

    pub fn render_transform(&self) -> RenderTransform {
        RenderTransform {
            scale: self.zoom,
            translate: Point::new(self.pan.x / self.zoom, self.pan.y / self.zoom),
        }
    }

    /// On-screen rectangle of an image of `image_size` laid out centred in a
    /// container whose centre is `container_center`.
    pub fn image_rect(&self, container_center: Point, image_size: (f32, f32)) -> ScreenRect {
        let offset = self.render_transform().screen_offset();
        let width = image_size.0 * self.zoom;
        let height = image_size.1 * self.zoom;
        ScreenRect {
            min: Point::new(
                container_center.x + offset.x - width / 2.0,
                container_center.y + offset.y - height / 2.0,
            ),
            width,
            height,
        }
    }
}
