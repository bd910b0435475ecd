use approx::assert_abs_diff_eq;

use noduleview_core::consts::{MAX_ZOOM, MIN_ZOOM};
use noduleview_core::viewport::{Point, Viewport};

// ---------------------------------------------------------------------------
// Zoom clamping
// ---------------------------------------------------------------------------

#[test]
fn test_initial_zoom_is_one() {
    let vp = Viewport::new();
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.pan(), Point::ZERO);
}

#[test]
fn test_zoom_in_steps_by_quarter() {
    let mut vp = Viewport::new();
    assert!(vp.zoom_in());
    assert_abs_diff_eq!(vp.zoom(), 1.25);
    vp.zoom_out();
    vp.zoom_out();
    assert_abs_diff_eq!(vp.zoom(), 0.75);
}

#[test]
fn test_zoom_in_never_exceeds_max() {
    let mut vp = Viewport::new();
    for _ in 0..100 {
        vp.zoom_in();
        assert!(vp.zoom() <= MAX_ZOOM);
    }
    assert_eq!(vp.zoom(), MAX_ZOOM);
    assert!(!vp.zoom_in(), "zooming past the limit reports no change");
}

#[test]
fn test_zoom_out_never_below_min() {
    let mut vp = Viewport::new();
    for _ in 0..100 {
        vp.zoom_out();
        assert!(vp.zoom() >= MIN_ZOOM);
    }
    assert_eq!(vp.zoom(), MIN_ZOOM);
}

#[test]
fn test_wheel_up_zooms_in_by_tenth() {
    let mut vp = Viewport::new();
    let outcome = vp.on_wheel(-120.0);
    assert!(outcome.consumed);
    assert!(outcome.zoom_changed);
    assert_abs_diff_eq!(vp.zoom(), 1.1, epsilon = 1e-6);
}

#[test]
fn test_wheel_step_ignores_delta_magnitude() {
    let mut a = Viewport::new();
    let mut b = Viewport::new();
    a.on_wheel(3.0);
    b.on_wheel(900.0);
    assert_eq!(a.zoom(), b.zoom());
    assert_abs_diff_eq!(a.zoom(), 0.9, epsilon = 1e-6);
}

#[test]
fn test_wheel_zero_delta_is_consumed_without_change() {
    let mut vp = Viewport::new();
    let outcome = vp.on_wheel(0.0);
    assert!(outcome.consumed);
    assert!(!outcome.zoom_changed);
    assert_eq!(vp.zoom(), 1.0);
}

#[test]
fn test_mixed_zoom_inputs_stay_in_range() {
    let mut vp = Viewport::new();
    for i in 0..500 {
        match i % 5 {
            0 => {
                vp.zoom_in();
            }
            1 => {
                vp.on_wheel(-1.0);
            }
            2 => {
                vp.on_wheel(-50.0);
            }
            3 => {
                vp.zoom_in();
            }
            _ => {
                vp.on_wheel(10.0);
            }
        }
        assert!((MIN_ZOOM..=MAX_ZOOM).contains(&vp.zoom()), "zoom {}", vp.zoom());
    }
    for _ in 0..500 {
        vp.on_wheel(1.0);
        assert!((MIN_ZOOM..=MAX_ZOOM).contains(&vp.zoom()));
    }
    assert_eq!(vp.zoom(), MIN_ZOOM);
}

#[test]
fn test_repeated_wheel_steps_do_not_drift() {
    let mut vp = Viewport::new();
    for _ in 0..7 {
        vp.on_wheel(-1.0);
    }
    for _ in 0..7 {
        vp.on_wheel(1.0);
    }
    assert_eq!(vp.zoom(), 1.0);
}

#[test]
fn test_set_zoom_rejects_nan() {
    let mut vp = Viewport::new();
    assert!(!vp.set_zoom(f32::NAN));
    assert_eq!(vp.zoom(), 1.0);
}

// ---------------------------------------------------------------------------
// Dragging
// ---------------------------------------------------------------------------

#[test]
fn test_drag_requires_image() {
    let mut vp = Viewport::new();
    assert!(!vp.begin_drag(10.0, 10.0, false));
    assert!(!vp.is_dragging());
    assert!(!vp.continue_drag(50.0, 50.0));
    assert_eq!(vp.pan(), Point::ZERO);
}

#[test]
fn test_drag_moves_pan_one_to_one() {
    let mut vp = Viewport::new();
    assert!(vp.begin_drag(100.0, 100.0, true));
    vp.continue_drag(130.0, 80.0);
    assert_eq!(vp.pan(), Point::new(30.0, -20.0));
    vp.continue_drag(150.0, 90.0);
    vp.end_drag();
    assert_eq!(vp.pan(), Point::new(50.0, -10.0));
    assert!(!vp.is_dragging());
}

#[test]
fn test_pan_after_end_drag_equals_last_continue() {
    let mut vp = Viewport::new();
    vp.zoom_in();
    vp.begin_drag(0.0, 0.0, true);
    vp.continue_drag(-400.0, 1200.0);
    vp.end_drag();
    vp.continue_drag(9.0, 9.0);
    assert_eq!(vp.pan(), Point::new(-400.0, 1200.0));
}

#[test]
fn test_second_drag_continues_from_current_pan() {
    let mut vp = Viewport::new();
    vp.begin_drag(0.0, 0.0, true);
    vp.continue_drag(20.0, 20.0);
    vp.end_drag();

    vp.begin_drag(200.0, 200.0, true);
    vp.continue_drag(210.0, 205.0);
    vp.end_drag();
    assert_eq!(vp.pan(), Point::new(30.0, 25.0));
}

#[test]
fn test_begin_end_cycles_without_motion_do_not_drift() {
    let mut vp = Viewport::new();
    vp.begin_drag(0.0, 0.0, true);
    vp.continue_drag(37.5, -12.25);
    vp.end_drag();
    let pan = vp.pan();

    for _ in 0..1000 {
        vp.begin_drag(64.0, 64.0, true);
        vp.continue_drag(64.0, 64.0);
        vp.end_drag();
    }
    assert_eq!(vp.pan(), pan);
}

#[test]
fn test_pan_is_unbounded() {
    let mut vp = Viewport::new();
    vp.begin_drag(0.0, 0.0, true);
    vp.continue_drag(1.0e6, -1.0e6);
    vp.end_drag();
    assert_eq!(vp.pan(), Point::new(1.0e6, -1.0e6));
}

// ---------------------------------------------------------------------------
// Reset and rendering
// ---------------------------------------------------------------------------

#[test]
fn test_reset_restores_identity() {
    let mut vp = Viewport::new();
    vp.zoom_in();
    vp.begin_drag(0.0, 0.0, true);
    vp.continue_drag(40.0, 40.0);
    vp.reset();
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.pan(), Point::ZERO);
    assert!(!vp.is_dragging());
}

#[test]
fn test_render_transform_divides_pan_by_zoom() {
    let mut vp = Viewport::new();
    vp.set_zoom(2.0);
    vp.begin_drag(0.0, 0.0, true);
    vp.continue_drag(100.0, -50.0);

    let t = vp.render_transform();
    assert_eq!(t.scale, 2.0);
    assert_abs_diff_eq!(t.translate.x, 50.0);
    assert_abs_diff_eq!(t.translate.y, -25.0);
}

#[test]
fn test_screen_offset_matches_pan_at_any_zoom() {
    let mut vp = Viewport::new();
    vp.begin_drag(0.0, 0.0, true);
    vp.continue_drag(73.0, -19.0);
    vp.end_drag();

    for zoom in [0.5, 0.75, 1.0, 1.3, 2.5, 5.0] {
        vp.set_zoom(zoom);
        let offset = vp.render_transform().screen_offset();
        assert_abs_diff_eq!(offset.x, 73.0, epsilon = 1e-4);
        assert_abs_diff_eq!(offset.y, -19.0, epsilon = 1e-4);
    }
}

#[test]
fn test_image_rect_scales_around_center() {
    let mut vp = Viewport::new();
    vp.set_zoom(2.0);
    let rect = vp.image_rect(Point::new(400.0, 300.0), (100.0, 50.0));
    assert_abs_diff_eq!(rect.width, 200.0);
    assert_abs_diff_eq!(rect.height, 100.0);
    assert_abs_diff_eq!(rect.center().x, 400.0);
    assert_abs_diff_eq!(rect.center().y, 300.0);
}

#[test]
fn test_image_rect_follows_pan() {
    let mut vp = Viewport::new();
    vp.set_zoom(3.0);
    vp.begin_drag(0.0, 0.0, true);
    vp.continue_drag(30.0, 15.0);
    let rect = vp.image_rect(Point::new(0.0, 0.0), (10.0, 10.0));
    assert_abs_diff_eq!(rect.center().x, 30.0, epsilon = 1e-4);
    assert_abs_diff_eq!(rect.center().y, 15.0, epsilon = 1e-4);
}
