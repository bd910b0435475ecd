use noduleview_core::viewport::{Point, Viewport};

use crate::app::ViewerApp;

pub fn show(ctx: &egui::Context, app: &mut ViewerApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        handle_wheel(ui, &response, app);
        handle_drag(ui, &response, app, rect);

        if response.double_clicked() {
            app.viewer.viewport_mut().reset();
        }

        let texture_info = app
            .ui_state
            .shown
            .as_ref()
            .and_then(|shown| app.textures.get(&shown.key))
            .map(|t| (t.id(), t.size_vec2()));

        match texture_info {
            Some((texture_id, tex_size)) => {
                let img_rect = compute_img_rect(rect, tex_size, app.viewer.viewport());
                draw_image(ui, rect, texture_id, img_rect);
                if let Some(ref shown) = app.ui_state.shown {
                    draw_layer_label(ui, rect, &shown.layer.to_string());
                }
            }
            None => show_placeholder(ui, rect, &placeholder_text(app)),
        }
    });
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(20));
}

fn handle_wheel(ui: &egui::Ui, response: &egui::Response, app: &mut ViewerApp) {
    if !response.hovered() {
        return;
    }
    let deltas: Vec<f32> = ui.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::MouseWheel { delta, .. } => Some(delta.y),
                _ => None,
            })
            .collect()
    });
    // egui reports wheel-up as positive; the viewport zooms in on negative deltas.
    for dy in deltas {
        app.viewer.viewport_mut().on_wheel(-dy);
    }
}

fn handle_drag(ui: &egui::Ui, response: &egui::Response, app: &mut ViewerApp, rect: egui::Rect) {
    if response.drag_started_by(egui::PointerButton::Primary) {
        if let Some(pos) = response.interact_pointer_pos() {
            app.viewer.begin_drag(pos.x, pos.y);
        }
    }

    if !app.viewer.viewport().is_dragging() {
        return;
    }

    let (pointer, primary_down) = ui.input(|i| (i.pointer.latest_pos(), i.pointer.primary_down()));
    let left_area = pointer.is_none_or(|p| !rect.contains(p));
    if response.drag_stopped() || !primary_down || left_area {
        app.viewer.viewport_mut().end_drag();
    } else if let Some(pos) = pointer {
        app.viewer.viewport_mut().continue_drag(pos.x, pos.y);
    }
}

/// Largest size that fits the texture inside `rect` with its aspect ratio kept.
fn contain_size(rect: egui::Rect, tex_size: egui::Vec2) -> egui::Vec2 {
    if tex_size.x <= 0.0 || tex_size.y <= 0.0 {
        return egui::Vec2::ZERO;
    }
    let scale = (rect.width() / tex_size.x).min(rect.height() / tex_size.y);
    tex_size * scale
}

fn compute_img_rect(rect: egui::Rect, tex_size: egui::Vec2, viewport: &Viewport) -> egui::Rect {
    let base = contain_size(rect, tex_size);
    let center = rect.center();
    let screen = viewport.image_rect(Point::new(center.x, center.y), (base.x, base.y));
    egui::Rect::from_min_size(
        egui::pos2(screen.min.x, screen.min.y),
        egui::vec2(screen.width, screen.height),
    )
}

fn draw_image(ui: &egui::Ui, clip: egui::Rect, texture_id: egui::TextureId, img_rect: egui::Rect) {
    ui.painter_at(clip).image(
        texture_id,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn draw_layer_label(ui: &egui::Ui, rect: egui::Rect, label: &str) {
    let label_pos = rect.left_top() + egui::vec2(8.0, 8.0);
    ui.painter().text(
        label_pos,
        egui::Align2::LEFT_TOP,
        label,
        egui::FontId::proportional(14.0),
        egui::Color32::from_white_alpha(200),
    );
}

fn placeholder_text(app: &ViewerApp) -> String {
    if let Some(ref shown) = app.ui_state.shown {
        if let Some(message) = app.textures.failure(&shown.key) {
            return format!("Cannot display image: {message}");
        }
        if app.textures.is_pending(&shown.key) {
            return "Decoding image...".to_string();
        }
        return "Loading...".to_string();
    }
    if app.viewer.is_busy() {
        return "Loading...".to_string();
    }
    match app.viewer.banner() {
        Some(banner) => banner,
        None => "Select an image to begin".to_string(),
    }
}

fn show_placeholder(ui: &egui::Ui, rect: egui::Rect, text: &str) {
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(18.0),
        egui::Color32::from_gray(110),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(w: f32, h: f32) -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(w, h))
    }

    #[test]
    fn test_contain_wide_image() {
        let size = contain_size(rect(400.0, 400.0), egui::vec2(800.0, 400.0));
        assert_eq!(size, egui::vec2(400.0, 200.0));
    }

    #[test]
    fn test_contain_small_image_scales_up() {
        let size = contain_size(rect(400.0, 200.0), egui::vec2(100.0, 100.0));
        assert_eq!(size, egui::vec2(200.0, 200.0));
    }

    #[test]
    fn test_contain_empty_texture() {
        assert_eq!(contain_size(rect(400.0, 400.0), egui::Vec2::ZERO), egui::Vec2::ZERO);
    }

    #[test]
    fn test_img_rect_centered_at_default_view() {
        let r = compute_img_rect(rect(400.0, 400.0), egui::vec2(800.0, 400.0), &Viewport::new());
        assert_eq!(r.center(), egui::pos2(200.0, 200.0));
        assert_eq!(r.size(), egui::vec2(400.0, 200.0));
    }

    #[test]
    fn test_img_rect_follows_zoom() {
        let mut viewport = Viewport::new();
        viewport.set_zoom(2.0);
        let r = compute_img_rect(rect(400.0, 400.0), egui::vec2(400.0, 400.0), &viewport);
        assert_eq!(r.size(), egui::vec2(800.0, 800.0));
        assert_eq!(r.center(), egui::pos2(200.0, 200.0));
    }
}
