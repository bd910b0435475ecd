use crate::app::ViewerApp;

const LOG_LINES: f32 = 4.0;

pub fn show(ctx: &egui::Context, app: &mut ViewerApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        // Requests carry no progress; the bar only animates while one is out.
        if app.viewer.is_busy() {
            let text = format!("{}...", app.viewer.phase());
            ui.add(egui::ProgressBar::new(0.0).text(text).animate(true));
        } else {
            ui.add(egui::ProgressBar::new(0.0).text(""));
        }

        if let Some(banner) = app.viewer.banner() {
            ui.colored_label(ui.visuals().error_fg_color, banner);
        }

        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * LOG_LINES + spacing * (LOG_LINES - 1.0);

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..LOG_LINES as usize {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        // Status line
        ui.horizontal(|ui| {
            if let Some(ref shown) = app.ui_state.shown {
                if let Some(texture) = app.textures.get(&shown.key) {
                    let [w, h] = texture.size();
                    ui.label(format!("{w}x{h}"));
                    ui.separator();
                }
                ui.label(shown.layer.to_string());
                ui.separator();
            }
            ui.label(format!("Zoom: {:.0}%", app.viewer.viewport().zoom() * 100.0));
            ui.separator();
            ui.label(format!("Service: {}", app.config.server.base_url));
        });

        ui.add_space(2.0);
    });
}
