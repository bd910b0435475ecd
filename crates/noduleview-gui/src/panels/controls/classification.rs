use noduleview_core::orchestrator::ViewerPhase;

use crate::app::ViewerApp;
use crate::panels::section_header;

const NODULE_COLOR: egui::Color32 = egui::Color32::from_rgb(200, 60, 60);
const CLEAR_COLOR: egui::Color32 = egui::Color32::from_rgb(60, 160, 90);

pub(super) fn classification_section(ui: &mut egui::Ui, app: &mut ViewerApp) {
    section_header(ui, "Classification", None);
    ui.add_space(4.0);

    let analyzing = matches!(app.viewer.phase(), ViewerPhase::ClassifyPending);
    let button_text = if analyzing { "Analyzing..." } else { "Classify" };
    let button = egui::Button::new(button_text).min_size(egui::vec2(ui.available_width(), 28.0));
    if ui.add_enabled(app.viewer.can_classify(), button).clicked() {
        app.classify();
    }

    ui.add_space(6.0);

    let Some(result) = app.viewer.result() else {
        ui.small("No prediction yet");
        return;
    };

    let fill = if result.indicates_nodule() {
        NODULE_COLOR
    } else {
        CLEAR_COLOR
    };
    ui.horizontal(|ui| {
        ui.label("Prediction:");
        egui::Frame::NONE
            .fill(fill)
            .inner_margin(egui::Margin::symmetric(8, 2))
            .corner_radius(8.0)
            .show(ui, |ui| {
                ui.label(
                    egui::RichText::new(app.viewer.label())
                        .strong()
                        .color(egui::Color32::WHITE),
                );
            });
    });

    let fraction = result
        .confidence
        .and_then(|c| c.percent())
        .map(|p| (p / 100.0) as f32)
        .unwrap_or(0.0);
    let text = format!("Confidence {}", app.viewer.confidence_text());
    ui.add(egui::ProgressBar::new(fraction).text(text));
}

pub(super) fn display_section(ui: &mut egui::Ui, app: &mut ViewerApp) {
    let layer = app.ui_state.shown.as_ref().map(|s| s.layer.to_string());
    section_header(ui, "Display", layer.as_deref());
    ui.add_space(4.0);

    let mut visible = app.viewer.heatmap_visible();
    let available = app.viewer.heatmap_toggle_available();
    let response = ui
        .add_enabled(available, egui::Checkbox::new(&mut visible, "Show heatmap"))
        .on_disabled_hover_text("Available once a classification returns a heatmap and original");
    if response.changed() {
        app.set_heatmap_visible(visible);
    }

    ui.horizontal(|ui| {
        if ui.button("-").clicked() {
            app.viewer.viewport_mut().zoom_out();
        }
        ui.label(format!("{:.0}%", app.viewer.viewport().zoom() * 100.0));
        if ui.button("+").clicked() {
            app.viewer.viewport_mut().zoom_in();
        }
        if ui.button("Reset").clicked() {
            app.viewer.viewport_mut().reset();
        }
    });
}
