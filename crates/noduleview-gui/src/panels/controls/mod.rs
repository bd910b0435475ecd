mod classification;
mod service;
mod source;

const LEFT_PANEL_WIDTH: f32 = 260.0;

pub fn show(ctx: &egui::Context, app: &mut crate::app::ViewerApp) {
    egui::SidePanel::left("controls")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                source::source_section(ui, app);
                ui.separator();
                classification::classification_section(ui, app);
                ui.separator();
                classification::display_section(ui, app);
                ui.separator();
                service::service_section(ui, app);
            });
        });
}
