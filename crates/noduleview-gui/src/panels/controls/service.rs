use crate::app::ViewerApp;
use crate::messages::WorkerCommand;
use crate::panels::section_header;

pub(super) fn service_section(ui: &mut egui::Ui, app: &mut ViewerApp) {
    let status = match app.ui_state.service {
        Some(ref info) => info.message.as_deref().unwrap_or("online"),
        None => "unknown",
    };
    section_header(ui, "Service", Some(status));
    ui.add_space(4.0);

    ui.small(&app.config.server.base_url);
    if let Some(predictor) = app
        .ui_state
        .service
        .as_ref()
        .and_then(|info| info.active_predictor.as_deref())
    {
        ui.small(format!("Predictor: {predictor}"));
    }

    if ui.button("Check Status").clicked() {
        app.send_command(WorkerCommand::CheckService);
    }
}
