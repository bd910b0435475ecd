pub mod controls;
pub mod menu_bar;
pub mod rating;
pub mod status;
pub mod viewport;

/// Image formats offered by the open dialog. Volumetric scans are decoded by
/// the inference service.
pub(crate) const OPEN_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff", "webp", "mhd", "mha", "dcm",
];

pub(crate) fn section_header(ui: &mut egui::Ui, label: &str, status: Option<&str>) {
    ui.horizontal(|ui| {
        ui.strong(label);
        if let Some(s) = status {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.small(s);
            });
        }
    });
}

/// Spawn a file picker off the UI thread and queue the chosen file.
pub(crate) fn open_file(app: &crate::app::ViewerApp) {
    let Some(workers) = app.workers.clone() else {
        return;
    };
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", OPEN_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = workers.send(crate::messages::WorkerCommand::LoadFile { path });
        }
    });
}
