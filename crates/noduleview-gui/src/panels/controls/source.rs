use noduleview_core::orchestrator::ViewerPhase;
use noduleview_core::source::ImageSource;

use crate::app::ViewerApp;
use crate::panels::section_header;

pub(super) fn source_section(ui: &mut egui::Ui, app: &mut ViewerApp) {
    let status = match app.viewer.phase() {
        ViewerPhase::Idle => None,
        phase => Some(phase.to_string()),
    };
    section_header(ui, "Image", status.as_deref());
    ui.add_space(4.0);

    if ui.button("Open...").clicked() {
        crate::panels::open_file(app);
    }

    let source = app.viewer.source();
    match source {
        ImageSource::None => {
            ui.small("No image selected");
        }
        ImageSource::Local { .. } => {
            ui.label(source.name());
            if let Some(format) = source.format() {
                ui.small(format.to_string());
            }
            if let Some(len) = source.byte_len() {
                ui.small(format_bytes(len));
            }
        }
        ImageSource::Remote { library_id, .. } => {
            ui.label(source.name());
            ui.small(format!("Library item {library_id}"));
        }
    }

    ui.add_space(4.0);
    ui.label("Library item:");
    let mut submit = false;
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut app.ui_state.library_id_input)
                .hint_text("id")
                .desired_width(140.0),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            submit = true;
        }
        let id = app.ui_state.library_id_input.trim();
        if ui.add_enabled(!id.is_empty(), egui::Button::new("Load")).clicked() {
            submit = true;
        }
    });

    if submit {
        let id = app.ui_state.library_id_input.trim().to_string();
        if !id.is_empty() {
            app.select(ImageSource::remote(format!("Library item {id}"), id));
        }
    }
}

fn format_bytes(len: usize) -> String {
    const KIB: f64 = 1024.0;
    let len = len as f64;
    if len < KIB {
        format!("{len} B")
    } else if len < KIB * KIB {
        format!("{:.1} KiB", len / KIB)
    } else {
        format!("{:.1} MiB", len / (KIB * KIB))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KiB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MiB");
    }
}
