use egui::{Key, KeyboardShortcut, Modifiers};

use crate::app::ViewerApp;
use crate::messages::{WorkerCommand, WorkerResult};

const OPEN: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::O);
const SAVE: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::S);
const QUIT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Q);
// Unmodified keys; egui keeps Cmd +/- for its own UI scaling.
const ZOOM_IN: KeyboardShortcut = KeyboardShortcut::new(Modifiers::NONE, Key::Plus);
const ZOOM_IN_ALT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::NONE, Key::Equals);
const ZOOM_OUT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::NONE, Key::Minus);
const RESET_VIEW: KeyboardShortcut = KeyboardShortcut::new(Modifiers::NONE, Key::Num0);
const HEATMAP: KeyboardShortcut = KeyboardShortcut::new(Modifiers::NONE, Key::H);

pub fn show(ctx: &egui::Context, app: &mut ViewerApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.add(menu_item(ctx, "Open...", &OPEN)).clicked() {
                    ui.close();
                    super::open_file(app);
                }

                let displayed = app.viewer.display().is_some();
                if ui
                    .add_enabled(
                        displayed,
                        menu_item(ctx, "Save Displayed Image...", &SAVE),
                    )
                    .clicked()
                {
                    ui.close();
                    save_displayed(app);
                }

                if ui
                    .add_enabled(!app.viewer.source().is_none(), egui::Button::new("Close Image"))
                    .clicked()
                {
                    ui.close();
                    app.clear();
                }

                ui.separator();

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(app);
                }

                ui.separator();

                if ui.add(menu_item(ctx, "Quit", &QUIT)).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                if ui.add(menu_item(ctx, "Zoom In", &ZOOM_IN)).clicked() {
                    app.viewer.viewport_mut().zoom_in();
                }
                if ui.add(menu_item(ctx, "Zoom Out", &ZOOM_OUT)).clicked() {
                    app.viewer.viewport_mut().zoom_out();
                }
                if ui.add(menu_item(ctx, "Reset View", &RESET_VIEW)).clicked() {
                    ui.close();
                    app.viewer.viewport_mut().reset();
                }

                ui.separator();

                let mut visible = app.viewer.heatmap_visible();
                if ui
                    .add_enabled(
                        app.viewer.heatmap_toggle_available(),
                        egui::Checkbox::new(&mut visible, "Show Heatmap"),
                    )
                    .changed()
                {
                    app.set_heatmap_visible(visible);
                }
            });

            ui.menu_button("Service", |ui| {
                if ui.button("Check Status").clicked() {
                    ui.close();
                    app.send_command(WorkerCommand::CheckService);
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.ui_state.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&OPEN)) {
            super::open_file(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&SAVE)) {
            save_displayed(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&QUIT)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        // Single keys would otherwise fire while typing a library id.
        if ctx.wants_keyboard_input() {
            return;
        }
        if ctx.input_mut(|i| i.consume_shortcut(&ZOOM_IN) || i.consume_shortcut(&ZOOM_IN_ALT)) {
            app.viewer.viewport_mut().zoom_in();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&ZOOM_OUT)) {
            app.viewer.viewport_mut().zoom_out();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&RESET_VIEW)) {
            app.viewer.viewport_mut().reset();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&HEATMAP)) {
            app.toggle_heatmap();
        }
    });
}

fn menu_item<'a>(
    ctx: &egui::Context,
    text: &'a str,
    shortcut: &KeyboardShortcut,
) -> egui::Button<'a> {
    egui::Button::new(text).shortcut_text(ctx.format_shortcut(shortcut))
}

fn suggested_name(app: &ViewerApp) -> String {
    let stem = std::path::Path::new(app.viewer.source().name())
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());
    let layer = app
        .ui_state
        .shown
        .as_ref()
        .map(|s| s.layer.to_string().to_lowercase().replace(' ', "_"))
        .unwrap_or_else(|| "view".to_string());
    format!("{stem}_{layer}.png")
}

/// Ask for a target off the UI thread. The dialog only reports the path; the
/// image is chosen when the answer arrives.
fn save_displayed(app: &mut ViewerApp) {
    if app.viewer.display().is_none() {
        return;
    }
    let result_tx = app.result_tx.clone();
    let file_name = suggested_name(app);
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .add_filter("TIFF", &["tiff", "tif"])
            .add_filter("JPEG", &["jpg", "jpeg"])
            .set_file_name(file_name)
            .save_file()
        {
            let _ = result_tx.send(WorkerResult::SaveTargetChosen { path });
        }
    });
}

fn export_config(app: &mut ViewerApp) {
    let content = match app.config.to_toml_string() {
        Ok(content) => content,
        Err(e) => {
            app.ui_state.add_log(format!("ERROR: {e}"));
            return;
        }
    };

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name(crate::CONFIG_FILE)
            .save_file()
        {
            if let Err(e) = std::fs::write(&path, content) {
                tracing::warn!("Failed to write {}: {e}", path.display());
            }
        }
    });
}
