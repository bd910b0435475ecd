mod app;
mod convert;
mod messages;
mod panels;
mod states;
mod workers;

use std::path::Path;

use noduleview_core::config::ViewerConfig;

/// Looked up in the working directory at startup.
pub(crate) const CONFIG_FILE: &str = "noduleview.toml";

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = load_config();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_drag_and_drop(true)
            .with_title("NoduleView"),
        ..Default::default()
    };

    eframe::run_native(
        "NoduleView",
        options,
        Box::new(|cc| Ok(Box::new(app::ViewerApp::new(&cc.egui_ctx, config)))),
    )
}

fn load_config() -> ViewerConfig {
    let path = Path::new(CONFIG_FILE);
    let file = path.exists().then_some(path);
    match ViewerConfig::load_or_default(file) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring {CONFIG_FILE}: {e}");
            ViewerConfig::default().with_env_overrides()
        }
    }
}
