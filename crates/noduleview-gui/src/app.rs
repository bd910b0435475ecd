use std::collections::HashSet;
use std::sync::mpsc;

use noduleview_core::config::ViewerConfig;
use noduleview_core::orchestrator::{ApplyOutcome, Request, Viewer, ViewerEvent};
use noduleview_core::source::ImageSource;

use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{RatedClassification, ShownImage, TextureCache, UIState};
use crate::workers::{self, Workers};

pub struct ViewerApp {
    pub workers: Option<Workers>,
    /// Handed to dialog threads so they report back through the UI.
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub viewer: Viewer,
    pub textures: TextureCache,
    pub ui_state: UIState,
    pub config: ViewerConfig,
}

impl ViewerApp {
    pub fn new(ctx: &egui::Context, config: ViewerConfig) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let mut ui_state = UIState::default();
        let workers = match workers::spawn_workers(&config, result_tx.clone(), ctx.clone()) {
            Ok(workers) => Some(workers),
            Err(e) => {
                tracing::error!("Failed to spawn worker threads: {e}");
                ui_state.add_log(format!("ERROR: worker threads unavailable: {e}"));
                None
            }
        };

        Self {
            workers,
            result_tx,
            result_rx,
            viewer: Viewer::new(&config.viewer),
            textures: TextureCache::default(),
            ui_state,
            config,
        }
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::FileLoaded { source } => {
                    self.select(source);
                }
                WorkerResult::PreviewDone { token, outcome } => {
                    if self.viewer.apply_preview(token, outcome) == ApplyOutcome::Applied {
                        self.after_viewer_change();
                    }
                }
                WorkerResult::ClassifyDone { token, outcome } => {
                    if self.viewer.apply_classification(token, outcome) == ApplyOutcome::Applied {
                        self.after_viewer_change();
                    }
                }
                WorkerResult::Decoded { key, image } => {
                    self.textures.insert(ctx, key, image);
                }
                WorkerResult::DecodeFailed { key, message } => {
                    self.ui_state.add_log(format!("ERROR: cannot display image: {message}"));
                    self.textures.fail(key, message);
                }
                WorkerResult::ServiceStatus { info } => {
                    self.ui_state.add_log(format!(
                        "Service: {} ({})",
                        info.message.as_deref().unwrap_or("online"),
                        info.active_predictor.as_deref().unwrap_or("unknown predictor")
                    ));
                    self.ui_state.service = Some(info);
                }
                WorkerResult::SaveTargetChosen { path } => {
                    self.save_displayed(path);
                }
                WorkerResult::ImageSaved { path } => {
                    self.ui_state.add_log(format!("Saved: {}", path.display()));
                }
                WorkerResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    /// Make `source` current and start whatever it needs.
    pub fn select(&mut self, source: ImageSource) {
        if !source.is_none() {
            self.ui_state.add_log(format!("Selected: {}", source.name()));
        }
        let request = self.viewer.select(source);
        self.after_viewer_change();
        if let Some(request) = request {
            self.dispatch(request);
        }
    }

    pub fn clear(&mut self) {
        self.viewer.clear();
        self.after_viewer_change();
    }

    pub fn classify(&mut self) {
        if let Some(request) = self.viewer.classify() {
            self.ui_state
                .add_log(format!("Analyzing {}", self.viewer.source().name()));
            self.after_viewer_change();
            self.dispatch(request);
        }
    }

    pub fn toggle_heatmap(&mut self) {
        if self.viewer.heatmap_toggle_available() {
            self.viewer.toggle_heatmap();
            self.after_viewer_change();
        }
    }

    pub fn set_heatmap_visible(&mut self, visible: bool) {
        if self.viewer.heatmap_toggle_available() {
            self.viewer.set_heatmap_visible(visible);
            self.after_viewer_change();
        }
    }

    /// Write whatever is displayed now to `path`. Looked up only once the
    /// dialog closes, so a handle the viewer released meanwhile is never sent.
    fn save_displayed(&mut self, path: std::path::PathBuf) {
        match self.viewer.display().map(|d| d.image.clone()) {
            Some(image) => self.send_command(WorkerCommand::SaveImage { image, path }),
            None => self.ui_state.add_log("Nothing to save".to_string()),
        }
    }

    fn dispatch(&mut self, request: Request) {
        self.send_command(WorkerCommand::Run(request));
    }

    /// Recompute what is shown, request any missing decode, evict textures
    /// that no longer belong to the current source, and surface events.
    fn after_viewer_change(&mut self) {
        let banner = self.viewer.banner();
        if banner != self.ui_state.reported_failure {
            if let Some(ref failure) = banner {
                self.ui_state.add_log(format!("ERROR: {failure}"));
            }
            self.ui_state.reported_failure = banner;
        }

        let keep: HashSet<String> = self
            .viewer
            .preview()
            .map(|p| &p.image)
            .into_iter()
            .chain(self.viewer.result().into_iter().flat_map(|r| r.images()))
            .map(|image| image.cache_key())
            .collect();
        self.textures.retain(&keep);

        let shown = self.viewer.display().map(|d| (d.image.clone(), d.layer));
        self.ui_state.shown = match shown {
            Some((image, layer)) => {
                let key = image.cache_key();
                if self.textures.begin_decode(&key) {
                    self.send_command(WorkerCommand::Decode {
                        key: key.clone(),
                        image,
                    });
                }
                Some(ShownImage { key, layer })
            }
            None => None,
        };

        for event in self.viewer.drain_events() {
            match event {
                ViewerEvent::ClassificationCompleted { label, .. } => {
                    self.ui_state.add_log(format!(
                        "Prediction: {label} ({})",
                        self.viewer.confidence_text()
                    ));
                    if self.config.viewer.prompt_rating {
                        self.ui_state.rating.prompt(RatedClassification {
                            source: self.viewer.source().name().to_string(),
                            label,
                            confidence: self.viewer.confidence_text(),
                        });
                    }
                }
            }
        }
    }

    /// Files dropped onto the window; the first one is opened.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };
        if let Some(bytes) = file.bytes {
            let name = if file.name.is_empty() {
                "dropped image".to_string()
            } else {
                file.name
            };
            self.select(ImageSource::local(name, bytes));
        } else if let Some(path) = file.path {
            self.open_path(path);
        }
    }

    pub fn open_path(&mut self, path: std::path::PathBuf) {
        self.send_command(WorkerCommand::LoadFile { path });
    }

    pub fn send_command(&mut self, cmd: WorkerCommand) {
        let delivered = self
            .workers
            .as_ref()
            .is_some_and(|tx| tx.send(cmd).is_ok());
        if !delivered {
            self.ui_state
                .add_log("ERROR: worker threads are not running".to_string());
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);
        self.handle_dropped_files(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::viewport::show(ctx, self);
        panels::rating::show(ctx, self);

        // About dialog
        if self.ui_state.show_about {
            egui::Window::new("About NoduleView")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("NoduleView");
                        ui.label("Pulmonary nodule classification viewer");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.label(format!("Service: {}", self.config.server.base_url));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}
