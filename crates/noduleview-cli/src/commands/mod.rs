pub mod classify;
pub mod config;
pub mod info;
pub mod preview;
pub mod status;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use noduleview_core::client::{HttpBackend, InferenceBackend};
use noduleview_core::config::ViewerConfig;
use noduleview_core::orchestrator::{drive, Request, Viewer};
use noduleview_core::source::ImageSource;
use tracing::debug;

/// Where the image comes from, shared by `preview` and `classify`.
#[derive(Args)]
pub struct SourceArgs {
    /// Local image or volumetric scan
    #[arg(required_unless_present = "library_id", conflicts_with = "library_id")]
    pub file: Option<PathBuf>,

    /// Identifier of an item in the server-side library
    #[arg(long)]
    pub library_id: Option<String>,
}

impl SourceArgs {
    pub fn to_source(&self) -> Result<ImageSource> {
        match (&self.file, &self.library_id) {
            (Some(path), None) => ImageSource::from_path(path)
                .with_context(|| format!("Failed to read {}", path.display())),
            (None, Some(id)) => Ok(ImageSource::remote(format!("library:{id}"), id.clone())),
            _ => bail!("Pass either a file or --library-id"),
        }
    }
}

/// Options for commands that talk to the inference service.
#[derive(Args)]
pub struct ServerArgs {
    /// Viewer config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Inference service base URL, overrides the config file
    #[arg(long)]
    pub api_url: Option<String>,
}

impl ServerArgs {
    pub fn load_config(&self) -> Result<ViewerConfig> {
        let config = ViewerConfig::load_or_default(self.config.as_deref()).with_context(|| {
            match &self.config {
                Some(path) => format!("Failed to load config {}", path.display()),
                None => "Failed to build default config".to_string(),
            }
        })?;
        Ok(config.with_api_url_override(self.api_url.clone()))
    }
}

pub fn connect(config: &ViewerConfig) -> Result<HttpBackend> {
    debug!(
        url = %config.server.base_url,
        timeout_secs = config.server.timeout_secs,
        "Connecting to inference service"
    );
    HttpBackend::new(&config.server).context("Failed to create HTTP client")
}

pub fn spinner(message: impl Into<String>) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg} ({elapsed})")?);
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Run one viewer request with a spinner, then fail if the viewer recorded a failure.
pub fn run_request(
    viewer: &mut Viewer,
    backend: &dyn InferenceBackend,
    request: Request,
) -> Result<()> {
    let pb = spinner(format!("{} of {}", request.kind(), request.source().name()))?;
    drive(viewer, backend, request);
    pb.finish_and_clear();

    if let Some(banner) = viewer.banner() {
        bail!("{banner}");
    }
    Ok(())
}
