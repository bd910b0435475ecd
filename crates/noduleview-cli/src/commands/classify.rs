use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use noduleview_core::client::InferenceBackend;
use noduleview_core::handle::ImageRef;
use noduleview_core::imaging::save_image;
use noduleview_core::orchestrator::Viewer;
use noduleview_core::result::InferenceResult;
use serde::Serialize;

use super::{connect, run_request, ServerArgs, SourceArgs};
use crate::summary;

#[derive(Args)]
pub struct ClassifyArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub server: ServerArgs,

    /// Save the heatmap overlay returned by the service
    #[arg(long)]
    pub save_heatmap: Option<PathBuf>,

    /// Save the rectified original returned by the service
    #[arg(long)]
    pub save_original: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ClassificationReport<'a> {
    source: &'a str,
    label: &'a str,
    nodule: bool,
    confidence: Option<f64>,
    confidence_percent: Option<f64>,
    confidence_text: String,
    has_heatmap: bool,
    displayed: Option<String>,
}

pub fn run(args: &ClassifyArgs) -> Result<()> {
    let config = args.server.load_config()?;
    let backend = connect(&config)?;
    let client: &dyn InferenceBackend = &backend;

    let mut viewer = Viewer::new(&config.viewer);
    if let Some(request) = viewer.select(args.source.to_source()?) {
        run_request(&mut viewer, client, request)?;
    } else if let Some(banner) = viewer.banner() {
        bail!("{banner}");
    }

    let request = viewer.classify().context("Nothing to classify")?;
    run_request(&mut viewer, client, request)?;

    let result = viewer
        .result()
        .context("Classification produced no result")?
        .clone();

    if let Some(ref path) = args.save_heatmap {
        save_layer(result.heatmap_image.as_ref(), "heatmap", client, path)?;
    }
    if let Some(ref path) = args.save_original {
        save_layer(result.original_image.as_ref(), "original image", client, path)?;
    }

    let displayed = viewer.display().map(|d| d.layer.to_string());
    if args.json {
        print_json(viewer.source().name(), &result, displayed)?;
    } else {
        summary::print_classification_summary(
            viewer.source().name(),
            &result,
            displayed.as_deref(),
        );
    }

    Ok(())
}

fn save_layer(
    image: Option<&ImageRef>,
    what: &str,
    client: &dyn InferenceBackend,
    path: &Path,
) -> Result<()> {
    let Some(image) = image else {
        bail!("The service returned no {what}");
    };
    save_image(image, Some(client), path)
        .with_context(|| format!("Failed to save {what} to {}", path.display()))?;
    eprintln!("Saved {what} to {}", path.display());
    Ok(())
}

fn print_json(source: &str, result: &InferenceResult, displayed: Option<String>) -> Result<()> {
    let report = ClassificationReport {
        source,
        label: &result.label,
        nodule: result.indicates_nodule(),
        confidence: result.confidence.map(|c| c.raw()),
        confidence_percent: result.confidence.and_then(|c| c.percent()),
        confidence_text: result.confidence_text(),
        has_heatmap: result.has_heatmap_pair(),
        displayed,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
