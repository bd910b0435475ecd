use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use noduleview_core::client::InferenceBackend;
use noduleview_core::imaging::{decode_image, save_image};
use noduleview_core::resolver::SourceResolver;

use super::{connect, spinner, ServerArgs, SourceArgs};
use crate::summary;

#[derive(Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub server: ServerArgs,

    /// Save the decoded preview (format follows the extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &PreviewArgs) -> Result<()> {
    let config = args.server.load_config()?;
    let backend = connect(&config)?;
    let client: &dyn InferenceBackend = &backend;

    let source = args.source.to_source()?;

    let pb = spinner(format!("Preview of {}", source.name()))?;
    let resolved = SourceResolver::new().resolve(&source, client);
    pb.finish_and_clear();

    let preview = resolved
        .with_context(|| format!("Preview of {} failed", source.name()))?
        .context("Nothing to preview")?;
    let image = decode_image(&preview.image, Some(client)).context("Failed to decode preview")?;
    summary::print_preview_summary(
        source.name(),
        preview.server_generated,
        (image.width(), image.height()),
    );

    if let Some(ref path) = args.output {
        save_image(&preview.image, Some(client), path)
            .with_context(|| format!("Failed to save preview to {}", path.display()))?;
        println!("Preview saved to {}", path.display());
    }

    Ok(())
}
