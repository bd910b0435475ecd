use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use noduleview_core::imaging::decode_image;
use noduleview_core::orchestrator::Viewer;
use noduleview_core::source::ImageSource;

#[derive(Args)]
pub struct InfoArgs {
    /// Local image or volumetric scan
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let source = ImageSource::from_path(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let size_kb = source.byte_len().unwrap_or(0) as f64 / 1024.0;

    println!("File:        {}", args.file.display());
    println!("Size:        {:.1} KB", size_kb);
    if let Some(format) = source.format() {
        println!("Format:      {}", format);
    }

    let mut viewer = Viewer::default();
    if viewer.select(source).is_some() {
        println!("Preview:     generated by the inference service");
    } else if let Some(shown) = viewer.display() {
        let image = decode_image(shown.image, None).context("Failed to decode image")?;
        println!("Dimensions:  {}x{}", image.width(), image.height());
        println!("Preview:     local");
    } else if let Some(banner) = viewer.banner() {
        println!("Preview:     {}", banner);
    }

    Ok(())
}
