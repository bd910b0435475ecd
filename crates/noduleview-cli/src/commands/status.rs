use anyhow::{Context, Result};
use clap::Args;
use noduleview_core::client::InferenceBackend;

use super::{connect, spinner, ServerArgs};
use crate::summary;

#[derive(Args)]
pub struct StatusArgs {
    #[command(flatten)]
    pub server: ServerArgs,
}

pub fn run(args: &StatusArgs) -> Result<()> {
    let config = args.server.load_config()?;
    let backend = connect(&config)?;

    let pb = spinner(format!("Contacting {}", backend.base_url()))?;
    let info = backend.service_info();
    pb.finish_and_clear();

    let info = info.with_context(|| {
        format!("Inference service at {} is not answering", backend.base_url())
    })?;
    summary::print_service_summary(backend.base_url(), &info);
    Ok(())
}
