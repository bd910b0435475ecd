use std::path::Path;
use std::sync::mpsc;

use noduleview_core::client::InferenceBackend;
use noduleview_core::handle::ImageRef;
use noduleview_core::imaging::{decode_image, save_image};
use noduleview_core::source::ImageSource;

use crate::convert::dynamic_to_color_image;
use crate::messages::WorkerResult;

use super::dispatch::Connection;
use super::{send, send_error};

pub(super) fn handle_load_file(path: &Path, tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context) {
    match ImageSource::from_path(path) {
        Ok(source) => send(tx, ctx, WorkerResult::FileLoaded { source }),
        Err(e) => send_error(tx, ctx, format!("Failed to open {}: {e}", path.display())),
    }
}

pub(super) fn handle_decode(
    key: String,
    image: &ImageRef,
    connection: &Connection,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let backend = connection.backend().ok().map(|b| b as &dyn InferenceBackend);
    match decode_image(image, backend) {
        Ok(decoded) => {
            let image = dynamic_to_color_image(&decoded);
            send(tx, ctx, WorkerResult::Decoded { key, image });
        }
        Err(e) => send(
            tx,
            ctx,
            WorkerResult::DecodeFailed {
                key,
                message: e.to_string(),
            },
        ),
    }
}

pub(super) fn handle_save_image(
    image: &ImageRef,
    path: &Path,
    connection: &Connection,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let backend = connection.backend().ok().map(|b| b as &dyn InferenceBackend);
    match save_image(image, backend, path) {
        Ok(()) => send(
            tx,
            ctx,
            WorkerResult::ImageSaved {
                path: path.to_path_buf(),
            },
        ),
        Err(e) => send_error(tx, ctx, format!("Failed to save {}: {e}", path.display())),
    }
}
