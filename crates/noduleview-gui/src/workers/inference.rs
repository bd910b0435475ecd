use std::sync::mpsc;
use std::time::Instant;

use noduleview_core::client::InferenceBackend;
use noduleview_core::orchestrator::Request;

use crate::messages::WorkerResult;

use super::dispatch::Connection;
use super::{send, send_error, send_log};

pub(super) fn handle_request(
    request: Request,
    connection: &Connection,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let start = Instant::now();
    let kind = request.kind();

    let result = match request {
        Request::Preview { token, source } => {
            let outcome = connection.backend().and_then(|b| b.preview(&source));
            WorkerResult::PreviewDone { token, outcome }
        }
        Request::Classify { token, source } => {
            let outcome = connection.backend().and_then(|b| b.classify(&source));
            WorkerResult::ClassifyDone { token, outcome }
        }
    };

    send_log(
        tx,
        ctx,
        format!("{kind} finished in {:.1}s", start.elapsed().as_secs_f32()),
    );
    send(tx, ctx, result);
}

pub(super) fn handle_check_service(
    connection: &Connection,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match connection.backend().and_then(|b| b.service_info()) {
        Ok(info) => send(tx, ctx, WorkerResult::ServiceStatus { info }),
        Err(e) => send_error(tx, ctx, format!("Service check failed: {e}")),
    }
}
