use std::sync::{mpsc, Arc};

use noduleview_core::client::HttpBackend;
use noduleview_core::config::ViewerConfig;
use noduleview_core::error::{Result, ViewerError};

use crate::messages::{WorkerCommand, WorkerResult};

use super::{feedback, inference, io};

/// Which worker thread handles a command. Inference calls can take as long
/// as the request timeout, so they never share a queue with file loading or
/// decoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Lane {
    Io,
    Network,
}

impl WorkerCommand {
    pub(crate) fn lane(&self) -> Lane {
        match self {
            WorkerCommand::Run(_) | WorkerCommand::CheckService => Lane::Network,
            WorkerCommand::LoadFile { .. }
            | WorkerCommand::Decode { .. }
            | WorkerCommand::SaveImage { .. }
            | WorkerCommand::SubmitFeedback { .. } => Lane::Io,
        }
    }
}

/// Senders for both worker threads.
#[derive(Clone)]
pub struct Workers {
    io_tx: mpsc::Sender<WorkerCommand>,
    network_tx: mpsc::Sender<WorkerCommand>,
}

impl Workers {
    /// Queue `cmd` on the thread that owns its lane.
    pub fn send(
        &self,
        cmd: WorkerCommand,
    ) -> std::result::Result<(), mpsc::SendError<WorkerCommand>> {
        match cmd.lane() {
            Lane::Io => self.io_tx.send(cmd),
            Lane::Network => self.network_tx.send(cmd),
        }
    }
}

/// Spawn the io and network worker threads.
pub fn spawn_workers(
    config: &ViewerConfig,
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> std::io::Result<Workers> {
    let connection = Arc::new(Connection::open(config));
    match connection.backend() {
        Ok(backend) => {
            send_log(&result_tx, &ctx, format!("Inference service: {}", backend.base_url()))
        }
        Err(e) => send_error(&result_tx, &ctx, format!("HTTP client unavailable: {e}")),
    }

    let (network_tx, network_rx) = mpsc::channel::<WorkerCommand>();
    {
        let connection = Arc::clone(&connection);
        let result_tx = result_tx.clone();
        let ctx = ctx.clone();
        std::thread::Builder::new()
            .name("noduleview-network".into())
            .spawn(move || network_loop(&connection, network_rx, result_tx, ctx))?;
    }

    let (io_tx, io_rx) = mpsc::channel::<WorkerCommand>();
    let config = config.clone();
    std::thread::Builder::new()
        .name("noduleview-io".into())
        .spawn(move || io_loop(config, &connection, io_rx, result_tx, ctx))?;

    Ok(Workers { io_tx, network_tx })
}

pub(crate) fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

pub(crate) fn send_log(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Log {
            message: msg.into(),
        },
    );
}

pub(crate) fn send_error(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Error {
            message: msg.into(),
        },
    );
}

/// The HTTP client, or why it could not be built. Shared by both threads.
pub(super) struct Connection {
    backend: std::result::Result<HttpBackend, String>,
}

impl Connection {
    fn open(config: &ViewerConfig) -> Self {
        let backend = HttpBackend::new(&config.server).map_err(|e| e.to_string());
        Self { backend }
    }

    pub(super) fn backend(&self) -> Result<&HttpBackend> {
        self.backend
            .as_ref()
            .map_err(|e| ViewerError::Transport(e.clone()))
    }
}

fn network_loop(
    connection: &Connection,
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::Run(request) => {
                inference::handle_request(request, connection, &tx, &ctx);
            }
            WorkerCommand::CheckService => {
                inference::handle_check_service(connection, &tx, &ctx);
            }
            other => {
                tracing::warn!(lane = ?other.lane(), "Command routed to the network thread");
            }
        }
    }
}

fn io_loop(
    config: ViewerConfig,
    connection: &Connection,
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::LoadFile { path } => {
                io::handle_load_file(&path, &tx, &ctx);
            }
            WorkerCommand::Decode { key, image } => {
                io::handle_decode(key, &image, connection, &tx, &ctx);
            }
            WorkerCommand::SaveImage { image, path } => {
                io::handle_save_image(&image, &path, connection, &tx, &ctx);
            }
            WorkerCommand::SubmitFeedback { record } => {
                feedback::handle_submit(&record, config.feedback.log_path.as_deref(), &tx, &ctx);
            }
            other => {
                tracing::warn!(lane = ?other.lane(), "Command routed to the io thread");
            }
        }
    }
}
