mod dispatch;
mod feedback;
mod inference;
mod io;

pub use dispatch::{spawn_workers, Workers};
pub(crate) use dispatch::{send, send_error, send_log};
