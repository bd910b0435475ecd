use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("No image selected")]
    NoSource,

    #[error("Image {0} was released")]
    Released(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Config error: {0}")]
    Config(String),
}

impl ViewerError {
    /// True for failures caused by the remote service or the path to it.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Server { .. } | Self::MalformedResponse(_)
        )
    }
}

/// Errors surfaced by the Source Resolver share the viewer taxonomy.
pub type PreviewError = ViewerError;

pub type Result<T> = std::result::Result<T, ViewerError>;
