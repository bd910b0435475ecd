use std::path::PathBuf;

use noduleview_core::client::{RequestToken, ServiceInfo};
use noduleview_core::error::Result;
use noduleview_core::handle::ImageRef;
use noduleview_core::orchestrator::Request;
use noduleview_core::result::InferenceResult;
use noduleview_core::source::ImageSource;

use crate::states::FeedbackRecord;

/// Commands sent from the UI thread to the worker threads.
pub enum WorkerCommand {
    /// Read a file from disk so it can be selected.
    LoadFile { path: PathBuf },

    /// Run a preview or classification request issued by the viewer.
    Run(Request),

    /// Decode an image reference into pixels for the texture cache.
    Decode { key: String, image: ImageRef },

    /// Save the given image to disk.
    SaveImage { image: ImageRef, path: PathBuf },

    /// Query `GET /` on the inference service.
    CheckService,

    /// Record a submitted rating.
    SubmitFeedback { record: FeedbackRecord },
}

/// Results sent from worker and dialog threads back to the UI thread.
pub enum WorkerResult {
    FileLoaded {
        source: ImageSource,
    },
    PreviewDone {
        token: RequestToken,
        outcome: Result<ImageRef>,
    },
    ClassifyDone {
        token: RequestToken,
        outcome: Result<InferenceResult>,
    },
    Decoded {
        key: String,
        image: egui::ColorImage,
    },
    DecodeFailed {
        key: String,
        message: String,
    },
    ServiceStatus {
        info: ServiceInfo,
    },
    /// The save dialog closed on `path`; the UI picks the image to write.
    SaveTargetChosen {
        path: PathBuf,
    },
    ImageSaved {
        path: PathBuf,
    },
    Error {
        message: String,
    },
    Log {
        message: String,
    },
}
