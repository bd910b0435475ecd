use std::time::Duration;

use reqwest::blocking::{multipart, Client, RequestBuilder};
use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::consts::UPLOAD_FIELD_NAME;
use crate::error::{Result, ViewerError};
use crate::handle::ImageRef;
use crate::result::InferenceResult;
use crate::source::ImageSource;

use super::tracker::RequestKind;
use super::wire::{self, LibraryRequest, ServiceInfo};
use super::InferenceBackend;

const USER_AGENT: &str = concat!("noduleview/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP client for the inference service. Meant to live on a worker
/// thread; every call blocks until the response or the timeout.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ViewerError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Route a request for `source` to the upload or library endpoint.
    fn build_request(&self, source: &ImageSource, kind: RequestKind) -> Result<RequestBuilder> {
        let (upload_path, library_path) = match kind {
            RequestKind::Preview => ("preview", "preview_from_library"),
            RequestKind::Classify => ("predict", "predict_from_library"),
        };

        match source {
            ImageSource::None => Err(ViewerError::NoSource),
            ImageSource::Local { name, bytes } => {
                let part = multipart::Part::bytes(bytes.to_vec()).file_name(name.clone());
                let form = multipart::Form::new().part(UPLOAD_FIELD_NAME, part);
                Ok(self.client.post(self.endpoint(upload_path)).multipart(form))
            }
            ImageSource::Remote { library_id, .. } => Ok(self
                .client
                .post(self.endpoint(library_path))
                .json(&LibraryRequest {
                    file_id: library_id,
                })),
        }
    }

    fn execute(&self, request: RequestBuilder) -> Result<(u16, String)> {
        let response = request.send().map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(transport_error)?;
        debug!(status, len = body.len(), "Received response");
        Ok((status, body))
    }
}

impl InferenceBackend for HttpBackend {
    fn preview(&self, source: &ImageSource) -> Result<ImageRef> {
        info!(source = source.name(), "Requesting server preview");
        let request = self.build_request(source, RequestKind::Preview)?;
        let (status, body) = self.execute(request)?;
        wire::parse_preview(status, &body)
    }

    fn classify(&self, source: &ImageSource) -> Result<InferenceResult> {
        info!(source = source.name(), "Requesting classification");
        let request = self.build_request(source, RequestKind::Classify)?;
        let (status, body) = self.execute(request)?;
        let result = wire::parse_prediction(status, &body)?;
        info!(
            label = %result.label,
            confidence = %result.confidence_text(),
            "Classification received"
        );
        Ok(result)
    }

    fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().map_err(transport_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ViewerError::Server {
                status: status.as_u16(),
                message: format!("failed to fetch image {url}"),
            });
        }
        let bytes = response.bytes().map_err(transport_error)?;
        Ok(bytes.to_vec())
    }

    fn service_info(&self) -> Result<ServiceInfo> {
        let (status, body) = self.execute(self.client.get(self.endpoint("")))?;
        wire::parse_service_info(status, &body)
    }
}

fn transport_error(e: reqwest::Error) -> ViewerError {
    if e.is_timeout() {
        ViewerError::Transport(format!("request timed out: {e}"))
    } else {
        ViewerError::Transport(e.to_string())
    }
}
