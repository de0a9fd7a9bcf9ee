use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::config;

/// Everything that can go wrong talking to the music library API.
///
/// Every variant renders a human-readable message; the CLI surfaces that
/// message verbatim and the track store keeps it as the last error.
#[derive(Debug)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, TLS...).
    Request(reqwest::Error),
    /// The response body did not match the expected schema.
    MalformedResponse(String),
    /// A track page came back as `null`.
    FetchFailed,
    /// The server answered with a non-success status.
    Status { status: StatusCode, message: String },
    /// Upload rejected locally: the file exceeds [`crate::remote::MAX_UPLOAD_BYTES`].
    FileTooLarge { size: u64 },
    /// Upload rejected locally: the MIME type is not in the allow-list.
    InvalidFileType { mime_type: String },
    /// The upload transport failed before a response arrived.
    UploadNetwork(reqwest::Error),
    /// The upload was cancelled through its [`crate::remote::UploadAbort`] handle.
    UploadAborted,
    /// The server rejected the upload.
    UploadRejected { status: StatusCode, message: String },
    /// The local audio file could not be read.
    Io(std::io::Error),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Request(e) => write!(f, "Request failed: {e}"),
            ApiError::MalformedResponse(e) => write!(f, "Malformed response: {e}"),
            ApiError::FetchFailed => write!(f, "Failed to fetch tracks"),
            ApiError::Status { message, .. } => write!(f, "{message}"),
            ApiError::FileTooLarge { .. } => {
                write!(f, "File is too large. Maximum size is 10MB.")
            }
            ApiError::InvalidFileType { .. } => {
                write!(f, "Invalid file type. Only MP3 and WAV files are allowed.")
            }
            ApiError::UploadNetwork(_) => write!(f, "Network error occurred during upload"),
            ApiError::UploadAborted => write!(f, "Upload was aborted"),
            ApiError::UploadRejected { message, .. } => write!(f, "{message}"),
            ApiError::Io(e) => write!(f, "Cannot read file: {e}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Request(e) | ApiError::UploadNetwork(e) => Some(e),
            ApiError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Request(e)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::MalformedResponse(e.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(e: std::io::Error) -> Self {
        ApiError::Io(e)
    }
}

impl ApiError {
    /// The HTTP status attached to this error, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } | ApiError::UploadRejected { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// A client for the music library API.
///
/// Holds the base URL (without trailing slash) and a pooled `reqwest::Client`.
/// Construct one at startup and pass it to whatever needs it.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) base_url: String,
    pub(crate) http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Builds a client from `TRACKCTL_SERVER_URL`.
    pub fn from_env() -> Result<Self, String> {
        config::server_url().map(Self::new)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends a GET and decodes the JSON body into `T`.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        tracing::debug!(path, "GET");
        let response = self.http.get(self.url(path)).send().await?;
        Self::decode(response, "Request failed").await
    }

    /// Checks the status, then decodes the body. The body is read as bytes
    /// first so that schema errors surface as [`ApiError::MalformedResponse`]
    /// instead of a transport error.
    pub(crate) async fn decode<T: DeserializeOwned>(
        response: Response,
        failure: &str,
    ) -> ApiResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                message: format!("{failure} with status {}", status.as_u16()),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Succeeds only on a 2xx status; the body is ignored.
    pub(crate) fn expect_success(response: &Response, message: &str) -> ApiResult<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::Status {
                status,
                message: message.to_string(),
            })
        }
    }
}
