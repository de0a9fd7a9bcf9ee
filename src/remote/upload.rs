use std::{path::Path, sync::Arc};

use futures::{StreamExt, stream};
use reqwest::{
    Body, StatusCode,
    multipart::{Form, Part},
};
use serde_json::Value;
use tokio::sync::{mpsc::UnboundedSender, watch};

use crate::types::UploadProgress;

use super::{ApiError, ApiResult, Client};

/// Largest audio file accepted for upload: 10 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// MIME types accepted for upload.
pub const ALLOWED_MIME_TYPES: [&str; 4] = ["audio/mpeg", "audio/wav", "audio/mp3", "audio/x-wav"];

const CHUNK_SIZE: usize = 64 * 1024;

/// A local audio file ready to be attached to a track.
#[derive(Debug, Clone)]
pub struct AudioFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl AudioFile {
    /// Wraps in-memory bytes, inferring the MIME type from `name`'s extension.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime_type = mime_type_for(&name).to_string();
        Self {
            name,
            mime_type,
            bytes,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    /// Reads a file from disk. Oversized files are rejected from their
    /// metadata without reading the content.
    pub async fn open(path: impl AsRef<Path>) -> ApiResult<Self> {
        let path = path.as_ref();
        let size = async_fs::metadata(path).await?.len();
        if size > MAX_UPLOAD_BYTES {
            return Err(ApiError::FileTooLarge { size });
        }

        let bytes = async_fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(name, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Maps a file name to the MIME type a browser would report for it.
pub fn mime_type_for(name: &str) -> &'static str {
    let extension = Path::new(name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase());
    match extension.as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        _ => "application/octet-stream",
    }
}

/// Checks size and MIME type. Runs before any request is built.
pub fn validate_upload(file: &AudioFile) -> ApiResult<()> {
    if file.size() > MAX_UPLOAD_BYTES {
        return Err(ApiError::FileTooLarge { size: file.size() });
    }
    if !ALLOWED_MIME_TYPES.contains(&file.mime_type.as_str()) {
        return Err(ApiError::InvalidFileType {
            mime_type: file.mime_type.clone(),
        });
    }
    Ok(())
}

/// Cancels an in-flight upload. Clones share the same signal.
#[derive(Debug, Clone)]
pub struct UploadAbort {
    signal: Arc<watch::Sender<bool>>,
}

impl Default for UploadAbort {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadAbort {
    pub fn new() -> Self {
        let (signal, _) = watch::channel(false);
        Self {
            signal: Arc::new(signal),
        }
    }

    pub fn abort(&self) {
        self.signal.send_replace(true);
    }

    pub fn is_aborted(&self) -> bool {
        *self.signal.borrow()
    }

    async fn aborted(&self) {
        let mut rx = self.signal.subscribe();
        // The sender lives in `self`, so this only returns once aborted.
        let _ = rx.wait_for(|aborted| *aborted).await;
    }
}

/// Optional hooks for [`Client::upload_music_to_track_with`].
///
/// Progress events travel on their own channel and never affect the upload
/// result; dropping the receiver is fine.
#[derive(Debug, Clone, Default)]
pub struct UploadOptions {
    pub progress: Option<UnboundedSender<UploadProgress>>,
    pub abort: Option<UploadAbort>,
}

/// Attaching and detaching audio.
impl Client {
    /// Uploads `file` as the audio of track `id`.
    ///
    /// See [`Client::upload_music_to_track_with`].
    pub async fn upload_music_to_track(&self, id: &str, file: AudioFile) -> ApiResult<Value> {
        self.upload_music_to_track_with(id, file, UploadOptions::default())
            .await
    }

    /// Uploads `file` as the audio of track `id`, reporting progress and
    /// honouring an abort handle.
    ///
    /// The file is validated first; a file over [`MAX_UPLOAD_BYTES`] or with a
    /// MIME type outside [`ALLOWED_MIME_TYPES`] fails without touching the
    /// network. The body is sent as a multipart form with a single `file`
    /// field, streamed in 64 KiB chunks; one [`UploadProgress`] is emitted per
    /// chunk handed to the transport.
    ///
    /// # Returns
    ///
    /// The JSON body of a 2xx response, unchanged.
    ///
    /// # Errors
    ///
    /// - [`ApiError::FileTooLarge`], [`ApiError::InvalidFileType`] from validation
    /// - [`ApiError::UploadRejected`] on a non-2xx status, carrying the server's
    ///   `error` message, `"Upload failed"` for JSON without one, or
    ///   `"Upload failed with status N"` for a non-JSON body
    /// - [`ApiError::UploadNetwork`] if the transport fails
    /// - [`ApiError::UploadAborted`] if `options.abort` fires first
    /// - [`ApiError::MalformedResponse`] if a 2xx body is not JSON
    ///
    /// The caller is responsible for recording the resulting upload URL.
    pub async fn upload_music_to_track_with(
        &self,
        id: &str,
        file: AudioFile,
        options: UploadOptions,
    ) -> ApiResult<Value> {
        validate_upload(&file)?;

        let UploadOptions { progress, abort } = options;
        if abort.as_ref().is_some_and(UploadAbort::is_aborted) {
            return Err(ApiError::UploadAborted);
        }

        let total = file.size();
        let part = Part::stream_with_length(progress_body(file.bytes, progress), total)
            .file_name(file.name)
            .mime_str(&file.mime_type)?;
        let form = Form::new().part("file", part);

        tracing::debug!(id, bytes = total, "uploading audio");
        let request = self
            .http
            .post(self.url(&format!("/api/tracks/{id}/upload")))
            .multipart(form);

        let exchange = async {
            let response = request.send().await.map_err(ApiError::UploadNetwork)?;
            let status = response.status();
            let body = response.bytes().await.map_err(ApiError::UploadNetwork)?;
            Ok::<_, ApiError>((status, body))
        };

        let (status, body) = match abort {
            Some(abort) => tokio::select! {
                biased;
                _ = abort.aborted() => return Err(ApiError::UploadAborted),
                result = exchange => result?,
            },
            None => exchange.await?,
        };

        upload_outcome(status, &body)
    }

    /// Removes the audio attached to track `id`.
    pub async fn delete_music_from_track(&self, id: &str) -> ApiResult<()> {
        tracing::debug!(id, "detaching audio");
        let response = self
            .http
            .delete(self.url(&format!("/api/tracks/{id}/file")))
            .send()
            .await?;
        Self::expect_success(&response, "Failed to delete music from track")
    }

    /// Extracts a playable URL from an upload response.
    ///
    /// Prefers an explicit `url` field, then the track's `audioFile`. Relative
    /// file names are resolved under `{base_url}/api/files/`.
    pub fn playable_url(&self, response: &Value) -> Option<String> {
        let field = |name: &str| {
            response
                .get(name)
                .and_then(Value::as_str)
                .filter(|r| !r.is_empty())
        };
        let reference = field("url").or_else(|| field("audioFile"))?;

        if reference.starts_with("http://") || reference.starts_with("https://") {
            Some(reference.to_string())
        } else {
            Some(self.url(&format!("/api/files/{}", reference.trim_start_matches('/'))))
        }
    }
}

fn progress_body(bytes: Vec<u8>, progress: Option<UnboundedSender<UploadProgress>>) -> Body {
    let total = bytes.len() as u64;
    let chunks: Vec<Vec<u8>> = bytes.chunks(CHUNK_SIZE).map(<[u8]>::to_vec).collect();
    let mut sent: u64 = 0;

    let stream = stream::iter(chunks).map(move |chunk| {
        sent += chunk.len() as u64;
        if let Some(tx) = &progress {
            // receiver may have gone away; progress is advisory
            let _ = tx.send(UploadProgress { sent, total });
        }
        Ok::<_, std::io::Error>(chunk)
    });

    Body::wrap_stream(stream)
}

fn upload_outcome(status: StatusCode, body: &[u8]) -> ApiResult<Value> {
    if status.is_success() {
        return Ok(serde_json::from_slice(body)?);
    }

    // `null` parses but carries no message, same as a non-JSON body
    let message = match serde_json::from_slice::<Value>(body) {
        Ok(json) if !json.is_null() => json
            .get("error")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or("Upload failed")
            .to_string(),
        _ => format!("Upload failed with status {}", status.as_u16()),
    };

    tracing::debug!(status = status.as_u16(), %message, "upload rejected");
    Err(ApiError::UploadRejected { status, message })
}
