use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use tokio::sync::mpsc;

use crate::{
    error, info,
    management::StoreManager,
    remote::{AudioFile, Client, UploadAbort, UploadOptions},
    success,
    types::{Track, TrackPatch, UploadProgress, UploadRecord},
    warning,
};

use super::{client, remember_error, save};

/// Uploads an audio file to a track with a progress bar. Ctrl-C aborts the
/// transfer.
pub async fn upload(id: String, path: PathBuf) {
    let client = client();
    let mut store = StoreManager::open().await;

    let file = match AudioFile::open(&path).await {
        Ok(file) => file,
        Err(e) => {
            remember_error(&mut store, &e).await;
            error!("{}", e)
        }
    };

    let pb = ProgressBar::new(file.size());
    if let Ok(style) =
        ProgressStyle::with_template("{bar:40.blue/white} {bytes}/{total_bytes} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(file.name.clone());

    let (tx, mut rx) = mpsc::unbounded_channel::<UploadProgress>();
    let progress_pb = pb.clone();
    let progress_task = tokio::spawn(async move {
        while let Some(progress) = rx.recv().await {
            progress_pb.set_position(progress.sent);
        }
    });

    let abort = UploadAbort::new();
    let ctrl_c_abort = abort.clone();
    let ctrl_c_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_abort.abort();
        }
    });

    let options = UploadOptions {
        progress: Some(tx),
        abort: Some(abort),
    };
    let result = client.upload_music_to_track_with(&id, file, options).await;

    ctrl_c_task.abort();
    let _ = progress_task.await;
    pb.finish_and_clear();

    let response = match result {
        Ok(response) => response,
        Err(e) => {
            remember_error(&mut store, &e).await;
            error!("{}", e)
        }
    };

    match apply_upload(&mut store, &client, &id, &response) {
        Some(record) => info!("Audio available at {}", record.url),
        None => warning!("Server response did not include an audio location."),
    }

    store.tracks_mut().set_error(None);
    save(&store).await;
    success!("Uploaded {} to track {}", path.display(), id);
}

/// Applies a successful upload response to the store: the cached track picks
/// up its new `audioFile` and, when the response names a playable location,
/// an upload record is kept for the track.
pub fn apply_upload<'a>(
    store: &'a mut StoreManager,
    client: &Client,
    id: &str,
    response: &Value,
) -> Option<&'a UploadRecord> {
    if let Ok(track) = serde_json::from_value::<Track>(response.clone()) {
        let patch = TrackPatch {
            audio_file: Some(track.audio_file),
            ..TrackPatch::default()
        };
        store.tracks_mut().update_track(id, &patch);
    }

    let url = client.playable_url(response)?;
    Some(store.uploads_mut().record(id, url))
}

/// Removes the audio from a track and forgets its upload record.
pub async fn detach(id: String) {
    let client = client();
    let mut store = StoreManager::open().await;

    if let Err(e) = client.delete_music_from_track(&id).await {
        remember_error(&mut store, &e).await;
        error!("{}", e);
    }

    let patch = TrackPatch {
        audio_file: Some(None),
        ..TrackPatch::default()
    };
    let tracks = store.tracks_mut();
    tracks.update_track(&id, &patch);
    tracks.set_error(None);
    store.uploads_mut().remove(&id);
    save(&store).await;
    success!("Removed audio from track {}", id);
}
