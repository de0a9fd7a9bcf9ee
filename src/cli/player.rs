use crate::{error, info, management::StoreManager, success, warning};

use super::{client, remember_error, save};

/// Marks a track as playing. With an id the track becomes current first,
/// taken from the local cache when possible, otherwise fetched.
pub async fn play(id: Option<String>) {
    let mut store = StoreManager::open().await;

    if let Some(id) = id {
        let track = match store.tracks().find(&id).cloned() {
            Some(track) => track,
            None => match client().get_track_by_id(&id).await {
                Ok(track) => track,
                Err(e) => {
                    remember_error(&mut store, &e).await;
                    error!("{}", e)
                }
            },
        };
        store.tracks_mut().set_current_track(Some(track));
    } else if store.tracks().current_track().is_none() {
        warning!("No current track selected.");
    }

    store.tracks_mut().play_track();
    save(&store).await;
    print_now_playing(&store);
}

pub async fn pause() {
    let mut store = StoreManager::open().await;
    store.tracks_mut().pause_track();
    save(&store).await;
    success!("Paused");
}

pub async fn toggle() {
    let mut store = StoreManager::open().await;
    store.tracks_mut().toggle_play();
    save(&store).await;
    print_now_playing(&store);
}

pub async fn stop() {
    let mut store = StoreManager::open().await;
    store.tracks_mut().stop_track();
    save(&store).await;
    success!("Cleared current track");
}

pub async fn status() {
    let store = StoreManager::open().await;
    let tracks = store.tracks();

    print_now_playing(&store);
    info!(
        "{} cached tracks, {} uploads recorded",
        tracks.tracks().len(),
        store.uploads().len()
    );
    if let Some(error) = tracks.error() {
        warning!("Last error: {}", error);
    }
}

fn print_now_playing(store: &StoreManager) {
    let tracks = store.tracks();
    let state = if tracks.is_playing() { "Playing" } else { "Paused" };

    match tracks.current_track() {
        Some(track) => {
            info!("{}: {} - {}", state, track.artist, track.title);
            if let Some(url) = store.uploads().url_for(&track.id) {
                info!("Audio: {}", url);
            }
        }
        None => info!("{} (no current track)", state),
    }
}
