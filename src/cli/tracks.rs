use tabled::Table;

use crate::{
    error,
    management::{StoreManager, TrackStore},
    success,
    types::{Track, TrackDraft, TrackPatch, TrackTableRow},
    warning,
};

use super::{client, remember_error, save, spinner};

/// Fetches the whole library, caches it locally and prints it.
///
/// When the fetch fails but tracks are cached from an earlier run, the cached
/// list is shown with a warning instead of exiting.
pub async fn list_tracks(search: Option<String>) {
    let client = client();
    let mut store = StoreManager::open().await;

    let pb = spinner("Fetching tracks...");
    let result = client
        .get_all_tracks_with_progress(|meta| {
            pb.set_message(format!(
                "Fetched page {}/{} ({} tracks)...",
                meta.page, meta.total_pages, meta.total
            ))
        })
        .await;
    pb.finish_and_clear();

    match result {
        Ok(tracks) => {
            let tracks_store = store.tracks_mut();
            tracks_store.set_tracks(tracks);
            tracks_store.set_error(None);
            save(&store).await;
        }
        Err(e) => {
            remember_error(&mut store, &e).await;
            if store.tracks().tracks().is_empty() {
                error!("Failed to fetch tracks: {}", e);
            }
            warning!(
                "Failed to fetch tracks: {}\nShowing {} cached tracks.",
                e,
                store.tracks().tracks().len()
            );
        }
    }

    let rows = filter_tracks(store.tracks(), search.as_deref());
    println!("{}", Table::new(rows));
}

pub async fn show_track(id: String) {
    let client = client();
    let mut store = StoreManager::open().await;

    let track = match client.get_track_by_id(&id).await {
        Ok(track) => track,
        Err(e) => {
            remember_error(&mut store, &e).await;
            error!("{}", e)
        }
    };

    println!("{}", Table::new([TrackTableRow::from(&track)]));
    if let Some(url) = store.uploads().url_for(&track.id) {
        println!("Audio URL: {url}");
    }
    if let Some(slug) = &track.slug {
        println!("Slug: {slug}");
    }
}

pub async fn add_track(draft: TrackDraft) {
    let client = client();
    let mut store = StoreManager::open().await;

    let track = match client.add_track(&draft).await {
        Ok(track) => track,
        Err(e) => {
            remember_error(&mut store, &e).await;
            error!("{}", e)
        }
    };

    let tracks = store.tracks_mut();
    tracks.add_track(track.clone());
    tracks.set_error(None);
    save(&store).await;
    success!("Created track {} ({})", track.title, track.id);
}

pub async fn edit_track(id: String, patch: TrackPatch) {
    if patch.is_empty() {
        warning!("Nothing to update here.");
        return;
    }

    let client = client();
    let mut store = StoreManager::open().await;

    let mut track: Track = match client.get_track_by_id(&id).await {
        Ok(track) => track,
        Err(e) => {
            remember_error(&mut store, &e).await;
            error!("{}", e)
        }
    };
    patch.apply(&mut track);

    let updated = match client.update_track(&track).await {
        Ok(track) => track,
        Err(e) => {
            remember_error(&mut store, &e).await;
            error!("{}", e)
        }
    };

    let id = updated.id.clone();
    let tracks = store.tracks_mut();
    if tracks.current_track().is_some_and(|t| t.id == id) {
        tracks.set_current_track(Some(updated.clone()));
    }
    tracks.upsert_track(updated);
    tracks.set_error(None);
    save(&store).await;
    success!("Updated track {}", id);
}

pub async fn delete_track(id: String) {
    let client = client();
    let mut store = StoreManager::open().await;

    if let Err(e) = client.delete_track(&id).await {
        remember_error(&mut store, &e).await;
        error!("{}", e);
    }

    let tracks = store.tracks_mut();
    tracks.delete_track(&id);
    if tracks.current_track().is_some_and(|t| t.id == id) {
        tracks.stop_track();
    }
    tracks.set_error(None);
    store.uploads_mut().remove(&id);
    save(&store).await;
    success!("Deleted track {}", id);
}

/// Case-insensitive match on title, artist or album.
pub fn filter_tracks(store: &TrackStore, search: Option<&str>) -> Vec<TrackTableRow> {
    let needle = search.map(str::to_lowercase);
    store
        .tracks()
        .iter()
        .filter(|t| match &needle {
            Some(needle) => [&t.title, &t.artist, &t.album]
                .iter()
                .any(|field| field.to_lowercase().contains(needle)),
            None => true,
        })
        .map(TrackTableRow::from)
        .collect()
}
