use trackctl::{
    cli::filter_tracks,
    management::{StoreManager, TrackStore, UploadStore},
    types::{Track, TrackPatch},
};

// Helper function to create a test track
fn create_test_track(id: &str, title: &str) -> Track {
    Track {
        id: id.to_string(),
        title: title.to_string(),
        artist: "Artist".to_string(),
        album: "Album".to_string(),
        genres: vec!["rock".to_string()],
        audio_file: None,
        slug: None,
        cover_image: None,
        created_at: None,
        updated_at: None,
    }
}

fn store_with(ids: &[&str]) -> TrackStore {
    let mut store = TrackStore::new();
    store.set_tracks(ids.iter().map(|id| create_test_track(id, id)).collect());
    store
}

fn ids(store: &TrackStore) -> Vec<&str> {
    store.tracks().iter().map(|t| t.id.as_str()).collect()
}

#[test]
fn test_new_store_is_empty() {
    let store = TrackStore::new();

    assert!(store.tracks().is_empty());
    assert!(store.current_track().is_none());
    assert!(!store.is_playing());
    assert!(store.error().is_none());
}

#[test]
fn test_set_and_add_tracks() {
    let mut store = store_with(&["a", "b"]);
    store.add_track(create_test_track("c", "c"));

    assert_eq!(ids(&store), ["a", "b", "c"]);

    store.set_tracks(vec![create_test_track("z", "z")]);
    assert_eq!(ids(&store), ["z"]);
}

#[test]
fn test_delete_track_keeps_others_in_order() {
    let mut store = store_with(&["a", "b", "c", "d"]);

    store.delete_track("b");

    assert_eq!(ids(&store), ["a", "c", "d"]);
}

#[test]
fn test_delete_unknown_track_is_noop() {
    let mut store = store_with(&["a", "b"]);

    store.delete_track("missing");

    assert_eq!(ids(&store), ["a", "b"]);
}

#[test]
fn test_update_track_merges_patch() {
    let mut store = store_with(&["a", "b"]);
    let patch = TrackPatch {
        title: Some("New title".to_string()),
        genres: Some(vec!["jazz".to_string(), "soul".to_string()]),
        ..TrackPatch::default()
    };

    store.update_track("b", &patch);

    let b = store.find("b").unwrap();
    assert_eq!(b.title, "New title");
    assert_eq!(b.genres, ["jazz", "soul"]);
    assert_eq!(b.artist, "Artist");
    assert_eq!(store.find("a").unwrap().title, "a");
}

#[test]
fn test_update_unknown_track_leaves_collection_unchanged() {
    let mut store = store_with(&["a", "b"]);
    let before = store.clone();
    let patch = TrackPatch {
        title: Some("x".to_string()),
        ..TrackPatch::default()
    };

    store.update_track("missing", &patch);

    assert_eq!(store, before);
}

#[test]
fn test_patch_can_clear_audio_file() {
    let mut track = create_test_track("a", "a");
    track.audio_file = Some("a.mp3".to_string());
    let mut store = TrackStore::new();
    store.add_track(track);

    store.update_track(
        "a",
        &TrackPatch {
            audio_file: Some(None),
            ..TrackPatch::default()
        },
    );

    assert_eq!(store.find("a").unwrap().audio_file, None);
    assert!(TrackPatch::default().is_empty());
}

#[test]
fn test_playback_flag_is_independent_of_current_track() {
    let mut store = store_with(&["a"]);

    store.play_track();
    assert!(store.is_playing());
    assert!(store.current_track().is_none());

    store.set_current_track(Some(create_test_track("a", "a")));
    store.toggle_play();
    assert!(!store.is_playing());
    assert_eq!(store.current_track().unwrap().id, "a");

    store.toggle_play();
    store.stop_track();
    assert!(store.current_track().is_none());
    assert!(store.is_playing());

    store.pause_track();
    assert!(!store.is_playing());
}

#[test]
fn test_error_is_overwritten() {
    let mut store = TrackStore::new();

    store.set_error(Some("first".to_string()));
    store.set_error(Some("second".to_string()));
    assert_eq!(store.error(), Some("second"));

    store.set_error(None);
    assert_eq!(store.error(), None);
}

#[test]
fn test_reset() {
    let mut store = store_with(&["a"]);
    store.play_track();
    store.set_error(Some("boom".to_string()));

    store.reset();

    assert_eq!(store, TrackStore::new());
}

#[test]
fn test_upload_store_keeps_one_record_per_track() {
    let mut uploads = UploadStore::new();

    uploads.record("t1", "http://a/1.mp3");
    uploads.record("t2", "http://a/2.mp3");
    uploads.record("t1", "http://a/1-new.mp3");

    assert_eq!(uploads.len(), 2);
    assert_eq!(uploads.url_for("t1"), Some("http://a/1-new.mp3"));
    assert_eq!(uploads.records().filter(|r| r.track_id == "t1").count(), 1);

    let removed = uploads.remove("t1").unwrap();
    assert_eq!(removed.url, "http://a/1-new.mp3");
    assert_eq!(uploads.url_for("t1"), None);

    uploads.reset();
    assert!(uploads.is_empty());
}

#[tokio::test]
async fn test_store_manager_persists_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("tracks-store.json");

    let mut manager = StoreManager::new(path.clone());
    manager.tracks_mut().set_tracks(vec![create_test_track("a", "Song")]);
    manager
        .tracks_mut()
        .set_current_track(Some(create_test_track("a", "Song")));
    manager.tracks_mut().play_track();
    manager.uploads_mut().record("a", "http://a/a.mp3");
    manager.persist().await.unwrap();

    let reloaded = StoreManager::load(path).await;

    assert_eq!(reloaded.state(), manager.state());
    assert_eq!(reloaded.uploads().url_for("a"), Some("http://a/a.mp3"));
    assert!(reloaded.tracks().is_playing());
}

#[tokio::test]
async fn test_store_manager_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();

    let manager = StoreManager::load(dir.path().join("absent.json")).await;

    assert!(manager.tracks().tracks().is_empty());
    assert!(manager.uploads().is_empty());
}

#[tokio::test]
async fn test_store_manager_malformed_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracks-store.json");
    std::fs::write(&path, "{ not json").unwrap();

    let manager = StoreManager::load(path).await;

    assert!(manager.tracks().tracks().is_empty());
    assert!(manager.tracks().current_track().is_none());
}

#[tokio::test]
async fn test_store_manager_partial_snapshot_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracks-store.json");
    std::fs::write(&path, r#"{ "tracks": { "isPlaying": true } }"#).unwrap();

    let manager = StoreManager::load(path).await;

    assert!(manager.tracks().is_playing());
    assert!(manager.tracks().tracks().is_empty());
    assert!(manager.uploads().is_empty());
}

#[tokio::test]
async fn test_store_manager_clear_removes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tracks-store.json");
    let mut manager = StoreManager::new(path.clone());
    manager.tracks_mut().add_track(create_test_track("a", "a"));
    manager.persist().await.unwrap();
    assert!(path.exists());

    manager.clear().await.unwrap();

    assert!(!path.exists());
    assert!(manager.tracks().tracks().is_empty());
    // clearing twice is fine
    manager.clear().await.unwrap();
}

#[test]
fn test_upsert_track_replaces_in_place() {
    let mut store = store_with(&["a", "b", "c"]);

    store.upsert_track(create_test_track("b", "Server Title"));

    assert_eq!(ids(&store), vec!["a", "b", "c"]);
    assert_eq!(store.find("b").unwrap().title, "Server Title");
}

#[test]
fn test_upsert_track_appends_unknown_id() {
    let mut store = store_with(&["a"]);

    store.upsert_track(create_test_track("z", "New"));

    assert_eq!(ids(&store), vec!["a", "z"]);
    assert_eq!(store.find("z").unwrap().title, "New");
}

#[test]
fn test_filter_tracks_is_case_insensitive() {
    let mut store = TrackStore::new();
    let mut blue = create_test_track("1", "Blue Monday");
    blue.artist = "New Order".to_string();
    let mut karma = create_test_track("2", "Karma Police");
    karma.album = "OK Computer".to_string();
    store.set_tracks(vec![blue, karma, create_test_track("3", "Other")]);

    let matched = |search: Option<&str>| -> Vec<String> {
        filter_tracks(&store, search).into_iter().map(|row| row.id).collect()
    };

    assert_eq!(matched(Some("blue")), vec!["1"]);
    assert_eq!(matched(Some("NEW ORDER")), vec!["1"]);
    assert_eq!(matched(Some("computer")), vec!["2"]);
    assert_eq!(matched(Some("album")), vec!["1", "3"]);
    assert!(matched(Some("missing")).is_empty());
    assert_eq!(matched(None), vec!["1", "2", "3"]);
}
