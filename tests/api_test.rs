mod common;

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
};
use serde_json::{Value, json};
use trackctl::{
    remote::{ApiError, Client},
    types::{Track, TrackDraft},
};

use common::{Hits, serve, track_json};

#[derive(Clone)]
struct Paged {
    total_pages: u32,
    per_page: usize,
    requested: Arc<Mutex<Vec<u32>>>,
}

async fn paged_tracks(
    State(state): State<Paged>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let page: u32 = query["page"].parse().unwrap();
    state.requested.lock().unwrap().push(page);

    let data: Vec<Value> = (0..state.per_page)
        .map(|i| track_json(&format!("p{page}-{i}")))
        .collect();
    Json(json!({
        "data": data,
        "meta": {
            "total": state.total_pages as usize * state.per_page,
            "page": page,
            "limit": state.per_page,
            "totalPages": state.total_pages,
        }
    }))
}

async fn paged_server(total_pages: u32, per_page: usize) -> (Client, Arc<Mutex<Vec<u32>>>) {
    let requested = Arc::new(Mutex::new(Vec::new()));
    let state = Paged {
        total_pages,
        per_page,
        requested: Arc::clone(&requested),
    };
    let router = Router::new()
        .route("/api/tracks", get(paged_tracks))
        .with_state(state);
    (Client::new(serve(router).await), requested)
}

#[tokio::test]
async fn test_get_all_tracks_fetches_every_page_in_order() {
    let (client, requested) = paged_server(3, 2).await;

    let tracks = client.get_all_tracks().await.unwrap();

    assert_eq!(*requested.lock().unwrap(), vec![1, 2, 3]);
    let ids: Vec<&str> = tracks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["p1-0", "p1-1", "p2-0", "p2-1", "p3-0", "p3-1"]);
}

#[tokio::test]
async fn test_get_all_tracks_single_page_is_one_request() {
    let (client, requested) = paged_server(1, 4).await;

    let tracks = client.get_all_tracks().await.unwrap();

    assert_eq!(*requested.lock().unwrap(), vec![1]);
    assert_eq!(tracks.len(), 4);
}

#[tokio::test]
async fn test_get_all_tracks_empty_library() {
    let (client, requested) = paged_server(0, 0).await;

    let tracks = client.get_all_tracks().await.unwrap();

    assert_eq!(*requested.lock().unwrap(), vec![1]);
    assert!(tracks.is_empty());
}

#[tokio::test]
async fn test_get_all_tracks_reports_each_page() {
    let (client, _) = paged_server(4, 1).await;
    let mut seen = Vec::new();

    client
        .get_all_tracks_with_progress(|meta| seen.push((meta.page, meta.total_pages)))
        .await
        .unwrap();

    assert_eq!(seen, vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
}

#[tokio::test]
async fn test_get_all_tracks_null_page_fails() {
    let router = Router::new().route("/api/tracks", get(|| async { Json(Value::Null) }));
    let client = Client::new(serve(router).await);

    let err = client.get_all_tracks().await.unwrap_err();

    assert!(matches!(err, ApiError::FetchFailed));
    assert_eq!(err.to_string(), "Failed to fetch tracks");
}

#[tokio::test]
async fn test_get_all_tracks_malformed_page_fails() {
    let router = Router::new().route(
        "/api/tracks",
        get(|| async { Json(json!({ "data": [], "pagination": {} })) }),
    );
    let client = Client::new(serve(router).await);

    let err = client.get_all_tracks().await.unwrap_err();

    assert!(matches!(err, ApiError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_get_all_tracks_rejects_track_without_id() {
    let router = Router::new().route(
        "/api/tracks",
        get(|| async {
            Json(json!({
                "data": [{ "id": "", "title": "t", "artist": "a", "album": "b", "genres": [] }],
                "meta": { "total": 1, "page": 1, "limit": 10, "totalPages": 1 }
            }))
        }),
    );
    let client = Client::new(serve(router).await);

    let err = client.get_all_tracks().await.unwrap_err();

    assert!(matches!(err, ApiError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_get_all_tracks_error_status_stops_the_loop() {
    let hits = Hits::default();
    let counter = hits.clone();
    let router = Router::new().route(
        "/api/tracks",
        get(move || {
            let counter = counter.clone();
            async move {
                counter.hit();
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }),
    );
    let client = Client::new(serve(router).await);

    let err = client.get_all_tracks().await.unwrap_err();

    assert_eq!(err.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
    assert!(err.to_string().contains("500"));
    assert_eq!(hits.count(), 1);
}

#[tokio::test]
async fn test_get_track_by_id() {
    let router = Router::new().route(
        "/api/tracks/{id}",
        get(|Path(id): Path<String>| async move { Json(track_json(&id)) }),
    );
    let client = Client::new(serve(router).await);

    let track = client.get_track_by_id("abc").await.unwrap();

    assert_eq!(track.id, "abc");
    assert_eq!(track.title, "Title abc");
    assert_eq!(track.genres, vec!["rock".to_string()]);
    assert_eq!(track.audio_file, None);
}

#[tokio::test]
async fn test_add_track_sends_draft_without_id() {
    let received = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&received);
    let router = Router::new().route(
        "/api/tracks",
        axum::routing::post(move |Json(body): Json<Value>| {
            let sink = Arc::clone(&sink);
            async move {
                *sink.lock().unwrap() = Some(body.clone());
                let mut created = body;
                created["id"] = json!("new-1");
                Json(created)
            }
        }),
    );
    let client = Client::new(serve(router).await);
    let draft = TrackDraft {
        title: "Song".to_string(),
        artist: "Band".to_string(),
        album: "Record".to_string(),
        genres: vec!["jazz".to_string()],
        cover_image: None,
    };

    let track = client.add_track(&draft).await.unwrap();

    assert_eq!(track.id, "new-1");
    assert_eq!(track.title, "Song");
    let body = received.lock().unwrap().clone().unwrap();
    assert!(body.get("id").is_none());
    assert_eq!(body["genres"], json!(["jazz"]));
}

#[tokio::test]
async fn test_update_track_puts_full_record() {
    let router = Router::new().route(
        "/api/tracks/{id}",
        axum::routing::put(|Path(id): Path<String>, Json(body): Json<Track>| async move {
            assert_eq!(id, body.id);
            Json(body)
        }),
    );
    let client = Client::new(serve(router).await);
    let mut track: Track = serde_json::from_value(track_json("t9")).unwrap();
    track.title = "Renamed".to_string();
    track.cover_image = Some("cover.png".to_string());

    let updated = client.update_track(&track).await.unwrap();

    assert_eq!(updated, track);
}

#[tokio::test]
async fn test_delete_track() {
    let router = Router::new().route(
        "/api/tracks/{id}",
        delete(|Path(id): Path<String>| async move {
            if id == "gone" {
                StatusCode::NO_CONTENT
            } else {
                StatusCode::NOT_FOUND
            }
        }),
    );
    let client = Client::new(serve(router).await);

    assert!(client.delete_track("gone").await.is_ok());

    let err = client.delete_track("missing").await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to delete track");
    assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn test_delete_music_from_track() {
    let router = Router::new().route(
        "/api/tracks/{id}/file",
        delete(|Path(id): Path<String>| async move {
            if id == "t1" {
                StatusCode::OK
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }),
    );
    let client = Client::new(serve(router).await);

    assert!(client.delete_music_from_track("t1").await.is_ok());

    let err = client.delete_music_from_track("t2").await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to delete music from track");
}

#[tokio::test]
async fn test_get_genres() {
    let router = Router::new().route(
        "/api/genres",
        get(|| async { Json(json!(["Rock", "Jazz", "Ambient"])) }),
    );
    let client = Client::new(format!("{}/", serve(router).await));

    let genres = client.get_genres().await.unwrap();

    assert_eq!(genres, ["Rock", "Jazz", "Ambient"]);
}

#[tokio::test]
async fn test_network_failure_is_a_request_error() {
    let client = Client::new(common::closed_url().await);

    let err = client.get_genres().await.unwrap_err();

    assert!(matches!(err, ApiError::Request(_)));
}
