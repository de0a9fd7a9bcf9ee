//! # Remote Library Module
//!
//! Client for the music library REST API. Every operation is a method on
//! [`Client`], which owns the base URL and a pooled HTTP client; there is no
//! global state, retry, or caching at this layer.
//!
//! ## Layout
//!
//! ```text
//! CLI / stores
//!      ↓
//! Client ── tracks  (paged listing, CRUD)
//!        ── genres  (label listing)
//!        ── upload  (validated multipart upload with progress, detach)
//!      ↓
//! reqwest → remote API
//! ```
//!
//! ## Endpoints
//!
//! - `GET /api/genres` - [`Client::get_genres`]
//! - `GET /api/tracks?page=N` - [`Client::get_tracks_page`], [`Client::get_all_tracks`]
//! - `GET /api/tracks/{id}` - [`Client::get_track_by_id`]
//! - `POST /api/tracks` - [`Client::add_track`]
//! - `PUT /api/tracks/{id}` - [`Client::update_track`]
//! - `DELETE /api/tracks/{id}` - [`Client::delete_track`]
//! - `POST /api/tracks/{id}/upload` - [`Client::upload_music_to_track`]
//! - `DELETE /api/tracks/{id}/file` - [`Client::delete_music_from_track`]
//!
//! ## Validation
//!
//! Response bodies are decoded into the typed structs in [`crate::types`];
//! anything that does not fit fails with [`ApiError::MalformedResponse`]
//! rather than being passed along.

mod client;
mod genres;
mod tracks;
mod upload;

pub use client::{ApiError, ApiResult, Client};
pub use upload::{
    ALLOWED_MIME_TYPES, AudioFile, MAX_UPLOAD_BYTES, UploadAbort, UploadOptions, mime_type_for,
    validate_upload,
};
