use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// A single music-library record as the remote API returns it.
///
/// `id` is always assigned by the server. New records are submitted as a
/// [`TrackDraft`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// The body of a create request: a track without server-owned fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDraft {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genres: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

/// A partial update merged into an existing [`Track`]. `None` leaves the
/// field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackPatch {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genres: Option<Vec<String>>,
    pub audio_file: Option<Option<String>>,
    pub cover_image: Option<Option<String>>,
}

impl TrackPatch {
    pub fn is_empty(&self) -> bool {
        self == &TrackPatch::default()
    }

    pub fn apply(&self, track: &mut Track) {
        if let Some(title) = &self.title {
            track.title = title.clone();
        }
        if let Some(artist) = &self.artist {
            track.artist = artist.clone();
        }
        if let Some(album) = &self.album {
            track.album = album.clone();
        }
        if let Some(genres) = &self.genres {
            track.genres = genres.clone();
        }
        if let Some(audio_file) = &self.audio_file {
            track.audio_file = audio_file.clone();
        }
        if let Some(cover_image) = &self.cover_image {
            track.cover_image = cover_image.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// One page of `GET /api/tracks?page=N`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackPage {
    pub data: Vec<Track>,
    pub meta: PageMeta,
}

/// Associates a track with the playable URL of its uploaded audio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    pub track_id: String,
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Byte counts reported while an upload body is being sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    pub sent: u64,
    pub total: u64,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genres: String,
    pub audio: String,
}

impl From<&Track> for TrackTableRow {
    fn from(track: &Track) -> Self {
        TrackTableRow {
            id: track.id.clone(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            album: track.album.clone(),
            genres: track.genres.join(","),
            audio: track.audio_file.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[derive(Tabled)]
pub struct GenreTableRow {
    pub genre: String,
}
