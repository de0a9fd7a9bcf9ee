use serde::{Deserialize, Serialize};

use crate::types::{Track, TrackPatch};

/// Client-side view of the library: the track list, what is selected, whether
/// it is playing, and the last error any operation reported.
///
/// Playback and selection are independent: clearing the current track does
/// not pause, and pausing does not clear the selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackStore {
    tracks: Vec<Track>,
    current_track: Option<Track>,
    is_playing: bool,
    error: Option<String>,
}

impl TrackStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn find(&self, track_id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == track_id)
    }

    pub fn set_tracks(&mut self, tracks: Vec<Track>) {
        self.tracks = tracks;
    }

    pub fn add_track(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Replaces the track with the same id, or appends it when absent.
    pub fn upsert_track(&mut self, track: Track) {
        match self.tracks.iter_mut().find(|t| t.id == track.id) {
            Some(existing) => *existing = track,
            None => self.tracks.push(track),
        }
    }

    /// Removes every track with `track_id`, keeping the others in order.
    pub fn delete_track(&mut self, track_id: &str) {
        self.tracks.retain(|t| t.id != track_id);
    }

    /// Merges `patch` into the track with `track_id`. Unknown ids are ignored.
    pub fn update_track(&mut self, track_id: &str, patch: &TrackPatch) {
        if let Some(track) = self.tracks.iter_mut().find(|t| t.id == track_id) {
            patch.apply(track);
        }
    }

    pub fn set_current_track(&mut self, track: Option<Track>) {
        self.current_track = track;
    }

    pub fn play_track(&mut self) {
        self.is_playing = true;
    }

    pub fn pause_track(&mut self) {
        self.is_playing = false;
    }

    pub fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
    }

    pub fn stop_track(&mut self) {
        self.current_track = None;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
