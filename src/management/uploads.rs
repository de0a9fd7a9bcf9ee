use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::types::UploadRecord;

/// Playable URLs of uploaded audio, at most one per track.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UploadStore {
    records: BTreeMap<String, UploadRecord>,
}

impl UploadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful upload, replacing any earlier record for the track.
    pub fn record(&mut self, track_id: impl Into<String>, url: impl Into<String>) -> &UploadRecord {
        let track_id = track_id.into();
        let record = UploadRecord {
            track_id: track_id.clone(),
            url: url.into(),
            uploaded_at: Utc::now(),
        };
        self.records.insert(track_id.clone(), record);
        &self.records[&track_id]
    }

    pub fn url_for(&self, track_id: &str) -> Option<&str> {
        self.records.get(track_id).map(|r| r.url.as_str())
    }

    pub fn remove(&mut self, track_id: &str) -> Option<UploadRecord> {
        self.records.remove(track_id)
    }

    pub fn records(&self) -> impl Iterator<Item = &UploadRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn reset(&mut self) {
        self.records.clear();
    }
}
