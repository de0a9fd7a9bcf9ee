//! # CLI Module
//!
//! User-facing commands. Each command opens the persisted store, talks to the
//! remote library through [`crate::remote::Client`], applies the result to the
//! store and saves it again.
//!
//! ```text
//! CLI Layer (commands, tables, progress bars)
//!     ↓
//! Management Layer (TrackStore, UploadStore, snapshot)
//!     ↓
//! Remote Layer (library API client)
//! ```
//!
//! Failures are written to the track store's last-error field before the
//! process exits, so `trackctl player status` can show what went wrong last.

mod genres;
mod player;
mod store;
mod tracks;
mod upload;

use std::{fmt::Display, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{error, management::StoreManager, remote::Client, warning};

pub use genres::genres;
pub use player::{pause, play, status, stop, toggle};
pub use store::clear_store;
pub use tracks::{add_track, delete_track, edit_track, filter_tracks, list_tracks, show_track};
pub use upload::{apply_upload, detach, upload};

fn client() -> Client {
    match Client::from_env() {
        Ok(client) => client,
        Err(e) => error!("Cannot reach the music library: {}", e),
    }
}

async fn save(store: &StoreManager) {
    if let Err(e) = store.persist().await {
        warning!("Failed to save local state. Err: {}", e);
    }
}

/// Keeps `error` as the store's last error and saves it.
async fn remember_error(store: &mut StoreManager, error: &impl Display) {
    store.tracks_mut().set_error(Some(error.to_string()));
    save(store).await;
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
