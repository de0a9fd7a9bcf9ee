use crate::types::{PageMeta, Track, TrackDraft, TrackPage};

use super::{ApiError, ApiResult, Client};

/// Track listing and CRUD against `/api/tracks`.
impl Client {
    /// Retrieves every track by walking the paginated listing.
    ///
    /// Pages are requested sequentially starting at page 1, and each page's
    /// tracks are appended in order. The loop stops once the page just fetched
    /// is at or past the server-reported `totalPages`, so pages
    /// `1..=totalPages` are each fetched exactly once. An empty library
    /// (`totalPages = 0`) still costs the single request for page 1.
    ///
    /// # Errors
    ///
    /// - [`ApiError::FetchFailed`] if any page body is `null`
    /// - [`ApiError::MalformedResponse`] if a page does not match the schema
    /// - [`ApiError::Status`] on a non-2xx page
    /// - [`ApiError::Request`] on transport failure
    ///
    /// Nothing is retried; tracks from pages fetched before the failure are
    /// discarded.
    ///
    /// # Example
    ///
    /// ```
    /// let client = Client::new("http://localhost:8000");
    /// let tracks = client.get_all_tracks().await?;
    /// println!("{} tracks in the library", tracks.len());
    /// ```
    pub async fn get_all_tracks(&self) -> ApiResult<Vec<Track>> {
        self.get_all_tracks_with_progress(|_| {}).await
    }

    /// Same as [`Client::get_all_tracks`], calling `on_page` with each page's
    /// metadata as soon as that page has been validated.
    pub async fn get_all_tracks_with_progress(
        &self,
        mut on_page: impl FnMut(&PageMeta),
    ) -> ApiResult<Vec<Track>> {
        let mut tracks: Vec<Track> = Vec::new();
        let mut current_page: u32 = 1;

        loop {
            let page = self.get_tracks_page(current_page).await?;
            on_page(&page.meta);

            let total_pages = page.meta.total_pages;
            tracks.extend(page.data);

            if current_page >= total_pages {
                break;
            }
            current_page += 1;
        }

        tracing::debug!(count = tracks.len(), pages = current_page, "fetched all tracks");
        Ok(tracks)
    }

    /// Fetches a single page of the listing.
    pub async fn get_tracks_page(&self, page: u32) -> ApiResult<TrackPage> {
        let body: Option<TrackPage> = self.get_json(&format!("/api/tracks?page={page}")).await?;
        let body = body.ok_or(ApiError::FetchFailed)?;
        validate_page(&body)?;
        Ok(body)
    }

    pub async fn get_track_by_id(&self, id: &str) -> ApiResult<Track> {
        let track: Track = self.get_json(&format!("/api/tracks/{id}")).await?;
        validate_track(&track)?;
        Ok(track)
    }

    /// Creates a track and returns it with its server-assigned id.
    pub async fn add_track(&self, draft: &TrackDraft) -> ApiResult<Track> {
        tracing::debug!(title = %draft.title, "creating track");
        let response = self
            .http
            .post(self.url("/api/tracks"))
            .json(draft)
            .send()
            .await?;
        let track: Track = Self::decode(response, "Failed to create track").await?;
        validate_track(&track)?;
        Ok(track)
    }

    /// Replaces the record stored under `track.id`.
    pub async fn update_track(&self, track: &Track) -> ApiResult<Track> {
        tracing::debug!(id = %track.id, "updating track");
        let response = self
            .http
            .put(self.url(&format!("/api/tracks/{}", track.id)))
            .json(track)
            .send()
            .await?;
        let track: Track = Self::decode(response, "Failed to update track").await?;
        validate_track(&track)?;
        Ok(track)
    }

    pub async fn delete_track(&self, id: &str) -> ApiResult<()> {
        tracing::debug!(id, "deleting track");
        let response = self
            .http
            .delete(self.url(&format!("/api/tracks/{id}")))
            .send()
            .await?;
        Self::expect_success(&response, "Failed to delete track")
    }
}

fn validate_track(track: &Track) -> ApiResult<()> {
    if track.id.is_empty() {
        return Err(ApiError::MalformedResponse(
            "track is missing an id".to_string(),
        ));
    }
    Ok(())
}

fn validate_page(page: &TrackPage) -> ApiResult<()> {
    if page.meta.page == 0 {
        return Err(ApiError::MalformedResponse(
            "page numbers start at 1".to_string(),
        ));
    }
    page.data.iter().try_for_each(validate_track)
}
