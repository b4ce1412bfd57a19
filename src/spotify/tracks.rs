use crate::{
    Res,
    spotify::SpotifyClient,
    types::{SavedTracksResponse, TimeFrame, TopTracksResponse, Track},
    warning,
};

const SAVED_TRACKS_PAGE_LIMIT: u32 = 50;

impl SpotifyClient {
    /// Retrieves the user's top tracks for one listening-history window.
    ///
    /// # Arguments
    ///
    /// * `token` - Valid access token for Spotify API authentication
    /// * `time_frame` - The listening-history aggregation window to query
    /// * `limit` - Maximum number of tracks to return (1-50)
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing:
    /// - `Ok(Vec<Track>)` - Top tracks in provider order
    /// - `Err(ApiError)` - Any classified request failure
    ///
    /// # Example
    ///
    /// ```
    /// let tracks = client.get_top_tracks(&token, TimeFrame::LongTerm, 25).await?;
    /// ```
    pub async fn get_top_tracks(
        &self,
        token: &str,
        time_frame: TimeFrame,
        limit: u32,
    ) -> Res<Vec<Track>> {
        let url = format!(
            "{uri}/me/top/tracks?limit={limit}&time_range={range}",
            uri = self.config.api_url,
            limit = limit,
            range = time_frame
        );

        let body = self.execute(self.get(&url, token)?).await?;
        let res: TopTracksResponse = serde_json::from_slice(&body)?;

        Ok(res.items)
    }

    /// Retrieves every track the user has saved to their library.
    ///
    /// Follows the provider's offset-based `next` cursor page by page,
    /// accumulating tracks until the running count reaches the
    /// provider-reported total.
    ///
    /// # Partial results
    ///
    /// Any failure mid-pagination stops the fetch, logs a warning, and
    /// returns the tracks accumulated so far as a success. Callers never
    /// learn that pagination was cut short except through the log; this is
    /// a deliberate policy for the library view, not an accident, and it is
    /// the one documented exception to the crate's no-partial-results rule.
    ///
    /// # Arguments
    ///
    /// * `token` - Valid access token for Spotify API authentication
    ///
    /// # Returns
    ///
    /// Returns `Ok(Vec<Track>)` with all (or, after a mid-pagination
    /// failure, some) saved tracks. Only failures building the very first
    /// request short-circuit into the same partial-success path.
    pub async fn get_saved_tracks(&self, token: &str) -> Res<Vec<Track>> {
        let mut url = format!(
            "{uri}/me/tracks?limit={limit}&offset=0",
            uri = self.config.api_url,
            limit = SAVED_TRACKS_PAGE_LIMIT
        );
        let mut tracks: Vec<Track> = Vec::new();

        loop {
            let page = match self.saved_tracks_page(token, &url).await {
                Ok(page) => page,
                Err(e) => {
                    warning!(
                        "saved tracks fetch stopped early, returning {} tracks: {}",
                        tracks.len(),
                        e
                    );
                    break;
                }
            };

            tracks.extend(page.items.into_iter().map(|item| item.track));

            if tracks.len() as u64 >= page.total {
                break;
            }
            match page.next {
                Some(next) => url = next,
                None => {
                    warning!(
                        "saved tracks pagination ended before the reported total ({}/{})",
                        tracks.len(),
                        page.total
                    );
                    break;
                }
            }
        }

        Ok(tracks)
    }

    async fn saved_tracks_page(&self, token: &str, url: &str) -> Res<SavedTracksResponse> {
        let body = self.execute(self.get(url, token)?).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
