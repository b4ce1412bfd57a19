use crate::{
    Res,
    spotify::SpotifyClient,
    types::{Artist, RelatedArtistsResponse, TimeFrame, TopArtistsResponse},
};

const TOP_ARTISTS_LIMIT: u32 = 25;

impl SpotifyClient {
    /// Retrieves the user's top artists for one listening-history window.
    ///
    /// Fetches up to 25 artists the user listened to most within the given
    /// time frame. The recommendation aggregator calls this once per window
    /// and concatenates the results, so duplicates across windows are
    /// expected and meaningful.
    ///
    /// # Arguments
    ///
    /// * `token` - Valid access token for Spotify API authentication
    /// * `time_frame` - The listening-history aggregation window to query
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing:
    /// - `Ok(Vec<Artist>)` - Top artists in provider order
    /// - `Err(ApiError)` - Token expiry, rate-limit exhaustion, or any
    ///   other classified request failure
    ///
    /// # Example
    ///
    /// ```
    /// let artists = client.get_top_artists(&token, TimeFrame::ShortTerm).await?;
    /// println!("{} recent favourites", artists.len());
    /// ```
    pub async fn get_top_artists(&self, token: &str, time_frame: TimeFrame) -> Res<Vec<Artist>> {
        let url = format!(
            "{uri}/me/top/artists?limit={limit}&time_range={range}",
            uri = self.config.api_url,
            limit = TOP_ARTISTS_LIMIT,
            range = time_frame
        );

        let body = self.execute(self.get(&url, token)?).await?;
        let res: TopArtistsResponse = serde_json::from_slice(&body)?;

        Ok(res.items)
    }

    /// Retrieves the artists Spotify considers similar to a given artist.
    ///
    /// Related-artist payloads reliably carry artist ids, unlike some
    /// top-artist payloads, which is why the aggregator builds its seed
    /// cache exclusively from these responses.
    ///
    /// # Arguments
    ///
    /// * `token` - Valid access token for Spotify API authentication
    /// * `artist_id` - Spotify id of the artist to expand
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing:
    /// - `Ok(Vec<Artist>)` - The related artists in provider order
    /// - `Err(ApiError)` - Any classified request failure
    pub async fn get_related_artists(&self, token: &str, artist_id: &str) -> Res<Vec<Artist>> {
        let url = format!(
            "{uri}/artists/{id}/related-artists",
            uri = self.config.api_url,
            id = artist_id
        );

        let body = self.execute(self.get(&url, token)?).await?;
        let res: RelatedArtistsResponse = serde_json::from_slice(&body)?;

        Ok(res.artists)
    }
}
