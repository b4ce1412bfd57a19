use crate::{
    Res,
    spotify::SpotifyClient,
    types::{AudioFeature, AudioFeaturesResponse},
};

/// Maximum number of track ids the audio-features endpoint accepts per call.
pub const AUDIO_FEATURES_PAGE_LIMIT: usize = 100;

/// Computes the id range `[begin, end)` for the page starting at `start`.
///
/// When the whole id list fits in one page the full range is returned. A
/// `start` beyond the end of the list falls back to the first page instead
/// of failing; that fallback is long-standing behavior callers depend on
/// and is kept as-is.
pub fn chunk_range(start: usize, ids: &[String]) -> (usize, usize) {
    if ids.len() <= AUDIO_FEATURES_PAGE_LIMIT {
        return (0, ids.len());
    }
    if start > ids.len() {
        return (0, AUDIO_FEATURES_PAGE_LIMIT);
    }
    (
        start,
        usize::min(start + AUDIO_FEATURES_PAGE_LIMIT, ids.len()),
    )
}

impl SpotifyClient {
    /// Retrieves audio features for a list of track ids.
    ///
    /// Partitions `ids` into pages of at most 100, fetches the pages
    /// strictly in order, and concatenates the results preserving the input
    /// order. An empty id list issues no request at all.
    ///
    /// # Arguments
    ///
    /// * `token` - Valid access token for Spotify API authentication
    /// * `ids` - Track ids, in the order the features should come back
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing:
    /// - `Ok(Vec<AudioFeature>)` - One feature record per id, input order
    /// - `Err(ApiError)` - Any classified request failure; a failing page
    ///   aborts the whole fetch
    ///
    /// # Example
    ///
    /// ```
    /// let features = client.get_audio_features(&token, &track_ids).await?;
    /// assert_eq!(features.len(), track_ids.len());
    /// ```
    pub async fn get_audio_features(&self, token: &str, ids: &[String]) -> Res<Vec<AudioFeature>> {
        let mut features: Vec<AudioFeature> = Vec::with_capacity(ids.len());
        let mut start = 0;

        while start < ids.len() {
            let (begin, end) = chunk_range(start, ids);
            let url = format!(
                "{uri}/audio-features?ids={ids}",
                uri = self.config.api_url,
                ids = ids[begin..end].join(",")
            );

            let body = self.execute(self.get(&url, token)?).await?;
            let res: AudioFeaturesResponse = serde_json::from_slice(&body)?;
            features.extend(res.audio_features);

            start = end;
        }

        Ok(features)
    }
}
