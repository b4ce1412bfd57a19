use crate::{Res, spotify::SpotifyClient, types::Recommendation};

impl SpotifyClient {
    /// Requests track recommendations seeded by artist ids.
    ///
    /// The resolved seed ids go out under the `seed_artists` query key and
    /// the `{tracks, seeds}` payload is returned exactly as the provider
    /// sent it, with no further invariants imposed.
    ///
    /// # Arguments
    ///
    /// * `token` - Valid access token for Spotify API authentication
    /// * `seed_artists` - Up to five artist ids to seed the generator with
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing:
    /// - `Ok(Recommendation)` - The provider's recommendation payload
    /// - `Err(ApiError)` - Any classified request failure
    ///
    /// # Example
    ///
    /// ```
    /// let seeds = vec!["4NHQUGzhtTLFvgF5SZesLK".to_string()];
    /// let recs = client.get_recommendations(&token, &seeds).await?;
    /// println!("{} tracks recommended", recs.tracks.len());
    /// ```
    pub async fn get_recommendations(
        &self,
        token: &str,
        seed_artists: &[String],
    ) -> Res<Recommendation> {
        let url = format!(
            "{uri}/recommendations?seed_artists={seeds}",
            uri = self.config.api_url,
            seeds = seed_artists.join(",")
        );

        let body = self.execute(self.get(&url, token)?).await?;

        Ok(serde_json::from_slice(&body)?)
    }
}
