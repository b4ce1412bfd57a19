use crate::{Res, spotify::SpotifyClient, types::User};

impl SpotifyClient {
    /// Retrieves the authenticated user's profile.
    pub async fn get_user_profile(&self, token: &str) -> Res<User> {
        let url = format!("{uri}/me", uri = self.config.api_url);

        let body = self.execute(self.get(&url, token)?).await?;

        Ok(serde_json::from_slice(&body)?)
    }
}
