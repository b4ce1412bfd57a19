use base64::{Engine, engine::general_purpose::URL_SAFE};

use crate::{
    Res,
    error::ApiError,
    spotify::SpotifyClient,
    types::{Credential, TokenResponse},
};

impl SpotifyClient {
    /// Exchanges an OAuth authorization code for an access/refresh token pair.
    ///
    /// POSTs `grant_type=authorization_code` to the configured token
    /// endpoint with the application credentials in the form body.
    ///
    /// # Arguments
    ///
    /// * `code` - Authorization code received from the OAuth redirect
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing:
    /// - `Ok(Credential)` - The freshly issued token pair
    /// - `Err(ApiError)` - `MissingCredential` when the return URL, client
    ///   id, or client secret is absent from the configuration;
    ///   `MalformedResponse` when the token response cannot be decoded;
    ///   any resilience-client error otherwise
    ///
    /// # Example
    ///
    /// ```
    /// let credential = client.exchange_code("AQA...auth_code").await?;
    /// println!("Access token: {}", credential.access_token);
    /// ```
    pub async fn exchange_code(&self, code: &str) -> Res<Credential> {
        let return_url = self.config.return_url()?;
        let client_id = self.config.client_id()?;
        let client_secret = self.config.client_secret()?;

        let request = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", return_url),
                ("client_id", client_id),
                ("client_secret", client_secret),
            ])
            .build()?;

        let body = self.execute(request).await?;
        let parsed: TokenResponse = serde_json::from_slice(&body)?;

        Ok(Credential {
            access_token: parsed.access_token,
            refresh_token: parsed.refresh_token.unwrap_or_default(),
        })
    }

    /// Refreshes an expired access token using the stored refresh token.
    ///
    /// POSTs `grant_type=refresh_token` with HTTP Basic auth built from the
    /// application credentials. On success the returned credential carries
    /// the fresh access token while the refresh token is retained from the
    /// input unchanged; the input credential itself is not mutated.
    ///
    /// This method performs no retries of its own. The caller decides
    /// whether to re-issue the request that originally failed with
    /// `TokenExpired` once the refresh has succeeded.
    ///
    /// # Arguments
    ///
    /// * `credential` - The current token pair; only its refresh token is used
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing:
    /// - `Ok(Credential)` - New pair with the replaced access token
    /// - `Err(ApiError)` - `MissingCredential` when the refresh token,
    ///   client id, or client secret is absent; `MalformedResponse` when
    ///   the token response cannot be decoded; any resilience-client error
    ///   otherwise
    ///
    /// # Example
    ///
    /// ```
    /// let refreshed = client.refresh(&credential).await?;
    /// assert_eq!(refreshed.refresh_token, credential.refresh_token);
    /// ```
    pub async fn refresh(&self, credential: &Credential) -> Res<Credential> {
        if credential.refresh_token.is_empty() {
            return Err(ApiError::MissingCredential("refresh token"));
        }
        let client_id = self.config.client_id()?;
        let client_secret = self.config.client_secret()?;

        let key = URL_SAFE.encode(format!("{}:{}", client_id, client_secret));

        let request = self
            .http
            .post(&self.config.token_url)
            .header("Authorization", format!("Basic {}", key))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", credential.refresh_token.as_str()),
            ])
            .build()?;

        let body = self.execute(request).await?;
        let parsed: TokenResponse = serde_json::from_slice(&body)?;

        Ok(Credential {
            access_token: parsed.access_token,
            refresh_token: credential.refresh_token.clone(),
        })
    }
}
