//! Configuration management for the listening-insights library.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. All values live in a single
//! explicit [`Config`] struct that is handed to the client at construction
//! time; nothing is looked up through ambient state at request time.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (endpoint URLs only)

use std::{env, path::PathBuf};

use dotenv;

use crate::error::ApiError;

const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Explicit, strongly typed configuration for the Spotify client.
///
/// Endpoint URLs always have a value (the public Spotify endpoints by
/// default) and can be overridden, which is also what the HTTP-level tests
/// use to point the client at a local mock server. The OAuth application
/// credentials are optional at construction time: operations that need an
/// absent value fail with [`ApiError::MissingCredential`] naming it, rather
/// than panicking at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// OAuth client id of the registered Spotify application.
    pub client_id: Option<String>,
    /// OAuth client secret of the registered Spotify application.
    pub client_secret: Option<String>,
    /// Redirect URI the authorization code was issued against.
    pub return_url: Option<String>,
    /// Base URL of the Spotify Web API.
    pub api_url: String,
    /// URL of the OAuth token exchange/refresh endpoint.
    pub token_url: String,
}

impl Config {
    /// Builds a configuration from the process environment.
    ///
    /// Reads the following variables:
    ///
    /// - `SPOTIFY_API_AUTH_CLIENT_ID`
    /// - `SPOTIFY_API_AUTH_CLIENT_SECRET`
    /// - `SPOTIFY_API_REDIRECT_URI`
    /// - `SPOTIFY_API_URL` (defaults to the public Web API base URL)
    /// - `SPOTIFY_API_TOKEN_URL` (defaults to the public token endpoint)
    ///
    /// Absent credentials are kept as `None`; they only become an error when
    /// an operation actually requires them.
    ///
    /// # Example
    ///
    /// ```
    /// use spoviews::config::Config;
    ///
    /// let config = Config::from_env();
    /// ```
    pub fn from_env() -> Self {
        Config {
            client_id: env::var("SPOTIFY_API_AUTH_CLIENT_ID").ok(),
            client_secret: env::var("SPOTIFY_API_AUTH_CLIENT_SECRET").ok(),
            return_url: env::var("SPOTIFY_API_REDIRECT_URI").ok(),
            api_url: env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            token_url: env::var("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string()),
        }
    }

    pub(crate) fn client_id(&self) -> Result<&str, ApiError> {
        self.client_id
            .as_deref()
            .ok_or(ApiError::MissingCredential("client id"))
    }

    pub(crate) fn client_secret(&self) -> Result<&str, ApiError> {
        self.client_secret
            .as_deref()
            .ok_or(ApiError::MissingCredential("client secret"))
    }

    pub(crate) fn return_url(&self) -> Result<&str, ApiError> {
        self.return_url
            .as_deref()
            .ok_or(ApiError::MissingCredential("return url"))
    }
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `spoviews/.env`. This allows configuration to
/// be stored outside of version control.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/spoviews/.env`
/// - macOS: `~/Library/Application Support/spoviews/.env`
/// - Windows: `%LOCALAPPDATA%/spoviews/.env`
///
/// # Returns
///
/// Returns `Ok(())` if the environment file is successfully loaded, or an
/// error string if directory creation or file loading fails.
///
/// # Example
///
/// ```
/// use spoviews::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spoviews/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::from_path(path).map_err(|e| e.to_string())?;
    Ok(())
}
