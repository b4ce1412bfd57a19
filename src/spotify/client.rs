use std::time::{Duration, Instant};

use reqwest::{Client, Request, StatusCode, header::HeaderMap};
use tokio::time::sleep;

use crate::{config::Config, error::ApiError, info};

/// How often a rate-limited request is re-issued before giving up.
pub const RATE_LIMIT_MAX_RETRIES: u32 = 3;

const RATE_LIMIT_DEFAULT_WAIT_SECS: u64 = 5;

/// Client for the Spotify Web API.
///
/// Owns the HTTP connection pool and the endpoint configuration. All API
/// operations are implemented as methods on this type, spread across the
/// sibling modules by domain. The client holds no credential: access tokens
/// are owned by the calling session and passed into every operation.
pub struct SpotifyClient {
    pub(crate) http: Client,
    pub(crate) config: Config,
}

impl SpotifyClient {
    pub fn new(config: Config) -> Self {
        SpotifyClient {
            http: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Builds a bearer-authenticated GET request against the API.
    ///
    /// Fails with `MissingCredential` when no access token is provided,
    /// before any request leaves the process.
    pub(crate) fn get(&self, url: &str, token: &str) -> Result<Request, ApiError> {
        if token.is_empty() {
            return Err(ApiError::MissingCredential("access token"));
        }
        Ok(self.http.get(url).bearer_auth(token).build()?)
    }

    /// Issues one outbound request and classifies the response.
    ///
    /// - 2xx returns the body bytes.
    /// - 401 fails with [`ApiError::TokenExpired`]; refreshing is the
    ///   caller's responsibility, this method never refreshes itself.
    /// - 429 reads the `Retry-After` header (seconds, defaulting to 5 with
    ///   exponential growth when absent or unparsable), sleeps for that
    ///   duration on the calling task, and re-issues the same request.
    ///   After [`RATE_LIMIT_MAX_RETRIES`] re-issues the call fails with
    ///   [`ApiError::RateLimited`] instead of looping further.
    /// - Any other status fails with [`ApiError::BadRequest`] carrying the
    ///   status and body.
    ///
    /// Every call emits one log line with URL, status, and duration. The
    /// request body is never logged: token requests carry credentials.
    pub(crate) async fn execute(&self, request: Request) -> Result<Vec<u8>, ApiError> {
        let mut request = request;
        let mut attempts: u32 = 0;

        loop {
            // every request in this crate carries a buffered body, so a
            // clone for the retry path is always available
            let retry = request.try_clone();
            let url = request.url().clone();
            let started = Instant::now();

            let response = self.http.execute(request).await?;
            let status = response.status();
            info!(
                "external request ({}) to {} took {:?}",
                status.as_u16(),
                url,
                started.elapsed()
            );

            if status.is_success() {
                return Ok(response.bytes().await?.to_vec());
            }

            if status == StatusCode::UNAUTHORIZED {
                return Err(ApiError::TokenExpired);
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                attempts += 1;
                let next = match retry {
                    Some(r) if attempts <= RATE_LIMIT_MAX_RETRIES => r,
                    _ => return Err(ApiError::RateLimited { attempts }),
                };

                let wait = retry_after_seconds(response.headers())
                    .unwrap_or(RATE_LIMIT_DEFAULT_WAIT_SECS << (attempts - 1));
                sleep(Duration::from_secs(wait)).await;

                request = next;
                continue;
            }

            let body = String::from_utf8_lossy(&response.bytes().await?).into_owned();
            return Err(ApiError::BadRequest {
                status: status.as_u16(),
                body,
            });
        }
    }
}

fn retry_after_seconds(headers: &HeaderMap) -> Option<u64> {
    headers.get("retry-after")?.to_str().ok()?.parse().ok()
}
