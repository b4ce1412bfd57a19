use thiserror::Error;

/// Error taxonomy for all Spotify API operations.
///
/// Every fallible call in the crate reports one of these variants.
/// Propagation rules:
///
/// - [`MissingCredential`](ApiError::MissingCredential) and
///   [`MalformedResponse`](ApiError::MalformedResponse) propagate to the
///   caller immediately.
/// - [`TokenExpired`](ApiError::TokenExpired) propagates so the session
///   owner can perform a single refresh-and-retry; the library never
///   refreshes on its own.
/// - [`RateLimited`](ApiError::RateLimited) only surfaces after the client
///   has exhausted its bounded retries; shorter rate-limit episodes are
///   absorbed transparently.
/// - [`BadRequest`](ApiError::BadRequest) carries the status and body of any
///   other non-2xx response.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API answered 401; the access token is stale.
    #[error("access token expired")]
    TokenExpired,

    /// The API kept answering 429 after every permitted retry.
    #[error("rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    /// Any other non-2xx response.
    #[error("unhappy response ({status}): {body}")]
    BadRequest { status: u16, body: String },

    /// A required configuration or token value was absent before the
    /// request could even be built.
    #[error("missing credential: no {0} provided")]
    MissingCredential(&'static str),

    /// The response body could not be decoded into the expected shape.
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// Transport-level failure from the underlying HTTP client.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
