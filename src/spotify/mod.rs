//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API, implementing
//! token lifecycle management, data retrieval, and recommendation queries.
//! It is the only layer of the crate that performs HTTP communication and
//! it owns all error classification and rate-limit handling.
//!
//! ## Architecture
//!
//! The module follows a feature-based organization where each submodule
//! extends [`SpotifyClient`] with one domain of API functionality:
//!
//! ```text
//! Aggregation Layer (management)
//!          ↓
//! Spotify Integration Layer
//!     ├── Resilience Client (request execution, retries)
//!     ├── Token Manager (code exchange, refresh)
//!     ├── Artist Operations (top artists, related artists)
//!     ├── Track Operations (top tracks, saved tracks)
//!     ├── Audio Features (batched fetch)
//!     └── Recommendations / User Profile
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`client`] - The resilience client. Issues one outbound request at a
//!   time, classifies the response (2xx body, 401 token expiry, 429 rate
//!   limiting, anything else a bad request), retries rate-limited calls a
//!   bounded number of times honoring `Retry-After`, and logs every call
//!   with URL, status, and duration. Request bodies are never logged since
//!   token requests carry credentials.
//! - [`token`] - OAuth token lifecycle. Exchanges an authorization code for
//!   an access/refresh token pair and refreshes a stale access token using
//!   HTTP Basic auth. A refresh replaces only the access token; the refresh
//!   token is retained unchanged. Neither operation retries internally;
//!   the session owner decides whether to re-issue the original request
//!   after a successful refresh.
//! - [`artists`] - The user's top artists per time frame and the
//!   related-artists graph queries driving the recommendation aggregator.
//! - [`tracks`] - Top tracks and the saved-tracks cursor pagination. Saved
//!   tracks follow the provider's `next` cursor until the reported total is
//!   reached; a mid-pagination failure stops early and returns the partial
//!   accumulation as a success, surfacing the truncation only in a warning
//!   log.
//! - [`features`] - Audio-feature batch fetch, partitioned into pages of at
//!   most 100 ids fetched strictly in order.
//! - [`recommend`] - The recommendations endpoint, seeded by artist ids.
//! - [`user`] - The authenticated user's profile.
//!
//! ## Error Handling
//!
//! All operations return [`crate::Res`] with the crate's
//! [`ApiError`](crate::ApiError) taxonomy. Expired tokens propagate to the
//! caller rather than being refreshed behind its back, so the session stays
//! in control of its credential. Rate limiting is absorbed up to the retry
//! bound and surfaces as `RateLimited` only after exhaustion.
//!
//! ## Thread Safety
//!
//! [`SpotifyClient`] holds a `reqwest::Client` (internally pooled and
//! cheaply cloneable) plus an immutable [`Config`](crate::config::Config).
//! All request-scoped state lives in function locals, so a single client
//! can be shared freely across tasks.

pub mod artists;
pub mod client;
pub mod features;
pub mod recommend;
pub mod token;
pub mod tracks;
pub mod user;

pub use client::SpotifyClient;
pub use features::chunk_range;
