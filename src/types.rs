use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the three listening-history aggregation windows the provider
/// accepts as `time_range`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFrame {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl TimeFrame {
    pub const ALL: [TimeFrame; 3] = [
        TimeFrame::ShortTerm,
        TimeFrame::MediumTerm,
        TimeFrame::LongTerm,
    ];
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeFrame::ShortTerm => "short_term",
            TimeFrame::MediumTerm => "medium_term",
            TimeFrame::LongTerm => "long_term",
        };
        write!(f, "{}", s)
    }
}

/// Access/refresh token pair owned by the calling session. A refresh
/// replaces only the access token; the refresh token is immutable once
/// issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
    pub refresh_token: Option<String>,
}

// Some top-artist payloads omit the id, related-artist payloads carry it
// reliably; `id` is defaulted instead of required for that reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub popularity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedItem {
    pub added_at: DateTime<Utc>,
    pub track: Track,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeature {
    pub id: String,
    pub uri: String,
    pub danceability: f32,
    pub energy: f32,
    pub key: i32,
    pub loudness: f32,
    pub mode: i32,
    pub speechiness: f32,
    pub acousticness: f32,
    pub instrumentalness: f32,
    pub liveness: f32,
    pub valence: f32,
    pub tempo: f32,
    #[serde(rename = "duration_ms")]
    pub duration: i64,
    pub time_signature: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub tracks: Vec<Track>,
    pub seeds: Vec<RecommendationSeed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationSeed {
    pub id: String,
    #[serde(rename = "href", default)]
    pub link: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopArtistsResponse {
    pub items: Vec<Artist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTracksResponse {
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedArtistsResponse {
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeaturesResponse {
    pub audio_features: Vec<AudioFeature>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTracksResponse {
    pub items: Vec<SavedItem>,
    pub next: Option<String>,
    pub total: u64,
}
