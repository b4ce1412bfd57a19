use crate::{
    ranking::{self, FrequencyMap},
    types::{Artist, Track},
};

/// Tallies how often each artist appears across a track collection, keyed
/// by lower-cased artist name. The result is the "library" side of
/// [`remove_users_known_artists`](crate::management::remove_users_known_artists).
pub fn library_artist_counts(tracks: &[Track]) -> FrequencyMap {
    ranking::count(tracks, |track| {
        track
            .artists
            .iter()
            .map(|a| a.name.to_lowercase())
            .collect::<Vec<_>>()
    })
}

/// Tallies genre occurrences across an artist collection, keyed by
/// lower-cased genre name.
pub fn genre_counts(artists: &[Artist]) -> FrequencyMap {
    ranking::count(artists, |artist| {
        artist
            .genres
            .iter()
            .map(|g| g.to_lowercase())
            .collect::<Vec<_>>()
    })
}
