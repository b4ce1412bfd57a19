mod library;
mod recommend;

pub use library::genre_counts;
pub use library::library_artist_counts;
pub use recommend::SeedCache;
pub use recommend::aggregate;
pub use recommend::remove_users_known_artists;
pub use recommend::resolve_seed_ids;
