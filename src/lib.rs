//! Spotify Listening Insights Library
//!
//! This library implements the core subsystem for building listening insights
//! and artist recommendations on top of the Spotify Web API. It provides a
//! resilient HTTP client, OAuth token lifecycle management, paginated data
//! fetching, and a multi-stage recommendation aggregator.
//!
//! # Modules
//!
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy for all API operations
//! - `management` - High-level aggregation on top of the fetchers
//! - `ranking` - Frequency counting and ranking utilities
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use spoviews::{config::Config, management, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> spoviews::Res<()> {
//!     let client = SpotifyClient::new(Config::from_env());
//!     let recs = management::aggregate(&client, "BQC...access").await?;
//!     println!("{} recommended tracks", recs.tracks.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod management;
pub mod ranking;
pub mod spotify;
pub mod types;

pub use error::ApiError;

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible operation in this crate reports failure through
/// [`ApiError`], so callers can match on the error taxonomy directly
/// instead of downcasting a boxed error.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
///
/// # Example
///
/// ```
/// use spoviews::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, ApiError>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the library, including the per-request log
/// line emitted by the HTTP client.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// info!("gathered {} top artist entries", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Creates a formatted output line with a green "✓" indicator to signify
/// successful completion of operations.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// success!("resolved {} seed artists", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark.
///
/// Creates a formatted output line with a red "!" indicator. The macro does
/// not terminate the process; library code reports failures through [`Res`]
/// and uses this only to surface context alongside the returned error.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// error!("unhappy response {}: {}", status, body);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Creates a formatted output line with a yellow "!" indicator to highlight
/// potential issues that don't abort the running operation, such as a
/// mid-pagination failure that truncates a saved-tracks fetch.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// warning!("saved tracks fetch stopped early: {}", err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
