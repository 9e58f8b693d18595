//! Spotify Library Bucketing Library
//!
//! This library sorts the tracks a user saved to their Spotify library into
//! playlists named after the period the tracks were saved in: one playlist per
//! year, per (four-month) quarter or per month. Every run recomputes the full
//! picture from the remote state, so running it again after a failure simply
//! completes whatever the previous run left unfinished.
//!
//! # Modules
//!
//! - `bucket` - Mapping of save timestamps to playlist labels
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error types for remote API and configuration failures
//! - `organizer` - Sequencing of fetch, bucket, reconcile and mutate
//! - `reconcile` - Diffing desired playlists against existing ones
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use bucketify::{config, organizer::Organizer, spotify::client::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> bucketify::Res<()> {
//!     config::load_env().await?;
//!     let config = config::Config::resolve(None, None, true)?;
//!     let client = SpotifyClient::new(&config.token);
//!     let report = Organizer::new(client, config).run().await?;
//!     println!("{} playlists created", report.created.len());
//!     Ok(())
//! }
//! ```

pub mod bucket;
pub mod cli;
pub mod config;
pub mod error;
pub mod organizer;
pub mod reconcile;
pub mod spotify;
pub mod types;

/// A convenient Result type alias for operations that may fail.
///
/// Used by [`config::load_env`], whose I/O and `.env` parse errors are only
/// ever reported to the operator. The API layer uses the more specific
/// [`error::ApiError`].
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for progress messages while the
/// library is fetched, reconciled and updated.
///
/// # Example
///
/// ```
/// info!("Fetching tracks saved to library");
/// info!("Found {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a detail line with a dimmed dot.
///
/// Used for request-level output such as every mutation the tool sends or,
/// in dry-run mode, would have sent.
///
/// # Example
///
/// ```
/// detail!("POST {} {}", url, payload);
/// ```
#[macro_export]
macro_rules! detail {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "·".dimmed(), std::format!($($arg)*).dimmed());
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Playlist {} created", name);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Only the binary and the CLI layer
/// use it; library code returns errors instead.
///
/// # Behavior
///
/// This macro will cause the program to exit immediately after printing
/// the error message. It should only be used for fatal errors where
/// recovery is not possible.
///
/// # Example
///
/// ```
/// error!("Unauthorized. Provide a fresh token via SPOTIFY_TOKEN");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable oddities, like duplicate playlist names or a
/// playlist id missing from a response.
///
/// # Example
///
/// ```
/// warning!("Found more than one playlist named {}", name);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
