//! Configuration management for bucketify.
//!
//! This module handles loading configuration values from environment
//! variables and `.env` files and gathers them into an explicit [`Config`]
//! that is handed to the [`Organizer`](crate::organizer::Organizer).
//!
//! The configuration system follows a hierarchical approach:
//! 1. Command-line flags (highest priority, applied by the CLI layer)
//! 2. Environment variables
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::{Res, bucket::Granularity, error::ConfigError};

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

/// Everything a run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bearer token sent with every request. Needs the `user-library-read`
    /// and `playlist-modify-public` scopes.
    pub token: String,
    /// Base URL of the Spotify Web API, without trailing slash.
    pub api_url: String,
    pub granularity: Granularity,
    /// When set no playlist is created or modified; intended requests are
    /// only recorded and printed.
    pub dry_run: bool,
}

impl Config {
    pub fn new(token: impl Into<String>, granularity: Granularity, dry_run: bool) -> Self {
        Config {
            token: token.into(),
            api_url: DEFAULT_SPOTIFY_API_URL.to_string(),
            granularity,
            dry_run,
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builds the configuration from command-line values, falling back to the
    /// process environment for everything not given on the command line.
    pub fn resolve(
        token: Option<String>,
        granularity: Option<Granularity>,
        dry_run: bool,
    ) -> Result<Self, ConfigError> {
        Self::layered(token, granularity, dry_run, EnvValues::read())
    }

    /// Layers command-line values over `env`. `dry_run` only ever switches
    /// dry-run mode on.
    ///
    /// # Errors
    ///
    /// Returns an error if no non-blank token is given by either layer, or if
    /// the environment holds an unknown grouping.
    pub fn layered(
        token: Option<String>,
        granularity: Option<Granularity>,
        dry_run: bool,
        env: EnvValues,
    ) -> Result<Self, ConfigError> {
        let token = non_blank(token)
            .or_else(|| non_blank(env.token))
            .ok_or(ConfigError::MissingToken)?;
        let granularity = match (granularity, env.group_by) {
            (Some(g), _) => g,
            (None, Some(value)) => value.parse()?,
            (None, None) => Granularity::default(),
        };

        let dry_run = dry_run || env.dry_run.as_deref().is_some_and(parse_flag);
        let api_url = env
            .api_url
            .unwrap_or_else(|| DEFAULT_SPOTIFY_API_URL.to_string());
        Ok(Config::new(token, granularity, dry_run).with_api_url(api_url))
    }
}

/// Raw configuration values as found in the environment.
#[derive(Debug, Clone, Default)]
pub struct EnvValues {
    pub token: Option<String>,
    pub api_url: Option<String>,
    pub group_by: Option<String>,
    pub dry_run: Option<String>,
}

impl EnvValues {
    pub fn read() -> Self {
        EnvValues {
            token: env::var("SPOTIFY_TOKEN").ok(),
            api_url: env::var("SPOTIFY_API_URL").ok(),
            group_by: env::var("BUCKETIFY_GROUP_BY").ok(),
            dry_run: env::var("BUCKETIFY_DRY_RUN").ok(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file is looked up under `bucketify/.env` in the platform specific
/// local data directory:
/// - Linux: `~/.local/share/bucketify/.env`
/// - macOS: `~/Library/Application Support/bucketify/.env`
/// - Windows: `%LOCALAPPDATA%/bucketify/.env`
///
/// A missing file is fine, everything can come from the environment. Values
/// already present in the environment are never overwritten.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file exists
/// but cannot be parsed.
pub async fn load_env() -> Res<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)?;
    }
    Ok(())
}

pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("bucketify/.env");
    path
}

pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
