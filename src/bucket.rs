//! Mapping of save timestamps to playlist labels.
//!
//! A label is derived from the year and month of the timestamp as it was
//! reported by Spotify (its own UTC offset, no conversion). Quarters split the
//! year into three groups of four months:
//!
//! | months  | label       |
//! |---------|-------------|
//! | 1 - 4   | `2023 Q1`   |
//! | 5 - 8   | `2023 Q2`   |
//! | 9 - 12  | `2023 Q3`   |
//!
//! Months are zero-padded (`2023 07`) so labels sort chronologically.

use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{DateTime, Datelike, FixedOffset};
use clap::ValueEnum;

use crate::{error::ConfigError, types::SavedTrack};

/// How saved tracks are grouped into playlists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum Granularity {
    #[default]
    Year,
    Quarter,
    Month,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Granularity::Year => "year",
            Granularity::Quarter => "quarter",
            Granularity::Month => "month",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Granularity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "year" => Ok(Granularity::Year),
            "quarter" => Ok(Granularity::Quarter),
            "month" => Ok(Granularity::Month),
            other => Err(ConfigError::InvalidGranularity(other.to_string())),
        }
    }
}

/// Desired playlists: label to tracks, tracks in the order they were fetched
/// (most recently saved first).
pub type DesiredPlaylists = BTreeMap<String, Vec<SavedTrack>>;

/// Returns the quarter (1, 2 or 3) a month falls into.
pub fn quarter_of(month: u32) -> u32 {
    match month {
        1..=4 => 1,
        5..=8 => 2,
        _ => 3,
    }
}

/// Returns the playlist label for a track saved at `added_at`.
pub fn bucket_label(added_at: &DateTime<FixedOffset>, granularity: Granularity) -> String {
    let year = added_at.year();
    match granularity {
        Granularity::Year => format!("{:04}", year),
        Granularity::Quarter => format!("{:04} Q{}", year, quarter_of(added_at.month())),
        Granularity::Month => format!("{:04} {:02}", year, added_at.month()),
    }
}

/// Groups tracks by label, keeping fetch order inside every group.
pub fn group_tracks(tracks: Vec<SavedTrack>, granularity: Granularity) -> DesiredPlaylists {
    let mut playlists = DesiredPlaylists::new();
    for track in tracks {
        let label = bucket_label(&track.added_at, granularity);
        playlists.entry(label).or_default().push(track);
    }
    playlists
}
