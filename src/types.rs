use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use tabled::Tabled;

/// One page of a paginated Spotify collection.
///
/// `null` entries in `items` are dropped while decoding; Spotify sends them
/// for playlist entries whose track is no longer available.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T: DeserializeOwned> {
    #[serde(default = "Vec::new", deserialize_with = "skip_null_items")]
    pub items: Vec<T>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

fn skip_null_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(items.unwrap_or_default().into_iter().flatten().collect())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub uri: String,
}

/// A track saved to the user's library together with the time it was saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTrack {
    pub added_at: DateTime<FixedOffset>,
    pub track: Track,
}

impl SavedTrack {
    pub fn uri(&self) -> &str {
        &self.track.uri
    }
}

/// An entry of a playlist's track listing. Local files and removed tracks
/// come without a track object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksRef {
    pub href: String,
    pub total: Option<u64>,
}

/// A playlist as listed by `/me/playlists`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub id: Option<String>,
    pub name: String,
    pub tracks: PlaylistTracksRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Tabled)]
pub struct PlanTableRow {
    pub playlist: String,
    pub action: String,
    pub tracks: usize,
}
