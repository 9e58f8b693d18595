//! Diffing desired playlists against the playlists the user already has.
//!
//! Playlists are matched by exact name. A desired playlist without a match is
//! created and receives all of its tracks; a matched playlist receives only
//! the tracks whose URI it does not contain yet. Running the diff again after
//! its result was applied yields nothing to do.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::{
    bucket::DesiredPlaylists,
    error::ApiError,
    info,
    spotify::{client::SpotifyApi, library, playlist::UNKNOWN_PLAYLIST_ID},
    types::{PlaylistSummary, SavedTrack},
    warning,
};

/// Outcome of comparing desired with existing playlists.
///
/// Every desired label ends up either in `to_create` or in `existing_ids`,
/// never in both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Labels without a playlist of that name, in label order.
    pub to_create: Vec<String>,
    /// Tracks missing per playlist, in desired (fetch) order. Holds entries
    /// for playlists to create as well as for existing ones.
    pub to_add: BTreeMap<String, Vec<SavedTrack>>,
    /// Ids of the existing playlists that matched a label.
    pub existing_ids: BTreeMap<String, String>,
}

impl Reconciliation {
    /// Whether applying this result would change nothing.
    pub fn is_noop(&self) -> bool {
        self.to_create.is_empty() && self.to_add.is_empty()
    }

    /// Labels of existing playlists that already hold all their tracks.
    pub fn up_to_date(&self) -> Vec<&str> {
        self.existing_ids
            .keys()
            .filter(|name| !self.to_add.contains_key(*name))
            .map(String::as_str)
            .collect()
    }
}

/// Indexes playlists by name. With duplicate names the one listed last wins.
pub fn index_by_name(playlists: &[PlaylistSummary]) -> HashMap<&str, &PlaylistSummary> {
    let mut index: HashMap<&str, &PlaylistSummary> = HashMap::new();
    for playlist in playlists {
        if index.insert(playlist.name.as_str(), playlist).is_some() {
            warning!(
                "Found more than one playlist named {}, using the last one",
                playlist.name
            );
        }
    }
    index
}

/// Returns the desired tracks whose URI is not in `present`, keeping order.
pub fn missing_tracks(desired: &[SavedTrack], present: &HashSet<String>) -> Vec<SavedTrack> {
    desired
        .iter()
        .filter(|t| !present.contains(t.uri()))
        .cloned()
        .collect()
}

/// Computes which playlists to create and which tracks to add.
///
/// For every label that matches an existing playlist the playlist's current
/// track listing is fetched, one playlist after another.
///
/// # Errors
///
/// Any failing request while reading a playlist's tracks aborts the
/// reconciliation.
pub async fn reconcile<A>(
    api: &A,
    desired: &DesiredPlaylists,
    existing: &[PlaylistSummary],
) -> Result<Reconciliation, ApiError>
where
    A: SpotifyApi + ?Sized,
{
    let existing_by_name = index_by_name(existing);
    let mut result = Reconciliation::default();

    for (name, tracks) in desired {
        let Some(playlist) = existing_by_name.get(name.as_str()) else {
            info!("Playlist {} will be created", name);
            result.to_create.push(name.clone());
            result.to_add.insert(name.clone(), tracks.clone());
            continue;
        };

        info!("Playlist {} will be updated", name);
        let id = playlist
            .id
            .clone()
            .unwrap_or_else(|| UNKNOWN_PLAYLIST_ID.to_string());
        result.existing_ids.insert(name.clone(), id);

        let present = library::get_playlist_track_uris(api, &playlist.tracks.href).await?;
        let missing = missing_tracks(tracks, &present);
        if !missing.is_empty() {
            result.to_add.insert(name.clone(), missing);
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PlaylistTracksRef, Track};

    fn playlist(id: &str, name: &str) -> PlaylistSummary {
        PlaylistSummary {
            id: Some(id.to_string()),
            name: name.to_string(),
            tracks: PlaylistTracksRef {
                href: format!("http://api/playlists/{}/tracks", id),
                total: None,
            },
        }
    }

    fn saved(uri: &str) -> SavedTrack {
        SavedTrack {
            added_at: "2023-03-01T10:00:00Z".parse().unwrap(),
            track: Track {
                uri: uri.to_string(),
            },
        }
    }

    #[test]
    fn last_duplicate_wins() {
        let playlists = vec![playlist("a", "2023"), playlist("b", "2023")];
        let index = index_by_name(&playlists);
        assert_eq!(index.len(), 1);
        assert_eq!(index["2023"].id.as_deref(), Some("b"));
    }

    #[test]
    fn names_match_exactly() {
        let playlists = vec![playlist("a", "2023 q1"), playlist("b", " 2023 Q1")];
        let index = index_by_name(&playlists);
        assert!(!index.contains_key("2023 Q1"));
    }

    #[test]
    fn missing_keeps_desired_order() {
        let desired = vec![saved("t3"), saved("t2"), saved("t1")];
        let present: HashSet<String> = ["t2".to_string()].into_iter().collect();
        let missing: Vec<String> = missing_tracks(&desired, &present)
            .iter()
            .map(|t| t.uri().to_string())
            .collect();
        assert_eq!(missing, vec!["t3", "t1"]);
    }
}
