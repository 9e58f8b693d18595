use std::collections::HashSet;

use crate::{
    error::ApiError,
    info,
    spotify::{client::SpotifyApi, pagination::get_all_pages},
    types::{CurrentUser, PlaylistItem, PlaylistSummary, SavedTrack},
};

/// Largest page size accepted by the library and playlist listing endpoints.
pub const PAGE_LIMIT: u32 = 50;

/// Returns the id of the user the token belongs to.
pub async fn get_current_user_id<A>(api: &A, api_url: &str) -> Result<String, ApiError>
where
    A: SpotifyApi + ?Sized,
{
    info!("Finding out your user id");
    let url = format!("{uri}/me", uri = api_url);
    let json = api.get(&url).await?;
    let user: CurrentUser =
        serde_json::from_value(json).map_err(|source| ApiError::Decode { url, source })?;

    info!("User id is {}", user.id);
    Ok(user.id)
}

/// Returns all tracks saved to the user's library, most recently saved first.
pub async fn get_library_tracks<A>(api: &A, api_url: &str) -> Result<Vec<SavedTrack>, ApiError>
where
    A: SpotifyApi + ?Sized,
{
    info!("Fetching tracks saved to library");
    let url = format!(
        "{uri}/me/tracks?limit={limit}",
        uri = api_url,
        limit = PAGE_LIMIT
    );
    get_all_pages(api, &url).await
}

/// Returns all playlists of the user.
pub async fn get_user_playlists<A>(
    api: &A,
    api_url: &str,
) -> Result<Vec<PlaylistSummary>, ApiError>
where
    A: SpotifyApi + ?Sized,
{
    info!("Fetching user playlists");
    let url = format!(
        "{uri}/me/playlists?limit={limit}",
        uri = api_url,
        limit = PAGE_LIMIT
    );
    get_all_pages(api, &url).await
}

/// Returns the URIs of all tracks in a playlist.
///
/// `tracks_href` is the track listing reference a [`PlaylistSummary`] carries.
/// Entries without a track object (local files, removed tracks) are ignored.
pub async fn get_playlist_track_uris<A>(
    api: &A,
    tracks_href: &str,
) -> Result<HashSet<String>, ApiError>
where
    A: SpotifyApi + ?Sized,
{
    let items: Vec<PlaylistItem> = get_all_pages(api, tracks_href).await?;
    Ok(items
        .into_iter()
        .filter_map(|item| item.track.map(|t| t.uri))
        .collect())
}
