use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    detail,
    error::ApiError,
    spotify::client::SpotifyApi,
    success,
    types::{AddTrackToPlaylistRequest, CreatePlaylistRequest},
    warning,
};

/// Most tracks Spotify accepts in a single add-tracks request.
pub const MAX_TRACKS_PER_REQUEST: usize = 100;

/// Stand-in id used when a response does not carry a playlist id.
pub const UNKNOWN_PLAYLIST_ID: &str = "unknown-playlist-id";

/// A mutating request, either sent or (in dry-run mode) only intended.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub payload: Value,
    /// `false` when the request was withheld because of dry-run mode.
    pub dispatched: bool,
}

/// Creates playlists and adds tracks to them.
///
/// Every mutation goes through [`PlaylistWriter::post`], which records it
/// and, unless dry-run mode is on, sends it. In dry-run mode callers get an
/// empty JSON object back, the same thing a response without fields would
/// give them, so the rest of the run carries on unchanged.
pub struct PlaylistWriter<'a, A: SpotifyApi + ?Sized> {
    api: &'a A,
    api_url: String,
    dry_run: bool,
    requests: Vec<RecordedRequest>,
}

impl<'a, A: SpotifyApi + ?Sized> PlaylistWriter<'a, A> {
    pub fn new(api: &'a A, api_url: &str, dry_run: bool) -> Self {
        PlaylistWriter {
            api,
            api_url: api_url.to_string(),
            dry_run,
            requests: Vec::new(),
        }
    }

    /// Creates a public playlist named `name` for `user_id` and returns its id.
    ///
    /// Falls back to [`UNKNOWN_PLAYLIST_ID`] when the response has no id,
    /// which is always the case in dry-run mode.
    pub async fn create_playlist(&mut self, user_id: &str, name: &str) -> Result<String, ApiError> {
        let url = format!(
            "{uri}/users/{user_id}/playlists",
            uri = self.api_url,
            user_id = user_id
        );
        let request = CreatePlaylistRequest {
            name: name.to_string(),
            public: true,
        };

        let response = self.post(url, &request).await?;
        match response.get("id").and_then(Value::as_str) {
            Some(id) => {
                success!("Playlist {} created", name);
                Ok(id.to_string())
            }
            None => {
                if !self.dry_run {
                    warning!("Response for playlist {} carries no id", name);
                }
                Ok(UNKNOWN_PLAYLIST_ID.to_string())
            }
        }
    }

    /// Appends `track_uris` to a playlist, in order, in as many requests as
    /// the per-request limit demands.
    ///
    /// Returns the number of requests issued (or intended, in dry-run mode):
    /// `ceil(len / 100)`, zero for an empty list.
    pub async fn add_tracks(
        &mut self,
        playlist_id: &str,
        track_uris: &[String],
    ) -> Result<usize, ApiError> {
        let url = format!(
            "{uri}/playlists/{id}/tracks",
            uri = self.api_url,
            id = playlist_id
        );

        let mut issued = 0;
        for chunk in track_uris.chunks(MAX_TRACKS_PER_REQUEST) {
            let request = AddTrackToPlaylistRequest {
                uris: chunk.to_vec(),
            };
            self.post(url.clone(), &request).await?;
            issued += 1;
        }

        Ok(issued)
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn requests(&self) -> &[RecordedRequest] {
        &self.requests
    }

    pub fn into_requests(self) -> Vec<RecordedRequest> {
        self.requests
    }

    async fn post<B: Serialize>(&mut self, url: String, body: &B) -> Result<Value, ApiError> {
        let payload = serde_json::to_value(body)?;
        if self.dry_run {
            detail!("[dry run] POST {} {}", url, payload);
        } else {
            detail!("POST {} {}", url, payload);
        }

        self.requests.push(RecordedRequest {
            method: "POST",
            url: url.clone(),
            payload: payload.clone(),
            dispatched: !self.dry_run,
        });

        if self.dry_run {
            return Ok(Value::Object(Map::new()));
        }
        self.api.post(&url, &payload).await
    }
}
