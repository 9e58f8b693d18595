use std::collections::BTreeMap;

use crate::{
    bucket,
    config::Config,
    error::ApiError,
    info,
    reconcile::{self, Reconciliation},
    spotify::{
        client::SpotifyApi,
        library,
        playlist::{PlaylistWriter, RecordedRequest, UNKNOWN_PLAYLIST_ID},
    },
    types::PlanTableRow,
    warning,
};

/// What a run did, or in dry-run mode would have done.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Number of saved tracks found in the library.
    pub library_size: usize,
    /// Labels of all desired playlists.
    pub playlists: Vec<String>,
    /// Playlists created during this run, with the id they got.
    pub created: BTreeMap<String, String>,
    /// Track URIs submitted per playlist, in submission (oldest first) order.
    pub additions: BTreeMap<String, Vec<String>>,
    /// Every mutating request, sent or withheld.
    pub requests: Vec<RecordedRequest>,
    pub dry_run: bool,
}

impl RunReport {
    pub fn is_noop(&self) -> bool {
        self.created.is_empty() && self.additions.is_empty()
    }

    pub fn plan_rows(&self) -> Vec<PlanTableRow> {
        self.playlists
            .iter()
            .map(|name| {
                let tracks = self.additions.get(name).map_or(0, Vec::len);
                let action = if self.created.contains_key(name) {
                    "create"
                } else if tracks > 0 {
                    "update"
                } else {
                    "up to date"
                };
                PlanTableRow {
                    playlist: name.clone(),
                    action: action.to_string(),
                    tracks,
                }
            })
            .collect()
    }
}

/// Sorts a user's saved tracks into time-bucketed playlists.
pub struct Organizer<A: SpotifyApi> {
    api: A,
    config: Config,
}

impl<A: SpotifyApi> Organizer<A> {
    pub fn new(api: A, config: Config) -> Self {
        Organizer { api, config }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Runs fetch, bucket, reconcile and mutate once.
    ///
    /// Steps, in order:
    /// 1. fetch all saved tracks and group them by label
    /// 2. fetch the user's playlists and reconcile against the groups
    /// 3. if playlists are missing, look up the user id once and create them
    /// 4. add the missing tracks to every playlist, oldest save first
    ///
    /// # Errors
    ///
    /// Stops at the first failing request. Whatever was created or added
    /// before stays in place and is picked up by the next run.
    pub async fn run(&self) -> Result<RunReport, ApiError> {
        let api_url = self.config.api_url.as_str();

        let tracks = library::get_library_tracks(&self.api, api_url).await?;
        info!("Found {} saved tracks", tracks.len());
        let library_size = tracks.len();

        let desired = bucket::group_tracks(tracks, self.config.granularity);
        info!(
            "Tracks fall into {} playlists grouped by {}",
            desired.len(),
            self.config.granularity
        );

        let existing = library::get_user_playlists(&self.api, api_url).await?;
        let reconciliation = reconcile::reconcile(&self.api, &desired, &existing).await?;

        let mut writer = PlaylistWriter::new(&self.api, api_url, self.config.dry_run);
        let created = self.create_playlists(&mut writer, &reconciliation).await?;
        let additions = self
            .add_missing_tracks(&mut writer, &reconciliation, &created)
            .await?;

        Ok(RunReport {
            library_size,
            playlists: desired.into_keys().collect(),
            created,
            additions,
            requests: writer.into_requests(),
            dry_run: self.config.dry_run,
        })
    }

    async fn create_playlists(
        &self,
        writer: &mut PlaylistWriter<'_, A>,
        reconciliation: &Reconciliation,
    ) -> Result<BTreeMap<String, String>, ApiError> {
        let mut created = BTreeMap::new();
        if reconciliation.to_create.is_empty() {
            info!("No playlist needs to be created");
            return Ok(created);
        }

        info!(
            "{} playlists will be created: {}",
            reconciliation.to_create.len(),
            reconciliation.to_create.join(", ")
        );
        let user_id = library::get_current_user_id(&self.api, &self.config.api_url).await?;
        for name in &reconciliation.to_create {
            let id = writer.create_playlist(&user_id, name).await?;
            created.insert(name.clone(), id);
        }

        Ok(created)
    }

    async fn add_missing_tracks(
        &self,
        writer: &mut PlaylistWriter<'_, A>,
        reconciliation: &Reconciliation,
        created: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, Vec<String>>, ApiError> {
        let mut additions = BTreeMap::new();
        if reconciliation.to_add.is_empty() {
            info!("No playlist has to be updated");
            return Ok(additions);
        }

        info!(
            "{} playlists will receive tracks: {}",
            reconciliation.to_add.len(),
            reconciliation
                .to_add
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        );

        for (name, tracks) in &reconciliation.to_add {
            // saved tracks come newest first, playlists are filled oldest first
            let track_uris: Vec<String> = tracks
                .iter()
                .rev()
                .map(|t| t.uri().to_string())
                .collect();

            let playlist_id = created
                .get(name)
                .or_else(|| reconciliation.existing_ids.get(name))
                .map(String::as_str)
                .unwrap_or(UNKNOWN_PLAYLIST_ID);

            if playlist_id == UNKNOWN_PLAYLIST_ID && !writer.is_dry_run() {
                warning!(
                    "Playlist {} has no known id, adding tracks will likely fail. \
                     Run sync again once Spotify lists it",
                    name
                );
            }
            info!("Adding {} tracks to playlist {}", track_uris.len(), name);
            writer.add_tracks(playlist_id, &track_uris).await?;
            additions.insert(name.clone(), track_uris);
        }

        Ok(additions)
    }
}
