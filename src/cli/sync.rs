use tabled::Table;

use crate::{
    bucket::Granularity,
    config::Config,
    error,
    error::ApiError,
    info,
    organizer::{Organizer, RunReport},
    spotify::client::SpotifyClient,
    success, warning,
};

pub async fn sync(token: Option<String>, group_by: Option<Granularity>, dry_run: bool) {
    let config = match Config::resolve(token, group_by, dry_run) {
        Ok(config) => config,
        Err(e) => error!("Invalid configuration: {}", e),
    };

    if config.dry_run {
        warning!("Dry run, no playlist will be created or changed");
    }

    let client = SpotifyClient::new(&config.token);
    let organizer = Organizer::new(client, config);

    let report = match organizer.run().await {
        Ok(report) => report,
        Err(e) => error!("{}", failure_message(&e)),
    };

    print_report(&report);
}

fn failure_message(err: &ApiError) -> String {
    if err.is_unauthorized() {
        return "Unauthorized. Get a fresh token with the user-library-read and \
                playlist-modify-public scopes and set SPOTIFY_TOKEN"
            .to_string();
    }
    format!(
        "Request failed: {}. Changes made before the failure stay in place, \
         run sync again to finish",
        err
    )
}

fn print_report(report: &RunReport) {
    if report.playlists.is_empty() {
        info!("Your library has no saved tracks");
        return;
    }

    println!("{}", Table::new(report.plan_rows()));

    let tracks: usize = report.additions.values().map(Vec::len).sum();
    if report.dry_run {
        info!(
            "Dry run finished, {} requests withheld ({} playlists to create, {} tracks to add)",
            report.requests.len(),
            report.created.len(),
            tracks
        );
    } else if report.is_noop() {
        success!("All {} saved tracks are already sorted", report.library_size);
    } else {
        success!(
            "Created {} playlists and added {} tracks in {} requests",
            report.created.len(),
            tracks,
            report.requests.len()
        );
    }
}
