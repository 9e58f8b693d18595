use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::de::DeserializeOwned;

use crate::{error::ApiError, info, spotify::client::SpotifyApi, types::Page};

/// Retrieves every item of a paginated Spotify collection.
///
/// Starts at `url` and keeps following the `next` pointer of each page until
/// a page comes without one. Items are returned in page order, and within a
/// page in the order the server sent them. Pages are requested strictly one
/// after another, so a collection of K pages costs exactly K requests.
///
/// # Arguments
///
/// * `api` - Transport used for the GET requests
/// * `url` - Absolute URL of the first page
///
/// # Errors
///
/// The first failing request aborts the walk; nothing is retried and the
/// items fetched so far are discarded. A page that cannot be decoded into
/// `Page<T>` yields [`ApiError::Decode`].
///
/// # Progress Indication
///
/// Displays a spinner with the number of items fetched against the total
/// reported by the API while the pages are requested.
///
/// # Example
///
/// ```
/// let tracks: Vec<SavedTrack> =
///     get_all_pages(&client, "https://api.spotify.com/v1/me/tracks?limit=50").await?;
/// ```
pub async fn get_all_pages<T, A>(api: &A, url: &str) -> Result<Vec<T>, ApiError>
where
    T: DeserializeOwned,
    A: SpotifyApi + ?Sized,
{
    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Fetching {}...", url));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let result = walk_pages(api, url, &pb).await;
    pb.finish_and_clear();

    let (items, total) = result?;
    info!(
        "[{}/{}] {}",
        items.len(),
        total.map_or_else(|| "unknown".to_string(), |t| t.to_string()),
        url
    );
    Ok(items)
}

async fn walk_pages<T, A>(
    api: &A,
    url: &str,
    pb: &ProgressBar,
) -> Result<(Vec<T>, Option<u64>), ApiError>
where
    T: DeserializeOwned,
    A: SpotifyApi + ?Sized,
{
    let mut items: Vec<T> = Vec::new();
    let mut total = None;
    let mut next = Some(url.to_string());

    while let Some(page_url) = next {
        let json = api.get(&page_url).await?;
        let page: Page<T> = serde_json::from_value(json).map_err(|source| ApiError::Decode {
            url: page_url.clone(),
            source,
        })?;

        items.extend(page.items);
        total = page.total.or(total);
        pb.set_message(format!(
            "[{}/{}] {}",
            items.len(),
            total.map_or_else(|| "?".to_string(), |t| t.to_string()),
            page_url
        ));

        next = page.next;
    }

    Ok((items, total))
}
