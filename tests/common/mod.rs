#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

use async_trait::async_trait;
use bucketify::{error::ApiError, spotify::client::SpotifyApi};
use chrono::{Duration, NaiveDate};
use reqwest::StatusCode;
use serde_json::{Value, json};

pub const BASE: &str = "http://spotify.test/v1";
pub const USER_ID: &str = "user-1";

/// In-memory stand-in for the Spotify Web API.
///
/// Serves the library, the user's playlists and their tracks in pages, and
/// applies playlist creations and track additions to its own state so a
/// second run sees the result of the first.
pub struct FakeSpotify {
    state: Mutex<State>,
}

#[derive(Default)]
pub struct State {
    /// Saved track items, newest first, as `/me/tracks` returns them.
    pub library: Vec<Value>,
    pub playlists: Vec<FakePlaylist>,
    pub page_size: usize,
    pub gets: Vec<String>,
    pub posts: Vec<(String, Value)>,
    /// GET or POST url to status code to answer with.
    pub failures: HashMap<String, u16>,
    pub omit_created_id: bool,
}

#[derive(Clone, Debug)]
pub struct FakePlaylist {
    pub id: String,
    pub name: String,
    pub uris: Vec<String>,
}

impl FakeSpotify {
    pub fn new(library: Vec<Value>) -> Self {
        FakeSpotify {
            state: Mutex::new(State {
                library,
                page_size: 50,
                ..State::default()
            }),
        }
    }

    pub fn with_playlist(self, id: &str, name: &str, uris: &[&str]) -> Self {
        self.state().playlists.push(FakePlaylist {
            id: id.to_string(),
            name: name.to_string(),
            uris: uris.iter().map(|u| u.to_string()).collect(),
        });
        self
    }

    pub fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn playlist(&self, name: &str) -> Option<FakePlaylist> {
        self.state()
            .playlists
            .iter()
            .rev()
            .find(|p| p.name == name)
            .cloned()
    }

    pub fn posts(&self) -> Vec<(String, Value)> {
        self.state().posts.clone()
    }

    pub fn gets(&self) -> Vec<String> {
        self.state().gets.clone()
    }

    pub fn clear_log(&self) {
        let mut state = self.state();
        state.gets.clear();
        state.posts.clear();
    }
}

fn failure(url: &str, status: u16) -> ApiError {
    if status == 401 {
        return ApiError::Unauthorized;
    }
    ApiError::UnexpectedStatus {
        status: StatusCode::from_u16(status).unwrap(),
        url: url.to_string(),
        body: json!({"error": {"status": status, "message": "fake failure"}}).to_string(),
    }
}

fn split_url(url: &str) -> (String, HashMap<String, String>) {
    let rest = url.strip_prefix(BASE).unwrap_or(url);
    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
    let params = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    (path.to_string(), params)
}

fn page(
    path: &str,
    params: &HashMap<String, String>,
    default_limit: usize,
    all: Vec<Value>,
) -> Value {
    let offset: usize = params.get("offset").and_then(|o| o.parse().ok()).unwrap_or(0);
    let limit: usize = params
        .get("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(default_limit);
    let total = all.len();
    let items: Vec<Value> = all.into_iter().skip(offset).take(limit).collect();
    let next = if offset + limit < total {
        json!(format!("{BASE}{path}?offset={}&limit={}", offset + limit, limit))
    } else {
        Value::Null
    };

    json!({ "items": items, "next": next, "total": total })
}

#[async_trait]
impl SpotifyApi for FakeSpotify {
    async fn get(&self, url: &str) -> Result<Value, ApiError> {
        let mut state = self.state();
        state.gets.push(url.to_string());
        if let Some(status) = state.failures.get(url) {
            return Err(failure(url, *status));
        }

        let (path, params) = split_url(url);
        let size = state.page_size;
        match path.as_str() {
            "/me" => Ok(json!({ "id": USER_ID, "display_name": "Test User" })),
            "/me/tracks" => Ok(page(&path, &params, size, state.library.clone())),
            "/me/playlists" => {
                let all = state
                    .playlists
                    .iter()
                    .map(|p| {
                        json!({
                            "id": p.id,
                            "name": p.name,
                            "tracks": {
                                "href": format!("{BASE}/playlists/{}/tracks", p.id),
                                "total": p.uris.len(),
                            }
                        })
                    })
                    .collect();
                Ok(page(&path, &params, size, all))
            }
            p if p.starts_with("/playlists/") && p.ends_with("/tracks") => {
                let id = &p["/playlists/".len()..p.len() - "/tracks".len()];
                let playlist = state.playlists.iter().find(|pl| pl.id == id);
                match playlist {
                    Some(pl) => {
                        let all = pl
                            .uris
                            .iter()
                            .map(|u| json!({ "track": { "uri": u } }))
                            .collect();
                        Ok(page(&path, &params, 100, all))
                    }
                    None => Err(failure(url, 404)),
                }
            }
            _ => Err(failure(url, 404)),
        }
    }

    async fn post(&self, url: &str, body: &Value) -> Result<Value, ApiError> {
        let mut state = self.state();
        state.posts.push((url.to_string(), body.clone()));
        if let Some(status) = state.failures.get(url) {
            return Err(failure(url, *status));
        }

        let (path, _) = split_url(url);
        if path.starts_with("/users/") && path.ends_with("/playlists") {
            let id = format!("pl-{}", state.playlists.len() + 1);
            let name = body["name"].as_str().unwrap_or_default().to_string();
            state.playlists.push(FakePlaylist {
                id: id.clone(),
                name: name.clone(),
                uris: Vec::new(),
            });
            if state.omit_created_id {
                return Ok(json!({ "name": name }));
            }
            return Ok(json!({ "id": id, "name": name, "public": true }));
        }

        if path.starts_with("/playlists/") && path.ends_with("/tracks") {
            let id = path["/playlists/".len()..path.len() - "/tracks".len()].to_string();
            let uris: Vec<String> = body["uris"]
                .as_array()
                .map(|a| a.iter().filter_map(|u| u.as_str().map(String::from)).collect())
                .unwrap_or_default();
            if uris.len() > 100 {
                return Err(failure(url, 400));
            }
            return match state.playlists.iter_mut().find(|p| p.id == id) {
                Some(playlist) => {
                    playlist.uris.extend(uris);
                    Ok(json!({ "snapshot_id": format!("snap-{}", playlist.uris.len()) }))
                }
                None => Err(failure(url, 404)),
            };
        }

        Err(failure(url, 404))
    }
}

/// A saved track item as `/me/tracks` returns it.
pub fn saved_item(uri: &str, added_at: &str) -> Value {
    json!({
        "added_at": added_at,
        "track": { "uri": uri, "name": format!("Track {}", uri) }
    })
}

/// `count` saved items, one per day from `first_day` on, returned newest
/// first. Item k (oldest is 0) has uri `spotify:track:<prefix><k>`.
pub fn daily_items(prefix: &str, first_day: NaiveDate, count: usize) -> Vec<Value> {
    let mut items: Vec<Value> = (0..count)
        .map(|k| {
            let day = first_day + Duration::days(k as i64);
            saved_item(
                &format!("spotify:track:{prefix}{k:03}"),
                &day.format("%Y-%m-%dT12:00:00Z").to_string(),
            )
        })
        .collect();
    items.reverse();
    items
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
