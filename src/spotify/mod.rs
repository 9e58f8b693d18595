//! # Spotify Integration Module
//!
//! This module is the integration layer between bucketify and the Spotify
//! Web API. It covers exactly the endpoints needed to read a user's saved
//! tracks and playlists and to create and fill playlists.
//!
//! ## Architecture
//!
//! ```text
//! Organizer
//!     ↓
//! Spotify Integration Layer
//!     ├── Library reads (saved tracks, playlists, playlist tracks, user)
//!     ├── Pagination (follows `next` until the last page)
//!     └── Playlist writes (create, add tracks in batches of 100, dry run)
//!          ↓
//! SpotifyApi trait ── SpotifyClient (reqwest, bearer auth)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`client`] - The [`client::SpotifyApi`] transport seam and its reqwest
//!   implementation. Maps 401 to [`ApiError::Unauthorized`] and any other
//!   non-success status to [`ApiError::UnexpectedStatus`].
//! - [`pagination`] - Walks a paginated collection to completion.
//! - [`library`] - Typed reads of the resources a run needs.
//! - [`playlist`] - Playlist creation and track insertion with dry-run support.
//!
//! ## API Coverage
//!
//! - `GET /me` - The id of the user owning the token
//! - `GET /me/tracks` - Saved tracks, most recently saved first
//! - `GET /me/playlists` - The user's playlists, matched by name
//! - `GET /playlists/{playlist_id}/tracks` - Tracks already in a playlist
//! - `POST /users/{user_id}/playlists` - Create new playlists
//! - `POST /playlists/{playlist_id}/tracks` - Add tracks to playlists
//!
//! ## Error Handling
//!
//! Requests are issued one after another and never retried. The first
//! failing request ends the run with an [`ApiError`]; since every run only
//! adds what is missing, running again is the recovery path.
//!
//! [`ApiError`]: crate::error::ApiError
//! [`ApiError::Unauthorized`]: crate::error::ApiError::Unauthorized
//! [`ApiError::UnexpectedStatus`]: crate::error::ApiError::UnexpectedStatus

pub mod client;
pub mod library;
pub mod pagination;
pub mod playlist;
