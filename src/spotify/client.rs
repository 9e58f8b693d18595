use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::{Map, Value};

use crate::{error::ApiError, warning};

/// Minimal JSON transport for the Spotify Web API.
///
/// Implementations attach the credential, check the response status and hand
/// back the decoded body. A 401 must surface as [`ApiError::Unauthorized`] and
/// any other non-success status as [`ApiError::UnexpectedStatus`].
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// Issues a GET request for an absolute URL.
    async fn get(&self, url: &str) -> Result<Value, ApiError>;

    /// Issues a POST request with a JSON body.
    ///
    /// An empty or non-JSON success body yields an empty object so callers
    /// can fall back to defaults instead of failing.
    async fn post(&self, url: &str, body: &Value) -> Result<Value, ApiError>;
}

/// [`SpotifyApi`] over HTTP, authenticating every request with a bearer token.
pub struct SpotifyClient {
    client: Client,
    token: String,
}

impl SpotifyClient {
    pub fn new(token: &str) -> Self {
        SpotifyClient {
            client: Client::new(),
            token: token.to_string(),
        }
    }
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn get(&self, url: &str) -> Result<Value, ApiError> {
        let response = self.client.get(url).bearer_auth(&self.token).send().await?;
        let response = check_status(url, response).await?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn post(&self, url: &str, body: &Value) -> Result<Value, ApiError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;
        let response = check_status(url, response).await?;
        let body = response.text().await?;

        if body.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        match serde_json::from_str(&body) {
            Ok(json) => Ok(json),
            Err(e) => {
                warning!("Ignoring malformed response from {}: {}", url, e);
                Ok(Value::Object(Map::new()))
            }
        }
    }
}

/// Passes 2xx responses through and turns everything else into an error.
async fn check_status(url: &str, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::UnexpectedStatus {
        status,
        url: url.to_string(),
        body,
    })
}
