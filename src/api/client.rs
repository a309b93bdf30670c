//! Blocking HTTP client for the recommendation backend.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::config::ApiSettings;

use super::error::ApiError;
use super::types::{HealthStatus, RatingUpdate, RecKind, Track};

pub struct ApiClient {
    http: Client,
    base_url: String,
    csrf_token: Option<String>,
}

impl ApiClient {
    /// Build a client from settings. The CSRF token is read once here and
    /// reused for the lifetime of the client.
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "X-Requested-With",
            HeaderValue::from_static("XMLHttpRequest"),
        );

        let http = Client::builder()
            .default_headers(headers)
            // Session cookies ride along on every request.
            .cookie_store(true)
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()?;

        let csrf_token = settings
            .csrf_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            csrf_token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let mut req = self.http.get(self.url(path));
        // The backend checks the anti-forgery token on its GET endpoints,
        // not on POSTs. Mirrored as-is; see DESIGN.md.
        if let Some(token) = &self.csrf_token {
            req = req.header("X-CSRF-Token", token);
        }
        req
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.url(path))
    }

    fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<Value>()
                .ok()
                .and_then(|v| {
                    v.get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .filter(|m| !m.is_empty());
            return Err(match message {
                Some(message) => ApiError::Http {
                    status: status.as_u16(),
                    message,
                },
                None => ApiError::generic_http(status.as_u16()),
            });
        }

        let bytes = resp.bytes()?;
        serde_json::from_slice(&bytes).map_err(ApiError::Malformed)
    }

    pub fn health(&self) -> Result<HealthStatus, ApiError> {
        Self::decode(self.get("/api/health").send()?)
    }

    pub fn storage_health(&self) -> Result<HealthStatus, ApiError> {
        Self::decode(self.get("/api/test_db").send()?)
    }

    pub fn search(&self, query: &str) -> Result<Vec<Track>, ApiError> {
        let path = format!("/api/search?q={}", urlencoding::encode(query));
        Self::decode(self.get(&path).send()?)
    }

    pub fn recommendations(&self, kind: RecKind) -> Result<Vec<Track>, ApiError> {
        let path = format!("/api/recommendations/{}", kind.as_str());
        Self::decode(self.get(&path).send()?)
    }

    /// Record a play. The response body is irrelevant beyond being valid
    /// JSON on success.
    pub fn record_play(&self, song_id: i64) -> Result<(), ApiError> {
        let path = format!("/api/songs/{song_id}/play");
        let _: Value = Self::decode(self.post(&path).send()?)?;
        Ok(())
    }

    pub fn rate(&self, song_id: i64, rating: f64) -> Result<RatingUpdate, ApiError> {
        let path = format!("/api/songs/{song_id}/rate");
        let body = json!({ "rating": rating });
        Self::decode(self.post(&path).json(&body).send()?)
    }
}
