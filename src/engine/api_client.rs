use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::engine::error::{TriviaError, TriviaResult};
use crate::model::payload::LibraryListing;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5054";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// The trivia server as the controller sees it: JSON in, JSON out.
pub trait TriviaApi {
    fn get_json(&self, path: &str) -> TriviaResult<Value>;

    /// Fire a bodyless POST and ignore the reply body.
    fn post(&self, path: &str) -> TriviaResult<()>;
}

pub fn fetch<T, A>(api: &A, path: &str) -> TriviaResult<T>
where
    T: DeserializeOwned,
    A: TriviaApi + ?Sized,
{
    let value = api.get_json(path)?;
    Ok(serde_json::from_value(value)?)
}

/// Quick reachability check used by the settings panel.
pub fn check_connection<A: TriviaApi + ?Sized>(api: &A) -> TriviaResult<String> {
    let library: LibraryListing = fetch(api, "/api/library")?;
    Ok(format!(
        "Connected ({} movies, {} shows available)",
        library.movies.len(),
        library.shows.len()
    ))
}

pub fn frame_progress_path(session_id: &str) -> String {
    format!("/api/trivia/frame/progress/{session_id}")
}

pub fn frame_cancel_path(session_id: &str) -> String {
    format!("/api/trivia/frame/cancel/{session_id}")
}

#[derive(Debug, Clone)]
pub struct HttpTriviaApi {
    client: Client,
    base_url: String,
}

impl HttpTriviaApi {
    pub fn new(base_url: &str) -> TriviaResult<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl TriviaApi for HttpTriviaApi {
    fn get_json(&self, path: &str) -> TriviaResult<Value> {
        debug!("GET {}", path);

        let resp = self.client.get(self.url(path)).send()?;
        let status = resp.status();
        let body = resp.text()?;

        if !status.is_success() {
            // error replies usually still carry {"error": "..."}
            return Err(serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| server_error(&v))
                .unwrap_or(TriviaError::Status(status.as_u16())));
        }

        Ok(serde_json::from_str(&body)?)
    }

    fn post(&self, path: &str) -> TriviaResult<()> {
        debug!("POST {}", path);

        let resp = self.client.post(self.url(path)).send()?;
        if !resp.status().is_success() {
            return Err(TriviaError::Status(resp.status().as_u16()));
        }
        Ok(())
    }
}

/// `{"error": "..."}` as a server error, if present.
pub fn server_error(value: &Value) -> Option<TriviaError> {
    value
        .get("error")
        .and_then(|e| e.as_str())
        .map(|e| TriviaError::Server(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_trailing_slash() {
        let api = HttpTriviaApi::new("http://localhost:5054/").unwrap();
        assert_eq!(api.url("/api/library"), "http://localhost:5054/api/library");
    }

    #[test]
    fn error_field_becomes_server_error() {
        let value = serde_json::json!({"error": "No media found"});
        match server_error(&value) {
            Some(TriviaError::Server(msg)) => assert_eq!(msg, "No media found"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(server_error(&serde_json::json!({"title": "Heat"})).is_none());
    }

    #[test]
    fn frame_paths() {
        assert_eq!(frame_progress_path("abc"), "/api/trivia/frame/progress/abc");
        assert_eq!(frame_cancel_path("abc"), "/api/trivia/frame/cancel/abc");
    }
}
