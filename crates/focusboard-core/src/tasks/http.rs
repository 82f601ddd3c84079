//! reqwest-backed [`TaskBackend`] for native hosts.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, COOKIE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use url::Url;

use super::backend::{delete_task_path, toggle_task_path, TaskBackend, ADD_TASK_PATH, REQUESTED_WITH};
use super::model::{AddTaskRequest, AddTaskResponse, DeleteTaskResponse, TaskId, ToggleTaskResponse};
use crate::error::SyncError;
use crate::storage::BackendConfig;

/// HTTP client for the task endpoints.
#[derive(Debug, Clone)]
pub struct HttpTaskBackend {
    client: Client,
    base: Url,
    requested_with: String,
    session_cookie: Option<String>,
}

impl HttpTaskBackend {
    /// Client for `base_url` with default headers and no timeout.
    pub fn new(base_url: &str) -> Result<Self, SyncError> {
        Ok(Self {
            client: Client::new(),
            base: parse_base(base_url)?,
            requested_with: REQUESTED_WITH.to_string(),
            session_cookie: None,
        })
    }

    /// Client configured from the `[backend]` config section.
    pub fn from_config(config: &BackendConfig) -> Result<Self, SyncError> {
        let mut builder = Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder.build()?;
        let session_cookie = Some(config.session_cookie.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        Ok(Self {
            client,
            base: parse_base(&config.base_url)?,
            requested_with: config.requested_with.clone(),
            session_cookie,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, SyncError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|_| SyncError::InvalidUrl(format!("{}{}", self.base, path)))
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, SyncError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "POST");
        let mut request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header("X-Requested-With", &self.requested_with)
            .json(body);
        if let Some(cookie) = &self.session_cookie {
            request = request.header(COOKIE, cookie);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|source| {
            tracing::warn!(status, body = %truncate(&text, 200), "undecodable backend response");
            SyncError::Decode { status, source }
        })
    }
}

impl TaskBackend for HttpTaskBackend {
    async fn add_task(&self, request: &AddTaskRequest) -> Result<AddTaskResponse, SyncError> {
        self.post(ADD_TASK_PATH, request).await
    }

    async fn toggle_task(&self, id: TaskId) -> Result<ToggleTaskResponse, SyncError> {
        self.post(&toggle_task_path(id), &json!({})).await
    }

    async fn delete_task(&self, id: TaskId) -> Result<DeleteTaskResponse, SyncError> {
        self.post(&delete_task_path(id), &json!({})).await
    }
}

/// Parse a base URL so that endpoint paths join beneath it.
fn parse_base(base_url: &str) -> Result<Url, SyncError> {
    let trimmed = base_url.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    let url = Url::parse(&with_slash).map_err(|_| SyncError::InvalidUrl(base_url.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(SyncError::InvalidUrl(base_url.to_string()));
    }
    Ok(url)
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    #[test]
    fn endpoints_join_under_base_path() {
        let backend = HttpTaskBackend::new("http://localhost:5000/app").unwrap();
        assert_eq!(
            backend.endpoint("/toggle_task/3").unwrap().as_str(),
            "http://localhost:5000/app/toggle_task/3"
        );
        let root = HttpTaskBackend::new("http://localhost:5000").unwrap();
        assert_eq!(root.endpoint(ADD_TASK_PATH).unwrap().as_str(), "http://localhost:5000/add_task");
    }

    #[test]
    fn rejects_unusable_base_url() {
        assert!(matches!(HttpTaskBackend::new("not a url"), Err(SyncError::InvalidUrl(_))));
        assert!(matches!(HttpTaskBackend::new("mailto:me@example.com"), Err(SyncError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn add_task_posts_description_and_estimate() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/add_task")
            .match_header("x-requested-with", "XMLHttpRequest")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"description": "Write report", "estimated": 1})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 5, "description": "Write report", "assigned_by_admin": false}"#)
            .create_async()
            .await;

        let backend = HttpTaskBackend::new(&server.url()).unwrap();
        let resp = backend
            .add_task(&AddTaskRequest {
                description: "Write report".into(),
                estimated: 1,
            })
            .await
            .unwrap();

        assert_eq!(resp.id, Some(TaskId(5)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn toggle_posts_empty_object() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/toggle_task/42")
            .match_header("x-requested-with", "XMLHttpRequest")
            .match_body(Matcher::Json(json!({})))
            .with_body(r#"{"success": true, "completed": true, "id": 42}"#)
            .create_async()
            .await;

        let backend = HttpTaskBackend::new(&server.url()).unwrap();
        let resp = backend.toggle_task(TaskId(42)).await.unwrap();

        assert!(resp.success);
        assert!(resp.completed);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_status_body_is_still_decoded() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/delete_task/7")
            .with_status(403)
            .with_body(r#"{"error": "Unauthorized"}"#)
            .create_async()
            .await;

        let backend = HttpTaskBackend::new(&server.url()).unwrap();
        let resp = backend.delete_task(TaskId(7)).await.unwrap();

        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("Unauthorized"));
    }

    #[tokio::test]
    async fn html_response_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/delete_task/7")
            .with_status(404)
            .with_body("<!doctype html><title>404 Not Found</title>")
            .create_async()
            .await;

        let backend = HttpTaskBackend::new(&server.url()).unwrap();
        let err = backend.delete_task(TaskId(7)).await.unwrap_err();

        assert!(matches!(err, SyncError::Decode { status: 404, .. }));
    }

    #[tokio::test]
    async fn configured_cookie_is_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/toggle_task/1")
            .match_header("cookie", "session=abc")
            .match_header("x-requested-with", "fetch")
            .with_body(r#"{"success": true, "completed": false}"#)
            .create_async()
            .await;

        let config = BackendConfig {
            base_url: server.url(),
            requested_with: "fetch".into(),
            timeout_secs: 5,
            session_cookie: "session=abc".into(),
        };
        let backend = HttpTaskBackend::from_config(&config).unwrap();
        backend.toggle_task(TaskId(1)).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unreachable_server_is_network_error() {
        // Port 9 (discard) on localhost is assumed closed.
        let backend = HttpTaskBackend::new("http://127.0.0.1:9").unwrap();
        let err = backend.toggle_task(TaskId(1)).await.unwrap_err();
        assert!(matches!(err, SyncError::Network(_)));
    }
}
