//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, signing in and making
//! HTTP requests with a cookie-carrying client.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use reqwest::{multipart, Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use society_api::{create_app, create_app_state};
use society_common::AppConfig;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::Account;

/// Test server instance that manages lifecycle
///
/// Owns its data and upload directories; both vanish when the server is dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    pub dir: TempDir,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server on a fresh data directory
    pub async fn start() -> Result<Self> {
        Self::start_with(&[]).await
    }

    /// Start a test server with extra environment-style settings
    pub async fn start_with(overrides: &[(&str, &str)]) -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let config = test_config(&dir, overrides)?;

        let state = create_app_state(config).await?;
        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            dir,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A client without a session
    pub fn anonymous(&self) -> Result<ApiClient> {
        ApiClient::new(self.base_url())
    }

    /// A client signed in as `account`
    pub async fn login(&self, account: Account) -> Result<ApiClient> {
        let client = self.anonymous()?;
        let response = client.post("/api/v1/auth/login", &account.credentials()).await?;
        assert_status(response, StatusCode::OK).await?;
        Ok(client)
    }

    /// Path of a file under the data directory
    pub fn data_file(&self, name: &str) -> std::path::PathBuf {
        self.dir.path().join("data").join(name)
    }

    /// Number of files stored under the upload directory
    pub fn stored_upload_count(&self) -> usize {
        count_files(&self.dir.path().join("uploads"))
    }
}

fn count_files(dir: &std::path::Path) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .filter_map(Result::ok)
        .map(|entry| {
            let path = entry.path();
            if path.is_dir() {
                count_files(&path)
            } else {
                1
            }
        })
        .sum()
}

/// HTTP client with its own cookie jar
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { base_url, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request without a body
    pub async fn post_empty(&self, path: &str) -> Result<Response> {
        Ok(self.client.post(self.url(path)).send().await?)
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.put(self.url(path)).json(body).send().await?)
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<Response> {
        Ok(self.client.delete(self.url(path)).send().await?)
    }

    /// POST a multipart form
    pub async fn post_form(&self, path: &str, form: multipart::Form) -> Result<Response> {
        Ok(self.client.post(self.url(path)).multipart(form).send().await?)
    }
}

/// Configuration over a temp directory: rate limiting off, demo accounts
pub fn test_config(dir: &TempDir, overrides: &[(&str, &str)]) -> Result<AppConfig> {
    let data_dir = dir.path().join("data");
    let upload_dir = dir.path().join("uploads");

    let mut vars: HashMap<String, String> = HashMap::from([
        ("API_PORT".to_string(), "0".to_string()),
        ("DATA_DIR".to_string(), data_dir.display().to_string()),
        ("UPLOAD_DIR".to_string(), upload_dir.display().to_string()),
        ("RATE_LIMIT_ENABLED".to_string(), "false".to_string()),
    ]);
    for (key, value) in overrides {
        vars.insert((*key).to_string(), (*value).to_string());
    }

    AppConfig::from_lookup(|key| vars.get(key).cloned())
        .map_err(|e| anyhow::anyhow!("Config error: {}", e))
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}

/// Assert an error response and return its `error.code`
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: serde_json::Value = assert_json(response, expected_status).await?;
    body["error"]["code"]
        .as_str()
        .map(ToString::to_string)
        .ok_or_else(|| anyhow::anyhow!("Missing error code in {body}"))
}
