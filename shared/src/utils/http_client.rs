use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpClientError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Service tidak tersedia: {0}")]
    ServiceUnavailable(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Response parsing error: {0}")]
    ParseError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },
}

impl From<reqwest::Error> for HttpClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            HttpClientError::Timeout
        } else if err.is_connect() {
            HttpClientError::ServiceUnavailable(err.to_string())
        } else {
            HttpClientError::RequestFailed(err.to_string())
        }
    }
}

/// REST client untuk realtime database (format `{base}/{path}.json`).
///
/// Semua response adalah JSON; path yang belum ada dikembalikan sebagai
/// `null` oleh server.
#[derive(Debug, Clone)]
pub struct RealtimeDbClient {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl RealtimeDbClient {
    // Buat client dengan timeout per request
    pub fn new(
        base_url: &str,
        auth_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, HttpClientError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(HttpClientError::ServiceUnavailable(
                "Realtime database URL kosong".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpClientError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            auth_token: auth_token.filter(|t| !t.is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // URL lengkap untuk sebuah path, root database = ""
    pub fn url_for(&self, path: &str) -> String {
        let path = path.trim_matches('/');
        if path.is_empty() {
            format!("{}/.json", self.base_url)
        } else {
            format!("{}/{}.json", self.base_url, path)
        }
    }

    // GET snapshot dari path
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, HttpClientError> {
        let request = self.client.get(self.url_for(path)).query(query);
        self.send(request).await
    }

    // PUT (overwrite) value di path
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, HttpClientError> {
        let request = self.client.put(self.url_for(path)).json(body);
        self.send(request).await
    }

    // POST (push) child baru di bawah path, server generate key
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, HttpClientError> {
        let request = self.client.post(self.url_for(path)).json(body);
        self.send(request).await
    }

    // Tambah auth token, kirim request, dan parse JSON
    async fn send(&self, mut request: RequestBuilder) -> Result<Value, HttpClientError> {
        if let Some(token) = &self.auth_token {
            request = request.query(&[("auth", token.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();

        match status {
            StatusCode::OK | StatusCode::CREATED => response
                .json::<Value>()
                .await
                .map_err(|e| HttpClientError::ParseError(e.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(HttpClientError::Unauthorized(format!("Status: {}", status)))
            }
            _ => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(HttpClientError::Status {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}
