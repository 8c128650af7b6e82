use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Faults surfaced by the HTTP layer of the synchronizer. All are terminal
/// for the triggering action; there is no retry.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}")]
    Status { status: u16 },

    #[error("unexpected response shape: {0}")]
    Envelope(String),
}

/// The application endpoints the synchronizer consumes. A trait so the
/// dispatcher can be driven by a stub in tests.
#[async_trait]
pub trait ApplicationApi: Send + Sync + 'static {
    async fn fetch_applications(&self) -> Result<Vec<Value>, ClientError>;
    async fn fetch_application(&self, id: i32) -> Result<Value, ClientError>;
    async fn post_application(&self, payload: Value) -> Result<(), ClientError>;
    async fn update_application(&self, id: i32, payload: Value) -> Result<(), ClientError>;
    async fn delete_application(&self, id: i32) -> Result<(), ClientError>;
}

/// Real HTTP client carrying the bearer token issued by /auth/login.
pub struct HttpApi {
    base_url: String,
    token: String,
    http: reqwest::Client,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(ClientError::Status {
                status: status.as_u16(),
            })
        }
    }

    /// Unwrap the `{"success": true, "data": ...}` envelope
    async fn data(response: reqwest::Response) -> Result<Value, ClientError> {
        let body: Value = Self::check(response).await?.json().await?;
        body.get("data")
            .cloned()
            .ok_or_else(|| ClientError::Envelope("missing data field".to_string()))
    }
}

#[async_trait]
impl ApplicationApi for HttpApi {
    async fn fetch_applications(&self) -> Result<Vec<Value>, ClientError> {
        let response = self
            .http
            .get(self.url("/api/application/status"))
            .bearer_auth(&self.token)
            .send()
            .await?;

        match Self::data(response).await? {
            Value::Array(records) => Ok(records),
            other => Err(ClientError::Envelope(format!(
                "expected array, got {}",
                other
            ))),
        }
    }

    async fn fetch_application(&self, id: i32) -> Result<Value, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/api/application/{}", id)))
            .bearer_auth(&self.token)
            .send()
            .await?;

        Self::data(response).await
    }

    async fn post_application(&self, payload: Value) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url("/api/application/add"))
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await?;

        Self::check(response).await.map(|_| ())
    }

    async fn update_application(&self, id: i32, payload: Value) -> Result<(), ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/api/application/edit/{}", id)))
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await?;

        Self::check(response).await.map(|_| ())
    }

    async fn delete_application(&self, id: i32) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/api/application/delete/{}", id)))
            .bearer_auth(&self.token)
            .send()
            .await?;

        Self::check(response).await.map(|_| ())
    }
}
