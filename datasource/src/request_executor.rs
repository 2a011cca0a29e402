use crate::errors::TransportError;
use crate::model::{SeriesReply, SeriesResult};
use async_trait::async_trait;
use log::debug;

/// A single query against the `/series` endpoint of one datasource.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRequest {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub query: String,
}

impl SeriesRequest {
    /// Query string parameters, credentials omitted when not configured.
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![];
        if let Some(username) = &self.username {
            params.push(("u", username.as_str()));
        }
        if let Some(password) = &self.password {
            params.push(("p", password.as_str()));
        }
        params.push(("q", self.query.as_str()));
        params
    }
}

#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn execute(&self, request: &SeriesRequest) -> Result<Vec<SeriesResult>, TransportError>;
}

pub struct HttpRequestExecutor {
    client: reqwest::Client,
}

impl HttpRequestExecutor {
    pub fn new() -> HttpRequestExecutor {
        HttpRequestExecutor::with_client(reqwest::Client::new())
    }

    pub fn with_client(client: reqwest::Client) -> HttpRequestExecutor {
        HttpRequestExecutor { client }
    }
}

impl Default for HttpRequestExecutor {
    fn default() -> Self {
        HttpRequestExecutor::new()
    }
}

#[async_trait]
impl RequestExecutor for HttpRequestExecutor {
    async fn execute(&self, request: &SeriesRequest) -> Result<Vec<SeriesResult>, TransportError> {
        debug!("Sending query to {}: {}", request.url, request.query);
        let response = self
            .client
            .get(&request.url)
            .query(&request.params())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(TransportError::BadStatusCode(response.status()));
        }
        let text = response.text().await?;
        let reply: SeriesReply = serde_json::from_str(&text)?;
        Ok(reply.into_series())
    }
}
