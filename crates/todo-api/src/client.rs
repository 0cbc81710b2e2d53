//! HTTP client wrapper for the todo API.

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::{ApiError, Error, Result};
use crate::models::{Todo, TodoId};

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Collection endpoint for todos.
const TODOS_ENDPOINT: &str = "/todos";

/// Client for interacting with the todo API.
///
/// Cloning is cheap: clones share the same connection pool.
#[derive(Clone)]
pub struct TodoClient {
    http_client: reqwest::Client,
    base_url: String,
}

/// Builder for [`TodoClient`].
#[derive(Debug, Default)]
pub struct TodoClientBuilder {
    base_url: Option<String>,
    http_client: Option<reqwest::Client>,
}

impl TodoClientBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the base URL (default: [`DEFAULT_BASE_URL`]).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Uses a preconfigured `reqwest::Client`, e.g. one with custom TLS roots.
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the base URL is not an absolute URL.
    pub fn build(self) -> Result<TodoClient> {
        let raw = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let parsed = reqwest::Url::parse(&raw).map_err(|e| Error::InvalidUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(Error::InvalidUrl {
                url: raw,
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        Ok(TodoClient {
            http_client: self.http_client.unwrap_or_default(),
            base_url: raw.trim_end_matches('/').to_string(),
        })
    }
}

impl TodoClient {
    /// Creates a client pointed at [`DEFAULT_BASE_URL`].
    pub fn new() -> Result<Self> {
        TodoClientBuilder::new().build()
    }

    /// Creates a client pointed at a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        TodoClientBuilder::new().base_url(base_url).build()
    }

    /// Returns a builder for configuring a client.
    pub fn builder() -> TodoClientBuilder {
        TodoClientBuilder::new()
    }

    /// Returns the base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns a reference to the underlying HTTP client.
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    /// Lists all todos in the order the server returns them.
    pub async fn list_todos(&self) -> Result<Vec<Todo>> {
        self.get(TODOS_ENDPOINT).await
    }

    /// Creates a todo and returns the server's record (with its assigned id).
    pub async fn create_todo<B: Serialize + ?Sized>(&self, todo: &B) -> Result<Todo> {
        self.post(TODOS_ENDPOINT, todo).await
    }

    /// Replaces or patches the todo with the given id; returns the server's record.
    pub async fn update_todo<B: Serialize + ?Sized>(
        &self,
        id: impl Into<TodoId>,
        todo: &B,
    ) -> Result<Todo> {
        let endpoint = todo_endpoint(&id.into());
        self.put(&endpoint, todo).await
    }

    /// Deletes the todo with the given id. Any response body is ignored.
    pub async fn delete_todo(&self, id: impl Into<TodoId>) -> Result<()> {
        let endpoint = todo_endpoint(&id.into());
        self.delete(&endpoint).await
    }

    /// Performs a GET request to the given endpoint.
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path (e.g., "/todos")
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.url(endpoint);
        debug!(method = "GET", %url, "sending request");

        let response = self.http_client.get(&url).send().await?;
        handle_response(response).await
    }

    /// Performs a POST request to the given endpoint with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(endpoint);
        debug!(method = "POST", %url, "sending request");

        let response = self.http_client.post(&url).json(body).send().await?;
        handle_response(response).await
    }

    /// Performs a PUT request to the given endpoint with a JSON body.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(endpoint);
        debug!(method = "PUT", %url, "sending request");

        let response = self.http_client.put(&url).json(body).send().await?;
        handle_response(response).await
    }

    /// Performs a DELETE request to the given endpoint.
    pub async fn delete(&self, endpoint: &str) -> Result<()> {
        let url = self.url(endpoint);
        debug!(method = "DELETE", %url, "sending request");

        let response = self.http_client.delete(&url).send().await?;
        handle_empty_response(response).await
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

impl fmt::Debug for TodoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TodoClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

fn todo_endpoint(id: &TodoId) -> String {
    format!("{}/{}", TODOS_ENDPOINT, id)
}

/// Decodes a success response or converts the status into an error.
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    debug!(status = status.as_u16(), "received response");

    if status.is_success() {
        // Read as bytes first so a malformed body surfaces as Error::Json.
        // An empty success body (204, bare 201) decodes as JSON null.
        let bytes = response.bytes().await?;
        let body: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };
        return Ok(serde_json::from_slice(body)?);
    }

    Err(parse_error_response(response).await)
}

/// Accepts any success response, discarding the body.
async fn handle_empty_response(response: reqwest::Response) -> Result<()> {
    let status = response.status();
    debug!(status = status.as_u16(), "received response");

    if status.is_success() {
        return Ok(());
    }

    Err(parse_error_response(response).await)
}

async fn parse_error_response(response: reqwest::Response) -> Error {
    let status = response.status();
    let message = response.text().await.unwrap_or_default();

    Error::Api(ApiError::Http {
        status: status.as_u16(),
        message: if message.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        } else {
            message
        },
    })
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
