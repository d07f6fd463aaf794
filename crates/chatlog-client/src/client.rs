//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::agents::AgentsApi;
use crate::error::{Error, Result};
use crate::sessions::SessionsApi;

/// Default timeout for requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// GenAI management API client.
///
/// Every request is scoped to one project and authenticated with HTTP basic auth.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: Client,
    origin: Url,
    project_id: String,
    user_id: String,
    password: String,
}

impl ApiClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn origin(&self) -> &Url {
        &self.inner.origin
    }

    pub fn project_id(&self) -> &str {
        &self.inner.project_id
    }

    /// Access the agents API.
    pub fn agents(&self) -> AgentsApi {
        AgentsApi::new(self.clone())
    }

    /// Access the sessions API.
    pub fn sessions(&self) -> SessionsApi {
        SessionsApi::new(self.clone())
    }

    // Internal HTTP methods

    /// Build `{origin}/api/genai/v1/projects/{project}/{segments..}`.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.inner.origin.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("origin cannot be a base URL: {}", self.inner.origin)))?
            .pop_if_empty()
            .extend(["api", "genai", "v1", "projects", self.inner.project_id.as_str()])
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.inner.user_id, Some(&self.inner.password))
    }

    pub(crate) fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.url(segments)?;
        tracing::debug!(%url, "GET");
        let response = self.authorized(self.inner.http.get(url)).send()?;
        Self::handle_response(response)
    }

    pub(crate) fn post<T, B>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(segments)?;
        tracing::debug!(%url, "POST");
        let response = self
            .authorized(self.inner.http.post(url))
            .json(body)
            .send()?;
        Self::handle_response(response)
    }

    /// POST without a request body.
    pub(crate) fn post_empty<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.url(segments)?;
        tracing::debug!(%url, "POST");
        let response = self.authorized(self.inner.http.post(url)).send()?;
        Self::handle_response(response)
    }

    /// DELETE; any success body is discarded.
    pub(crate) fn delete(&self, segments: &[&str]) -> Result<()> {
        let url = self.url(segments)?;
        tracing::debug!(%url, "DELETE");
        let response = self.authorized(self.inner.http.delete(url)).send()?;
        Self::check_status(response).map(|_| ())
    }

    fn check_status(response: Response) -> Result<(Url, String)> {
        let status = response.status();
        let url = response.url().clone();
        let body = response.text()?;

        if !status.is_success() {
            tracing::error!(%url, status = status.as_u16(), "API request failed");
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok((url, body))
    }

    fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
        let (url, body) = Self::check_status(response)?;
        serde_json::from_str(&body).map_err(|source| {
            tracing::error!(%url, error = %source, "Response body is not parseable");
            Error::Json {
                url: url.to_string(),
                source,
            }
        })
    }
}

/// Builder for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    origin: Option<String>,
    project_id: Option<String>,
    user_id: String,
    password: String,
    timeout: Duration,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            origin: None,
            project_id: None,
            user_id: String::new(),
            password: String::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn credentials(mut self, user_id: impl Into<String>, password: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self.password = password.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let origin = self
            .origin
            .ok_or_else(|| Error::Config("origin is required".to_string()))?;
        let origin = Url::parse(&origin)?;
        if origin.cannot_be_a_base() {
            return Err(Error::Config(format!("origin cannot be a base URL: {}", origin)));
        }

        let project_id = self
            .project_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::Config("project id is required".to_string()))?;

        let http = Client::builder().timeout(self.timeout).build()?;

        Ok(ApiClient {
            inner: Arc::new(ClientInner {
                http,
                origin,
                project_id,
                user_id: self.user_id,
                password: self.password,
            }),
        })
    }
}
