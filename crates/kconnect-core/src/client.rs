//! Kafka Connect REST client
//!
//! Every method issues exactly one request and hands back the raw
//! [`ApiResponse`]. Non-2xx statuses are returned as data; only transport
//! failures become errors.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use url::Url;

use crate::connectors::NewConnector;
use crate::error::{Error, Result};
use crate::status::StatusClass;

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for establishing the TCP connection.
///
/// Expiry is reported by reqwest as a connect error, so a silent cluster
/// surfaces as [`Error::Unreachable`] rather than a request timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Raw status code and body of a REST call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text (may be empty)
    pub body: String,
}

impl ApiResponse {
    /// Classification of the status code
    pub fn class(&self) -> StatusClass {
        StatusClass::from_code(self.status)
    }

    /// Status is 2xx
    pub fn is_success(&self) -> bool {
        self.class() == StatusClass::Success
    }

    /// Decode the body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Kafka Connect REST client bound to one base URL.
///
/// The underlying connection pool is reused for every call made through this
/// client and released when the last clone is dropped.
#[derive(Clone)]
pub struct ConnectClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    connect_timeout: Duration,
}

impl ConnectClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Time allowed for establishing a connection.
    pub fn connect_timeout(&self) -> Duration {
        self.inner.connect_timeout
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Endpoints
    // ─────────────────────────────────────────────────────────────────────────

    /// `GET /connectors`
    pub async fn list_connectors(&self) -> Result<ApiResponse> {
        self.send(Method::GET, &["connectors"], None).await
    }

    /// `GET /connectors/{name}`
    pub async fn get(&self, name: &str) -> Result<ApiResponse> {
        self.send(Method::GET, &["connectors", name], None).await
    }

    /// `GET /connectors/{name}/status`
    pub async fn get_status(&self, name: &str) -> Result<ApiResponse> {
        self.send(Method::GET, &["connectors", name, "status"], None)
            .await
    }

    /// `GET /connectors/{name}/config`
    pub async fn get_config(&self, name: &str) -> Result<ApiResponse> {
        self.send(Method::GET, &["connectors", name, "config"], None)
            .await
    }

    /// `POST /connectors` with a raw JSON body, sent as-is
    pub async fn create(&self, body: impl Into<Vec<u8>>) -> Result<ApiResponse> {
        self.send(Method::POST, &["connectors"], Some(body.into()))
            .await
    }

    /// `POST /connectors` with a `{name, config}` document
    pub async fn create_connector(&self, connector: &NewConnector) -> Result<ApiResponse> {
        self.create(serde_json::to_vec(connector)?).await
    }

    /// `DELETE /connectors/{name}`
    pub async fn delete(&self, name: &str) -> Result<ApiResponse> {
        self.send(Method::DELETE, &["connectors", name], None).await
    }

    /// `PUT /connectors/{name}/pause`
    pub async fn pause(&self, name: &str) -> Result<ApiResponse> {
        self.send(Method::PUT, &["connectors", name, "pause"], None)
            .await
    }

    /// `PUT /connectors/{name}/resume`
    pub async fn resume(&self, name: &str) -> Result<ApiResponse> {
        self.send(Method::PUT, &["connectors", name, "resume"], None)
            .await
    }

    /// `POST /connectors/{name}/restart`
    pub async fn restart(&self, name: &str) -> Result<ApiResponse> {
        self.send(Method::POST, &["connectors", name, "restart"], None)
            .await
    }

    /// `POST /connectors/{name}/tasks/{task_id}/restart`
    pub async fn restart_task(&self, name: &str, task_id: u32) -> Result<ApiResponse> {
        let task_id = task_id.to_string();
        self.send(
            Method::POST,
            &["connectors", name, "tasks", &task_id, "restart"],
            None,
        )
        .await
    }

    /// `GET /connector-plugins`
    pub async fn list_plugins(&self) -> Result<ApiResponse> {
        self.send(Method::GET, &["connector-plugins"], None).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a URL from path segments; each segment is percent-encoded.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse> {
        let url = self.url(segments)?;

        let mut request = self
            .inner
            .http
            .request(method.clone(), url.clone())
            .timeout(self.inner.timeout);
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body);
        }

        let response = request.send().await.map_err(|source| {
            if source.is_connect() {
                Error::Unreachable {
                    url: url.to_string(),
                    source,
                }
            } else {
                Error::Http(source)
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(%method, %url, status, "Kafka Connect request");

        Ok(ApiResponse { status, body })
    }
}

/// Builder for creating a ConnectClient.
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    timeout: Duration,
    connect_timeout: Duration,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Set the base URL. Bare `host:port` values get an `http://` scheme.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set how long to wait for the TCP connection before giving up.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ConnectClient> {
        let base_url = self.base_url.ok_or_else(|| Error::ConfigInvalid {
            message: "base_url is required".to_string(),
        })?;

        let base_url = if base_url.contains("://") {
            Url::parse(&base_url)?
        } else {
            Url::parse(&format!("http://{}", base_url))?
        };

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        // Connect must give up before the whole request does
        let connect_timeout = self.connect_timeout.min(self.timeout);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(format!("kconnect/{}", env!("CARGO_PKG_VERSION")))
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(ConnectClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout,
                connect_timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
