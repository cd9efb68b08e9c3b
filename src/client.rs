use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::auth::{format_key, DEFAULT_KEY_PREFIX};
use crate::errors::{KakaoError, Result};
use crate::format::ResponseFormat;
use crate::local::CoordToDistrict;
use crate::pose::AnalyzeVideo;
use crate::transport::{HttpTransport, Request, Transport};
use crate::vision::ThumbnailDetect;

const DEFAULT_POSE_URL: &str = "https://cv-api.kakaobrain.com/pose";
const DEFAULT_LOCAL_URL: &str = "https://dapi.kakao.com/v2/local";
const DEFAULT_VISION_URL: &str = "https://dapi.kakao.com/v2/vision";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for constructing a [`Client`] with custom configuration.
///
/// # Example
///
/// ```no_run
/// use kakao_api::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> kakao_api::Result<()> {
/// let client = ClientBuilder::new()
///     .api_key("your_rest_api_key")
///     .local_url("https://dapi.kakao.com/v2/local")
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    api_key: String,
    key_prefix: String,
    pose_url: String,
    local_url: String,
    vision_url: String,
    timeout: Option<Duration>,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Create a new builder with default settings and an empty key.
    pub fn new() -> Self {
        Self {
            api_key: String::new(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            pose_url: DEFAULT_POSE_URL.to_string(),
            local_url: DEFAULT_LOCAL_URL.to_string(),
            vision_url: DEFAULT_VISION_URL.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            transport: None,
        }
    }

    /// Set the REST API key every request is authorized with by default.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    /// Override the authorization scheme (defaults to `KakaoAK`).
    pub fn key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Point every capability at one origin. Mostly useful against a mock server.
    pub fn base_url(self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.pose_url(url.clone())
            .local_url(url.clone())
            .vision_url(url)
    }

    /// Override the pose origin (defaults to `https://cv-api.kakaobrain.com/pose`).
    pub fn pose_url(mut self, url: impl Into<String>) -> Self {
        self.pose_url = url.into();
        self
    }

    /// Override the local origin (defaults to `https://dapi.kakao.com/v2/local`).
    pub fn local_url(mut self, url: impl Into<String>) -> Self {
        self.local_url = url.into();
        self
    }

    /// Override the vision origin (defaults to `https://dapi.kakao.com/v2/vision`).
    pub fn vision_url(mut self, url: impl Into<String>) -> Self {
        self.vision_url = url.into();
        self
    }

    /// Deadline for each request (defaults to 30 seconds). `None` waits forever.
    ///
    /// Ignored when a custom [`transport`](Self::transport) is supplied.
    pub fn timeout(mut self, d: impl Into<Option<Duration>>) -> Self {
        self.timeout = d.into();
        self
    }

    /// Send requests through `transport` instead of the built-in HTTP one.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the [`Client`].
    pub fn build(self) -> Result<Client> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransport::new(self.timeout)?),
        };

        Ok(Client {
            auth: format_key(&self.key_prefix, &self.api_key),
            key_prefix: self.key_prefix,
            pose_url: self.pose_url.trim_end_matches('/').to_string(),
            local_url: self.local_url.trim_end_matches('/').to_string(),
            vision_url: self.vision_url.trim_end_matches('/').to_string(),
            transport,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The Kakao API client. Hands out one request builder per capability.
///
/// # Example
///
/// ```no_run
/// use kakao_api::{Client, CoordSystem, ResponseFormat};
///
/// # fn example() -> kakao_api::Result<()> {
/// let client = Client::new("your_rest_api_key")?;
///
/// let districts = client
///     .coord_to_district(127.1, 37.4)
///     .format_as(ResponseFormat::Xml)
///     .input(CoordSystem::Wgs84)
///     .collect()?;
/// println!("{} regions", districts.meta.total_count);
/// # Ok(())
/// # }
/// ```
pub struct Client {
    auth: String,
    key_prefix: String,
    pose_url: String,
    local_url: String,
    vision_url: String,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("pose_url", &self.pose_url)
            .field("local_url", &self.local_url)
            .field("vision_url", &self.vision_url)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new client with the given API key and default settings.
    ///
    /// For customization, use [`ClientBuilder`] instead.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new().api_key(api_key).build()
    }

    /// Submit a video for pose analysis.
    pub fn analyze_video(&self) -> AnalyzeVideo<'_> {
        AnalyzeVideo::new(self)
    }

    /// Look up the districts containing the coordinate (`x` = longitude,
    /// `y` = latitude in WGS84).
    pub fn coord_to_district(&self, x: f64, y: f64) -> CoordToDistrict<'_> {
        CoordToDistrict::new(self, x, y)
    }

    /// Detect the representative thumbnail area of an image. `source` is an
    /// `http(s)` URL or a local path.
    ///
    /// # Errors
    ///
    /// - [`KakaoError::Io`] if `source` is a path that cannot be opened.
    pub fn thumbnail_detect(&self, source: &str) -> Result<ThumbnailDetect<'_>> {
        ThumbnailDetect::new(self, source)
    }

    // -----------------------------------------------------------------------
    // Crate-internal helpers shared by the request builders
    // -----------------------------------------------------------------------

    /// `Authorization` value used until a builder calls `authorize_with`.
    pub(crate) fn default_auth(&self) -> &str {
        &self.auth
    }

    pub(crate) fn format_key(&self, key: &str) -> String {
        format_key(&self.key_prefix, key)
    }

    pub(crate) fn pose_endpoint(&self, path: &str) -> Result<Url> {
        endpoint(&self.pose_url, path)
    }

    pub(crate) fn local_endpoint(&self, path: &str) -> Result<Url> {
        endpoint(&self.local_url, path)
    }

    pub(crate) fn vision_endpoint(&self, path: &str) -> Result<Url> {
        endpoint(&self.vision_url, path)
    }

    /// Send `request` once and decode a successful body as `format`.
    ///
    /// No retries: transport failures and error statuses go straight back to
    /// the caller.
    pub(crate) fn execute<T: DeserializeOwned>(
        &self,
        request: Request,
        format: ResponseFormat,
    ) -> Result<T> {
        debug!(
            method = %request.method,
            url = %request.url,
            upload = request.upload.is_some(),
            "sending request"
        );

        let response = self.transport.send(request)?;
        let status = response.status;
        debug!(status = status.as_u16(), bytes = response.body.len(), "received response");

        if !status.is_success() {
            let err = status_error(status, &response.body);
            warn!(status = status.as_u16(), error = %err, "request rejected");
            return Err(err);
        }

        format.decode(&response.body)
    }
}

/// Build the `Authorization` header map for an already formatted key.
pub(crate) fn auth_headers(auth: &str) -> Result<HeaderMap> {
    let value = HeaderValue::from_str(auth)
        .map_err(|_| KakaoError::RequestBuild("API key contains invalid header characters".into()))?;

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

fn endpoint(base: &str, path: &str) -> Result<Url> {
    let raw = format!("{base}{path}");
    Url::parse(&raw).map_err(|e| KakaoError::RequestBuild(format!("invalid URL {raw:?}: {e}")))
}

/// Map an error status to a typed error, using the server's message when the
/// body is JSON (`message` on most APIs, `msg` on some).
fn status_error(status: StatusCode, body: &[u8]) -> KakaoError {
    let text = String::from_utf8_lossy(body).into_owned();
    let parsed_body: Option<serde_json::Value> = serde_json::from_slice(body).ok();

    let message = parsed_body
        .as_ref()
        .and_then(|b| b.get("message").or_else(|| b.get("msg")))
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .unwrap_or(text);

    match status.as_u16() {
        401 => KakaoError::Authentication { message },
        403 => KakaoError::PermissionDenied { message },
        404 => KakaoError::NotFound { message },
        429 => KakaoError::RateLimit { message },
        status_code => KakaoError::Api {
            status_code,
            message,
            body: parsed_body,
        },
    }
}
