use thiserror::Error;

use crate::format::ResponseFormat;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// All errors that can occur when using the Kakao API client.
#[derive(Error, Debug)]
pub enum KakaoError {
    /// A configuration value is outside its closed set of accepted values.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A local upload exceeds the capability's size limit.
    #[error("payload too large: {size} bytes exceeds the {limit} byte limit")]
    PayloadTooLarge { size: u64, limit: u64 },

    /// An I/O error, typically from opening a local source or writing a result file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The request could not be assembled (bad origin, bad header value, missing source).
    #[error("failed to build request: {0}")]
    RequestBuild(String),

    /// DNS, connect, TLS or timeout failure before a response was received.
    #[error("request failed: {source}")]
    Transport {
        #[source]
        source: BoxError,
        timed_out: bool,
    },

    /// The response body did not match the expected schema.
    #[error("failed to decode {format} response: {source}")]
    Decode {
        format: ResponseFormat,
        #[source]
        source: BoxError,
    },

    /// A result could not be serialized for display or persistence.
    #[error("failed to encode result as {format}: {source}")]
    Encode {
        format: ResponseFormat,
        #[source]
        source: BoxError,
    },

    /// The target file extension has no serializer for this result.
    #[error("unsupported output format: {extension:?}")]
    UnsupportedFormat { extension: String },

    /// The API key is missing or invalid (HTTP 401).
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// The key is not allowed to use the requested capability (HTTP 403).
    #[error("permission denied: {message}")]
    PermissionDenied { message: String },

    /// The endpoint or resource was not found (HTTP 404).
    #[error("not found: {message}")]
    NotFound { message: String },

    /// The quota for this key is exhausted (HTTP 429).
    #[error("rate limited: {message}")]
    RateLimit { message: String },

    /// A non-specific API error with the HTTP status code and response body.
    #[error("API error {status_code}: {message}")]
    Api {
        status_code: u16,
        message: String,
        body: Option<serde_json::Value>,
    },
}

impl KakaoError {
    /// Wrap an arbitrary transport failure, for custom [`Transport`](crate::Transport)
    /// implementations.
    pub fn transport(source: impl Into<BoxError>) -> Self {
        KakaoError::Transport {
            source: source.into(),
            timed_out: false,
        }
    }

    /// `true` for transport failures caused by the request deadline expiring.
    pub fn is_timeout(&self) -> bool {
        matches!(self, KakaoError::Transport { timed_out: true, .. })
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        KakaoError::InvalidArgument {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for KakaoError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            return KakaoError::RequestBuild(e.to_string());
        }
        KakaoError::Transport {
            timed_out: e.is_timeout(),
            source: Box::new(e),
        }
    }
}

/// A convenience alias for `Result<T, KakaoError>`.
pub type Result<T> = std::result::Result<T, KakaoError>;
