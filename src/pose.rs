//! Pose analysis: detect people in every frame of a video and extract their
//! key points. The call only submits the job; the analysis arrives later.

use std::path::Path;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Url};

use crate::client::{auth_headers, Client};
use crate::errors::{KakaoError, Result};
use crate::format::ResponseFormat;
use crate::models::AnalyzeVideoResult;
use crate::source::{LocalFile, Source};
use crate::transport::{Request, Upload};

/// Largest video accepted for upload (50 MiB).
pub const MAX_VIDEO_BYTES: u64 = 50 * 1024 * 1024;

/// Request builder for `POST /job`, created by [`Client::analyze_video`].
///
/// ```no_run
/// # fn example(client: &kakao_api::Client) -> kakao_api::Result<()> {
/// let job = client
///     .analyze_video()
///     .with_file("dance.mp4")?
///     .smoothing(false)
///     .callback_url("https://example.com/pose-done")
///     .collect()?;
/// println!("submitted {}", job.job_id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AnalyzeVideo<'a> {
    client: &'a Client,
    auth: String,
    source: Option<Source>,
    smoothing: bool,
    callback_url: Option<String>,
}

impl<'a> AnalyzeVideo<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self {
            client,
            auth: client.default_auth().to_string(),
            source: None,
            smoothing: true,
            callback_url: None,
        }
    }

    /// Analyze a video the server downloads from `url`. Replaces any file set
    /// with [`with_file`](Self::with_file), closing it.
    ///
    /// # Errors
    ///
    /// - [`KakaoError::InvalidArgument`] if `url` is not an absolute URL.
    pub fn with_url(mut self, url: &str) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| KakaoError::invalid(format!("invalid video URL {url:?}: {e}")))?;
        self.source = Some(Source::Url(url));
        Ok(self)
    }

    /// Upload the local video at `path`.
    ///
    /// # Errors
    ///
    /// - [`KakaoError::Io`] if the file cannot be opened.
    /// - [`KakaoError::PayloadTooLarge`] if it is larger than [`MAX_VIDEO_BYTES`].
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let file = LocalFile::open(path)?;
        if file.len() > MAX_VIDEO_BYTES {
            return Err(KakaoError::PayloadTooLarge {
                size: file.len(),
                limit: MAX_VIDEO_BYTES,
            });
        }
        self.source = Some(Source::File(file));
        Ok(self)
    }

    /// Authorize this request with `key` instead of the client's key.
    pub fn authorize_with(mut self, key: &str) -> Self {
        self.auth = self.client.format_key(key);
        self
    }

    /// Smooth key point positions between frames (on by default).
    pub fn smoothing(mut self, on: bool) -> Self {
        self.smoothing = on;
        self
    }

    /// Have the server POST to `url` once the analysis completes.
    pub fn callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    /// Submit the job and return its id.
    ///
    /// # Errors
    ///
    /// - [`KakaoError::RequestBuild`] if no video was set.
    /// - [`KakaoError::Transport`] / [`KakaoError::Decode`] or an HTTP status error.
    pub fn collect(self) -> Result<AnalyzeVideoResult> {
        let Self {
            client,
            auth,
            source,
            smoothing,
            callback_url,
        } = self;

        let source = source.ok_or_else(|| {
            KakaoError::RequestBuild("no video set: call with_url or with_file first".into())
        })?;

        let mut url = client.pose_endpoint("/job")?;
        let mut headers = auth_headers(&auth)?;
        let upload = match source {
            Source::Url(video) => {
                url.query_pairs_mut().append_pair("video_url", video.as_str());
                headers.insert(
                    CONTENT_TYPE,
                    HeaderValue::from_static("application/x-www-form-urlencoded"),
                );
                None
            }
            Source::File(file) => Some(Upload { field: "file", file }),
        };

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("smoothing", if smoothing { "true" } else { "false" });
            if let Some(callback) = &callback_url {
                query.append_pair("callback_url", callback);
            }
        }

        let request = Request {
            method: Method::POST,
            url,
            headers,
            upload,
        };
        client.execute(request, ResponseFormat::Json)
    }
}
