//! Thumbnail detection: find the representative area of an image for a
//! thumbnail of a given aspect ratio.

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Method;

use crate::client::{auth_headers, Client};
use crate::errors::Result;
use crate::format::ResponseFormat;
use crate::models::ThumbnailDetectResult;
use crate::source::Source;
use crate::transport::{Request, Upload};

/// Request builder for `POST /thumbnail/detect`, created by
/// [`Client::thumbnail_detect`].
#[derive(Debug)]
pub struct ThumbnailDetect<'a> {
    client: &'a Client,
    auth: String,
    source: Source,
    width: Option<u32>,
    height: Option<u32>,
}

impl<'a> ThumbnailDetect<'a> {
    pub(crate) fn new(client: &'a Client, source: &str) -> Result<Self> {
        Ok(Self {
            client,
            auth: client.default_auth().to_string(),
            source: Source::classify(source)?,
            width: None,
            height: None,
        })
    }

    /// Authorize this request with `key` instead of the client's key.
    pub fn authorize_with(mut self, key: &str) -> Self {
        self.auth = self.client.format_key(key);
        self
    }

    /// Width term of the thumbnail aspect ratio.
    pub fn width(mut self, ratio: u32) -> Self {
        self.width = Some(ratio);
        self
    }

    /// Height term of the thumbnail aspect ratio.
    pub fn height(mut self, ratio: u32) -> Self {
        self.height = Some(ratio);
        self
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Detect the thumbnail area. A local image is uploaded as the `image` part.
    pub fn collect(self) -> Result<ThumbnailDetectResult> {
        let Self {
            client,
            auth,
            source,
            width,
            height,
        } = self;

        let mut url = client.vision_endpoint("/thumbnail/detect")?;
        let mut headers = auth_headers(&auth)?;
        let upload = match source {
            Source::Url(image) => {
                url.query_pairs_mut().append_pair("image_url", image.as_str());
                headers.insert(
                    CONTENT_TYPE,
                    HeaderValue::from_static("application/x-www-form-urlencoded"),
                );
                None
            }
            Source::File(file) => Some(Upload {
                field: "image",
                file,
            }),
        };

        {
            let mut query = url.query_pairs_mut();
            if let Some(w) = width {
                query.append_pair("width", &w.to_string());
            }
            if let Some(h) = height {
                query.append_pair("height", &h.to_string());
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
