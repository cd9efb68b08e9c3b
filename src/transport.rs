use std::time::Duration;

use reqwest::blocking::multipart::{Form, Part};
use reqwest::header::{HeaderMap, HeaderValue, CONNECTION};
use reqwest::{Method, StatusCode, Url};

use crate::errors::Result;
use crate::source::LocalFile;

/// A fully assembled API request, handed to a [`Transport`] exactly once.
#[derive(Debug)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub upload: Option<Upload>,
}

/// A file sent as a `multipart/form-data` part under `field`.
#[derive(Debug)]
pub struct Upload {
    pub field: &'static str,
    pub file: LocalFile,
}

/// Status and raw body of a completed exchange.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Sends one request and waits for the full response.
///
/// [`HttpTransport`] is the real implementation; tests swap in their own to
/// observe requests without touching the network.
pub trait Transport: Send + Sync {
    fn send(&self, request: Request) -> Result<Response>;
}

/// Blocking HTTP transport on `reqwest`. Connections are never reused.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()?;
        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: Request) -> Result<Response> {
        let Request {
            method,
            url,
            headers,
            upload,
        } = request;

        let mut req = self
            .http
            .request(method, url)
            .headers(headers)
            .header(CONNECTION, HeaderValue::from_static("close"));

        // reqwest sets the boundary-inclusive multipart content type itself.
        if let Some(Upload { field, file }) = upload {
            let name = file.name().to_string();
            let len = file.len();
            let part = Part::reader_with_length(file, len).file_name(name);
            req = req.multipart(Form::new().part(field, part));
        }

        let resp = req.send()?;
        let status = resp.status();
        let body = resp.bytes()?.to_vec();

        Ok(Response { status, body })
    }
}
