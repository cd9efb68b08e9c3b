#![allow(dead_code)]

use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use kakao_api::{Client, ClientBuilder, KakaoError, Request, Response, Transport};
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode, Url};

/// What a [`RecordingTransport`] saw for one request.
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// (field, filename, bytes) of the multipart upload, if any.
    pub upload: Option<(&'static str, String, Vec<u8>)>,
}

impl Seen {
    pub fn query(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}

enum Reply {
    Ok(u16, &'static str),
    Refused,
}

/// Transport that never touches the network: records each request, drains
/// any uploaded file, then answers with a canned reply.
pub struct RecordingTransport {
    calls: AtomicUsize,
    seen: Mutex<Vec<Seen>>,
    reply: Reply,
}

impl RecordingTransport {
    pub fn replying(status: u16, body: &'static str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            reply: Reply::Ok(status, body),
        })
    }

    pub fn refusing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            reply: Reply::Refused,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last(&self) -> Seen {
        self.seen.lock().unwrap().last().cloned().expect("no request recorded")
    }

    pub fn client(self: &Arc<Self>) -> Client {
        ClientBuilder::new()
            .api_key("test-key")
            .transport(self.clone())
            .build()
            .unwrap()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: Request) -> kakao_api::Result<Response> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let Request {
            method,
            url,
            headers,
            upload,
        } = request;
        let upload = upload.map(|mut u| {
            let mut bytes = Vec::new();
            u.file.read_to_end(&mut bytes).unwrap();
            (u.field, u.file.name().to_string(), bytes)
        });

        self.seen.lock().unwrap().push(Seen {
            method,
            url,
            headers,
            upload,
        });

        match self.reply {
            Reply::Ok(status, body) => Ok(Response {
                status: StatusCode::from_u16(status).unwrap(),
                body: body.as_bytes().to_vec(),
            }),
            Reply::Refused => Err(KakaoError::transport(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
        }
    }
}
