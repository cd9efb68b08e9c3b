use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use reqwest::Url;

use crate::errors::Result;

/// Where an image or video comes from: a URL the server fetches itself, or a
/// local file uploaded as multipart form data.
#[derive(Debug)]
pub enum Source {
    Url(Url),
    File(LocalFile),
}

impl Source {
    /// Classify `source` as a remote URL or a local path.
    ///
    /// Only absolute `http`/`https` URLs with a host count as remote; anything
    /// else is opened for reading as a file. A path that cannot be opened is
    /// an [`Io`](crate::KakaoError::Io) error.
    pub fn classify(source: &str) -> Result<Self> {
        if let Ok(url) = Url::parse(source) {
            if matches!(url.scheme(), "http" | "https") && url.has_host() {
                return Ok(Source::Url(url));
            }
        }
        Ok(Source::File(LocalFile::open(source)?))
    }

    pub fn url(&self) -> Option<&Url> {
        match self {
            Source::Url(url) => Some(url),
            Source::File(_) => None,
        }
    }

    pub fn file(&self) -> Option<&LocalFile> {
        match self {
            Source::Url(_) => None,
            Source::File(file) => Some(file),
        }
    }
}

/// A local file opened for upload. The descriptor is closed when this value
/// (or the request that took ownership of it) is dropped.
#[derive(Debug)]
pub struct LocalFile {
    file: File,
    name: String,
    size: u64,
}

impl LocalFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let size = file.metadata()?.len();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        Ok(Self { file, name, size })
    }

    /// Base name sent as the multipart `filename`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes at open time.
    pub fn len(&self) -> u64 {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

impl Read for LocalFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Seek for LocalFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.file.seek(pos)
    }
}
