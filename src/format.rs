use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::errors::{KakaoError, Result};

/// Wire format of a response body, and serialization format of a saved result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
}

impl ResponseFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
            ResponseFormat::Xml => "xml",
        }
    }

    /// Pick a format from a file name's extension (`out.json`, `out.xml`).
    pub fn from_extension(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(ResponseFormat::Json),
            "xml" => Ok(ResponseFormat::Xml),
            _ => Err(KakaoError::UnsupportedFormat { extension: ext }),
        }
    }

    pub(crate) fn decode<T: DeserializeOwned>(self, body: &[u8]) -> Result<T> {
        let decode_err = |e: Box<dyn std::error::Error + Send + Sync>| KakaoError::Decode {
            format: self,
            source: e,
        };

        match self {
            ResponseFormat::Json => serde_json::from_slice(body).map_err(|e| decode_err(e.into())),
            ResponseFormat::Xml => {
                let text = std::str::from_utf8(body).map_err(|e| decode_err(e.into()))?;
                quick_xml::de::from_str(text).map_err(|e| decode_err(e.into()))
            }
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseFormat {
    type Err = KakaoError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(ResponseFormat::Json),
            "xml" => Ok(ResponseFormat::Xml),
            other => Err(KakaoError::invalid(format!(
                "format must be one of json, xml (got {other:?})"
            ))),
        }
    }
}

/// Rendering and persistence shared by every result type.
pub trait SaveAs: Serialize {
    /// Whether this result has an XML representation.
    const XML: bool = false;

    /// Serialize with 2-space indentation.
    fn render(&self, format: ResponseFormat) -> Result<String> {
        let encode_err = |e: Box<dyn std::error::Error + Send + Sync>| KakaoError::Encode {
            format,
            source: e,
        };

        match format {
            ResponseFormat::Json => serde_json::to_string_pretty(self).map_err(|e| encode_err(e.into())),
            ResponseFormat::Xml if Self::XML => {
                let mut buf = String::new();
                let mut ser = quick_xml::se::Serializer::new(&mut buf);
                ser.indent(' ', 2);
                Serialize::serialize(self, ser).map_err(|e| encode_err(e.into()))?;
                Ok(buf)
            }
            ResponseFormat::Xml => Err(KakaoError::UnsupportedFormat {
                extension: format.as_str().to_string(),
            }),
        }
    }

    /// Write this result to `path`, choosing the serializer from its
    /// extension. Nothing is written when the extension is unsupported.
    fn save_as(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let format = ResponseFormat::from_extension(path)?;
        let text = self.render(format)?;
        std::fs::write(path, text)?;
        debug!(path = %path.display(), %format, "saved result");
        Ok(())
    }
}

/// `Display` body for result types: pretty JSON, or nothing if it won't encode.
pub(crate) fn display_json<T: Serialize>(value: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let text = serde_json::to_string_pretty(value).map_err(|_| fmt::Error)?;
    f.write_str(&text)
}
