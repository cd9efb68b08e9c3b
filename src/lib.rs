//! # Kakao API client for Rust
//!
//! Blocking client for three Kakao REST capabilities: video pose analysis,
//! coordinate to district lookup, and thumbnail detection. Each one is a
//! request builder: create it from a [`Client`], chain setters, then call
//! `collect()` to send exactly one request and decode the response.
//!
//! ## Quick start
//!
//! ```no_run
//! use kakao_api::{Client, ResponseFormat, SaveAs};
//!
//! fn main() -> kakao_api::Result<()> {
//!     let client = Client::new("your_rest_api_key")?;
//!
//!     let districts = client
//!         .coord_to_district(127.1, 37.4)
//!         .format_as(ResponseFormat::Xml)
//!         .collect()?;
//!     for region in &districts.documents {
//!         println!("[{}] {}", region.region_type, region.address_name);
//!     }
//!     districts.save_as("districts.xml")?;
//!
//!     let thumb = client
//!         .thumbnail_detect("https://example.com/cat.jpg")?
//!         .width(16)
//!         .height(9)
//!         .collect()?;
//!     println!("{thumb}");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! ```no_run
//! use kakao_api::ClientBuilder;
//! use std::time::Duration;
//!
//! # fn example() -> kakao_api::Result<()> {
//! let client = ClientBuilder::new()
//!     .api_key("your_rest_api_key")
//!     .base_url("http://localhost:8080")
//!     .timeout(Duration::from_secs(10))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod errors;
mod format;
mod local;
mod models;
mod pose;
mod source;
mod transport;
mod vision;

pub use auth::{format_key, DEFAULT_KEY_PREFIX};
pub use client::{Client, ClientBuilder};
pub use errors::{KakaoError, Result};
pub use format::{ResponseFormat, SaveAs};
pub use local::{CoordSystem, CoordToDistrict};
pub use models::{
    AnalyzeVideoResult, CoordToDistrictResult, Meta, Region, Thumbnail, ThumbnailDetectResult,
    ThumbnailResult,
};
pub use pose::{AnalyzeVideo, MAX_VIDEO_BYTES};
pub use source::{LocalFile, Source};
pub use transport::{HttpTransport, Request, Response, Transport, Upload};
pub use vision::ThumbnailDetect;
