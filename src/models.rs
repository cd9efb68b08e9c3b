use std::fmt;

use serde::{Deserialize, Serialize};

use crate::format::{display_json, SaveAs};

/// Returned by [`AnalyzeVideo::collect`](crate::AnalyzeVideo::collect) once the
/// job is accepted. Results are delivered later, to the callback URL if set.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnalyzeVideoResult {
    pub job_id: String,
}

impl SaveAs for AnalyzeVideoResult {}

impl fmt::Display for AnalyzeVideoResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_json(self, f)
    }
}

/// One administrative (`H`) or legal (`B`) district containing the coordinate.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Region {
    /// "H" (administrative) or "B" (legal).
    pub region_type: String,
    pub address_name: String,
    pub region_1depth_name: String,
    pub region_2depth_name: String,
    pub region_3depth_name: String,
    /// Only filled for some legal districts.
    #[serde(default)]
    pub region_4depth_name: String,
    pub code: String,
    /// Center of the district, in the requested output coordinate system.
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Meta {
    pub total_count: u32,
}

/// Returned by [`CoordToDistrict::collect`](crate::CoordToDistrict::collect).
///
/// In XML the root element is `<result>` and each region is its own
/// `<documents>` element.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename = "result")]
pub struct CoordToDistrictResult {
    pub meta: Meta,
    #[serde(default)]
    pub documents: Vec<Region>,
}

impl SaveAs for CoordToDistrictResult {
    const XML: bool = true;
}

impl fmt::Display for CoordToDistrictResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_json(self, f)
    }
}

/// Top-left corner and size of the detected thumbnail area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Thumbnail {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ThumbnailResult {
    /// Original image size.
    pub width: u32,
    pub height: u32,
    pub thumbnail: Thumbnail,
}

/// Returned by [`ThumbnailDetect::collect`](crate::ThumbnailDetect::collect).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct ThumbnailDetectResult {
    /// Request id assigned by the server.
    pub rid: String,
    pub result: ThumbnailResult,
}

impl SaveAs for ThumbnailDetectResult {}

impl fmt::Display for ThumbnailDetectResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_json(self, f)
    }
}
