//! Quick-start examples for the Kakao API client.
//!
//! Run with:
//!   KAKAO_REST_API_KEY=... RUST_LOG=kakao_api=debug cargo run --example quickstart -- [video.mp4]

use kakao_api::{Client, CoordSystem, ResponseFormat, SaveAs};
use tracing_subscriber::EnvFilter;

fn main() -> kakao_api::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let key = std::env::var("KAKAO_REST_API_KEY").unwrap_or_default();
    let client = Client::new(key)?;

    // -----------------------------------------------------------------------
    // 1. Which districts contain Pangyo station?
    // -----------------------------------------------------------------------
    let districts = client
        .coord_to_district(127.1110, 37.3947)
        .format_as(ResponseFormat::Xml)
        .output("WCONGNAMUL".parse::<CoordSystem>()?)
        .collect()?;

    println!("{} regions:", districts.meta.total_count);
    for region in &districts.documents {
        println!("  [{}] {} ({})", region.region_type, region.address_name, region.code);
    }
    districts.save_as("districts.xml")?;
    districts.save_as("districts.json")?;

    // -----------------------------------------------------------------------
    // 2. Thumbnail area of a remote image, 16:9
    // -----------------------------------------------------------------------
    let thumb = client
        .thumbnail_detect("https://t1.daumcdn.net/alvolo/_vision/openapi/r2/images/01.jpg")?
        .width(16)
        .height(9)
        .collect()?;
    println!("{thumb}");

    // -----------------------------------------------------------------------
    // 3. Submit a local video for pose analysis
    // -----------------------------------------------------------------------
    if let Some(video) = std::env::args().nth(1) {
        let job = client
            .analyze_video()
            .with_file(&video)?
            .smoothing(true)
            .collect()?;
        println!("pose job submitted: {}", job.job_id);
        job.save_as("pose_job.json")?;
    }

    Ok(())
}
