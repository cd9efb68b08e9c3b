mod common;

use std::io::Write;

use common::RecordingTransport;
use kakao_api::{CoordSystem, KakaoError, ResponseFormat, MAX_VIDEO_BYTES};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;

const JOB: &str = r#"{"job_id":"7f8c1c2e"}"#;
const THUMB: &str = r#"{"rid":"r-1","result":{"width":640,"height":480,"thumbnail":{"x":10,"y":20,"width":320,"height":180}}}"#;
const DISTRICTS: &str = r#"{"meta":{"total_count":1},"documents":[{"region_type":"H","address_name":"서울특별시 중구 명동","region_1depth_name":"서울특별시","region_2depth_name":"중구","region_3depth_name":"명동","region_4depth_name":"","code":"1114055000","x":126.98,"y":37.56}]}"#;

fn video_file(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut tmp = tempfile::Builder::new().suffix(".mp4").tempfile().unwrap();
    tmp.write_all(bytes).unwrap();
    tmp
}

#[test]
fn every_coord_system_is_accepted() {
    let transport = RecordingTransport::replying(200, DISTRICTS);
    let client = transport.client();

    for name in ["WGS84", "WCONGNAMUL", "CONGNAMUL", "WTM", "TM"] {
        let coord: CoordSystem = name.parse().unwrap();
        let builder = client.coord_to_district(1.0, 2.0).input(coord).output(coord);
        assert_eq!(builder.input_coord().as_str(), name);
        assert_eq!(builder.output_coord().as_str(), name);
    }
}

#[test]
fn rejected_coord_system_leaves_builder_unchanged() {
    let transport = RecordingTransport::replying(200, DISTRICTS);
    let client = transport.client();
    let builder = client.coord_to_district(1.0, 2.0).input(CoordSystem::Wtm);

    let err = "EPSG:4326".parse::<CoordSystem>().unwrap_err();
    assert!(matches!(err, KakaoError::InvalidArgument { .. }));
    assert_eq!(builder.input_coord(), CoordSystem::Wtm);

    let err = "yaml".parse::<ResponseFormat>().unwrap_err();
    assert!(matches!(err, KakaoError::InvalidArgument { .. }));
    assert_eq!(builder.format(), ResponseFormat::Json);
}

#[test]
fn coord_query_carries_options() {
    let transport = RecordingTransport::replying(200, DISTRICTS);
    let client = transport.client();

    let result = client
        .coord_to_district(127.1, 37.4)
        .input(CoordSystem::Wcongnamul)
        .output(CoordSystem::Tm)
        .collect()
        .unwrap();

    assert_eq!(result.meta.total_count, 1);
    assert_eq!(result.documents[0].region_3depth_name, "명동");

    let seen = transport.last();
    assert_eq!(seen.method, Method::GET);
    assert!(seen.url.path().ends_with("/geo/coord2regioncode.json"));
    assert_eq!(seen.query("x").as_deref(), Some("127.1"));
    assert_eq!(seen.query("y").as_deref(), Some("37.4"));
    assert_eq!(seen.query("input_coord").as_deref(), Some("WCONGNAMUL"));
    assert_eq!(seen.query("output_coord").as_deref(), Some("TM"));
    assert_eq!(seen.headers[AUTHORIZATION], "KakaoAK test-key");
}

#[test]
fn authorize_with_overrides_client_key() {
    let transport = RecordingTransport::replying(200, DISTRICTS);
    let client = transport.client();

    client
        .coord_to_district(127.1, 37.4)
        .authorize_with("  other-key \n")
        .collect()
        .unwrap();

    assert_eq!(transport.last().headers[AUTHORIZATION], "KakaoAK other-key");
}

#[test]
fn oversized_video_fails_before_any_request() {
    let transport = RecordingTransport::replying(200, JOB);
    let client = transport.client();

    let tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.as_file().set_len(MAX_VIDEO_BYTES + 1).unwrap();

    let err = client.analyze_video().with_file(tmp.path()).unwrap_err();

    match err {
        KakaoError::PayloadTooLarge { size, limit } => {
            assert_eq!(size, MAX_VIDEO_BYTES + 1);
            assert_eq!(limit, MAX_VIDEO_BYTES);
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(transport.calls(), 0);
}

#[test]
fn video_at_limit_is_accepted() {
    let transport = RecordingTransport::replying(200, JOB);
    let client = transport.client();

    let tmp = tempfile::NamedTempFile::new().unwrap();
    tmp.as_file().set_len(MAX_VIDEO_BYTES).unwrap();

    assert!(client.analyze_video().with_file(tmp.path()).is_ok());
    assert_eq!(transport.calls(), 0);
}

#[test]
fn missing_video_file_is_io_error() {
    let transport = RecordingTransport::replying(200, JOB);
    let client = transport.client();

    let err = client
        .analyze_video()
        .with_file("/no/such/video.mp4")
        .unwrap_err();
    assert!(matches!(err, KakaoError::Io(_)));
}

#[test]
fn video_upload_streams_file_part() {
    let transport = RecordingTransport::replying(200, JOB);
    let client = transport.client();
    let tmp = video_file(b"not really an mp4");

    let result = client
        .analyze_video()
        .with_file(tmp.path())
        .unwrap()
        .smoothing(false)
        .callback_url("https://example.com/done")
        .collect()
        .unwrap();

    assert_eq!(result.job_id, "7f8c1c2e");

    let seen = transport.last();
    assert_eq!(seen.method, Method::POST);
    assert!(seen.url.path().ends_with("/job"));
    assert_eq!(seen.query("smoothing").as_deref(), Some("false"));
    assert_eq!(seen.query("callback_url").as_deref(), Some("https://example.com/done"));
    assert_eq!(seen.query("video_url"), None);
    assert!(seen.headers.get(CONTENT_TYPE).is_none());

    let (field, name, bytes) = seen.upload.unwrap();
    assert_eq!(field, "file");
    assert!(name.ends_with(".mp4"));
    assert_eq!(bytes, b"not really an mp4");
}

#[test]
fn video_url_goes_in_query() {
    let transport = RecordingTransport::replying(200, JOB);
    let client = transport.client();

    client
        .analyze_video()
        .with_url("https://example.com/v.mp4?sig=a&b=c")
        .unwrap()
        .collect()
        .unwrap();

    let seen = transport.last();
    assert_eq!(
        seen.query("video_url").as_deref(),
        Some("https://example.com/v.mp4?sig=a&b=c")
    );
    assert_eq!(seen.query("smoothing").as_deref(), Some("true"));
    assert_eq!(seen.query("callback_url"), None);
    assert_eq!(
        seen.headers[CONTENT_TYPE],
        "application/x-www-form-urlencoded"
    );
    assert!(seen.upload.is_none());
}

#[test]
fn url_replaces_file() {
    let transport = RecordingTransport::replying(200, JOB);
    let client = transport.client();
    let tmp = video_file(b"frames");

    client
        .analyze_video()
        .with_file(tmp.path())
        .unwrap()
        .with_url("https://example.com/v.mp4")
        .unwrap()
        .collect()
        .unwrap();

    let seen = transport.last();
    assert!(seen.upload.is_none());
    assert!(seen.query("video_url").is_some());
}

#[test]
fn bad_video_url_is_invalid_argument() {
    let transport = RecordingTransport::replying(200, JOB);
    let client = transport.client();

    let err = client.analyze_video().with_url("not a url").unwrap_err();
    assert!(matches!(err, KakaoError::InvalidArgument { .. }));
}

#[test]
fn video_without_source_is_build_error() {
    let transport = RecordingTransport::replying(200, JOB);
    let client = transport.client();

    let err = client.analyze_video().collect().unwrap_err();
    assert!(matches!(err, KakaoError::RequestBuild(_)));
    assert_eq!(transport.calls(), 0);
}

#[test]
fn thumbnail_from_url() {
    let transport = RecordingTransport::replying(200, THUMB);
    let client = transport.client();

    let result = client
        .thumbnail_detect("https://example.com/a.jpg")
        .unwrap()
        .width(16)
        .height(9)
        .collect()
        .unwrap();

    assert_eq!(result.rid, "r-1");
    assert_eq!(result.result.thumbnail.width, 320);

    let seen = transport.last();
    assert!(seen.url.path().ends_with("/thumbnail/detect"));
    assert_eq!(seen.query("image_url").as_deref(), Some("https://example.com/a.jpg"));
    assert_eq!(seen.query("width").as_deref(), Some("16"));
    assert_eq!(seen.query("height").as_deref(), Some("9"));
    assert!(seen.upload.is_none());
}

#[test]
fn thumbnail_from_file_uses_image_field() {
    let transport = RecordingTransport::replying(200, THUMB);
    let client = transport.client();
    let mut tmp = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
    tmp.write_all(b"\xff\xd8\xff").unwrap();

    client
        .thumbnail_detect(tmp.path().to_str().unwrap())
        .unwrap()
        .collect()
        .unwrap();

    let seen = transport.last();
    assert_eq!(seen.query("image_url"), None);
    assert_eq!(seen.query("width"), None);
    let (field, _, bytes) = seen.upload.unwrap();
    assert_eq!(field, "image");
    assert_eq!(bytes, b"\xff\xd8\xff");
}

#[test]
fn thumbnail_missing_file_is_io_error() {
    let transport = RecordingTransport::replying(200, THUMB);
    let client = transport.client();

    let err = client.thumbnail_detect("./missing.jpg").unwrap_err();
    assert!(matches!(err, KakaoError::Io(_)));
}

#[test]
fn transport_failure_is_reported_once() {
    let transport = RecordingTransport::refusing();
    let client = transport.client();

    let err = client.coord_to_district(127.1, 37.4).collect().unwrap_err();

    assert!(matches!(err, KakaoError::Transport { timed_out: false, .. }));
    assert_eq!(transport.calls(), 1);
}

#[test]
fn error_status_is_typed() {
    let transport = RecordingTransport::replying(
        403,
        r#"{"errorType":"NotAuthorizedError","message":"App(test) disabled OPEN_MAP_AND_LOCAL service."}"#,
    );
    let client = transport.client();

    let err = client.coord_to_district(127.1, 37.4).collect().unwrap_err();
    match err {
        KakaoError::PermissionDenied { message } => assert!(message.contains("disabled")),
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn malformed_body_is_decode_error() {
    let transport = RecordingTransport::replying(200, r#"{"meta":"nope"}"#);
    let client = transport.client();

    let err = client.coord_to_district(127.1, 37.4).collect().unwrap_err();
    assert!(matches!(
        err,
        KakaoError::Decode {
            format: ResponseFormat::Json,
            ..
        }
    ));
}
