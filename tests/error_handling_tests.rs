//! Error handling tests across the provider protocol and the processor

use fist_alert::{
    provider::{
        wire::{parse_response, wait_ready, WireClient},
        ImageView,
    },
    utils::safe_cast::{i32_to_u32, u32_to_usize},
    Error, Result,
};
use std::io::Cursor;

fn response_with_points(count: usize) -> String {
    let points = vec![r#"{"x": 0.5, "y": 0.5}"#; count].join(",");
    format!(r#"{{"faces": [], "hands": [{{"handedness": "Left", "score": 0.9, "landmarks": [{points}]}}]}}"#)
}

#[test]
fn test_error_display() {
    let cases = [
        (Error::InvalidInput("bad".to_string()), "Invalid input: bad"),
        (Error::Provider("crashed".to_string()), "Landmark provider error: crashed"),
        (Error::Camera("no device".to_string()), "Camera error: no device"),
        (Error::ConfigError("oops".to_string()), "Configuration error: oops"),
        (Error::IoError("closed".to_string()), "I/O error: closed"),
    ];
    for (error, expected) in cases {
        assert_eq!(error.to_string(), expected);
    }
}

#[test]
fn test_error_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}

#[test]
fn test_io_error_conversion() {
    fn read_missing() -> Result<String> {
        Ok(std::fs::read_to_string("/definitely/not/a/real/path")?)
    }
    let err = read_missing().unwrap_err();
    assert!(matches!(err, Error::Io(_)));
    assert!(!err.is_frame_local());
}

#[test]
fn test_wire_landmark_count_mismatch() {
    match parse_response(&response_with_points(20)) {
        Err(Error::InvalidLandmarkCount { expected, actual }) => {
            assert_eq!(expected, 21);
            assert_eq!(actual, 20);
        }
        other => panic!("Expected InvalidLandmarkCount, got {other:?}"),
    }
    assert!(parse_response(&response_with_points(21)).is_ok());
}

#[test]
fn test_wire_malformed_json() {
    let err = parse_response("{not json").unwrap_err();
    assert!(matches!(err, Error::Json(_)));
    assert!(err.is_frame_local());
}

#[test]
fn test_wire_reported_error() {
    let err = parse_response(r#"{"error": "model not loaded"}"#).unwrap_err();
    match err {
        Error::Provider(msg) => assert_eq!(msg, "model not loaded"),
        other => panic!("Expected Provider, got {other:?}"),
    }
}

#[test]
fn test_wire_ready_handshake_failures() {
    let mut empty = Cursor::new(Vec::new());
    assert!(matches!(wait_ready(&mut empty), Err(Error::Provider(_))));

    let mut wrong = Cursor::new(b"Loading models...\n".to_vec());
    assert!(matches!(wait_ready(&mut wrong), Err(Error::Provider(_))));

    let mut ready = Cursor::new(b"READY\n".to_vec());
    assert!(wait_ready(&mut ready).is_ok());
}

#[test]
fn test_closed_provider_is_fatal() {
    let pixels = vec![0u8; 2 * 2 * 3];
    let image = ImageView::new(2, 2, 3, &pixels).unwrap();
    let mut client = WireClient::new(Cursor::new(Vec::new()), Vec::new());

    let err = client.request(&image).unwrap_err();
    assert!(matches!(err, Error::IoError(_)));
    assert!(!err.is_frame_local());
}

#[test]
fn test_image_view_rejects_wrong_length() {
    let pixels = vec![0u8; 11];
    assert!(matches!(ImageView::new(2, 2, 3, &pixels), Err(Error::InvalidInput(_))));
}

#[test]
fn test_safe_cast_errors() {
    assert!(i32_to_u32(-1).is_err());
    assert_eq!(i32_to_u32(7).unwrap(), 7);
    assert_eq!(u32_to_usize(640).unwrap(), 640);
}
