//! Wire protocol between the processor and a landmark sidecar.
//!
//! The sidecar prints `READY` on a line of its own once its models are loaded.
//! For every frame it then receives a 12-byte header (width, height and
//! channel count as little-endian `u32`) followed by the raw pixel bytes, and
//! answers with exactly one line of JSON:
//!
//! ```json
//! {"faces": [{"x": 0.1, "y": 0.2, "width": 0.3, "height": 0.4, "score": 0.9}],
//!  "hands": [{"handedness": "Left", "score": 0.97, "landmarks": [{"x": 0.5, "y": 0.5}]}],
//!  "error": null}
//! ```

use super::{Detections, ImageView};
use crate::{
    constants::{FRAME_HEADER_LEN, PROVIDER_READY_SIGNAL},
    landmarks::{FaceRegion, HandLandmarks, HandObservation, Handedness, LandmarkPoint},
    Error, Result,
};
use serde::Deserialize;
use std::io::{BufRead, Write};

#[derive(Deserialize, Debug)]
struct HandRecord {
    handedness: Handedness,
    #[serde(default)]
    score: f32,
    landmarks: Vec<LandmarkPoint>,
}

#[derive(Deserialize, Debug)]
struct DetectionResponse {
    #[serde(default)]
    faces: Vec<FaceRegion>,
    #[serde(default)]
    hands: Vec<HandRecord>,
    #[serde(default)]
    error: Option<String>,
}

/// Encode the per-frame request header
#[must_use]
pub fn encode_header(width: u32, height: u32, channels: u32) -> [u8; FRAME_HEADER_LEN] {
    let mut header = [0u8; FRAME_HEADER_LEN];
    header[0..4].copy_from_slice(&width.to_le_bytes());
    header[4..8].copy_from_slice(&height.to_le_bytes());
    header[8..12].copy_from_slice(&channels.to_le_bytes());
    header
}

/// Write one frame request
///
/// # Errors
///
/// Returns an error if writing to or flushing the sink fails.
pub fn write_frame<W: Write>(writer: &mut W, image: &ImageView<'_>) -> Result<()> {
    writer.write_all(&encode_header(image.width(), image.height(), image.channels()))?;
    writer.write_all(image.data())?;
    writer.flush()?;
    Ok(())
}

/// Parse one JSON response line into detections
///
/// # Errors
///
/// Returns [`Error::Json`] for malformed JSON, [`Error::Provider`] when the
/// sidecar reported an error, and [`Error::InvalidLandmarkCount`] when a hand
/// does not carry exactly 21 landmarks.
pub fn parse_response(line: &str) -> Result<Detections> {
    let response: DetectionResponse = serde_json::from_str(line.trim())?;

    if let Some(message) = response.error {
        return Err(Error::Provider(message));
    }

    let hands = response
        .hands
        .into_iter()
        .map(|hand| {
            Ok(HandObservation {
                landmarks: HandLandmarks::try_from(hand.landmarks)?,
                handedness: hand.handedness,
                confidence: hand.score,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Detections {
        faces: response.faces,
        hands,
    })
}

/// Block until the sidecar announces it is ready
///
/// # Errors
///
/// Returns [`Error::Provider`] if the stream ends or the first line is not `READY`.
pub fn wait_ready<R: BufRead>(reader: &mut R) -> Result<()> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(Error::Provider("Provider exited before signalling ready".to_string()));
    }
    if line.trim() != PROVIDER_READY_SIGNAL {
        return Err(Error::Provider(format!(
            "Provider did not signal ready, got: {}",
            line.trim()
        )));
    }
    Ok(())
}

/// Request/response client over any byte sink and line source
pub struct WireClient<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> WireClient<R, W> {
    /// Wrap a connected reader and writer
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Send one frame and wait for its detections
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure, an invalid response, or
    /// [`Error::IoError`] once the provider has closed its output.
    pub fn request(&mut self, image: &ImageView<'_>) -> Result<Detections> {
        write_frame(&mut self.writer, image)?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(Error::IoError("Provider closed its output".to_string()));
        }

        parse_response(&line)
    }

    /// Access the writer, mainly for inspection
    pub fn writer(&self) -> &W {
        &self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_header_layout() {
        let header = encode_header(640, 480, 3);
        assert_eq!(&header[0..4], &640u32.to_le_bytes());
        assert_eq!(&header[4..8], &480u32.to_le_bytes());
        assert_eq!(&header[8..12], &3u32.to_le_bytes());
    }

    #[test]
    fn test_empty_response_is_no_detections() {
        let detections = parse_response(r#"{"faces": [], "hands": []}"#).unwrap();
        assert!(detections.faces.is_empty());
        assert!(detections.hands.is_empty());

        let detections = parse_response("{}").unwrap();
        assert_eq!(detections, Detections::default());
    }

    #[test]
    fn test_error_field_becomes_provider_error() {
        let err = parse_response(r#"{"error": "model crashed"}"#).unwrap_err();
        assert!(matches!(err, Error::Provider(msg) if msg == "model crashed"));
    }

    #[test]
    fn test_wait_ready() {
        let mut ok = Cursor::new(b"READY\n".to_vec());
        assert!(wait_ready(&mut ok).is_ok());

        let mut wrong = Cursor::new(b"Loading model\n".to_vec());
        assert!(matches!(wait_ready(&mut wrong), Err(Error::Provider(_))));

        let mut eof = Cursor::new(Vec::new());
        assert!(matches!(wait_ready(&mut eof), Err(Error::Provider(_))));
    }

    #[test]
    fn test_client_writes_header_and_pixels() {
        let pixels = [7u8; 2 * 2 * 3];
        let image = ImageView::new(2, 2, 3, &pixels).unwrap();
        let reader = Cursor::new(b"{\"faces\": [{\"x\":0.1,\"y\":0.1,\"width\":0.2,\"height\":0.2}]}\n".to_vec());
        let mut client = WireClient::new(reader, Vec::new());

        let detections = client.request(&image).unwrap();
        assert_eq!(detections.faces.len(), 1);

        let written = client.writer();
        assert_eq!(written.len(), FRAME_HEADER_LEN + pixels.len());
        assert_eq!(&written[..FRAME_HEADER_LEN], &encode_header(2, 2, 3));
        assert!(written[FRAME_HEADER_LEN..].iter().all(|&b| b == 7));
    }

    #[test]
    fn test_client_end_of_stream() {
        let pixels = [0u8; 3];
        let image = ImageView::new(1, 1, 3, &pixels).unwrap();
        let mut client = WireClient::new(Cursor::new(Vec::new()), Vec::new());
        let err = client.request(&image).unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
        assert!(!err.is_frame_local());
    }
}
