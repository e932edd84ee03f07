//! Constants used throughout the application

use std::time::Duration;

/// Number of landmarks in one hand landmark set
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Minimum number of curled non-thumb fingers for a fist
pub const MIN_CURLED_FINGERS: usize = 3;

/// How long the alert stays active after the last trigger
pub const ALERT_DURATION: Duration = Duration::from_secs(2);

/// Opacity of the alert layer when blended over the frame
pub const DEFAULT_ALERT_OPACITY: f64 = 0.7;

/// Wrist x-coordinate left of which a hand counts as left by position
pub const HORIZONTAL_MIDLINE: f32 = 0.5;

/// Default confidence thresholds handed to the landmark provider
pub const DEFAULT_MIN_DETECTION_CONFIDENCE: f32 = 0.5;
pub const DEFAULT_MIN_TRACKING_CONFIDENCE: f32 = 0.5;

/// Maximum hands the provider reports per frame
pub const DEFAULT_MAX_NUM_HANDS: usize = 2;

/// Requested capture properties
pub const DEFAULT_FRAME_WIDTH: u32 = 1280;
pub const DEFAULT_FRAME_HEIGHT: u32 = 720;
pub const DEFAULT_FPS: u32 = 30;

/// Line the provider sidecar prints once it is ready for frames
pub const PROVIDER_READY_SIGNAL: &str = "READY";

/// Size in bytes of the per-frame request header (width, height, channels)
pub const FRAME_HEADER_LEN: usize = 12;
