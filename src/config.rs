//! Configuration management for the fist alert application

use crate::{constants, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Reference MediaPipe sidecar shipped with the crate, relative to the repository root
pub const REFERENCE_SIDECAR: &str = "sidecar/fist_alert_landmarks.py";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Camera acquisition settings
    pub camera: CameraConfig,

    /// Landmark provider process
    pub provider: ProviderConfig,

    /// Detection parameters
    pub detection: DetectionConfig,

    /// Alert timing and appearance
    pub alert: AlertConfig,

    /// Display window settings
    pub display: DisplayConfig,

    /// Screenshot output
    pub screenshot: ScreenshotConfig,
}

/// Video capture backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraBackend {
    /// Let the capture library choose
    Any,
    /// DirectShow (Windows)
    Dshow,
    /// Video4Linux2
    V4l2,
    /// AVFoundation (macOS)
    Avfoundation,
}

/// Camera acquisition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera indices to try, in order
    pub indices: Vec<i32>,

    /// Backends to try, in order; every index is tried per backend
    pub backends: Vec<CameraBackend>,

    /// Requested frame width
    pub width: u32,

    /// Requested frame height
    pub height: u32,

    /// Requested frame rate
    pub fps: u32,

    /// Flip frames horizontally before processing
    pub mirror: bool,
}

/// Landmark provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Executable of the landmark sidecar
    pub command: String,

    /// Arguments for the sidecar, before the detection thresholds
    pub args: Vec<String>,
}

/// Where the left/right decision for alerting comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandednessSource {
    /// Trust the provider's handedness label
    #[default]
    Provider,
    /// Wrist left of the image midline means left hand
    WristPosition,
}

/// Detection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Minimum confidence for a detection (0.0-1.0)
    pub min_detection_confidence: f32,

    /// Minimum confidence to keep tracking a hand (0.0-1.0)
    pub min_tracking_confidence: f32,

    /// Maximum hands reported per frame
    pub max_num_hands: usize,

    /// Source of truth for handedness
    pub handedness_source: HandednessSource,
}

/// Alert configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Seconds the alert stays active after the last trigger
    pub duration_secs: f64,

    /// Opacity of the alert layer (0.0-1.0)
    pub opacity: f64,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Title of the preview window
    pub window_title: String,

    /// Draw the running frame number
    pub show_frame_counter: bool,
}

/// Screenshot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenshotConfig {
    /// Directory screenshots are written to
    pub directory: PathBuf,

    /// File name prefix, followed by `_<n>`
    pub prefix: String,

    /// File extension, which selects the image encoder
    pub extension: String,
}

impl CameraBackend {
    /// Backends tried when none are configured
    #[must_use]
    pub fn platform_defaults() -> Vec<Self> {
        if cfg!(windows) {
            vec![Self::Dshow, Self::Any]
        } else {
            vec![Self::Any]
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            indices: vec![0, 1, 2],
            backends: CameraBackend::platform_defaults(),
            width: constants::DEFAULT_FRAME_WIDTH,
            height: constants::DEFAULT_FRAME_HEIGHT,
            fps: constants::DEFAULT_FPS,
            mirror: true,
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            command: "python3".to_string(),
            args: vec![REFERENCE_SIDECAR.to_string()],
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_detection_confidence: constants::DEFAULT_MIN_DETECTION_CONFIDENCE,
            min_tracking_confidence: constants::DEFAULT_MIN_TRACKING_CONFIDENCE,
            max_num_hands: constants::DEFAULT_MAX_NUM_HANDS,
            handedness_source: HandednessSource::Provider,
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            duration_secs: constants::ALERT_DURATION.as_secs_f64(),
            opacity: constants::DEFAULT_ALERT_OPACITY,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            window_title: "Gesture Detection System".to_string(),
            show_frame_counter: true,
        }
    }
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            prefix: "screenshot".to_string(),
            extension: "png".to_string(),
        }
    }
}

impl AlertConfig {
    /// Active window as a [`Duration`]
    ///
    /// # Errors
    ///
    /// Returns an error if the configured seconds are negative or not finite.
    pub fn duration(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.duration_secs)
            .map_err(|e| Error::ConfigError(format!("Invalid alert duration {}: {e}", self.duration_secs)))
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::IoError(e.to_string()))?;

        serde_yaml::from_str(&content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| Error::IoError(e.to_string()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        // Detection thresholds
        if !(0.0..=1.0).contains(&self.detection.min_detection_confidence) {
            return Err(Error::ConfigError(
                "Minimum detection confidence must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.detection.min_tracking_confidence) {
            return Err(Error::ConfigError(
                "Minimum tracking confidence must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.detection.max_num_hands == 0 {
            return Err(Error::ConfigError(
                "Maximum number of hands must be greater than 0".to_string(),
            ));
        }

        // Alert
        if !self.alert.duration_secs.is_finite() || self.alert.duration_secs <= 0.0 {
            return Err(Error::ConfigError(
                "Alert duration must be a positive number of seconds".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.alert.opacity) {
            return Err(Error::ConfigError(
                "Alert opacity must be between 0.0 and 1.0".to_string(),
            ));
        }

        // Camera
        if self.camera.indices.is_empty() {
            return Err(Error::ConfigError("At least one camera index is required".to_string()));
        }
        if self.camera.backends.is_empty() {
            return Err(Error::ConfigError("At least one camera backend is required".to_string()));
        }
        if self.camera.fps == 0 {
            return Err(Error::ConfigError("Camera FPS must be greater than 0".to_string()));
        }

        if self.provider.command.trim().is_empty() {
            return Err(Error::ConfigError("Provider command must not be empty".to_string()));
        }
        if self.screenshot.prefix.is_empty() {
            return Err(Error::ConfigError("Screenshot prefix must not be empty".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Fist Alert Configuration

# Camera acquisition
camera:
  indices: [0, 1, 2]
  backends: [any]
  width: 1280
  height: 720
  fps: 30
  mirror: true

# Landmark sidecar process; the reference MediaPipe sidecar needs
# `python3 -m pip install -r sidecar/requirements.txt` and a start from the
# repository root
provider:
  command: "python3"
  args: ["sidecar/fist_alert_landmarks.py"]

# Detection parameters
detection:
  min_detection_confidence: 0.5
  min_tracking_confidence: 0.5
  max_num_hands: 2
  handedness_source: provider

# Alert timing and appearance
alert:
  duration_secs: 2.0
  opacity: 0.7

# Display settings
display:
  window_title: "Gesture Detection System"
  show_frame_counter: true

# Screenshots
screenshot:
  directory: "."
  prefix: "screenshot"
  extension: "png"
"#;
