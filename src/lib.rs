//! Left-hand fist detection with a time-bounded visual alert.
//!
//! Each captured frame goes through the same pipeline:
//! 1. A landmark provider reports face regions and hand landmarks
//! 2. Every hand is classified as fist or not
//! 3. A left-hand fist (re)activates a two-second alert
//! 4. The frame is annotated with skeletons, labels, an info panel and,
//!    while the alert is active, a red border and banner
//!
//! Landmark inference and pixel rendering sit behind the
//! [`provider::LandmarkProvider`] and [`overlay::FrameAnnotator`] traits.
//! Camera capture, the preview window and the `OpenCV` renderer are behind the
//! `gui` feature.
//!
//! # Examples
//!
//! ```
//! use fist_alert::{
//!     landmarks::{FaceRegion, HandObservation},
//!     overlay::NoopAnnotator,
//!     processor::FrameProcessor,
//!     provider::{Frame, ImageView, LandmarkProvider},
//!     Result,
//! };
//!
//! struct Pixels(Vec<u8>);
//!
//! impl Frame for Pixels {
//!     fn view(&self) -> Result<ImageView<'_>> {
//!         ImageView::new(2, 2, 3, &self.0)
//!     }
//! }
//!
//! struct NothingThere;
//!
//! impl LandmarkProvider for NothingThere {
//!     fn detect_faces(&mut self, _image: &ImageView<'_>) -> Result<Vec<FaceRegion>> {
//!         Ok(Vec::new())
//!     }
//!
//!     fn detect_hands(&mut self, _image: &ImageView<'_>) -> Result<Vec<HandObservation>> {
//!         Ok(Vec::new())
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let mut processor = FrameProcessor::new(NothingThere, NoopAnnotator);
//! let (_frame, summary) = processor.process(Pixels(vec![0; 12]))?;
//!
//! assert_eq!(summary.hands_detected, 0);
//! assert!(!summary.left_fist_detected);
//! assert!(!processor.alert_state().is_active());
//! # Ok(())
//! # }
//! ```

/// Hand landmark, handedness and face region types
pub mod landmarks;

/// Fist classification
pub mod gesture;

/// Alert state machine
pub mod alert;

/// Per-frame processing pipeline
pub mod processor;

/// Overlay planning and the annotator seam
pub mod overlay;

/// Landmark provider seam and sidecar protocol
pub mod provider;

/// Keyboard commands and screenshot naming
pub mod commands;

/// Command-line arguments
pub mod cli;

/// Utility functions for coordinate conversion
pub mod utils;

/// Error types and result handling
pub mod error;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

/// `OpenCV` overlay renderer
#[cfg(feature = "gui")]
pub mod annotate;

/// Camera acquisition
#[cfg(feature = "gui")]
pub mod camera;

/// Main application module
#[cfg(feature = "gui")]
pub mod app;

pub use error::{Error, Result};
