//! Landmark provider seam.
//!
//! Landmark inference itself happens outside this crate. A provider receives
//! the raw pixels of a frame and answers with face regions and hand
//! observations in normalized coordinates.

/// Frame request / detection response protocol for sidecar providers
pub mod wire;

/// Provider backed by a child process speaking the wire protocol
pub mod subprocess;

use crate::{
    landmarks::{FaceRegion, HandObservation},
    utils::safe_cast::u32_to_usize,
    Error, Result,
};

/// Borrowed, continuous, row-major pixel buffer in BGR channel order
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a> {
    width: u32,
    height: u32,
    channels: u32,
    data: &'a [u8],
}

impl<'a> ImageView<'a> {
    /// Wrap a pixel buffer, checking its length against the dimensions
    ///
    /// # Errors
    ///
    /// Returns an error if any dimension is zero or the buffer length does
    /// not equal `width * height * channels`.
    pub fn new(width: u32, height: u32, channels: u32, data: &'a [u8]) -> Result<Self> {
        if width == 0 || height == 0 || channels == 0 {
            return Err(Error::InvalidInput(format!(
                "Invalid image dimensions: {width}x{height}x{channels}"
            )));
        }

        let expected = u32_to_usize(width)?
            .checked_mul(u32_to_usize(height)?)
            .and_then(|n| n.checked_mul(u32_to_usize(channels).ok()?))
            .ok_or_else(|| Error::InvalidInput(format!("Image too large: {width}x{height}x{channels}")))?;

        if data.len() != expected {
            return Err(Error::InvalidInput(format!(
                "Image buffer holds {} bytes, expected {expected}",
                data.len()
            )));
        }

        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }
}

/// A captured frame that can expose its pixels to a provider
pub trait Frame {
    /// Borrow the frame's pixels
    ///
    /// # Errors
    ///
    /// Returns an error if the pixel data cannot be accessed as a continuous buffer.
    fn view(&self) -> Result<ImageView<'_>>;
}

/// Everything a provider found in one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detections {
    /// Face regions, in provider order
    pub faces: Vec<FaceRegion>,
    /// Hand observations, in provider order
    pub hands: Vec<HandObservation>,
}

/// Source of face regions and hand landmarks
pub trait LandmarkProvider {
    /// Detect faces in the image
    ///
    /// # Errors
    ///
    /// Returns an error if inference fails or the provider breaks its contract.
    fn detect_faces(&mut self, image: &ImageView<'_>) -> Result<Vec<FaceRegion>>;

    /// Detect hands in the image
    ///
    /// # Errors
    ///
    /// Returns an error if inference fails or a hand does not carry exactly
    /// 21 landmarks.
    fn detect_hands(&mut self, image: &ImageView<'_>) -> Result<Vec<HandObservation>>;

    /// Detect faces and hands together
    ///
    /// Providers that answer both in one pass should override this.
    ///
    /// # Errors
    ///
    /// Propagates errors from either detection.
    fn detect(&mut self, image: &ImageView<'_>) -> Result<Detections> {
        let faces = self.detect_faces(image)?;
        let hands = self.detect_hands(image)?;
        Ok(Detections { faces, hands })
    }
}

impl<P: LandmarkProvider + ?Sized> LandmarkProvider for Box<P> {
    fn detect_faces(&mut self, image: &ImageView<'_>) -> Result<Vec<FaceRegion>> {
        (**self).detect_faces(image)
    }

    fn detect_hands(&mut self, image: &ImageView<'_>) -> Result<Vec<HandObservation>> {
        (**self).detect_hands(image)
    }

    fn detect(&mut self, image: &ImageView<'_>) -> Result<Detections> {
        (**self).detect(image)
    }
}
