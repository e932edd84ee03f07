//! Hand and face observation types produced by the landmark provider.
//!
//! Coordinates are normalized to the image: `x` runs from the left edge (0.0)
//! to the right edge (1.0), `y` from the top (0.0) downwards to the bottom (1.0).

use crate::{constants::NUM_HAND_LANDMARKS, Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Anatomical landmark indices
pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Bones drawn for the hand skeleton overlay
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (WRIST, THUMB_CMC),
    (THUMB_CMC, THUMB_MCP),
    (THUMB_MCP, THUMB_IP),
    (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP),
    (INDEX_MCP, INDEX_PIP),
    (INDEX_PIP, INDEX_DIP),
    (INDEX_DIP, INDEX_TIP),
    (INDEX_MCP, MIDDLE_MCP),
    (MIDDLE_MCP, MIDDLE_PIP),
    (MIDDLE_PIP, MIDDLE_DIP),
    (MIDDLE_DIP, MIDDLE_TIP),
    (MIDDLE_MCP, RING_MCP),
    (RING_MCP, RING_PIP),
    (RING_PIP, RING_DIP),
    (RING_DIP, RING_TIP),
    (RING_MCP, PINKY_MCP),
    (WRIST, PINKY_MCP),
    (PINKY_MCP, PINKY_PIP),
    (PINKY_PIP, PINKY_DIP),
    (PINKY_DIP, PINKY_TIP),
];

/// A single normalized landmark position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LandmarkPoint {
    /// Horizontal position as a fraction of image width
    pub x: f32,
    /// Vertical position as a fraction of image height (grows downwards)
    pub y: f32,
}

impl LandmarkPoint {
    /// Create a point from normalized coordinates
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The four fingers whose curl is judged vertically
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    /// Index finger
    Index,
    /// Middle finger
    Middle,
    /// Ring finger
    Ring,
    /// Little finger
    Pinky,
}

impl Finger {
    /// All non-thumb fingers, index first
    pub const ALL: [Self; 4] = [Self::Index, Self::Middle, Self::Ring, Self::Pinky];

    /// Landmark index of the fingertip
    #[must_use]
    pub const fn tip(self) -> usize {
        match self {
            Self::Index => INDEX_TIP,
            Self::Middle => MIDDLE_TIP,
            Self::Ring => RING_TIP,
            Self::Pinky => PINKY_TIP,
        }
    }

    /// Landmark index of the proximal interphalangeal joint
    #[must_use]
    pub const fn pip(self) -> usize {
        match self {
            Self::Index => INDEX_PIP,
            Self::Middle => MIDDLE_PIP,
            Self::Ring => RING_PIP,
            Self::Pinky => PINKY_PIP,
        }
    }
}

/// Exactly 21 hand landmarks in anatomical order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandLandmarks([LandmarkPoint; NUM_HAND_LANDMARKS]);

impl HandLandmarks {
    /// Wrap a fixed-size landmark array
    #[must_use]
    pub const fn new(points: [LandmarkPoint; NUM_HAND_LANDMARKS]) -> Self {
        Self(points)
    }

    /// Validate and copy a landmark slice
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLandmarkCount`] unless the slice holds exactly 21 points.
    pub fn from_points(points: &[LandmarkPoint]) -> Result<Self> {
        let array: [LandmarkPoint; NUM_HAND_LANDMARKS] =
            points.try_into().map_err(|_| Error::InvalidLandmarkCount {
                expected: NUM_HAND_LANDMARKS,
                actual: points.len(),
            })?;
        Ok(Self(array))
    }

    /// All points in anatomical order
    #[must_use]
    pub fn points(&self) -> &[LandmarkPoint; NUM_HAND_LANDMARKS] {
        &self.0
    }

    /// Point at an anatomical index, if in range
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&LandmarkPoint> {
        self.0.get(index)
    }

    #[must_use]
    pub fn wrist(&self) -> LandmarkPoint {
        self.0[WRIST]
    }

    #[must_use]
    pub fn thumb_tip(&self) -> LandmarkPoint {
        self.0[THUMB_TIP]
    }

    /// Base joint of the thumb
    #[must_use]
    pub fn thumb_mcp(&self) -> LandmarkPoint {
        self.0[THUMB_MCP]
    }

    /// Base knuckle of the index finger
    #[must_use]
    pub fn index_mcp(&self) -> LandmarkPoint {
        self.0[INDEX_MCP]
    }

    #[must_use]
    pub fn tip(&self, finger: Finger) -> LandmarkPoint {
        self.0[finger.tip()]
    }

    #[must_use]
    pub fn pip(&self, finger: Finger) -> LandmarkPoint {
        self.0[finger.pip()]
    }
}

impl TryFrom<Vec<LandmarkPoint>> for HandLandmarks {
    type Error = Error;

    fn try_from(points: Vec<LandmarkPoint>) -> Result<Self> {
        Self::from_points(&points)
    }
}

/// Which hand a landmark set belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("Left"),
            Self::Right => f.write_str("Right"),
        }
    }
}

impl FromStr for Handedness {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Left" => Ok(Self::Left),
            "Right" => Ok(Self::Right),
            other => Err(Error::InvalidInput(format!("Unknown handedness label: {other}"))),
        }
    }
}

/// One detected hand for the current frame
#[derive(Debug, Clone, PartialEq)]
pub struct HandObservation {
    /// The 21 landmarks of the hand
    pub landmarks: HandLandmarks,
    /// Handedness label assigned by the provider
    pub handedness: Handedness,
    /// Provider confidence for the handedness classification
    pub confidence: f32,
}

/// A detected face, as a normalized bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FaceRegion {
    /// Left edge as a fraction of image width
    pub x: f32,
    /// Top edge as a fraction of image height
    pub y: f32,
    /// Width as a fraction of image width
    pub width: f32,
    /// Height as a fraction of image height
    pub height: f32,
    /// Detection confidence
    #[serde(default)]
    pub score: f32,
}
