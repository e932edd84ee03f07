//! Fist classification from a single hand's landmarks.
//!
//! The four non-thumb fingers are judged vertically: a finger is curled when
//! its tip sits below its PIP joint. The thumb folds sideways, so it is judged
//! horizontally against the index knuckle instead.

use crate::{
    constants::{HORIZONTAL_MIDLINE, MIN_CURLED_FINGERS},
    landmarks::{Finger, HandLandmarks, LandmarkPoint},
    Result,
};

/// Whether one non-thumb finger is folded toward the palm
#[must_use]
pub fn is_finger_curled(hand: &HandLandmarks, finger: Finger) -> bool {
    // y grows downwards in image space
    hand.tip(finger).y > hand.pip(finger).y
}

/// Number of curled fingers among index, middle, ring and pinky
#[must_use]
pub fn count_curled_fingers(hand: &HandLandmarks) -> usize {
    Finger::ALL
        .iter()
        .filter(|&&finger| is_finger_curled(hand, finger))
        .count()
}

/// Whether the thumb tip has moved inward past the index knuckle line
#[must_use]
pub fn is_thumb_curled(hand: &HandLandmarks) -> bool {
    let base = hand.thumb_mcp();
    let reach = (hand.thumb_tip().x - base.x).abs();
    let reference = (hand.index_mcp().x - base.x).abs();
    reach < reference
}

/// Classify a hand as a closed fist
///
/// At least three curled fingers plus a curled thumb make a fist.
#[must_use]
pub fn is_fist(hand: &HandLandmarks) -> bool {
    count_curled_fingers(hand) >= MIN_CURLED_FINGERS && is_thumb_curled(hand)
}

/// Classify a raw landmark slice, validating its length first
///
/// # Errors
///
/// Returns [`crate::Error::InvalidLandmarkCount`] when the slice does not
/// hold exactly 21 points.
pub fn classify_points(points: &[LandmarkPoint]) -> Result<bool> {
    let hand = HandLandmarks::from_points(points)?;
    Ok(is_fist(&hand))
}

/// Position heuristic: a hand whose wrist lies left of the midline is a left hand
#[must_use]
pub fn is_left_by_position(hand: &HandLandmarks) -> bool {
    hand.wrist().x < HORIZONTAL_MIDLINE
}
