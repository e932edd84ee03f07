//! Checked conversions between image dimensions, buffer sizes and pixel coordinates

use crate::{Error, Result};

/// Convert an image dimension to a buffer size
///
/// # Errors
///
/// Returns an error if the value does not fit in `usize` on this target
pub fn u32_to_usize(value: u32) -> Result<usize> {
    value
        .try_into()
        .map_err(|_| Error::InvalidInput(format!("Value {value} too large to fit in usize")))
}

/// Convert a signed `OpenCV` dimension to an unsigned one
///
/// # Errors
///
/// Returns an error if the value is negative
pub fn i32_to_u32(value: i32) -> Result<u32> {
    value
        .try_into()
        .map_err(|_| Error::InvalidInput(format!("Negative dimension {value}")))
}

/// Convert an unsigned setting to `OpenCV`'s signed integer
///
/// # Errors
///
/// Returns an error if the value exceeds `i32::MAX`
pub fn u32_to_i32(value: u32) -> Result<i32> {
    value
        .try_into()
        .map_err(|_| Error::InvalidInput(format!("Value {value} too large to fit in i32")))
}

/// Clamp and convert f32 to i32 for pixel coordinates
#[must_use]
#[allow(clippy::cast_precision_loss)] // Acceptable for clamping bounds
#[allow(clippy::cast_possible_truncation)] // Clamping ensures safe truncation
pub fn f32_to_i32_clamp(value: f32, min: i32, max: i32) -> i32 {
    let (min, max) = if min <= max { (min, max) } else { (max, min) };

    if !value.is_finite() {
        return min;
    }

    let clamped = value.clamp(min as f32, max as f32);
    (clamped as i32).clamp(min, max)
}

/// Map a normalized coordinate onto a pixel axis of `extent` pixels
///
/// Out-of-range coordinates are clamped to the image.
#[must_use]
#[allow(clippy::cast_precision_loss)] // Frame sizes are far below f32 precision limits
pub fn normalized_to_pixel(value: f32, extent: i32) -> i32 {
    f32_to_i32_clamp(value * extent as f32, 0, (extent - 1).max(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_dimension_conversions() {
        assert_eq!(u32_to_usize(1280).unwrap(), 1280);
        assert_eq!(i32_to_u32(720).unwrap(), 720);
        assert!(i32_to_u32(-1).is_err());
        assert_eq!(u32_to_i32(30).unwrap(), 30);
        assert!(u32_to_i32(u32::MAX).is_err());
    }

    #[test]
    fn test_f32_to_i32_clamp() {
        assert_eq!(f32_to_i32_clamp(50.0, 0, 100), 50);
        assert_eq!(f32_to_i32_clamp(-10.0, 0, 100), 0);
        assert_eq!(f32_to_i32_clamp(150.0, 0, 100), 100);
        assert_eq!(f32_to_i32_clamp(f32::NAN, 0, 100), 0);
        assert_eq!(f32_to_i32_clamp(f32::INFINITY, 0, 100), 0);
        assert_eq!(f32_to_i32_clamp(50.0, 100, 0), 50);
    }

    #[test]
    fn test_normalized_to_pixel() {
        assert_eq!(normalized_to_pixel(0.0, 640), 0);
        assert_eq!(normalized_to_pixel(0.5, 640), 320);
        assert_eq!(normalized_to_pixel(1.0, 640), 639);
        assert_eq!(normalized_to_pixel(-0.2, 640), 0);
        assert_eq!(normalized_to_pixel(0.5, 0), 0);
    }

    proptest! {
        #[test]
        fn prop_f32_to_i32_clamp_always_within_bounds(
            value in any::<f32>(),
            min in any::<i32>(),
            max in any::<i32>()
        ) {
            let (min, max) = if min <= max { (min, max) } else { (max, min) };
            let result = f32_to_i32_clamp(value, min, max);
            prop_assert!(result >= min);
            prop_assert!(result <= max);
        }

        #[test]
        fn prop_normalized_to_pixel_inside_image(value in any::<f32>(), extent in 1..8192i32) {
            let pixel = normalized_to_pixel(value, extent);
            prop_assert!(pixel >= 0);
            prop_assert!(pixel < extent);
        }
    }
}
