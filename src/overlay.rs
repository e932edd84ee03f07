//! Overlay planning: every text, colour and position the annotator draws.
//!
//! Nothing here touches pixels. The renderer receives a [`FrameOverlay`] and
//! asks these functions what to draw, so the decisions stay testable without
//! a GUI toolkit.

use crate::{
    alert::AlertState,
    constants::DEFAULT_ALERT_OPACITY,
    landmarks::FaceRegion,
    processor::{ClassifiedHand, DetectionSummary},
    utils::safe_cast::normalized_to_pixel,
    Result,
};
use std::time::Duration;

/// Banner shown while the alert is active
pub const ALERT_BANNER_TEXT: &str = "ALERT: FIST DETECTED!";

/// Colour in BGR channel order, 0-255 per channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub b: f64,
    pub g: f64,
    pub r: f64,
}

impl Color {
    pub const RED: Self = Self::bgr(0.0, 0.0, 255.0);
    pub const GREEN: Self = Self::bgr(0.0, 255.0, 0.0);
    pub const WHITE: Self = Self::bgr(255.0, 255.0, 255.0);
    pub const BLACK: Self = Self::bgr(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn bgr(b: f64, g: f64, r: f64) -> Self {
        Self { b, g, r }
    }
}

/// Pixel rectangle given by two corners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

/// Fixed layout of the overlay
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    /// Weight of the alert layer; the original frame gets `1 - opacity`
    pub alert_opacity: f64,
    /// Thickness of the alert border in pixels
    pub border_thickness: i32,
    /// Baseline of the alert banner text
    pub banner_baseline: i32,
    /// Padding around the banner text
    pub banner_padding: i32,
    pub banner_font_scale: f64,
    pub banner_thickness: i32,
    /// Baseline of the countdown under the banner
    pub countdown_baseline: i32,
    pub countdown_font_scale: f64,
    pub countdown_thickness: i32,
    /// Info panel rectangle
    pub panel: PixelRect,
    /// Baseline of the first info panel line and the spacing between lines
    pub panel_first_line: i32,
    pub panel_line_spacing: i32,
    pub panel_font_scale: f64,
    pub panel_thickness: i32,
    /// How far above the wrist the hand label sits
    pub label_offset: i32,
    pub label_font_scale: f64,
    pub label_thickness: i32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            alert_opacity: DEFAULT_ALERT_OPACITY,
            border_thickness: 30,
            banner_baseline: 80,
            banner_padding: 10,
            banner_font_scale: 1.5,
            banner_thickness: 3,
            countdown_baseline: 130,
            countdown_font_scale: 0.8,
            countdown_thickness: 2,
            panel: PixelRect {
                left: 10,
                top: 10,
                right: 300,
                bottom: 100,
            },
            panel_first_line: 30,
            panel_line_spacing: 30,
            panel_font_scale: 0.6,
            panel_thickness: 2,
            label_offset: 20,
            label_font_scale: 0.7,
            label_thickness: 2,
        }
    }
}

impl OverlayStyle {
    /// Default layout with a custom alert opacity
    #[must_use]
    pub fn with_alert_opacity(opacity: f64) -> Self {
        Self {
            alert_opacity: opacity.clamp(0.0, 1.0),
            ..Self::default()
        }
    }

    /// Left edge of text of `text_width` pixels centred on the frame
    #[must_use]
    pub fn banner_x(&self, frame_width: i32, text_width: i32) -> i32 {
        (frame_width - text_width) / 2
    }

    /// Filled background behind the banner text
    #[must_use]
    pub fn banner_background(&self, text_x: i32, text_width: i32, text_height: i32) -> PixelRect {
        PixelRect {
            left: text_x - self.banner_padding,
            top: self.banner_baseline - text_height - self.banner_padding,
            right: text_x + text_width + self.banner_padding,
            bottom: self.banner_baseline + self.banner_padding,
        }
    }
}

/// Everything the annotator needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameOverlay<'a> {
    pub summary: &'a DetectionSummary,
    pub faces: &'a [FaceRegion],
    pub hands: &'a [ClassifiedHand],
    pub alert: AlertState,
    /// Time until the alert clears, zero when inactive
    pub alert_remaining: Duration,
}

/// Draws a [`FrameOverlay`] onto a frame
pub trait FrameAnnotator<F> {
    /// Draw the overlay
    ///
    /// # Errors
    ///
    /// Returns an error if the drawing backend fails.
    fn annotate(&mut self, frame: &mut F, overlay: &FrameOverlay<'_>) -> Result<()>;
}

/// Annotator that leaves frames untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnnotator;

impl<F> FrameAnnotator<F> for NoopAnnotator {
    fn annotate(&mut self, _frame: &mut F, _overlay: &FrameOverlay<'_>) -> Result<()> {
        Ok(())
    }
}

/// Label drawn next to a hand, e.g. `"Left - FIST"`
#[must_use]
pub fn hand_label(hand: &ClassifiedHand) -> String {
    if hand.is_fist {
        format!("{} - FIST", hand.handedness)
    } else {
        hand.handedness.to_string()
    }
}

#[must_use]
pub fn label_color(is_fist: bool) -> Color {
    if is_fist {
        Color::RED
    } else {
        Color::GREEN
    }
}

/// Pixel position of a hand label: above the wrist
#[must_use]
pub fn label_anchor(hand: &ClassifiedHand, style: &OverlayStyle, width: i32, height: i32) -> (i32, i32) {
    let wrist = hand.observation.landmarks.wrist();
    (
        normalized_to_pixel(wrist.x, width),
        normalized_to_pixel(wrist.y, height) - style.label_offset,
    )
}

/// Pixel rectangle of a normalized face region
#[must_use]
pub fn face_rect(face: &FaceRegion, width: i32, height: i32) -> PixelRect {
    PixelRect {
        left: normalized_to_pixel(face.x, width),
        top: normalized_to_pixel(face.y, height),
        right: normalized_to_pixel(face.x + face.width, width),
        bottom: normalized_to_pixel(face.y + face.height, height),
    }
}

#[must_use]
pub fn status_text(summary: &DetectionSummary) -> &'static str {
    if summary.left_fist_detected {
        "ALERT!"
    } else {
        "Normal"
    }
}

#[must_use]
pub fn status_color(summary: &DetectionSummary) -> Color {
    label_color(summary.left_fist_detected)
}

/// Countdown drawn under the alert banner, e.g. `"Clears in 1.4s"`
#[must_use]
pub fn countdown_text(remaining: Duration) -> String {
    format!("Clears in {:.1}s", remaining.as_secs_f64())
}

/// Info panel lines with their colours, top to bottom
#[must_use]
pub fn info_lines(summary: &DetectionSummary) -> [(String, Color); 3] {
    [
        (format!("Faces: {}", summary.faces_detected), Color::WHITE),
        (format!("Hands: {}", summary.hands_detected), Color::WHITE),
        (format!("Status: {}", status_text(summary)), status_color(summary)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{HandLandmarks, HandObservation, Handedness, LandmarkPoint};

    fn classified(handedness: Handedness, is_fist: bool) -> ClassifiedHand {
        let mut points = [LandmarkPoint::new(0.5, 0.5); 21];
        points[0] = LandmarkPoint::new(0.25, 0.5);
        ClassifiedHand {
            observation: HandObservation {
                landmarks: HandLandmarks::new(points),
                handedness,
                confidence: 0.9,
            },
            handedness,
            is_fist,
        }
    }

    #[test]
    fn test_hand_labels() {
        assert_eq!(hand_label(&classified(Handedness::Left, true)), "Left - FIST");
        assert_eq!(hand_label(&classified(Handedness::Right, false)), "Right");
        assert_eq!(label_color(true), Color::RED);
        assert_eq!(label_color(false), Color::GREEN);
    }

    #[test]
    fn test_label_anchor_above_wrist() {
        let style = OverlayStyle::default();
        let anchor = label_anchor(&classified(Handedness::Left, false), &style, 640, 480);
        assert_eq!(anchor, (160, 220));
    }

    #[test]
    fn test_info_lines() {
        let summary = DetectionSummary {
            faces_detected: 1,
            hands_detected: 2,
            left_fist_detected: true,
        };
        let lines = info_lines(&summary);
        assert_eq!(lines[0].0, "Faces: 1");
        assert_eq!(lines[1].0, "Hands: 2");
        assert_eq!(lines[2], ("Status: ALERT!".to_string(), Color::RED));

        let calm = DetectionSummary::default();
        assert_eq!(info_lines(&calm)[2], ("Status: Normal".to_string(), Color::GREEN));
    }

    #[test]
    fn test_banner_layout() {
        let style = OverlayStyle::default();
        let x = style.banner_x(1280, 400);
        assert_eq!(x, 440);

        let background = style.banner_background(x, 400, 30);
        assert_eq!(
            background,
            PixelRect {
                left: 430,
                top: 40,
                right: 850,
                bottom: 90,
            }
        );
    }

    #[test]
    fn test_face_rect() {
        let face = FaceRegion {
            x: 0.25,
            y: 0.25,
            width: 0.5,
            height: 0.5,
            score: 0.9,
        };
        assert_eq!(
            face_rect(&face, 400, 200),
            PixelRect {
                left: 100,
                top: 50,
                right: 300,
                bottom: 150,
            }
        );
    }

    #[test]
    fn test_countdown_text() {
        assert_eq!(countdown_text(Duration::from_millis(1450)), "Clears in 1.4s");
        assert_eq!(countdown_text(Duration::from_secs(2)), "Clears in 2.0s");
        assert_eq!(countdown_text(Duration::ZERO), "Clears in 0.0s");
    }

    #[test]
    fn test_opacity_clamped() {
        assert_eq!(OverlayStyle::with_alert_opacity(1.4).alert_opacity, 1.0);
        assert_eq!(OverlayStyle::default().alert_opacity, 0.7);
    }
}
