//! `OpenCV` renderer for the frame overlay.

use crate::{
    landmarks::HAND_CONNECTIONS,
    overlay::{
        countdown_text, face_rect, hand_label, info_lines, label_anchor, label_color, Color, FrameAnnotator,
        FrameOverlay, OverlayStyle, PixelRect, ALERT_BANNER_TEXT,
    },
    processor::ClassifiedHand,
    utils::safe_cast::normalized_to_pixel,
    Result,
};
use opencv::{
    core::{self, Mat, Point, Rect, Scalar},
    imgproc::{self, FILLED, FONT_HERSHEY_SIMPLEX, LINE_8},
    prelude::*,
};
use std::time::Duration;

const LANDMARK_RADIUS: i32 = 3;
const CONNECTION_THICKNESS: i32 = 2;

fn scalar(color: Color) -> Scalar {
    Scalar::new(color.b, color.g, color.r, 0.0)
}

fn rect(r: PixelRect) -> Rect {
    Rect::new(r.left, r.top, r.right - r.left, r.bottom - r.top)
}

/// Draws skeletons, labels, the info panel and the alert layer on a `Mat`
#[derive(Debug, Clone, Default)]
pub struct OpenCvAnnotator {
    style: OverlayStyle,
}

impl OpenCvAnnotator {
    #[must_use]
    pub fn new(style: OverlayStyle) -> Self {
        Self { style }
    }

    fn draw_faces(&self, frame: &mut Mat, overlay: &FrameOverlay<'_>) -> Result<()> {
        let (width, height) = (frame.cols(), frame.rows());
        for face in overlay.faces {
            imgproc::rectangle(
                frame,
                rect(face_rect(face, width, height)),
                scalar(Color::WHITE),
                2,
                LINE_8,
                0,
            )?;
        }
        Ok(())
    }

    fn draw_hand(&self, frame: &mut Mat, hand: &ClassifiedHand) -> Result<()> {
        let (width, height) = (frame.cols(), frame.rows());
        let points: Vec<Point> = hand
            .observation
            .landmarks
            .points()
            .iter()
            .map(|p| Point::new(normalized_to_pixel(p.x, width), normalized_to_pixel(p.y, height)))
            .collect();

        for (from, to) in HAND_CONNECTIONS {
            imgproc::line(
                frame,
                points[from],
                points[to],
                scalar(Color::WHITE),
                CONNECTION_THICKNESS,
                LINE_8,
                0,
            )?;
        }
        for point in &points {
            imgproc::circle(frame, *point, LANDMARK_RADIUS, scalar(Color::RED), FILLED, LINE_8, 0)?;
        }

        let (x, y) = label_anchor(hand, &self.style, width, height);
        imgproc::put_text(
            frame,
            &hand_label(hand),
            Point::new(x, y),
            FONT_HERSHEY_SIMPLEX,
            self.style.label_font_scale,
            scalar(label_color(hand.is_fist)),
            self.style.label_thickness,
            LINE_8,
            false,
        )?;
        Ok(())
    }

    /// Red border, centred banner and countdown, blended over the frame
    fn draw_alert(&self, frame: &mut Mat, remaining: Duration) -> Result<()> {
        let style = &self.style;
        let (width, height) = (frame.cols(), frame.rows());
        let mut layer = frame.try_clone()?;

        imgproc::rectangle(
            &mut layer,
            Rect::new(0, 0, width, height),
            scalar(Color::RED),
            style.border_thickness,
            LINE_8,
            0,
        )?;

        let mut baseline = 0;
        let text_size = imgproc::get_text_size(
            ALERT_BANNER_TEXT,
            FONT_HERSHEY_SIMPLEX,
            style.banner_font_scale,
            style.banner_thickness,
            &mut baseline,
        )?;
        let text_x = style.banner_x(width, text_size.width);

        imgproc::rectangle(
            &mut layer,
            rect(style.banner_background(text_x, text_size.width, text_size.height)),
            scalar(Color::RED),
            FILLED,
            LINE_8,
            0,
        )?;
        imgproc::put_text(
            &mut layer,
            ALERT_BANNER_TEXT,
            Point::new(text_x, style.banner_baseline),
            FONT_HERSHEY_SIMPLEX,
            style.banner_font_scale,
            scalar(Color::WHITE),
            style.banner_thickness,
            LINE_8,
            false,
        )?;

        let countdown = countdown_text(remaining);
        let countdown_size = imgproc::get_text_size(
            &countdown,
            FONT_HERSHEY_SIMPLEX,
            style.countdown_font_scale,
            style.countdown_thickness,
            &mut baseline,
        )?;
        imgproc::put_text(
            &mut layer,
            &countdown,
            Point::new(style.banner_x(width, countdown_size.width), style.countdown_baseline),
            FONT_HERSHEY_SIMPLEX,
            style.countdown_font_scale,
            scalar(Color::WHITE),
            style.countdown_thickness,
            LINE_8,
            false,
        )?;

        let mut blended = Mat::default();
        core::add_weighted(
            &layer,
            style.alert_opacity,
            &*frame,
            1.0 - style.alert_opacity,
            0.0,
            &mut blended,
            -1,
        )?;
        *frame = blended;
        Ok(())
    }

    fn draw_info_panel(&self, frame: &mut Mat, overlay: &FrameOverlay<'_>) -> Result<()> {
        let style = &self.style;
        let panel = rect(style.panel);

        imgproc::rectangle(frame, panel, scalar(Color::BLACK), FILLED, LINE_8, 0)?;
        imgproc::rectangle(frame, panel, scalar(Color::WHITE), 2, LINE_8, 0)?;

        let mut y = style.panel_first_line;
        for (text, color) in info_lines(overlay.summary) {
            imgproc::put_text(
                frame,
                &text,
                Point::new(style.panel.left + 10, y),
                FONT_HERSHEY_SIMPLEX,
                style.panel_font_scale,
                scalar(color),
                style.panel_thickness,
                LINE_8,
                false,
            )?;
            y += style.panel_line_spacing;
        }
        Ok(())
    }
}

impl FrameAnnotator<Mat> for OpenCvAnnotator {
    fn annotate(&mut self, frame: &mut Mat, overlay: &FrameOverlay<'_>) -> Result<()> {
        self.draw_faces(frame, overlay)?;
        for hand in overlay.hands {
            self.draw_hand(frame, hand)?;
        }
        if overlay.alert.is_active() {
            self.draw_alert(frame, overlay.alert_remaining)?;
        }
        self.draw_info_panel(frame, overlay)
    }
}
