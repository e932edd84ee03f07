//! Main application loop: capture, process, display, react to keys.

use crate::{
    annotate::OpenCvAnnotator,
    camera::open_camera,
    commands::{next_step, LoopStep, ScreenshotSequence, StopReason, StopSignal},
    config::Config,
    error::{Error, Result},
    overlay::{Color, OverlayStyle},
    processor::FrameProcessor,
    provider::subprocess::SubprocessProvider,
};
use log::{info, warn};
use opencv::{
    core::{self, Mat, Point, Scalar, Vector},
    highgui::{self, WINDOW_AUTOSIZE, WND_PROP_VISIBLE},
    imgcodecs,
    imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_8},
    prelude::*,
    videoio::VideoCapture,
};

/// Main application struct
///
/// Camera, landmark provider and window are acquired in [`GestureApp::new`]
/// and released when the app is dropped.
pub struct GestureApp {
    config: Config,
    capture: VideoCapture,
    processor: FrameProcessor<SubprocessProvider, OpenCvAnnotator>,
    screenshots: ScreenshotSequence,
    stop: StopSignal,
    frame_count: u64,
}

impl GestureApp {
    /// Open the camera, start the landmark provider and create the window
    pub fn new(config: Config) -> Result<Self> {
        info!("Initializing gesture detection application");
        config.validate()?;

        let capture = open_camera(&config.camera)?;
        let provider = SubprocessProvider::spawn(&config.provider, &config.detection)?;
        let annotator = OpenCvAnnotator::new(OverlayStyle::with_alert_opacity(config.alert.opacity));
        let processor = FrameProcessor::new(provider, annotator)
            .with_alert_duration(config.alert.duration()?)
            .with_handedness_source(config.detection.handedness_source);

        highgui::named_window(&config.display.window_title, WINDOW_AUTOSIZE)?;

        Ok(Self {
            screenshots: ScreenshotSequence::new(&config.screenshot),
            config,
            capture,
            processor,
            stop: StopSignal::new(),
            frame_count: 0,
        })
    }

    /// Flag that ends the loop before the next frame when requested
    pub fn stop_handle(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Run the main application loop
    pub fn run(&mut self) -> Result<()> {
        info!("Starting main application loop");

        loop {
            if self.stop.is_requested() {
                info!("{}", StopReason::Interrupted.message());
                break;
            }

            let mut frame = Mat::default();
            if !self.capture.read(&mut frame)? || frame.empty() {
                return Err(Error::Camera("Failed to capture frame".to_string()));
            }

            if self.config.camera.mirror {
                let mut mirrored = Mat::default();
                core::flip(&frame, &mut mirrored, 1)?;
                frame = mirrored;
            }

            let shown = match self.processor.process(frame) {
                Ok((mut processed, _summary)) => {
                    self.frame_count += 1;
                    if self.config.display.show_frame_counter {
                        self.draw_frame_counter(&mut processed)?;
                    }
                    highgui::imshow(&self.config.display.window_title, &processed)?;
                    Some(processed)
                }
                Err(e) if e.is_frame_local() => {
                    warn!("Skipping frame {}: {}", self.frame_count + 1, e);
                    None
                }
                Err(e) => return Err(e),
            };

            // Window state is only current after wait_key
            let key = highgui::wait_key(1)?;
            match next_step(self.window_visible(), key) {
                LoopStep::Continue => {}
                LoopStep::Screenshot => match &shown {
                    Some(processed) => self.save_screenshot(processed)?,
                    None => warn!("No annotated frame to save"),
                },
                LoopStep::Stop(reason) => {
                    info!("{}", reason.message());
                    break;
                }
            }
        }

        info!("Processed {} frames", self.frame_count);
        Ok(())
    }

    fn draw_frame_counter(&self, frame: &mut Mat) -> Result<()> {
        let white = Color::WHITE;
        imgproc::put_text(
            frame,
            &format!("Frame: {}", self.frame_count),
            Point::new(frame.cols() - 150, 30),
            FONT_HERSHEY_SIMPLEX,
            0.5,
            Scalar::new(white.b, white.g, white.r, 0.0),
            1,
            LINE_8,
            false,
        )?;
        Ok(())
    }

    fn window_visible(&self) -> bool {
        highgui::get_window_property(&self.config.display.window_title, WND_PROP_VISIBLE)
            .map(|visible| visible >= 1.0)
            .unwrap_or(false)
    }

    fn save_screenshot(&mut self, frame: &Mat) -> Result<()> {
        let path = self.screenshots.next_path();
        let filename = path
            .to_str()
            .ok_or_else(|| Error::InvalidInput(format!("Non UTF-8 screenshot path: {}", path.display())))?;

        if imgcodecs::imwrite(filename, frame, &Vector::new())? {
            info!("Screenshot saved: {}", filename);
        } else {
            warn!("Failed to save screenshot: {}", filename);
        }
        Ok(())
    }
}

impl Drop for GestureApp {
    fn drop(&mut self) {
        info!("Cleaning up...");
        if let Err(e) = self.capture.release() {
            warn!("Failed to release camera: {}", e);
        }
        if let Err(e) = highgui::destroy_all_windows() {
            warn!("Failed to close windows: {}", e);
        }
    }
}
