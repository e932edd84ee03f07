//! Camera acquisition through `OpenCV`.

use crate::{
    config::{CameraBackend, CameraConfig},
    provider::{Frame, ImageView},
    utils::safe_cast::{i32_to_u32, u32_to_i32},
    Error, Result,
};
use log::{info, warn};
use opencv::{
    core::Mat,
    prelude::*,
    videoio::{self, VideoCapture, CAP_PROP_FPS, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH},
};

fn backend_api(backend: CameraBackend) -> i32 {
    match backend {
        CameraBackend::Any => videoio::CAP_ANY,
        CameraBackend::Dshow => videoio::CAP_DSHOW,
        CameraBackend::V4l2 => videoio::CAP_V4L2,
        CameraBackend::Avfoundation => videoio::CAP_AVFOUNDATION,
    }
}

/// Open the first camera that responds, trying every index per backend
///
/// # Errors
///
/// Returns [`Error::Camera`] when no backend/index combination opens.
pub fn open_camera(config: &CameraConfig) -> Result<VideoCapture> {
    for &backend in &config.backends {
        for &index in &config.indices {
            info!("Trying camera index {} ({:?})...", index, backend);
            let mut capture = match VideoCapture::new(index, backend_api(backend)) {
                Ok(capture) => capture,
                Err(e) => {
                    warn!("Camera index {} ({:?}) unavailable: {}", index, backend, e);
                    continue;
                }
            };

            if capture.is_opened()? {
                info!("Successfully opened camera at index {}", index);
                configure(&mut capture, config)?;
                return Ok(capture);
            }
            capture.release()?;
        }
        warn!("No camera opened with backend {:?}", backend);
    }

    Err(Error::Camera(format!(
        "Could not open any camera (indices {:?}, backends {:?}); check that it is connected and not in use",
        config.indices, config.backends
    )))
}

fn configure(capture: &mut VideoCapture, config: &CameraConfig) -> Result<()> {
    let requested = [
        (CAP_PROP_FRAME_WIDTH, u32_to_i32(config.width)?),
        (CAP_PROP_FRAME_HEIGHT, u32_to_i32(config.height)?),
        (CAP_PROP_FPS, u32_to_i32(config.fps)?),
    ];
    for (property, value) in requested {
        if !capture.set(property, f64::from(value))? {
            warn!("Camera ignored property {} = {}", property, value);
        }
    }
    Ok(())
}

impl Frame for Mat {
    fn view(&self) -> Result<ImageView<'_>> {
        let width = i32_to_u32(self.cols())?;
        let height = i32_to_u32(self.rows())?;
        let channels = i32_to_u32(self.channels())?;
        ImageView::new(width, height, channels, self.data_bytes()?)
    }
}
