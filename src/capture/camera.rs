//! Camera-backed video feed

use crate::capture::feed::{RawFrame, VideoFeed};
use crate::{GlimpseError, Result};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;
use tracing::info;

/// Live camera feed using the platform's native capture backend
pub struct CameraFeed {
    camera: Camera,
    index: u32,
}

impl CameraFeed {
    /// Open the camera at `index` and start its stream
    pub fn new(index: u32) -> Result<Self> {
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);

        let mut camera = Camera::new(CameraIndex::Index(index), requested)
            .map_err(|e| GlimpseError::CameraError(format!("failed to open camera {}: {}", index, e)))?;

        camera
            .open_stream()
            .map_err(|e| GlimpseError::CameraError(format!("failed to start camera stream: {}", e)))?;

        let resolution = camera.resolution();
        info!(
            "Opened camera {} at {}x{}",
            index,
            resolution.width(),
            resolution.height()
        );

        Ok(Self { camera, index })
    }
}

impl VideoFeed for CameraFeed {
    fn grab(&mut self) -> Result<RawFrame> {
        let buffer = self
            .camera
            .frame()
            .map_err(|e| GlimpseError::CameraError(format!("frame grab failed: {}", e)))?;

        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| GlimpseError::CameraError(format!("frame decode failed: {}", e)))?;

        let (width, height) = decoded.dimensions();
        let frame = RawFrame::new(width, height, decoded.into_raw());
        frame.validate()?;
        Ok(frame)
    }

    fn describe(&self) -> String {
        format!("camera {}", self.index)
    }
}

impl Drop for CameraFeed {
    fn drop(&mut self) {
        let _ = self.camera.stop_stream();
    }
}
