//! Video feed abstraction

use crate::{GlimpseError, Result};

/// A single raw frame from a video feed
///
/// Pixels are tightly packed RGB8, row-major, `width * height * 3` bytes.
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl RawFrame {
    pub fn new(width: u32, height: u32, rgb: Vec<u8>) -> Self {
        Self { width, height, rgb }
    }

    /// Check that the frame is well-formed and the device was ready
    ///
    /// A feed that has not produced frames yet reports zero dimensions;
    /// callers must treat that as a hard stop for the triggering action.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GlimpseError::CameraError(
                "video feed reports zero dimensions (device not ready)".to_string(),
            ));
        }
        let expected = self.width as usize * self.height as usize * 3;
        if self.rgb.len() != expected {
            return Err(GlimpseError::CameraError(format!(
                "frame buffer size mismatch: got {} bytes, expected {}",
                self.rgb.len(),
                expected
            )));
        }
        Ok(())
    }
}

/// Source of live video frames
///
/// Implemented by the camera backend and by synthetic feeds in tests.
pub trait VideoFeed {
    /// Grab the current frame from the feed
    ///
    /// Fails when the device is not ready or has stopped producing frames.
    fn grab(&mut self) -> Result<RawFrame>;

    /// Human-readable description of the feed for logs
    fn describe(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_well_formed_frame() {
        let frame = RawFrame::new(2, 2, vec![0u8; 12]);
        assert!(frame.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_dimensions() {
        let frame = RawFrame::new(0, 480, Vec::new());
        let err = frame.validate().unwrap_err();
        assert!(matches!(err, GlimpseError::CameraError(_)));
    }

    #[test]
    fn test_validate_rejects_short_buffer() {
        let frame = RawFrame::new(2, 2, vec![0u8; 11]);
        assert!(frame.validate().is_err());
    }
}
