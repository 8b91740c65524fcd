//! Captured frames and the shared single-slot frame state

use crate::capture::feed::RawFrame;
use crate::{GlimpseError, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// JPEG quality used for frames sent to the inference server
const JPEG_QUALITY: u8 = 80;

/// An encoded still image snapshotted from the video feed
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// JPEG-encoded image bytes
    pub jpeg: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub captured_at: DateTime<Utc>,
}

impl CapturedFrame {
    /// Encode a raw RGB frame into a captured JPEG frame
    pub fn from_raw(raw: &RawFrame) -> Result<Self> {
        raw.validate()?;

        let mut jpeg = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY);
        encoder
            .encode(&raw.rgb, raw.width, raw.height, ExtendedColorType::Rgb8)
            .map_err(|e| GlimpseError::EncodeError(format!("JPEG encoding failed: {}", e)))?;

        debug!(
            "Encoded {}x{} frame to {} JPEG bytes",
            raw.width,
            raw.height,
            jpeg.len()
        );

        Ok(Self {
            jpeg,
            width: raw.width,
            height: raw.height,
            captured_at: Utc::now(),
        })
    }

    /// Base64 form of the JPEG bytes, as the wire format expects
    pub fn to_base64(&self) -> String {
        BASE64.encode(&self.jpeg)
    }
}

/// Single-slot holder for the most recent captured frame
///
/// All three request flows read this slot; the caption flow overwrites it on
/// every run, question flows fill it only when empty. The slot is owned
/// session state handed to each flow explicitly, and the stored frame is
/// never invalidated on staleness.
#[derive(Clone, Default)]
pub struct FrameSlot {
    inner: Arc<RwLock<Option<CapturedFrame>>>,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the slot with a fresh capture
    pub fn replace(&self, frame: CapturedFrame) {
        *self.inner.write() = Some(frame);
    }

    /// Clone out the most recent capture, if any
    pub fn latest(&self) -> Option<CapturedFrame> {
        self.inner.read().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_none()
    }

    /// Timestamp of the stored frame, for cheap change detection in the UI
    pub fn captured_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().as_ref().map(|f| f.captured_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;

    fn test_raw_frame() -> RawFrame {
        // 4x4 mid-gray frame
        RawFrame::new(4, 4, vec![128u8; 4 * 4 * 3])
    }

    #[test]
    fn test_encode_produces_jpeg() {
        let frame = CapturedFrame::from_raw(&test_raw_frame()).unwrap();
        assert!(!frame.jpeg.is_empty());
        // JPEG SOI marker
        assert_eq!(&frame.jpeg[..2], &[0xFF, 0xD8]);
        assert_eq!(frame.width, 4);
        assert_eq!(frame.height, 4);
    }

    #[test]
    fn test_encode_rejects_not_ready_feed() {
        let raw = RawFrame::new(0, 0, Vec::new());
        assert!(CapturedFrame::from_raw(&raw).is_err());
    }

    #[test]
    fn test_base64_roundtrip() {
        let frame = CapturedFrame::from_raw(&test_raw_frame()).unwrap();
        let encoded = frame.to_base64();
        assert!(!encoded.is_empty());
        let decoded = BASE64.decode(encoded).unwrap();
        assert_eq!(decoded, frame.jpeg);
    }

    #[test]
    fn test_slot_starts_empty() {
        let slot = FrameSlot::new();
        assert!(slot.is_empty());
        assert!(slot.latest().is_none());
        assert!(slot.captured_at().is_none());
    }

    #[test]
    fn test_slot_replace_overwrites() {
        let slot = FrameSlot::new();
        let first = CapturedFrame::from_raw(&test_raw_frame()).unwrap();
        slot.replace(first.clone());
        assert!(!slot.is_empty());

        let second = CapturedFrame::from_raw(&RawFrame::new(2, 2, vec![10u8; 12])).unwrap();
        slot.replace(second.clone());

        let latest = slot.latest().unwrap();
        assert_eq!(latest.width, 2);
        assert_eq!(latest.jpeg, second.jpeg);
    }

    #[test]
    fn test_slot_clones_share_state() {
        let slot = FrameSlot::new();
        let view = slot.clone();
        slot.replace(CapturedFrame::from_raw(&test_raw_frame()).unwrap());
        assert!(!view.is_empty());
    }
}
