//! Camera frame capture
//!
//! A `VideoFeed` hands out raw RGB frames; the encoder turns them into the
//! JPEG payload the inference API expects; the `FrameSlot` keeps the most
//! recent capture so question flows can reuse it without re-grabbing.

pub mod feed;
pub mod frame;

#[cfg(feature = "camera-io")]
pub mod camera;

pub use feed::{RawFrame, VideoFeed};
pub use frame::{CapturedFrame, FrameSlot};

#[cfg(feature = "camera-io")]
pub use camera::CameraFeed;
