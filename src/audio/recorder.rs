//! Voice recording session
//!
//! While the voice toggle is active, the capture device pushes sample
//! fragments into a channel; the session accumulates them in arrival order
//! and assembles a single WAV payload on stop. The session exists only
//! between start and stop and is consumed by `finalize`.

use crate::audio::wav::encode_wav_mono;
use crate::Result;
use crossbeam_channel::Sender;

/// Microphone capture device
///
/// Implementations deliver mono f32 sample fragments (range -1.0..1.0) at
/// `sample_rate()` into the channel handed to `start`. Stereo devices are
/// downmixed before delivery.
pub trait AudioCapture {
    /// Begin capturing; fragments flow into `fragments` until `stop`
    fn start(&mut self, fragments: Sender<Vec<f32>>) -> Result<()>;

    /// Stop capturing and release the device stream
    fn stop(&mut self) -> Result<()>;

    /// Sample rate of the delivered fragments
    fn sample_rate(&self) -> u32;
}

/// Accumulating state of one active voice recording
#[derive(Debug)]
pub struct RecordingSession {
    fragments: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl RecordingSession {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            fragments: Vec::new(),
            sample_rate,
        }
    }

    /// Append one captured fragment, preserving arrival order
    pub fn push_fragment(&mut self, fragment: Vec<f32>) {
        if !fragment.is_empty() {
            self.fragments.push(fragment);
        }
    }

    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    pub fn sample_count(&self) -> usize {
        self.fragments.iter().map(|f| f.len()).sum()
    }

    pub fn duration_seconds(&self) -> f32 {
        self.sample_count() as f32 / self.sample_rate as f32
    }

    /// Assemble all fragments into a single WAV payload, consuming the session
    pub fn finalize(self) -> Result<VoicePayload> {
        let sample_count = self.sample_count();
        let mut samples = Vec::with_capacity(sample_count);
        for fragment in self.fragments {
            samples.extend_from_slice(&fragment);
        }

        let wav = encode_wav_mono(&samples, self.sample_rate)?;

        Ok(VoicePayload {
            wav,
            sample_count,
            sample_rate: self.sample_rate,
        })
    }
}

/// A finalized voice recording ready for upload
#[derive(Debug, Clone)]
pub struct VoicePayload {
    /// WAV-encoded audio (mono, 16-bit)
    pub wav: Vec<u8>,
    pub sample_count: usize,
    pub sample_rate: u32,
}

impl VoicePayload {
    pub fn is_silent(&self) -> bool {
        self.sample_count == 0
    }

    pub fn duration_seconds(&self) -> f32 {
        self.sample_count as f32 / self.sample_rate as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_accumulates_in_order() {
        let mut session = RecordingSession::new(16_000);
        session.push_fragment(vec![0.1, 0.2]);
        session.push_fragment(vec![0.3]);
        session.push_fragment(Vec::new()); // dropped
        assert_eq!(session.fragment_count(), 2);
        assert_eq!(session.sample_count(), 3);
    }

    #[test]
    fn test_duration() {
        let mut session = RecordingSession::new(16_000);
        session.push_fragment(vec![0.0; 16_000]);
        assert!((session.duration_seconds() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_finalize_concatenates_fragments() {
        let mut session = RecordingSession::new(8_000);
        session.push_fragment(vec![0.5; 10]);
        session.push_fragment(vec![-0.5; 6]);

        let payload = session.finalize().unwrap();
        assert_eq!(payload.sample_count, 16);
        assert_eq!(payload.sample_rate, 8_000);
        assert!(!payload.wav.is_empty());
        assert!(!payload.is_silent());
    }

    #[test]
    fn test_empty_session_finalizes_silent() {
        let payload = RecordingSession::new(16_000).finalize().unwrap();
        assert!(payload.is_silent());
        // Still a valid WAV container, just with no samples
        assert!(!payload.wav.is_empty());
    }
}
