//! Playback of server-synthesized speech

use crate::Result;

/// Sink for playing back synthesized speech audio
///
/// The payload is whatever the server serves at the TTS URL (MP3 in
/// practice); decoding is the sink's job.
pub trait SpeechSink {
    fn play(&mut self, audio: Vec<u8>) -> Result<()>;
}

#[cfg(feature = "audio-io")]
pub use rodio_sink::RodioSink;

#[cfg(feature = "audio-io")]
mod rodio_sink {
    use super::SpeechSink;
    use crate::{GlimpseError, Result};
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
    use std::io::Cursor;
    use tracing::{debug, info};

    /// Speech playback through the default output device
    ///
    /// The output stream is opened lazily on first playback so that a missing
    /// output device only fails the playback attempt, not app startup.
    pub struct RodioSink {
        stream: Option<(OutputStream, OutputStreamHandle)>,
    }

    impl RodioSink {
        pub fn new() -> Self {
            Self { stream: None }
        }

        fn handle(&mut self) -> Result<&OutputStreamHandle> {
            if self.stream.is_none() {
                let (stream, handle) = OutputStream::try_default().map_err(|e| {
                    GlimpseError::PlaybackError(format!("no output device: {}", e))
                })?;
                info!("Opened audio output stream");
                self.stream = Some((stream, handle));
            }
            match &self.stream {
                Some((_, handle)) => Ok(handle),
                None => Err(GlimpseError::PlaybackError(
                    "output stream unavailable".to_string(),
                )),
            }
        }
    }

    impl Default for RodioSink {
        fn default() -> Self {
            Self::new()
        }
    }

    impl SpeechSink for RodioSink {
        fn play(&mut self, audio: Vec<u8>) -> Result<()> {
            let byte_count = audio.len();
            let handle = self.handle()?;

            let source = Decoder::new(Cursor::new(audio))
                .map_err(|e| GlimpseError::PlaybackError(format!("decode failed: {}", e)))?;

            let sink = Sink::try_new(handle)
                .map_err(|e| GlimpseError::PlaybackError(format!("sink creation failed: {}", e)))?;

            sink.append(source);
            sink.detach();

            debug!("Playing {} bytes of speech audio", byte_count);
            Ok(())
        }
    }
}
