//! In-memory WAV encoding for voice uploads

use crate::{GlimpseError, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::io::Cursor;

/// Encode mono f32 samples into an in-memory 16-bit WAV payload
pub fn encode_wav_mono(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec)
            .map_err(|e| GlimpseError::IOError(format!("Failed to create WAV writer: {}", e)))?;

        for &sample in samples {
            let sample_i16 = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer
                .write_sample(sample_i16)
                .map_err(|e| GlimpseError::IOError(format!("Failed to write sample: {}", e)))?;
        }

        writer
            .finalize()
            .map_err(|e| GlimpseError::IOError(format!("Failed to finalize WAV data: {}", e)))?;
    }

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavReader;

    #[test]
    fn test_encoded_wav_parses_back() {
        let samples: Vec<f32> = (0..480).map(|i| (i as f32 / 480.0) - 0.5).collect();
        let wav = encode_wav_mono(&samples, 48_000).unwrap();

        let reader = WavReader::new(Cursor::new(wav)).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 48_000);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(reader.len(), 480);
    }

    #[test]
    fn test_clipping_samples_are_clamped() {
        let wav = encode_wav_mono(&[2.0, -2.0], 16_000).unwrap();
        let mut reader = WavReader::new(Cursor::new(wav)).unwrap();
        let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(decoded[0], i16::MAX);
        // -1.0 * i16::MAX, not i16::MIN
        assert_eq!(decoded[1], -i16::MAX);
    }

    #[test]
    fn test_empty_input_is_valid_container() {
        let wav = encode_wav_mono(&[], 16_000).unwrap();
        let reader = WavReader::new(Cursor::new(wav)).unwrap();
        assert_eq!(reader.len(), 0);
    }
}
