use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use crate::models::error::RecorderError;
use crate::traits::sample_sink::{EncodingSpec, SampleSink};

/// Full-scale value for 24-bit signed PCM.
const PCM24_SCALE: f32 = 8_388_607.0;

/// RIFF/WAVE sink writing mono 24-bit integer PCM via `hound`.
///
/// Incoming floats are clamped to [-1.0, 1.0] and scaled; the RIFF size
/// fields are patched when the writer is finalized.
pub struct WavFileSink {
    writer: Option<hound::WavWriter<BufWriter<File>>>,
}

impl WavFileSink {
    pub fn create(path: &Path, spec: &EncodingSpec) -> Result<Self, RecorderError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| RecorderError::StorageError(format!("failed to create directory: {}", e)))?;
        }

        let wav_spec = hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: 24,
            sample_format: hound::SampleFormat::Int,
        };

        let writer = hound::WavWriter::create(path, wav_spec)
            .map_err(|e| RecorderError::EncodingFailed(format!("failed to create wav writer: {}", e)))?;

        Ok(Self {
            writer: Some(writer),
        })
    }
}

impl SampleSink for WavFileSink {
    fn write_samples(&mut self, samples: &[f32]) -> Result<(), RecorderError> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| RecorderError::StorageError("wav sink already finalized".into()))?;

        for &sample in samples {
            let value = (sample.clamp(-1.0, 1.0) * PCM24_SCALE) as i32;
            writer
                .write_sample(value)
                .map_err(|e| RecorderError::EncodingFailed(format!("wav write failed: {}", e)))?;
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), RecorderError> {
        if let Some(writer) = self.writer.take() {
            writer
                .finalize()
                .map_err(|e| RecorderError::EncodingFailed(format!("wav finalize failed: {}", e)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::format::RecordingFormat;
    use approx::assert_abs_diff_eq;
    use std::path::PathBuf;

    fn temp_wav(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("voice_recorder_wav_{}_{}.wav", name, uuid::Uuid::new_v4()))
    }

    fn read_back(path: &Path) -> (hound::WavSpec, Vec<f32>) {
        let mut reader = hound::WavReader::open(path).unwrap();
        let spec = reader.spec();
        let samples = reader
            .samples::<i32>()
            .map(|s| s.unwrap() as f32 / PCM24_SCALE)
            .collect();
        (spec, samples)
    }

    #[test]
    fn writes_mono_24bit_pcm() {
        let path = temp_wav("mono");
        let spec = EncodingSpec::mono(RecordingFormat::WavPcm, 48000);

        let mut sink = WavFileSink::create(&path, &spec).unwrap();
        sink.write_samples(&[0.0, 0.5, -0.5, 1.0]).unwrap();
        sink.finalize().unwrap();

        let (wav_spec, samples) = read_back(&path);
        assert_eq!(wav_spec.channels, 1);
        assert_eq!(wav_spec.sample_rate, 48000);
        assert_eq!(wav_spec.bits_per_sample, 24);
        assert_eq!(wav_spec.sample_format, hound::SampleFormat::Int);

        assert_eq!(samples.len(), 4);
        assert_abs_diff_eq!(samples[0], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(samples[1], 0.5, epsilon = 1e-4);
        assert_abs_diff_eq!(samples[2], -0.5, epsilon = 1e-4);
        assert_abs_diff_eq!(samples[3], 1.0, epsilon = 1e-4);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn clamps_out_of_range_samples() {
        let path = temp_wav("clamp");
        let spec = EncodingSpec::mono(RecordingFormat::WavPcm, 48000);

        let mut sink = WavFileSink::create(&path, &spec).unwrap();
        sink.write_samples(&[2.0, -3.0]).unwrap();
        sink.finalize().unwrap();

        let (_, samples) = read_back(&path);
        assert_abs_diff_eq!(samples[0], 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(samples[1], -1.0, epsilon = 1e-4);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = std::env::temp_dir().join(format!("voice_recorder_wav_dirs_{}", uuid::Uuid::new_v4()));
        let path = dir.join("nested").join("track.wav");
        let spec = EncodingSpec::mono(RecordingFormat::WavPcm, 44100);

        let mut sink = WavFileSink::create(&path, &spec).unwrap();
        sink.write_samples(&[0.1]).unwrap();
        sink.finalize().unwrap();

        assert!(path.exists());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn write_after_finalize_is_an_error() {
        let path = temp_wav("after_finalize");
        let spec = EncodingSpec::mono(RecordingFormat::WavPcm, 48000);

        let mut sink = WavFileSink::create(&path, &spec).unwrap();
        sink.finalize().unwrap();
        assert!(sink.write_samples(&[0.1]).is_err());

        // Finalize stays idempotent.
        assert!(sink.finalize().is_ok());

        std::fs::remove_file(&path).ok();
    }
}
