use std::path::Path;

use crate::models::error::RecorderError;
use crate::models::format::RecordingFormat;
use crate::storage::au_sink::AuFileSink;
use crate::storage::wav_sink::WavFileSink;
use crate::traits::sample_sink::{EncodingSpec, SampleSink, SinkFactory};

/// Default on-disk codec selection.
///
/// Covers the encodings this crate can produce without an external
/// encoder. Vorbis and FLAC are rejected at open time; embedders that
/// link a codec library for them supply their own `SinkFactory`, and
/// the recorder handles the rejection as a per-track open failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskSinkFactory;

impl SinkFactory for DiskSinkFactory {
    fn open(&self, path: &Path, spec: &EncodingSpec) -> Result<Box<dyn SampleSink>, RecorderError> {
        match spec.format {
            RecordingFormat::WavPcm => Ok(Box::new(WavFileSink::create(path, spec)?)),
            RecordingFormat::AuFloat => Ok(Box::new(AuFileSink::create(path, spec)?)),
            RecordingFormat::OggVorbis | RecordingFormat::Flac => {
                Err(RecorderError::UnsupportedEncoding(format!(
                    "no built-in {} encoder",
                    spec.format.descriptor().codec
                )))
            }
        }
    }
}
