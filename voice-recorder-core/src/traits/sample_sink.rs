use std::path::Path;

use crate::models::error::RecorderError;
use crate::models::format::RecordingFormat;

/// Encoding parameters handed to a `SinkFactory` when a track file is
/// opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingSpec {
    pub format: RecordingFormat,
    pub sample_rate: u32,
    /// Channel count; tracks are always mono.
    pub channels: u16,
}

impl EncodingSpec {
    pub fn mono(format: RecordingFormat, sample_rate: u32) -> Self {
        Self {
            format,
            sample_rate,
            channels: 1,
        }
    }
}

/// One open track file, owned by the worker thread.
///
/// The recorder decides *what* samples to send and *when*; the sink owns
/// the bitstream. Implementations must accept arbitrary write sizes.
pub trait SampleSink: Send {
    /// Append mono float samples to the track.
    fn write_samples(&mut self, samples: &[f32]) -> Result<(), RecorderError>;

    /// Best-effort tagging with the speaker's display label.
    ///
    /// Called at most once, before the first write. Containers without a
    /// native title field may ignore it.
    fn set_title(&mut self, _title: &str) {}

    /// Flush buffered data and patch any header fields that depend on
    /// the final sample count. Writing after finalize is an error.
    fn finalize(&mut self) -> Result<(), RecorderError>;
}

/// Opens `SampleSink`s — the seam to the codec layer.
///
/// The built-in `DiskSinkFactory` covers the encodings it can produce
/// natively; embedders with a Vorbis or FLAC encoder plug in their own
/// factory. Called only from the worker thread, so a factory never sees
/// two concurrent opens for the same track.
pub trait SinkFactory: Send + Sync {
    /// Open the track file at `path`.
    ///
    /// Encodings (or sample-rate combinations) this factory cannot
    /// produce are rejected here; the recorder treats that as a
    /// per-track open failure and leaves other tracks running.
    fn open(&self, path: &Path, spec: &EncodingSpec) -> Result<Box<dyn SampleSink>, RecorderError>;
}
