use std::path::PathBuf;

use super::format::RecordingFormat;

/// Placeholder in `filename_pattern` that is replaced with the track key.
pub const TRACK_PLACEHOLDER: &str = "{track}";

/// Configuration for a recording session.
///
/// Supplied before `start()` and fixed for the lifetime of the session;
/// the recorder never mutates it while running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecorderConfig {
    /// Sample rate of the incoming audio in Hz (default: 48000).
    pub sample_rate: u32,

    /// Output encoding (default: 24-bit PCM WAV).
    pub format: RecordingFormat,

    /// Output path pattern. Must contain `{track}`, which is replaced
    /// with the track key; may include directories, which are created
    /// on demand when a track file is opened.
    pub filename_pattern: String,

    /// Record all sources into a single combined track instead of one
    /// track per speaker.
    pub mixdown: bool,
}

impl RecorderConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_rate == 0 {
            return Err("sample rate must be positive".into());
        }
        if !self.filename_pattern.contains(TRACK_PLACEHOLDER) {
            return Err(format!(
                "filename pattern must contain the {} placeholder",
                TRACK_PLACEHOLDER
            ));
        }
        Ok(())
    }

    /// Resolve the output path for a track key label.
    pub fn track_path(&self, label: &str) -> PathBuf {
        PathBuf::from(self.filename_pattern.replacen(TRACK_PLACEHOLDER, label, 1))
    }
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            format: RecordingFormat::WavPcm,
            filename_pattern: format!("recording_{}.wav", TRACK_PLACEHOLDER),
            mixdown: false,
        }
    }
}
