//! # voice-recorder-core
//!
//! Platform-agnostic multi-track voice recording core.
//!
//! Accepts short mono audio chunks from any number of producer threads
//! (one live source per remote speaker, or a single combined source)
//! and persists them to time-aligned per-track files from a background
//! worker, without ever blocking the real-time audio path. Each track
//! is padded with silence up to the shared sample cursor before a chunk
//! lands, so sample offset N means the same session time in every file.
//!
//! The capture pipeline, the settings UI, and the codec libraries for
//! compressed encodings are collaborators behind traits; this crate
//! decides *what* samples to write and *when*.
//!
//! ## Architecture
//!
//! ```text
//! voice-recorder-core (this crate)
//! ├── traits/       ← SampleSink, SinkFactory (codec seam), SourceDirectory
//! ├── models/       ← RecorderError, RecorderConfig, RecordingFormat, AudioChunk, ...
//! ├── session/      ← VoiceRecorder (queue + worker loop), per-track state
//! └── storage/      ← built-in WAV/AU sinks, sidecar metadata
//! ```

pub mod models;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::chunk::{AudioChunk, SourceId, TrackKey};
pub use models::config::{RecorderConfig, TRACK_PLACEHOLDER};
pub use models::error::RecorderError;
pub use models::format::{FormatDescriptor, RecordingFormat};
pub use models::state::RecorderState;
pub use session::recorder::VoiceRecorder;
pub use storage::au_sink::AuFileSink;
pub use storage::metadata::{read_metadata, write_metadata, TrackMetadata};
pub use storage::sink_factory::DiskSinkFactory;
pub use storage::wav_sink::WavFileSink;
pub use traits::sample_sink::{EncodingSpec, SampleSink, SinkFactory};
pub use traits::source_directory::SourceDirectory;
