use std::path::PathBuf;

use crate::traits::sample_sink::SampleSink;

/// Per-track output state.
///
/// Registered (with no sink) from the submitting thread the moment the
/// first chunk for its key arrives; the sink itself is opened by the
/// worker when it first processes a chunk for the track. Exactly one
/// `TrackState` exists per key for the lifetime of a session.
pub(crate) struct TrackState {
    /// Lazily opened output sink. `None` until the worker processes the
    /// first chunk for the track, and again after finalization.
    pub sink: Option<Box<dyn SampleSink>>,

    /// Samples physically written to this track. Monotonic, and never
    /// ahead of the recorder's global sample cursor.
    pub written_samples: u64,

    /// Set permanently after an open or write failure; the track
    /// receives no further writes, other tracks are unaffected.
    pub failed: bool,

    /// Resolved output path, captured when the sink is opened.
    pub path: Option<PathBuf>,

    /// Speaker display label, captured when the sink is opened.
    pub label: Option<String>,
}

impl TrackState {
    pub fn new() -> Self {
        Self {
            sink: None,
            written_samples: 0,
            failed: false,
            path: None,
            label: None,
        }
    }
}
