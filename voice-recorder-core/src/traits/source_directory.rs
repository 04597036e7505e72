use crate::models::chunk::SourceId;

/// Display-name lookup for speaker identities.
///
/// Implemented by the voice pipeline; the recorder uses it to tag track
/// files and sidecar metadata. Called from the worker thread, not the
/// audio thread.
pub trait SourceDirectory: Send + Sync {
    /// Human-readable name for a source, if one is known.
    fn display_name(&self, source: SourceId) -> Option<String>;
}
