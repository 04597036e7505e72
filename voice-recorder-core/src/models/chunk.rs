use std::fmt;
use std::sync::Arc;

/// Opaque identity of a remote speaker, assigned by the voice pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceId(pub u64);

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Routing key that selects the output track for a chunk.
///
/// With mixdown enabled every chunk maps to the single `Mixdown` key;
/// otherwise each distinct speaker gets its own `Source` key. Keys are
/// never reused across tracks within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKey {
    Mixdown,
    Source(SourceId),
}

impl TrackKey {
    /// Value substituted into the filename pattern.
    pub fn label(&self) -> String {
        match self {
            TrackKey::Mixdown => "mix".to_string(),
            TrackKey::Source(id) => id.to_string(),
        }
    }
}

/// One immutable buffer of mono float samples.
///
/// Ownership of the sample data is shared between the producer and the
/// recorder until the worker consumes the chunk; the buffer is never
/// mutated after construction.
#[derive(Debug, Clone)]
pub struct AudioChunk {
    source: Option<SourceId>,
    samples: Arc<[f32]>,
}

impl AudioChunk {
    pub fn new(source: Option<SourceId>, samples: Arc<[f32]>) -> Self {
        Self { source, samples }
    }

    /// The producing speaker, or `None` for a pre-mixed composite source.
    pub fn source(&self) -> Option<SourceId> {
        self.source
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Number of samples in the chunk.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
