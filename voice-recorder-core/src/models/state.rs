/// Recorder lifecycle state machine.
///
/// State transitions:
/// ```text
/// idle → recording → stopped
/// ```
/// `Stopped` is terminal: a stopped recorder cannot be restarted, and a
/// new session always starts a fresh file set with a new recorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording,
    Stopped,
}

impl RecorderState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording)
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped)
    }
}
