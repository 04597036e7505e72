use thiserror::Error;

/// Errors that can occur while recording.
///
/// I/O failures never cross the submission boundary: the worker thread
/// logs them and marks the affected track as failed, and other tracks
/// keep recording. These variants surface through the lifecycle calls
/// (`configure`, `start`) and through the sink layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecorderError {
    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("encoding failed: {0}")]
    EncodingFailed(String),

    #[error("storage error: {0}")]
    StorageError(String),
}
