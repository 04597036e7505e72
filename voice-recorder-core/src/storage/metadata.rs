use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::models::error::RecorderError;
use crate::models::format::RecordingFormat;

/// Metadata stored as a JSON sidecar next to each finalized track file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackMetadata {
    pub id: String,
    /// Track key label, as substituted into the filename pattern.
    pub track: String,
    /// Speaker display name, when the source directory knew one.
    pub source_label: Option<String>,
    pub file_path: String,
    pub format: RecordingFormat,
    pub sample_rate: u32,
    pub samples_written: u64,
    pub duration_secs: f64,
    pub checksum: String,
    pub created_at: String,
}

impl TrackMetadata {
    pub fn new(
        track: String,
        source_label: Option<String>,
        file_path: &Path,
        format: RecordingFormat,
        sample_rate: u32,
        samples_written: u64,
        checksum: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            track,
            source_label,
            file_path: file_path.to_string_lossy().into_owned(),
            format,
            sample_rate,
            samples_written,
            duration_secs: samples_written as f64 / sample_rate as f64,
            checksum,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Write track metadata as a JSON sidecar file.
///
/// Creates `{track_path}.metadata.json` alongside the track.
pub fn write_metadata(metadata: &TrackMetadata, track_path: &Path) -> Result<(), RecorderError> {
    let metadata_path = sidecar_path(track_path);
    let json = serde_json::to_string_pretty(metadata)
        .map_err(|e| RecorderError::StorageError(format!("failed to serialize metadata: {}", e)))?;
    fs::write(&metadata_path, json)
        .map_err(|e| RecorderError::StorageError(format!("failed to write metadata: {}", e)))?;
    Ok(())
}

/// Read track metadata from a JSON sidecar file.
pub fn read_metadata(track_path: &Path) -> Result<TrackMetadata, RecorderError> {
    let metadata_path = sidecar_path(track_path);
    let json = fs::read_to_string(&metadata_path)
        .map_err(|e| RecorderError::StorageError(format!("failed to read metadata: {}", e)))?;
    let metadata: TrackMetadata = serde_json::from_str(&json)
        .map_err(|e| RecorderError::StorageError(format!("failed to parse metadata: {}", e)))?;
    Ok(metadata)
}

fn sidecar_path(track_path: &Path) -> std::path::PathBuf {
    let mut name = track_path.file_name().unwrap_or_default().to_os_string();
    name.push(".metadata.json");
    track_path.with_file_name(name)
}

/// Compute the SHA-256 hex digest of a finalized track file.
pub fn sha256_file(path: &Path) -> Result<String, RecorderError> {
    let data = fs::read(path)
        .map_err(|e| RecorderError::StorageError(format!("failed to read file for checksum: {}", e)))?;
    let digest = Sha256::digest(&data);
    Ok(hex_encode(&digest))
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
