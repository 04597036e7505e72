use serde::{Deserialize, Serialize};

/// Output encoding for recorded tracks.
///
/// A closed set, fixed before a session starts. The recorder decides
/// *what* samples to write and *when*; the bitstream itself is produced
/// by the `SampleSink` selected through this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingFormat {
    /// Uncompressed RIFF/WAVE, 24-bit PCM.
    WavPcm,
    /// Vorbis in an Ogg container, lossy.
    OggVorbis,
    /// Uncompressed Sun/NeXT AU, 32-bit float.
    AuFloat,
    /// FLAC, lossless compressed.
    Flac,
}

/// Encoding parameters resolved from a `RecordingFormat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatDescriptor {
    pub container: &'static str,
    pub codec: &'static str,
    pub extension: &'static str,
    pub description: &'static str,
}

impl RecordingFormat {
    /// All supported formats, in presentation order.
    pub const ALL: [RecordingFormat; 4] = [
        RecordingFormat::WavPcm,
        RecordingFormat::OggVorbis,
        RecordingFormat::AuFloat,
        RecordingFormat::Flac,
    ];

    /// Resolve the full descriptor for this format.
    ///
    /// Pure lookup with no session-state dependency; usable at any time,
    /// e.g. to populate a settings UI before a recorder exists.
    pub fn descriptor(self) -> FormatDescriptor {
        match self {
            RecordingFormat::WavPcm => FormatDescriptor {
                container: "RIFF/WAVE",
                codec: "24-bit PCM",
                extension: "wav",
                description: ".wav - Uncompressed",
            },
            RecordingFormat::OggVorbis => FormatDescriptor {
                container: "Ogg",
                codec: "Vorbis",
                extension: "ogg",
                description: ".ogg (Vorbis) - Compressed",
            },
            RecordingFormat::AuFloat => FormatDescriptor {
                container: "AU",
                codec: "32-bit float PCM",
                extension: "au",
                description: ".au - Uncompressed",
            },
            RecordingFormat::Flac => FormatDescriptor {
                container: "FLAC",
                codec: "24-bit PCM",
                extension: "flac",
                description: ".flac - Lossless compressed",
            },
        }
    }

    /// Human-readable description shown in format pickers.
    pub fn description(self) -> &'static str {
        self.descriptor().description
    }

    /// Default filename extension, without the leading dot.
    pub fn default_extension(self) -> &'static str {
        self.descriptor().extension
    }
}
