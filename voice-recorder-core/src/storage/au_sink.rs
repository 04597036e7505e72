use std::fs::{self, File};
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;

use crate::models::error::RecorderError;
use crate::traits::sample_sink::{EncodingSpec, SampleSink};

/// Sun/NeXT AU file writer, 32-bit IEEE float samples.
///
/// All header fields and samples are big-endian.
///
/// Layout:
/// ```text
/// [0-3]    ".snd"
/// [4-7]    data offset (header + annotation length)
/// [8-11]   data size (placeholder until finalize)
/// [12-15]  encoding (6 = 32-bit IEEE float)
/// [16-19]  sample rate
/// [20-23]  channels
/// [24-..]  annotation (NUL-terminated track title, NUL padded)
/// ```
///
/// The header is written lazily on the first write so the title set via
/// `set_title` can land in the annotation field; the data size at offset
/// 8 is patched on finalize.
pub struct AuFileSink {
    writer: Option<BufWriter<File>>,
    sample_rate: u32,
    channels: u16,
    title: Option<String>,
    header_written: bool,
    data_bytes: u64,
}

/// Magic number at the start of every AU file.
const AU_MAGIC: [u8; 4] = *b".snd";

/// Encoding tag for 32-bit IEEE float samples.
const AU_ENCODING_FLOAT32: u32 = 6;

/// Fixed header length, excluding the annotation field.
const AU_BASE_HEADER_LEN: usize = 24;

/// Data-size value meaning "unknown"; replaced with the real size when
/// the sink is finalized.
const AU_SIZE_UNKNOWN: u32 = 0xFFFF_FFFF;

impl AuFileSink {
    pub fn create(path: &Path, spec: &EncodingSpec) -> Result<Self, RecorderError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| RecorderError::StorageError(format!("failed to create directory: {}", e)))?;
        }

        let file = File::create(path)
            .map_err(|e| RecorderError::StorageError(format!("failed to create file: {}", e)))?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            title: None,
            header_written: false,
            data_bytes: 0,
        })
    }

    fn write_header(&mut self) -> Result<(), RecorderError> {
        if self.header_written {
            return Ok(());
        }

        // NUL-terminated annotation, padded so the data offset stays
        // 8-byte aligned.
        let mut annotation: Vec<u8> = self.title.as_deref().unwrap_or("").as_bytes().to_vec();
        annotation.push(0);
        while (AU_BASE_HEADER_LEN + annotation.len()) % 8 != 0 {
            annotation.push(0);
        }

        let sample_rate = self.sample_rate;
        let channels = self.channels as u32;
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| RecorderError::StorageError("au sink already finalized".into()))?;

        let data_offset = (AU_BASE_HEADER_LEN + annotation.len()) as u32;
        let mut write = |bytes: &[u8]| {
            writer
                .write_all(bytes)
                .map_err(|e| RecorderError::StorageError(format!("au header write failed: {}", e)))
        };

        write(&AU_MAGIC)?;
        write(&data_offset.to_be_bytes())?;
        write(&AU_SIZE_UNKNOWN.to_be_bytes())?;
        write(&AU_ENCODING_FLOAT32.to_be_bytes())?;
        write(&sample_rate.to_be_bytes())?;
        write(&channels.to_be_bytes())?;
        write(&annotation)?;

        self.header_written = true;
        Ok(())
    }
}

impl SampleSink for AuFileSink {
    fn write_samples(&mut self, samples: &[f32]) -> Result<(), RecorderError> {
        self.write_header()?;

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| RecorderError::StorageError("au sink already finalized".into()))?;

        for &sample in samples {
            writer
                .write_all(&sample.to_be_bytes())
                .map_err(|e| RecorderError::StorageError(format!("au write failed: {}", e)))?;
        }
        self.data_bytes += samples.len() as u64 * 4;
        Ok(())
    }

    fn set_title(&mut self, title: &str) {
        // Only effective before the header is out; later calls are a
        // no-op, matching the best-effort tagging contract.
        if !self.header_written {
            self.title = Some(title.to_string());
        }
    }

    fn finalize(&mut self) -> Result<(), RecorderError> {
        if self.writer.is_none() {
            return Ok(());
        }
        self.write_header()?;

        let writer = self.writer.take().expect("checked above");
        let mut file = writer
            .into_inner()
            .map_err(|e| RecorderError::StorageError(format!("au flush failed: {}", e)))?;

        // Patch the data size at offset 8.
        file.seek(SeekFrom::Start(8))
            .map_err(|e| RecorderError::StorageError(format!("au finalize failed: {}", e)))?;
        file.write_all(&(self.data_bytes as u32).to_be_bytes())
            .map_err(|e| RecorderError::StorageError(format!("au finalize failed: {}", e)))?;
        file.flush()
            .map_err(|e| RecorderError::StorageError(format!("au finalize failed: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::format::RecordingFormat;
    use std::path::PathBuf;

    fn temp_au(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("voice_recorder_au_{}_{}.au", name, uuid::Uuid::new_v4()))
    }

    fn be_u32(bytes: &[u8], offset: usize) -> u32 {
        u32::from_be_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
    }

    #[test]
    fn header_layout() {
        let path = temp_au("header");
        let spec = EncodingSpec::mono(RecordingFormat::AuFloat, 48000);

        let mut sink = AuFileSink::create(&path, &spec).unwrap();
        sink.write_samples(&[0.25, -0.25]).unwrap();
        sink.finalize().unwrap();

        let data = std::fs::read(&path).unwrap();
        assert_eq!(&data[0..4], b".snd");

        let data_offset = be_u32(&data, 4);
        assert_eq!(data_offset % 8, 0);
        assert!(data_offset as usize >= AU_BASE_HEADER_LEN);

        assert_eq!(be_u32(&data, 8), 8); // two float samples
        assert_eq!(be_u32(&data, 12), AU_ENCODING_FLOAT32);
        assert_eq!(be_u32(&data, 16), 48000);
        assert_eq!(be_u32(&data, 20), 1);

        assert_eq!(data.len(), data_offset as usize + 8);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn samples_are_big_endian_floats() {
        let path = temp_au("samples");
        let spec = EncodingSpec::mono(RecordingFormat::AuFloat, 48000);

        let mut sink = AuFileSink::create(&path, &spec).unwrap();
        sink.write_samples(&[0.5]).unwrap();
        sink.finalize().unwrap();

        let data = std::fs::read(&path).unwrap();
        let data_offset = be_u32(&data, 4) as usize;
        let sample = f32::from_be_bytes([
            data[data_offset],
            data[data_offset + 1],
            data[data_offset + 2],
            data[data_offset + 3],
        ]);
        assert_eq!(sample, 0.5);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn title_lands_in_annotation() {
        let path = temp_au("title");
        let spec = EncodingSpec::mono(RecordingFormat::AuFloat, 48000);

        let mut sink = AuFileSink::create(&path, &spec).unwrap();
        sink.set_title("alice");
        sink.write_samples(&[0.0]).unwrap();
        sink.finalize().unwrap();

        let data = std::fs::read(&path).unwrap();
        let data_offset = be_u32(&data, 4) as usize;
        let annotation = &data[AU_BASE_HEADER_LEN..data_offset];
        assert!(annotation.starts_with(b"alice\0"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn finalize_without_writes_produces_empty_valid_file() {
        let path = temp_au("empty");
        let spec = EncodingSpec::mono(RecordingFormat::AuFloat, 16000);

        let mut sink = AuFileSink::create(&path, &spec).unwrap();
        sink.finalize().unwrap();

        let data = std::fs::read(&path).unwrap();
        assert_eq!(&data[0..4], b".snd");
        assert_eq!(be_u32(&data, 8), 0);
        assert_eq!(be_u32(&data, 16), 16000);

        std::fs::remove_file(&path).ok();
    }
}
