pub mod sample_sink;
pub mod source_directory;
