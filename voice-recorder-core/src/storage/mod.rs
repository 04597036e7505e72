pub mod au_sink;
pub mod metadata;
pub mod sink_factory;
pub mod wav_sink;
