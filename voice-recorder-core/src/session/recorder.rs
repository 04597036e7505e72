use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use parking_lot::{Condvar, Mutex};

use crate::models::chunk::{AudioChunk, SourceId, TrackKey};
use crate::models::config::RecorderConfig;
use crate::models::error::RecorderError;
use crate::models::state::RecorderState;
use crate::session::track::TrackState;
use crate::storage::metadata::{self, TrackMetadata};
use crate::storage::sink_factory::DiskSinkFactory;
use crate::traits::sample_sink::{EncodingSpec, SinkFactory};
use crate::traits::source_directory::SourceDirectory;

/// Silence is written in fixed blocks of this many zero samples, plus
/// one final partial block for the remainder.
const SILENCE_BLOCK: usize = 1024;

/// One entry in the pending queue.
///
/// Silence markers travel through the same queue as audio chunks so
/// that every advance of the global sample cursor is serialized through
/// the worker thread.
enum WorkItem {
    Audio { key: TrackKey, chunk: AudioChunk },
    Silence { samples: u64 },
}

/// Pending work and track registration, guarded by a single mutex
/// shared between producers and the worker.
struct PendingQueue {
    items: VecDeque<WorkItem>,
    tracks: HashMap<TrackKey, Arc<Mutex<TrackState>>>,
}

/// State shared with the worker thread.
struct RecorderShared {
    queue: Mutex<PendingQueue>,
    wake: Condvar,

    /// Cleared by `stop()`. The worker observes it only once the queue
    /// is fully drained, so queued chunks are always written.
    running: AtomicBool,

    /// Global sample cursor: samples elapsed on the shared session
    /// timeline since recording began. Advanced only by the worker.
    recorded_samples: AtomicU64,
}

/// Asynchronous multi-track voice recorder.
///
/// Producers on any thread hand short mono chunks to `submit`; a single
/// background worker drains the queue and appends the samples to one
/// file per track, padding each track with silence up to the shared
/// sample cursor first:
///
/// ```text
/// [voice pipeline] → submit() → [pending queue] → worker → [SampleSink per track]
///                                                    │
///                                              silence padding
///                                          (aligns every track to the
///                                           shared sample cursor)
/// ```
///
/// `submit` never blocks on I/O; its only blocking is the queue mutex,
/// held for an append. One recorder drives one session: after `stop()`
/// the instance is finished and a new session needs a new recorder.
pub struct VoiceRecorder {
    config: RecorderConfig,
    shared: Arc<RecorderShared>,
    state: Mutex<RecorderState>,
    sink_factory: Arc<dyn SinkFactory>,
    source_names: Option<Arc<dyn SourceDirectory>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl VoiceRecorder {
    /// Recorder with the built-in on-disk codec selection.
    pub fn new() -> Self {
        Self::with_sink_factory(Arc::new(DiskSinkFactory))
    }

    /// Recorder with a custom codec factory, e.g. an embedder-supplied
    /// Vorbis or FLAC encoder.
    pub fn with_sink_factory(sink_factory: Arc<dyn SinkFactory>) -> Self {
        Self {
            config: RecorderConfig::default(),
            shared: Arc::new(RecorderShared {
                queue: Mutex::new(PendingQueue {
                    items: VecDeque::new(),
                    tracks: HashMap::new(),
                }),
                wake: Condvar::new(),
                running: AtomicBool::new(false),
                recorded_samples: AtomicU64::new(0),
            }),
            state: Mutex::new(RecorderState::Idle),
            sink_factory,
            source_names: None,
            worker: None,
        }
    }

    /// Display-name lookup used to tag track files and metadata.
    pub fn set_source_directory(&mut self, directory: Arc<dyn SourceDirectory>) {
        self.source_names = Some(directory);
    }

    /// Apply configuration. Only allowed before `start()`.
    pub fn configure(&mut self, config: RecorderConfig) -> Result<(), RecorderError> {
        if !self.state.lock().is_idle() {
            return Err(RecorderError::ConfigurationFailed(
                "can only configure before start".into(),
            ));
        }
        config.validate().map_err(RecorderError::ConfigurationFailed)?;
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    pub fn state(&self) -> RecorderState {
        *self.state.lock()
    }

    pub fn is_recording(&self) -> bool {
        self.shared.running.load(Ordering::SeqCst)
    }

    /// Samples elapsed on the shared session timeline so far. Readable
    /// at any time, from any thread.
    pub fn recorded_samples(&self) -> u64 {
        self.shared.recorded_samples.load(Ordering::SeqCst)
    }

    /// Start the session and its worker thread.
    ///
    /// Requires a valid configuration and an idle recorder; a stopped
    /// recorder cannot be restarted.
    pub fn start(&mut self) -> Result<(), RecorderError> {
        {
            let state = self.state.lock();
            match *state {
                RecorderState::Idle => {}
                RecorderState::Recording => {
                    return Err(RecorderError::ConfigurationFailed("already recording".into()))
                }
                RecorderState::Stopped => {
                    return Err(RecorderError::ConfigurationFailed(
                        "a stopped recorder cannot be restarted".into(),
                    ))
                }
            }
        }
        self.config.validate().map_err(RecorderError::ConfigurationFailed)?;

        self.shared.running.store(true, Ordering::SeqCst);

        let worker = Worker {
            shared: Arc::clone(&self.shared),
            config: self.config.clone(),
            sink_factory: Arc::clone(&self.sink_factory),
            source_names: self.source_names.clone(),
        };
        let handle = thread::Builder::new()
            .name("recording-worker".into())
            .spawn(move || worker.run())
            .map_err(|e| {
                self.shared.running.store(false, Ordering::SeqCst);
                RecorderError::ConfigurationFailed(format!("failed to spawn worker: {}", e))
            })?;
        self.worker = Some(handle);
        *self.state.lock() = RecorderState::Recording;

        log::info!(
            "recording started to {} @ {} Hz in {} format",
            self.config.filename_pattern,
            self.config.sample_rate,
            self.config.format.description()
        );
        Ok(())
    }

    /// Request shutdown and wake the worker.
    ///
    /// Idempotent; a no-op before `start()`. Chunks already queued are
    /// still written before the worker terminates. Dropping the
    /// recorder waits for that to happen.
    pub fn stop(&self) {
        {
            let mut state = self.state.lock();
            if !state.is_recording() {
                return;
            }
            *state = RecorderState::Stopped;
        }
        self.shared.running.store(false, Ordering::SeqCst);
        self.shared.wake.notify_all();
    }

    /// Submit one chunk of mono samples for recording.
    ///
    /// Never blocks on I/O. Preconditions (programming-contract, not
    /// runtime errors): the recorder is running, and `source` is absent
    /// exactly when mixdown is enabled. Violations assert in debug
    /// builds and drop the chunk with a warning in release builds.
    pub fn submit(&self, source: Option<SourceId>, samples: Arc<[f32]>) {
        debug_assert!(self.is_recording(), "submit requires an active recording session");
        if !self.is_recording() {
            log::warn!("dropping chunk submitted while not recording");
            return;
        }

        let key = match (self.config.mixdown, source) {
            (true, None) => TrackKey::Mixdown,
            (false, Some(id)) => TrackKey::Source(id),
            (true, Some(_)) | (false, None) => {
                debug_assert!(
                    false,
                    "source identity must be present exactly when mixdown is disabled"
                );
                log::warn!("dropping chunk with mismatched source identity");
                return;
            }
        };

        {
            let mut queue = self.shared.queue.lock();
            queue.items.push_back(WorkItem::Audio {
                key,
                chunk: AudioChunk::new(source, samples),
            });
            queue
                .tracks
                .entry(key)
                .or_insert_with(|| Arc::new(Mutex::new(TrackState::new())));
        }
        self.shared.wake.notify_one();
    }

    /// Advance the shared timeline by `samples` without writing to any
    /// track, for intervals known to contain no audio from anyone.
    ///
    /// The marker travels through the pending queue, so the advance is
    /// serialized with chunk writes by the worker.
    pub fn submit_silence(&self, samples: u64) {
        debug_assert!(self.is_recording(), "submit_silence requires an active recording session");
        if !self.is_recording() {
            log::warn!("dropping silence advance while not recording");
            return;
        }
        if samples == 0 {
            return;
        }

        self.shared.queue.lock().items.push_back(WorkItem::Silence { samples });
        self.shared.wake.notify_one();
    }
}

impl Default for VoiceRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for VoiceRecorder {
    /// Stop and wait for the worker, so no sink is ever released while
    /// a write could still be in flight.
    fn drop(&mut self) {
        self.stop();
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

/// Context owned by the background worker thread.
struct Worker {
    shared: Arc<RecorderShared>,
    config: RecorderConfig,
    sink_factory: Arc<dyn SinkFactory>,
    source_names: Option<Arc<dyn SourceDirectory>>,
}

impl Worker {
    fn run(self) {
        loop {
            // Block until there is work or a stop request. The queue
            // lock is held only for the pop, never across file I/O.
            let item = {
                let mut queue = self.shared.queue.lock();
                loop {
                    if let Some(item) = queue.items.pop_front() {
                        break Some(item);
                    }
                    if !self.shared.running.load(Ordering::SeqCst) {
                        break None;
                    }
                    self.shared.wake.wait(&mut queue);
                }
            };

            match item {
                Some(WorkItem::Audio { key, chunk }) => self.write_chunk(key, &chunk),
                Some(WorkItem::Silence { samples }) => {
                    self.shared.recorded_samples.fetch_add(samples, Ordering::SeqCst);
                }
                None => break,
            }
        }

        self.finalize_tracks();
        log::info!(
            "recording stopped after {} samples",
            self.shared.recorded_samples.load(Ordering::SeqCst)
        );
    }

    fn write_chunk(&self, key: TrackKey, chunk: &AudioChunk) {
        let track = {
            let queue = self.shared.queue.lock();
            match queue.tracks.get(&key) {
                Some(track) => Arc::clone(track),
                None => {
                    // Registration happens under the queue lock before
                    // the chunk is queued, so this cannot be reached.
                    debug_assert!(false, "chunk queued for unregistered track");
                    return;
                }
            }
        };
        let mut track = track.lock();
        let cursor = self.shared.recorded_samples.load(Ordering::SeqCst);

        if !track.failed && track.sink.is_none() {
            if let Err(e) = self.open_sink(key, &mut track) {
                log::error!("failed to open track {}: {}", key.label(), e);
                track.failed = true;
            }
        }

        if !track.failed {
            if let Err(e) = Self::pad_and_write(&mut track, cursor, chunk.samples()) {
                log::error!("write failed on track {}: {}", key.label(), e);
                track.failed = true;
            }
        }

        // The chunk represents elapsed session time even when its track
        // has failed; later tracks still align against the cursor.
        let new_cursor = cursor + chunk.len() as u64;
        self.shared.recorded_samples.store(new_cursor, Ordering::SeqCst);
        if !track.failed {
            track.written_samples = new_cursor;
        }
    }

    /// Open the track's sink via the configured filename pattern and
    /// tag it with the speaker's display label.
    fn open_sink(&self, key: TrackKey, track: &mut TrackState) -> Result<(), RecorderError> {
        let label = key.label();
        let path = self.config.track_path(&label);
        let spec = EncodingSpec::mono(self.config.format, self.config.sample_rate);
        let mut sink = self.sink_factory.open(&path, &spec)?;

        let display = match key {
            TrackKey::Source(id) => self
                .source_names
                .as_ref()
                .and_then(|names| names.display_name(id)),
            TrackKey::Mixdown => None,
        };
        if let Some(ref name) = display {
            sink.set_title(name);
        }

        log::info!("opened track {} at {}", label, path.display());
        track.sink = Some(sink);
        track.path = Some(path);
        track.label = display;
        Ok(())
    }

    /// Write zero samples from the track's last position up to
    /// `cursor`, in full blocks plus one partial block, then append the
    /// chunk. Keeps sample offset N meaning the same session time in
    /// every track file.
    fn pad_and_write(track: &mut TrackState, cursor: u64, samples: &[f32]) -> Result<(), RecorderError> {
        let Some(sink) = track.sink.as_mut() else {
            return Ok(());
        };

        if track.written_samples < cursor {
            let gap = cursor - track.written_samples;
            let block = [0.0f32; SILENCE_BLOCK];
            let full_blocks = gap / SILENCE_BLOCK as u64;
            let remainder = (gap % SILENCE_BLOCK as u64) as usize;

            for _ in 0..full_blocks {
                sink.write_samples(&block)?;
            }
            if remainder > 0 {
                sink.write_samples(&block[..remainder])?;
            }
            track.written_samples = cursor;
        }

        sink.write_samples(samples)
    }

    /// Finalize every open sink and write the sidecar metadata. Runs
    /// once, after the queue has fully drained.
    fn finalize_tracks(&self) {
        let tracks: Vec<(TrackKey, Arc<Mutex<TrackState>>)> = {
            let queue = self.shared.queue.lock();
            queue
                .tracks
                .iter()
                .map(|(key, track)| (*key, Arc::clone(track)))
                .collect()
        };

        for (key, track) in tracks {
            let mut track = track.lock();
            let Some(mut sink) = track.sink.take() else {
                continue;
            };
            if let Err(e) = sink.finalize() {
                log::error!("failed to finalize track {}: {}", key.label(), e);
                track.failed = true;
                continue;
            }
            let Some(path) = track.path.clone() else {
                continue;
            };
            match metadata::sha256_file(&path) {
                Ok(checksum) => {
                    let meta = TrackMetadata::new(
                        key.label(),
                        track.label.clone(),
                        &path,
                        self.config.format,
                        self.config.sample_rate,
                        track.written_samples,
                        checksum,
                    );
                    if let Err(e) = metadata::write_metadata(&meta, &path) {
                        log::error!("failed to write metadata for track {}: {}", key.label(), e);
                    }
                }
                Err(e) => log::error!("failed to checksum track {}: {}", key.label(), e),
            }
        }
    }
}
