//! In-memory collaborators for exercising the coordinator without hardware
//!
//! Each double shares its observations through a probe handle the test keeps
//! after the double itself has been moved into the coordinator.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use crate::config::PendingOutput;
use crate::device::{DeviceControl, PhotoOutput};
use crate::errors::CameraError;
use crate::muxer::{FinishCallback, Muxer, MuxerFactory};
use crate::types::{CameraPosition, TrackKind};

/// Everything the in-memory muxer observed
#[derive(Debug, Clone, Default)]
pub struct MuxerLog {
    /// Number of writers opened by the factory
    pub opened: u32,
    /// Timeline anchor passed to `start_session`, if any
    pub session_start: Option<f64>,
    /// Appended samples as (track, pts, payload length)
    pub appends: Vec<(TrackKind, f64, usize)>,
    /// Whether `finish` has completed
    pub finished: bool,
}

struct MuxerShared {
    log: Mutex<MuxerLog>,
    audio_ready: AtomicBool,
    video_ready: AtomicBool,
    fail_open: AtomicBool,
    pending_finish: Mutex<Option<FinishCallback>>,
}

/// Inspection and control handle for [`MemoryMuxerFactory`]
#[derive(Clone)]
pub struct MuxerProbe {
    shared: Arc<MuxerShared>,
}

impl MuxerProbe {
    /// Snapshot of the muxer log
    pub fn log(&self) -> MuxerLog {
        self.shared.log.lock().expect("lock poisoned").clone()
    }

    /// Script a track's readiness signal
    pub fn set_ready(&self, track: TrackKind, ready: bool) {
        match track {
            TrackKind::Audio => self.shared.audio_ready.store(ready, Ordering::Relaxed),
            TrackKind::Video => self.shared.video_ready.store(ready, Ordering::Relaxed),
        }
    }

    /// Make the next factory open fail with `WriterInitError`
    pub fn set_fail_open(&self, fail: bool) {
        self.shared.fail_open.store(fail, Ordering::Relaxed);
    }

    /// Run a finish callback held back by a deferred-finish factory.
    /// Returns false if no finish is pending.
    pub fn complete_finish(&self) -> bool {
        let callback = self
            .shared
            .pending_finish
            .lock()
            .expect("lock poisoned")
            .take();
        match callback {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }
}

/// Opens [`MemoryMuxer`] writers that record every interaction
pub struct MemoryMuxerFactory {
    shared: Arc<MuxerShared>,
    defer_finish: bool,
}

impl MemoryMuxerFactory {
    /// Factory whose muxers are always ready and finish synchronously
    pub fn new() -> Self {
        Self {
            shared: Arc::new(MuxerShared {
                log: Mutex::new(MuxerLog::default()),
                audio_ready: AtomicBool::new(true),
                video_ready: AtomicBool::new(true),
                fail_open: AtomicBool::new(false),
                pending_finish: Mutex::new(None),
            }),
            defer_finish: false,
        }
    }

    /// Hold finish callbacks until `MuxerProbe::complete_finish` is called,
    /// keeping the session observable in its finishing window.
    pub fn with_deferred_finish(mut self) -> Self {
        self.defer_finish = true;
        self
    }

    /// Handle for inspecting and scripting the factory after it has been
    /// moved into the coordinator
    pub fn probe(&self) -> MuxerProbe {
        MuxerProbe {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Default for MemoryMuxerFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl MuxerFactory for MemoryMuxerFactory {
    fn open(&self, _output: &PendingOutput) -> Result<Box<dyn Muxer>, CameraError> {
        if self.shared.fail_open.load(Ordering::Relaxed) {
            return Err(CameraError::WriterInitError(
                "memory muxer scripted to fail".to_string(),
            ));
        }
        self.shared.log.lock().expect("lock poisoned").opened += 1;
        Ok(Box::new(MemoryMuxer {
            shared: Arc::clone(&self.shared),
            defer_finish: self.defer_finish,
        }))
    }
}

/// Muxer that records appends in memory instead of writing a container
pub struct MemoryMuxer {
    shared: Arc<MuxerShared>,
    defer_finish: bool,
}

impl Muxer for MemoryMuxer {
    fn start_session(&mut self, start_pts: f64) {
        self.shared.log.lock().expect("lock poisoned").session_start = Some(start_pts);
    }

    fn is_ready(&self, track: TrackKind) -> bool {
        match track {
            TrackKind::Audio => self.shared.audio_ready.load(Ordering::Relaxed),
            TrackKind::Video => self.shared.video_ready.load(Ordering::Relaxed),
        }
    }

    fn append(&mut self, track: TrackKind, data: &[u8], pts: f64) -> Result<(), CameraError> {
        self.shared
            .log
            .lock()
            .expect("lock poisoned")
            .appends
            .push((track, pts, data.len()));
        Ok(())
    }

    fn finish(self: Box<Self>, on_complete: FinishCallback) {
        let shared = Arc::clone(&self.shared);
        let wrapped: FinishCallback = Box::new(move || {
            shared.log.lock().expect("lock poisoned").finished = true;
            on_complete();
        });
        if self.defer_finish {
            *self.shared.pending_finish.lock().expect("lock poisoned") = Some(wrapped);
        } else {
            wrapped();
        }
    }
}

/// Control calls the stub device received
#[derive(Debug, Clone, Default)]
pub struct DeviceLog {
    /// Zoom factors as forwarded, in call order
    pub zoom_calls: Vec<f64>,
    /// Position switches, in call order
    pub positions: Vec<CameraPosition>,
}

/// Inspection handle for [`StubDevice`]
#[derive(Clone)]
pub struct DeviceProbe {
    log: Arc<Mutex<DeviceLog>>,
}

impl DeviceProbe {
    pub fn log(&self) -> DeviceLog {
        self.log.lock().expect("lock poisoned").clone()
    }
}

/// Device control that records every forwarded intent
pub struct StubDevice {
    log: Arc<Mutex<DeviceLog>>,
}

impl StubDevice {
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(DeviceLog::default())),
        }
    }

    pub fn probe(&self) -> DeviceProbe {
        DeviceProbe {
            log: Arc::clone(&self.log),
        }
    }
}

impl Default for StubDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceControl for StubDevice {
    fn set_zoom_factor(&mut self, factor: f64) {
        self.log.lock().expect("lock poisoned").zoom_calls.push(factor);
    }

    fn switch_position(&mut self, position: CameraPosition) {
        self.log.lock().expect("lock poisoned").positions.push(position);
    }
}

/// Inspection handle for [`StubPhotoOutput`]
#[derive(Clone)]
pub struct PhotoProbe {
    requests: Arc<AtomicU32>,
}

impl PhotoProbe {
    /// Number of still-capture requests issued so far
    pub fn capture_requests(&self) -> u32 {
        self.requests.load(Ordering::Relaxed)
    }
}

/// Photo output that counts still-capture requests
pub struct StubPhotoOutput {
    requests: Arc<AtomicU32>,
}

impl StubPhotoOutput {
    pub fn new() -> Self {
        Self {
            requests: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn probe(&self) -> PhotoProbe {
        PhotoProbe {
            requests: Arc::clone(&self.requests),
        }
    }
}

impl Default for StubPhotoOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoOutput for StubPhotoOutput {
    fn capture_still(&mut self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }
}
