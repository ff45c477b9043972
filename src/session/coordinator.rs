//! Recording state machine and sample routing

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use crossbeam_channel::{unbounded, Sender};
use uuid::Uuid;

use crate::config::{CoordinatorConfig, PendingOutput};
use crate::device::{DeviceControl, PhotoOutput};
use crate::errors::CameraError;
use crate::muxer::{Muxer, MuxerFactory};
use crate::types::{
    CameraEvent, CameraPosition, CaptureMode, EventReceiver, MediaBuffer, RecordingState,
    RecordingStatus, TrackKind,
};

/// Zoom increment applied by `zoom_in`/`zoom_out`
const ZOOM_STEP: f64 = 0.035;

struct Inner {
    state: RecordingState,
    mode: CaptureMode,
    position: CameraPosition,
    zoom_factor: f64,
    pending: PendingOutput,
    muxer: Option<Box<dyn Muxer>>,
    session_id: Option<Uuid>,
    video_samples: u64,
    audio_samples: u64,
    dropped_samples: u64,
    device: Box<dyn DeviceControl>,
    photo: Box<dyn PhotoOutput>,
    factory: Box<dyn MuxerFactory>,
}

/// Sequences the lifecycle of a recording session and routes incoming media
/// buffers to the correct muxer track.
///
/// All mutable state lives behind a single lock, so buffer delivery from the
/// capture thread is serialized against control calls from the caller's
/// thread. The handle is cheap to clone and can be shared across threads.
#[derive(Clone)]
pub struct RecordingCoordinator {
    inner: Arc<Mutex<Inner>>,
    events: Sender<CameraEvent>,
    config: Arc<CoordinatorConfig>,
}

impl RecordingCoordinator {
    /// Create a coordinator with injected collaborators.
    ///
    /// Returns the coordinator plus the receiving half of its event channel;
    /// `VideoReady`/`PhotoReady` events arrive there.
    pub fn new(
        config: CoordinatorConfig,
        device: Box<dyn DeviceControl>,
        photo: Box<dyn PhotoOutput>,
        factory: Box<dyn MuxerFactory>,
    ) -> (Self, EventReceiver) {
        let (events, receiver) = unbounded();
        let mode = CaptureMode::default();
        let pending = PendingOutput::for_mode(&config, mode);
        let inner = Inner {
            state: RecordingState::Idle,
            mode,
            position: CameraPosition::default(),
            zoom_factor: 1.0,
            pending,
            muxer: None,
            session_id: None,
            video_samples: 0,
            audio_samples: 0,
            dropped_samples: 0,
            device,
            photo,
            factory,
        };
        let coordinator = Self {
            inner: Arc::new(Mutex::new(inner)),
            events,
            config: Arc::new(config),
        };
        (coordinator, receiver)
    }

    /// Select the output path for subsequent captures.
    ///
    /// Only permitted while idle; a change requested during a recording is
    /// ignored.
    pub fn set_capture_mode(&self, mode: CaptureMode) {
        let mut inner = self.lock();
        if inner.state != RecordingState::Idle {
            log::debug!(
                "capture mode change to {:?} ignored while {:?}",
                mode,
                inner.state
            );
            return;
        }
        inner.mode = mode;
        inner.pending = PendingOutput::for_mode(&self.config, mode);
    }

    /// Start a capture.
    ///
    /// In photo mode this issues a single still-capture request and returns
    /// with the session still idle. In video mode it opens a muxer at the
    /// pending output path and transitions to `Writing`; the muxer session
    /// timeline is anchored by the first buffer delivered afterwards.
    pub fn start_recording(&self) -> Result<(), CameraError> {
        let mut inner = self.lock();
        match inner.state {
            RecordingState::Idle => {}
            RecordingState::Writing { .. } => {
                return Err(CameraError::InvalidStateError(
                    "recording already in progress".to_string(),
                ));
            }
            RecordingState::Finishing => {
                return Err(CameraError::InvalidStateError(
                    "previous recording is still finalizing".to_string(),
                ));
            }
        }

        match inner.mode {
            CaptureMode::Photo => {
                log::info!("requesting still capture");
                inner.photo.capture_still();
                Ok(())
            }
            CaptureMode::Video => {
                inner.pending = PendingOutput::for_mode(&self.config, CaptureMode::Video);
                let muxer = inner.factory.open(&inner.pending)?;
                let session_id = Uuid::new_v4();
                log::info!(
                    "recording started: session {} -> {:?}",
                    session_id,
                    inner.pending.path
                );
                inner.muxer = Some(muxer);
                inner.session_id = Some(session_id);
                inner.video_samples = 0;
                inner.audio_samples = 0;
                inner.dropped_samples = 0;
                inner.state = RecordingState::Writing {
                    session_started: false,
                };
                Ok(())
            }
        }
    }

    /// Stop the active video recording.
    ///
    /// Detaches both sinks, then finalizes the muxer asynchronously. The
    /// session stays in `Finishing` until the finalize callback runs, at
    /// which point a `VideoReady` event is emitted and the state returns to
    /// `Idle`.
    pub fn stop_recording(&self) -> Result<(), CameraError> {
        let (muxer, path, session_id) = {
            let mut inner = self.lock();
            if !inner.state.is_writing() {
                return Err(CameraError::InvalidStateError(format!(
                    "stop requested while {:?}",
                    inner.state
                )));
            }
            let Some(muxer) = inner.muxer.take() else {
                inner.state = RecordingState::Idle;
                return Err(CameraError::InvalidStateError(
                    "no open writer for the active session".to_string(),
                ));
            };
            inner.state = RecordingState::Finishing;
            (muxer, inner.pending.path.clone(), inner.session_id)
        };

        log::info!("recording stopping: session {:?}", session_id);
        let shared = Arc::clone(&self.inner);
        let events = self.events.clone();
        muxer.finish(Box::new(move || {
            shared.lock().expect("lock poisoned").state = RecordingState::Idle;
            log::info!("recording finalized: {:?}", path);
            if events.send(CameraEvent::VideoReady(path)).is_err() {
                log::warn!("video-ready event dropped: receiver disconnected");
            }
        }));
        Ok(())
    }

    /// Route one live sample into the session.
    ///
    /// Dropped unless a recording is writing. The first buffer after start
    /// anchors the muxer session timeline at its presentation time. Each
    /// append is gated on the track's readiness; late buffers on a busy track
    /// are dropped and counted, never buffered.
    pub fn handle_media_buffer(&self, buffer: MediaBuffer<'_>) {
        let mut inner = self.lock();
        let started = match inner.state {
            RecordingState::Writing { session_started } => session_started,
            _ => return,
        };

        let inner = &mut *inner;
        let Some(muxer) = inner.muxer.as_mut() else {
            return;
        };

        if !started {
            muxer.start_session(buffer.pts());
            inner.state = RecordingState::Writing {
                session_started: true,
            };
            log::debug!("session timeline anchored at pts {:.3}", buffer.pts());
        }

        let track = buffer.track();
        if !muxer.is_ready(track) {
            inner.dropped_samples += 1;
            return;
        }

        match muxer.append(track, buffer.data(), buffer.pts()) {
            Ok(()) => match track {
                TrackKind::Audio => inner.audio_samples += 1,
                TrackKind::Video => inner.video_samples += 1,
            },
            Err(e) => {
                inner.dropped_samples += 1;
                log::warn!(
                    "failed to append {:?} sample at pts {:.3}: {}",
                    track,
                    buffer.pts(),
                    e
                );
            }
        }
    }

    /// Decode the bytes of a finished still capture and emit `PhotoReady`.
    ///
    /// Malformed bytes surface a `DecodeError` and emit nothing.
    pub fn handle_photo_data(&self, data: &[u8]) -> Result<(), CameraError> {
        let image = image::load_from_memory(data).map_err(|e| {
            CameraError::DecodeError(format!("failed to decode still capture: {}", e))
        })?;
        if self.events.send(CameraEvent::PhotoReady(image)).is_err() {
            log::warn!("photo-ready event dropped: receiver disconnected");
        }
        Ok(())
    }

    /// Set the zoom factor, clamped into [1.0, max_zoom_factor], and forward
    /// the clamped value to the device. Out-of-range requests are clamped,
    /// not rejected.
    pub fn set_zoom(&self, factor: f64) {
        let mut inner = self.lock();
        let clamped = factor.clamp(1.0, self.config.max_zoom_factor);
        inner.zoom_factor = clamped;
        inner.device.set_zoom_factor(clamped);
    }

    /// Step the zoom factor up by one increment
    pub fn zoom_in(&self) {
        self.adjust_zoom(ZOOM_STEP);
    }

    /// Step the zoom factor down by one increment
    pub fn zoom_out(&self) {
        self.adjust_zoom(-ZOOM_STEP);
    }

    fn adjust_zoom(&self, delta: f64) {
        let mut inner = self.lock();
        let clamped = (inner.zoom_factor + delta).clamp(1.0, self.config.max_zoom_factor);
        inner.zoom_factor = clamped;
        inner.device.set_zoom_factor(clamped);
    }

    /// Toggle between the front and back cameras and forward the new
    /// position to the device, which owns the session reconfiguration.
    pub fn flip_position(&self) -> CameraPosition {
        let mut inner = self.lock();
        let next = inner.position.flipped();
        inner.position = next;
        inner.device.switch_position(next);
        log::info!("camera position switched to {:?}", next);
        next
    }

    /// Snapshot of the coordinator's state
    pub fn status(&self) -> RecordingStatus {
        let inner = self.lock();
        RecordingStatus {
            state: inner.state,
            mode: inner.mode,
            position: inner.position,
            zoom_factor: inner.zoom_factor,
            session_id: inner.session_id,
            video_samples: inner.video_samples,
            audio_samples: inner.audio_samples,
            dropped_samples: inner.dropped_samples,
            captured_at: Utc::now(),
        }
    }

    pub fn state(&self) -> RecordingState {
        self.lock().state
    }

    /// True while a video recording session is open
    pub fn is_recording(&self) -> bool {
        self.lock().state.is_writing()
    }

    pub fn capture_mode(&self) -> CaptureMode {
        self.lock().mode
    }

    pub fn position(&self) -> CameraPosition {
        self.lock().position
    }

    pub fn zoom_factor(&self) -> f64 {
        self.lock().zoom_factor
    }

    /// The output target of the current or next recording
    pub fn pending_output(&self) -> PendingOutput {
        self.lock().pending.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("lock poisoned")
    }
}
