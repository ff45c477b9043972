//! Core data model for capture-session coordination

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which output path a capture session drives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureMode {
    /// Single-shot still captures
    #[default]
    Photo,
    /// Continuous audio/video recording into a container file
    Video,
}

/// Physical camera selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraPosition {
    #[default]
    Front,
    Back,
}

impl CameraPosition {
    /// The opposite position
    pub fn flipped(self) -> Self {
        match self {
            CameraPosition::Front => CameraPosition::Back,
            CameraPosition::Back => CameraPosition::Front,
        }
    }
}

/// Muxer track selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackKind {
    Audio,
    Video,
}

/// A single captured sample from the live feed.
///
/// The payload is borrowed from the capture source; the coordinator only
/// holds it for the duration of the append call.
#[derive(Debug, Clone, Copy)]
pub enum MediaBuffer<'a> {
    Audio { data: &'a [u8], pts: f64 },
    Video { data: &'a [u8], pts: f64 },
}

impl<'a> MediaBuffer<'a> {
    pub fn audio(data: &'a [u8], pts: f64) -> Self {
        MediaBuffer::Audio { data, pts }
    }

    pub fn video(data: &'a [u8], pts: f64) -> Self {
        MediaBuffer::Video { data, pts }
    }

    /// The sink this sample is routed to
    pub fn track(&self) -> TrackKind {
        match self {
            MediaBuffer::Audio { .. } => TrackKind::Audio,
            MediaBuffer::Video { .. } => TrackKind::Video,
        }
    }

    /// Presentation timestamp in seconds on the capture timeline
    pub fn pts(&self) -> f64 {
        match self {
            MediaBuffer::Audio { pts, .. } | MediaBuffer::Video { pts, .. } => *pts,
        }
    }

    pub fn data(&self) -> &'a [u8] {
        match self {
            MediaBuffer::Audio { data, .. } | MediaBuffer::Video { data, .. } => *data,
        }
    }
}

/// Lifecycle state of the recording session.
///
/// `Finishing` covers the window between detaching the sinks and the muxer
/// finalize callback; starting a new recording is rejected until the callback
/// has run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordingState {
    #[default]
    Idle,
    Writing {
        session_started: bool,
    },
    Finishing,
}

impl RecordingState {
    /// True while a video recording session is open
    pub fn is_writing(&self) -> bool {
        matches!(self, RecordingState::Writing { .. })
    }
}

/// Completion events emitted by the coordinator.
///
/// Events are delivered over a channel; the receiver drains them on whatever
/// context it likes (typically the UI thread of the embedding app).
#[derive(Clone)]
pub enum CameraEvent {
    /// A finished, finalized video file is ready at this path
    VideoReady(PathBuf),
    /// A still capture was decoded successfully
    PhotoReady(image::DynamicImage),
}

impl fmt::Debug for CameraEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraEvent::VideoReady(path) => f.debug_tuple("VideoReady").field(path).finish(),
            CameraEvent::PhotoReady(image) => f
                .debug_struct("PhotoReady")
                .field("width", &image.width())
                .field("height", &image.height())
                .finish(),
        }
    }
}

/// Receiving half of the coordinator's event channel
pub type EventReceiver = crossbeam_channel::Receiver<CameraEvent>;

/// Snapshot of the coordinator's state for status queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingStatus {
    pub state: RecordingState,
    pub mode: CaptureMode,
    pub position: CameraPosition,
    pub zoom_factor: f64,
    /// Session ID of the current (or most recent) recording, for log correlation
    pub session_id: Option<Uuid>,
    /// Video samples appended during the current session
    pub video_samples: u64,
    /// Audio samples appended during the current session
    pub audio_samples: u64,
    /// Samples dropped because a sink was not ready or an append failed
    pub dropped_samples: u64,
    pub captured_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_mode_default() {
        assert_eq!(CaptureMode::default(), CaptureMode::Photo);
    }

    #[test]
    fn test_position_flipped() {
        assert_eq!(CameraPosition::Front.flipped(), CameraPosition::Back);
        assert_eq!(CameraPosition::Back.flipped(), CameraPosition::Front);
    }

    #[test]
    fn test_media_buffer_accessors() {
        let payload = [1u8, 2, 3];
        let buffer = MediaBuffer::audio(&payload, 1.25);
        assert_eq!(buffer.track(), TrackKind::Audio);
        assert_eq!(buffer.pts(), 1.25);
        assert_eq!(buffer.data(), &payload);

        let buffer = MediaBuffer::video(&payload, 2.5);
        assert_eq!(buffer.track(), TrackKind::Video);
        assert_eq!(buffer.pts(), 2.5);
    }

    #[test]
    fn test_recording_state_is_writing() {
        assert!(!RecordingState::Idle.is_writing());
        assert!(RecordingState::Writing {
            session_started: false
        }
        .is_writing());
        assert!(!RecordingState::Finishing.is_writing());
    }
}
