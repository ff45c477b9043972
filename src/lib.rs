//! corecam: camera capture-session coordination
//!
//! This crate provides the state machine at the heart of a camera app: it
//! sequences photo and video capture sessions and routes live audio/video
//! sample buffers into a container writer, with hardware control, codecs,
//! and UI kept behind injected trait seams.
//!
//! # Features
//! - Photo/video capture-mode switching with per-mode output targets
//! - Recording lifecycle with an explicit finishing state
//! - Sample routing with readiness-gated appends and drop accounting
//! - Timeline anchoring at the first delivered sample
//! - Clamped zoom and front/back camera flipping
//! - Completion events delivered over a channel
//!
//! # Usage
//! Add this to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! corecam = "0.1"
//! ```
//!
//! Then wire the coordinator to your capture stack:
//! ```rust,ignore
//! use corecam::{CameraEvent, CaptureMode, CoordinatorConfig, RecordingCoordinator};
//!
//! let (coordinator, events) =
//!     RecordingCoordinator::new(CoordinatorConfig::default(), device, photo, muxer_factory);
//!
//! coordinator.set_capture_mode(CaptureMode::Video);
//! coordinator.start_recording()?;
//! // feed coordinator.handle_media_buffer(...) from the capture thread
//! coordinator.stop_recording()?;
//!
//! if let Ok(CameraEvent::VideoReady(path)) = events.recv() {
//!     println!("recorded {:?}", path);
//! }
//! ```
pub mod config;
pub mod device;
pub mod errors;
pub mod muxer;
pub mod session;
pub mod types;

// Testing utilities - synthetic data and doubles for offline testing
pub mod testing;

// Re-exports for convenience
pub use config::{
    AudioFormatId, AudioTrackSettings, CoordinatorConfig, PendingOutput, RecordingQuality,
    VideoCodecId, VideoTrackSettings,
};
pub use device::{DeviceControl, PhotoOutput};
pub use errors::CameraError;
pub use muxer::{FinishCallback, Muxer, MuxerFactory};
pub use session::RecordingCoordinator;
pub use types::{
    CameraEvent, CameraPosition, CaptureMode, EventReceiver, MediaBuffer, RecordingState,
    RecordingStatus, TrackKind,
};

/// Initialize logging for the coordinator
pub fn init_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "corecam=info");
    }
    let _ = env_logger::try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

#[cfg(test)]
mod lib_tests {
    use super::*;

    #[test]
    fn test_crate_metadata() {
        assert_eq!(NAME, "corecam");
        assert!(!VERSION.is_empty());
        assert!(!DESCRIPTION.is_empty());
    }
}
