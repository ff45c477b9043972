//! Capture-session coordination
//!
//! This module sequences the lifecycle of a single recording session and
//! routes incoming media buffers to the correct muxer track.
//!
//! # Example
//! ```rust,ignore
//! use corecam::{CaptureMode, CoordinatorConfig, MediaBuffer, RecordingCoordinator};
//!
//! let (coordinator, events) =
//!     RecordingCoordinator::new(CoordinatorConfig::default(), device, photo, factory);
//!
//! coordinator.set_capture_mode(CaptureMode::Video);
//! coordinator.start_recording()?;
//!
//! // From the capture thread:
//! coordinator.handle_media_buffer(MediaBuffer::video(&frame, pts));
//!
//! coordinator.stop_recording()?;
//! // events later yields CameraEvent::VideoReady(path)
//! ```

mod coordinator;

pub use coordinator::RecordingCoordinator;
