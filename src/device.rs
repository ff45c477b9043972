//! Hardware-control seams
//!
//! The coordinator issues control intents only; the actual capture session
//! reconfiguration is owned by the collaborator behind these traits.

use crate::types::CameraPosition;

/// Device-level camera controls.
pub trait DeviceControl: Send {
    /// Apply an already-clamped zoom factor to the device.
    fn set_zoom_factor(&mut self, factor: f64);

    /// Switch to the camera at `position`. The implementation owns the full
    /// session reconfiguration that follows.
    fn switch_position(&mut self, position: CameraPosition);
}

/// Single-shot still-capture trigger.
///
/// Captured bytes come back through the capture source and are handed to
/// `RecordingCoordinator::handle_photo_data`.
pub trait PhotoOutput: Send {
    fn capture_still(&mut self);
}
