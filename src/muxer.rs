//! Container-writer seam
//!
//! The coordinator never touches codecs or container formats itself; it
//! drives an injected [`Muxer`] that interleaves encoded audio/video samples
//! into one output file. Implementations wrap whatever writer the platform
//! provides.

use crate::config::PendingOutput;
use crate::errors::CameraError;
use crate::types::TrackKind;

/// Callback invoked once the container has been finalized.
///
/// Implementations may run it on any thread, including synchronously on the
/// thread that called [`Muxer::finish`].
pub type FinishCallback = Box<dyn FnOnce() + Send + 'static>;

/// An open container writer with one audio and one video track.
pub trait Muxer: Send {
    /// Anchor the output timeline. All subsequent sample timestamps are
    /// interpreted relative to `start_pts`, so the file begins at zero.
    fn start_session(&mut self, start_pts: f64);

    /// Whether the track can accept another sample without blocking.
    fn is_ready(&self, track: TrackKind) -> bool;

    /// Append one encoded sample to a track.
    fn append(&mut self, track: TrackKind, data: &[u8], pts: f64) -> Result<(), CameraError>;

    /// Finalize the container and consume the writer. `on_complete` fires
    /// exactly once, after the file is fully written.
    fn finish(self: Box<Self>, on_complete: FinishCallback);
}

/// Opens a [`Muxer`] for a pending output target.
pub trait MuxerFactory: Send {
    /// Open a writer at the target path with the given per-track settings.
    ///
    /// Fails with [`CameraError::WriterInitError`] when the path is not
    /// writable or the settings are rejected.
    fn open(&self, output: &PendingOutput) -> Result<Box<dyn Muxer>, CameraError>;
}
