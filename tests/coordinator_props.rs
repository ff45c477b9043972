//! Property-Based Tests for the Recording Coordinator
//!
//! These tests verify invariants and contracts of the session state machine
//! using proptest for input generation and shrinking.
//!
//! Run with: cargo test --test coordinator_props

use proptest::prelude::*;
use tempfile::TempDir;

use corecam::testing::{MemoryMuxerFactory, MuxerProbe, StubDevice, StubPhotoOutput};
use corecam::{
    CaptureMode, CoordinatorConfig, DeviceControl, MediaBuffer, PhotoOutput, RecordingCoordinator,
    TrackKind,
};

fn coordinator(max_zoom: f64) -> (RecordingCoordinator, MuxerProbe, corecam::testing::DeviceProbe, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = CoordinatorConfig::default()
        .with_output_dir(dir.path())
        .with_max_zoom_factor(max_zoom);
    let factory = MemoryMuxerFactory::new();
    let muxer = factory.probe();
    let device = StubDevice::new();
    let device_probe = device.probe();
    let photo = StubPhotoOutput::new();
    let (coordinator, _events) = RecordingCoordinator::new(
        config,
        Box::new(device) as Box<dyn DeviceControl>,
        Box::new(photo) as Box<dyn PhotoOutput>,
        Box::new(factory),
    );
    (coordinator, muxer, device_probe, dir)
}

// ═══════════════════════════════════════════════════════════════════════════
// ZOOM INVARIANTS
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    /// INVARIANT: The device never sees a zoom factor outside [1.0, max]
    #[test]
    fn zoom_always_clamped(
        factor in -50.0f64..200.0,
        max_zoom in 1.0f64..32.0,
    ) {
        let (coordinator, _muxer, device, _dir) = coordinator(max_zoom);

        coordinator.set_zoom(factor);

        let calls = device.log().zoom_calls;
        prop_assert_eq!(calls.len(), 1);
        let sent = calls[0];
        prop_assert!((1.0..=max_zoom).contains(&sent),
            "device received {} outside [1.0, {}]", sent, max_zoom);
        if (1.0..=max_zoom).contains(&factor) {
            prop_assert_eq!(sent, factor, "in-range request must pass through unchanged");
        }
    }

    /// INVARIANT: Repeated zoom stepping never escapes the clamp range
    #[test]
    fn zoom_stepping_stays_in_range(
        steps in prop::collection::vec(any::<bool>(), 0..128),
        max_zoom in 1.0f64..12.0,
    ) {
        let (coordinator, _muxer, device, _dir) = coordinator(max_zoom);

        for step_in in steps {
            if step_in {
                coordinator.zoom_in();
            } else {
                coordinator.zoom_out();
            }
        }

        for sent in device.log().zoom_calls {
            prop_assert!((1.0..=max_zoom).contains(&sent));
        }
        prop_assert!((1.0..=max_zoom).contains(&coordinator.zoom_factor()));
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BUFFER ROUTING INVARIANTS
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    /// INVARIANT: Buffers delivered while idle never reach a sink
    #[test]
    fn idle_buffers_never_appended(
        samples in prop::collection::vec((any::<bool>(), 0.0f64..1000.0), 0..64),
    ) {
        let (coordinator, muxer, _device, _dir) = coordinator(10.0);

        let payload = [0u8; 16];
        for (is_audio, pts) in samples {
            let buffer = if is_audio {
                MediaBuffer::audio(&payload, pts)
            } else {
                MediaBuffer::video(&payload, pts)
            };
            coordinator.handle_media_buffer(buffer);
        }

        let log = muxer.log();
        prop_assert!(log.appends.is_empty());
        prop_assert_eq!(log.session_start, None);
    }

    /// INVARIANT: The session timeline anchors at the first delivered pts
    #[test]
    fn session_anchors_at_first_pts(
        timestamps in prop::collection::vec(0.0f64..10_000.0, 1..32),
    ) {
        let (coordinator, muxer, _device, _dir) = coordinator(10.0);
        coordinator.set_capture_mode(CaptureMode::Video);
        coordinator.start_recording().expect("start");

        let payload = [0u8; 16];
        for &pts in &timestamps {
            coordinator.handle_media_buffer(MediaBuffer::video(&payload, pts));
        }

        prop_assert_eq!(muxer.log().session_start, Some(timestamps[0]));
    }

    /// INVARIANT: A not-ready sink drops samples instead of blocking,
    /// and every drop is counted
    #[test]
    fn not_ready_sink_drops_and_counts(
        count in 1usize..48,
    ) {
        let (coordinator, muxer, _device, _dir) = coordinator(10.0);
        coordinator.set_capture_mode(CaptureMode::Video);
        coordinator.start_recording().expect("start");
        muxer.set_ready(TrackKind::Video, false);

        let payload = [0u8; 16];
        for i in 0..count {
            coordinator.handle_media_buffer(MediaBuffer::video(&payload, i as f64));
        }

        prop_assert!(muxer.log().appends.is_empty());
        prop_assert_eq!(coordinator.status().dropped_samples, count as u64);
    }

    /// INVARIANT: Appended samples keep their track and presentation time
    #[test]
    fn appends_preserve_track_and_pts(
        samples in prop::collection::vec((any::<bool>(), 0.0f64..1000.0), 1..32),
    ) {
        let (coordinator, muxer, _device, _dir) = coordinator(10.0);
        coordinator.set_capture_mode(CaptureMode::Video);
        coordinator.start_recording().expect("start");

        let payload = [7u8; 24];
        for (is_audio, pts) in &samples {
            let buffer = if *is_audio {
                MediaBuffer::audio(&payload, *pts)
            } else {
                MediaBuffer::video(&payload, *pts)
            };
            coordinator.handle_media_buffer(buffer);
        }

        let expected: Vec<(TrackKind, f64, usize)> = samples
            .iter()
            .map(|(is_audio, pts)| {
                let track = if *is_audio { TrackKind::Audio } else { TrackKind::Video };
                (track, *pts, payload.len())
            })
            .collect();
        prop_assert_eq!(muxer.log().appends, expected);
    }
}
