//! Test support utilities
//!
//! In-memory collaborator implementations and synthetic capture data for
//! exercising the coordinator offline, without hardware or codecs.

mod doubles;
mod synthetic_data;

pub use doubles::{
    DeviceLog, DeviceProbe, MemoryMuxer, MemoryMuxerFactory, MuxerLog, MuxerProbe, PhotoProbe,
    StubDevice, StubPhotoOutput,
};
pub use synthetic_data::{synthetic_audio_sample, synthetic_jpeg, synthetic_video_sample};
