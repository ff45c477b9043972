//! Configuration for the capture-session coordinator
//!
//! Provides per-track output settings, quality presets, TOML load/save, and
//! the pending-output computation that binds a capture mode to a file path.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::CameraError;
use crate::types::CaptureMode;

/// Output file name used while in video mode
const VIDEO_FILE_NAME: &str = "video.mov";
/// Output file name used while in photo mode
const PHOTO_FILE_NAME: &str = "photo.jpg";

/// Codec identifier passed through to the muxer's video track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoCodecId {
    H264,
    Hevc,
}

/// Format identifier passed through to the muxer's audio track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioFormatId {
    Ima4,
    Aac,
    PcmS16,
}

/// Quality presets for video recording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordingQuality {
    /// 720p, lower bitrate - good for previews
    Low,
    /// 1080p, standard bitrate - balanced quality
    Medium,
    /// 1080p, high bitrate
    High,
    /// Custom settings
    Custom,
}

impl RecordingQuality {
    /// Get recommended bitrate in bits per second
    pub fn bitrate(&self) -> u32 {
        match self {
            RecordingQuality::Low => 2_500_000,
            RecordingQuality::Medium => 5_000_000,
            RecordingQuality::High => 10_000_000,
            RecordingQuality::Custom => 5_000_000,
        }
    }

    /// Get recommended resolution (width, height)
    pub fn resolution(&self) -> (u32, u32) {
        match self {
            RecordingQuality::Low => (1280, 720),
            RecordingQuality::Medium => (1920, 1080),
            RecordingQuality::High => (1920, 1080),
            RecordingQuality::Custom => (1920, 1080),
        }
    }

    /// Get recommended framerate
    pub fn fps(&self) -> f64 {
        30.0
    }
}

impl Default for RecordingQuality {
    fn default() -> Self {
        RecordingQuality::High
    }
}

/// Settings for the muxer's video track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoTrackSettings {
    /// Video width in pixels
    pub width: u32,
    /// Video height in pixels
    pub height: u32,
    /// Frames per second
    pub fps: f64,
    /// Target bitrate in bits per second
    pub bitrate: u32,
    pub codec: VideoCodecId,
}

impl VideoTrackSettings {
    /// Create settings with explicit dimensions
    pub fn new(width: u32, height: u32, fps: f64) -> Self {
        Self {
            width,
            height,
            fps,
            bitrate: RecordingQuality::Custom.bitrate(),
            codec: VideoCodecId::H264,
        }
    }

    /// Create settings from a quality preset
    pub fn from_quality(quality: RecordingQuality) -> Self {
        let (width, height) = quality.resolution();
        Self {
            width,
            height,
            fps: quality.fps(),
            bitrate: quality.bitrate(),
            codec: VideoCodecId::H264,
        }
    }

    /// Set a custom bitrate
    pub fn with_bitrate(mut self, bitrate: u32) -> Self {
        self.bitrate = bitrate;
        self
    }

    pub fn with_codec(mut self, codec: VideoCodecId) -> Self {
        self.codec = codec;
        self
    }
}

impl Default for VideoTrackSettings {
    fn default() -> Self {
        Self::from_quality(RecordingQuality::High)
    }
}

/// Settings for the muxer's audio track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioTrackSettings {
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    pub format: AudioFormatId,
}

impl AudioTrackSettings {
    pub fn new(channels: u16, sample_rate: u32) -> Self {
        Self {
            channels,
            sample_rate,
            format: AudioFormatId::Ima4,
        }
    }

    pub fn with_format(mut self, format: AudioFormatId) -> Self {
        self.format = format;
        self
    }
}

impl Default for AudioTrackSettings {
    fn default() -> Self {
        // Mono 32kHz IMA4, the classic capture-app writer settings
        Self::new(1, 32_000)
    }
}

/// Root coordinator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Directory finished captures are written into
    pub output_dir: PathBuf,
    pub video: VideoTrackSettings,
    pub audio: AudioTrackSettings,
    /// Upper bound for the zoom factor; zoom requests are clamped to
    /// [1.0, max_zoom_factor]
    pub max_zoom_factor: f64,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            output_dir: std::env::temp_dir(),
            video: VideoTrackSettings::default(),
            audio: AudioTrackSettings::default(),
            max_zoom_factor: 10.0,
        }
    }
}

impl CoordinatorConfig {
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_video(mut self, video: VideoTrackSettings) -> Self {
        self.video = video;
        self
    }

    pub fn with_audio(mut self, audio: AudioTrackSettings) -> Self {
        self.audio = audio;
        self
    }

    pub fn with_max_zoom_factor(mut self, max_zoom_factor: f64) -> Self {
        self.max_zoom_factor = max_zoom_factor;
        self
    }

    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CameraError> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            CameraError::ControlError(format!("Failed to read config file: {}", e))
        })?;

        let config: CoordinatorConfig = toml::from_str(&contents).map_err(|e| {
            CameraError::ControlError(format!("Failed to parse config file: {}", e))
        })?;

        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CameraError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                CameraError::ControlError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let toml_string = toml::to_string_pretty(self).map_err(|e| {
            CameraError::ControlError(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, toml_string).map_err(|e| {
            CameraError::ControlError(format!("Failed to write config file: {}", e))
        })?;

        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Get default config file path
    pub fn default_path() -> PathBuf {
        PathBuf::from("corecam.toml")
    }

    /// Load from default location or create with defaults
    pub fn load_or_default() -> Self {
        Self::load_from_file(Self::default_path()).unwrap_or_else(|e| {
            log::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.video.width == 0 || self.video.height == 0 {
            return Err("Invalid video resolution".to_string());
        }
        if self.video.fps < 1.0 || self.video.fps > 240.0 {
            return Err("Invalid video FPS (must be 1-240)".to_string());
        }
        if self.video.bitrate == 0 {
            return Err("Video bitrate must be positive".to_string());
        }
        if self.audio.channels == 0 || self.audio.channels > 2 {
            return Err("Audio channels must be 1 or 2".to_string());
        }
        if !(8_000..=192_000).contains(&self.audio.sample_rate) {
            return Err("Audio sample rate must be between 8000 and 192000 Hz".to_string());
        }
        if self.max_zoom_factor < 1.0 {
            return Err("Max zoom factor must be at least 1.0".to_string());
        }
        Ok(())
    }
}

/// The output target of the next recording: a file path plus per-track
/// settings. Recomputed whenever the capture mode changes or a new recording
/// starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingOutput {
    pub path: PathBuf,
    pub video: VideoTrackSettings,
    pub audio: AudioTrackSettings,
}

impl PendingOutput {
    /// Compute the output target for a capture mode, clearing any stale file
    /// left at the target path by an earlier session.
    pub fn for_mode(config: &CoordinatorConfig, mode: CaptureMode) -> Self {
        let file_name = match mode {
            CaptureMode::Video => VIDEO_FILE_NAME,
            CaptureMode::Photo => PHOTO_FILE_NAME,
        };
        let path = config.output_dir.join(file_name);
        if path.exists() {
            if let Err(e) = fs::remove_file(&path) {
                log::warn!("Failed to clear stale output {:?}: {}", path, e);
            }
        }
        Self {
            path,
            video: config.video.clone(),
            audio: config.audio.clone(),
        }
    }
}
