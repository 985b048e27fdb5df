use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::{
    compare::{ComparisonMode, SliderDirection},
    error::{ConfigError, Result},
    video::EncoderSettings,
};

const CONTAINERS: &[&str] = &["mp4", "mov", "mkv", "webm"];

/// Main configuration for video-compare
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Comparison defaults
    pub compare: CompareConfig,

    /// Encoding and output location settings
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.compare.validate()?;
        self.output.validate()?;
        Ok(())
    }
}

/// Defaults applied to comparison requests
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// concat, blend or split
    pub mode: ComparisonMode,

    /// Blend weight / split position (0.0-1.0)
    pub position: f32,

    /// Trim clips to a common length before comparing
    pub sync: bool,

    /// Slider orientation reported to the frontend
    pub direction: SliderDirection,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            mode: ComparisonMode::Blend,
            position: 0.5,
            sync: true,
            direction: SliderDirection::Horizontal,
        }
    }
}

impl CompareConfig {
    fn validate(&self) -> Result<()> {
        if !self.position.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: "compare.position".to_string(),
                value: self.position.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Output video configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Frames per second of written videos
    pub frame_rate: u32,

    /// FFmpeg video codec
    pub codec: String,

    /// Quality setting (0-100, higher is better)
    pub quality: u8,

    /// Container extension (mp4, mov, mkv, webm)
    pub container: String,

    /// File name prefix for written videos
    pub filename_prefix: String,

    /// Subfolder reported in view references
    pub subfolder: String,

    /// Output directory; the OS temp dir when unset
    pub temp_dir: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            frame_rate: 30,
            codec: "libx264".to_string(),
            quality: 85,
            container: "mp4".to_string(),
            filename_prefix: "video_compare".to_string(),
            subfolder: String::new(),
            temp_dir: None,
        }
    }
}

impl OutputConfig {
    /// Codec parameters for the FFmpeg encoder
    pub fn encoder_settings(&self) -> EncoderSettings {
        EncoderSettings {
            codec: self.codec.clone(),
            quality: self.quality,
            container: self.container.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        if !(1..=120).contains(&self.frame_rate) {
            return Err(ConfigError::InvalidValue {
                key: "output.frame_rate".to_string(),
                value: self.frame_rate.to_string()
            }.into());
        }

        if self.quality > 100 {
            return Err(ConfigError::InvalidValue {
                key: "output.quality".to_string(),
                value: self.quality.to_string()
            }.into());
        }

        if !CONTAINERS.contains(&self.container.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "output.container".to_string(),
                value: self.container.clone()
            }.into());
        }

        if self.codec.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "output.codec".to_string(),
                value: self.codec.clone()
            }.into());
        }

        if self.filename_prefix.is_empty() || self.filename_prefix.contains(['/', '\\']) {
            return Err(ConfigError::InvalidValue {
                key: "output.filename_prefix".to_string(),
                value: self.filename_prefix.clone()
            }.into());
        }

        Ok(())
    }
}
