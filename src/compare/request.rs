use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    compare::mode::{ComparisonMode, SliderDirection},
    error::{Result, ValidationError},
    video::FrameSequence,
};

/// Everything one comparison needs
#[derive(Debug, Clone)]
pub struct ComparisonRequest {
    pub video_a: FrameSequence,
    pub video_b: FrameSequence,
    pub mode: ComparisonMode,

    /// Blend weight or split position, expected in `[0, 1]`
    pub position: f32,

    /// Output frame rate, must be positive
    pub frame_rate: u32,

    /// Trim the longer clip to the shorter one before comparing
    pub sync: bool,

    pub direction: SliderDirection,
}

impl ComparisonRequest {
    /// Create a request with position 0.5, 30 fps, sync on and a horizontal slider
    pub fn new(video_a: FrameSequence, video_b: FrameSequence, mode: ComparisonMode) -> Self {
        Self {
            video_a,
            video_b,
            mode,
            position: 0.5,
            frame_rate: 30,
            sync: true,
            direction: SliderDirection::default(),
        }
    }

    pub fn with_position(mut self, position: f32) -> Self {
        self.position = position;
        self
    }

    pub fn with_frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    pub fn with_direction(mut self, direction: SliderDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Check parameters before any frame is touched
    pub fn validate(&self) -> Result<()> {
        if self.frame_rate == 0 {
            return Err(ValidationError::parameter("frame_rate must be positive").into());
        }

        if !self.position.is_finite() {
            return Err(ValidationError::parameter(format!("position must be finite, got {}", self.position)).into());
        }

        if !(0.0..=1.0).contains(&self.position) {
            warn!("Position {} is outside [0, 1]", self.position);
        }

        Ok(())
    }
}

/// Composite clip plus what the host needs to present it
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    pub frames: FrameSequence,
    pub frame_count: usize,
    pub frame_rate: u32,
    pub mode: ComparisonMode,
}

/// Metadata the frontend widget reads to show a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonUi {
    pub video_a_url: String,

    /// Empty when the comparison is a single concatenated video
    pub video_b_url: String,

    pub comparison_mode: ComparisonMode,
    pub slider_direction: SliderDirection,
    pub frame_count: usize,
    pub frame_rate: u32,
}

/// Output of a terminal display node: UI metadata and the result behind it
#[derive(Debug, Clone)]
pub struct Presentation {
    pub ui: ComparisonUi,
    pub result: ComparisonResult,
}
