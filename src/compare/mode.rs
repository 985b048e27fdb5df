use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{InvalidModeError, ValidationError};

/// How two aligned clips are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMode {
    /// A and B next to each other along the width axis
    #[serde(alias = "side_by_side")]
    Concat,
    /// Weighted mix of A and B
    #[serde(alias = "slider", alias = "slider_blend")]
    Blend,
    /// A left of a vertical line, B right of it
    #[serde(alias = "split_screen")]
    Split,
}

impl ComparisonMode {
    pub const ALL: [ComparisonMode; 3] = [ComparisonMode::Concat, ComparisonMode::Blend, ComparisonMode::Split];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonMode::Concat => "concat",
            ComparisonMode::Blend => "blend",
            ComparisonMode::Split => "split",
        }
    }

    /// Whether the frontend shows this mode as two videos under a slider
    pub fn is_slider(&self) -> bool {
        !matches!(self, ComparisonMode::Concat)
    }

    fn accepted() -> String {
        "concat, blend, split, side_by_side, slider, slider_blend, split_screen".to_string()
    }
}

impl fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComparisonMode {
    type Err = InvalidModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "concat" | "side_by_side" => Ok(ComparisonMode::Concat),
            "blend" | "slider" | "slider_blend" => Ok(ComparisonMode::Blend),
            "split" | "split_screen" => Ok(ComparisonMode::Split),
            other => Err(InvalidModeError {
                mode: other.to_string(),
                expected: Self::accepted(),
            }),
        }
    }
}

/// Orientation of the frontend slider; display metadata only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliderDirection {
    #[default]
    Horizontal,
    Vertical,
    Diagonal,
}

impl SliderDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SliderDirection::Horizontal => "horizontal",
            SliderDirection::Vertical => "vertical",
            SliderDirection::Diagonal => "diagonal",
        }
    }
}

impl fmt::Display for SliderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SliderDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "horizontal" => Ok(SliderDirection::Horizontal),
            "vertical" => Ok(SliderDirection::Vertical),
            "diagonal" => Ok(SliderDirection::Diagonal),
            other => Err(ValidationError::parameter(format!(
                "unknown slider direction '{}' (expected horizontal, vertical or diagonal)",
                other
            ))),
        }
    }
}
