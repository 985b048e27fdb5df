//! # Compositors
//!
//! The three comparison transforms, applied frame by frame to two clips that
//! already share frame count and shape.
//!
//! - **concat**: A and B side by side, output twice as wide
//! - **blend**: `(1 - alpha) * A + alpha * B`, clamped to `[0, 1]`
//! - **split**: A left of `floor(width * position)`, B from there on

pub mod registry;
pub mod traits;

mod blend;
mod concat;
mod split;

pub use blend::BlendCompositor;
pub use concat::ConcatCompositor;
pub use registry::CompositorRegistry;
pub use split::{split_column, SplitCompositor};
pub use traits::Compositor;

use crate::{error::Result, video::FrameSequence};

/// Side-by-side concatenation of two aligned clips
pub fn concat(a: &FrameSequence, b: &FrameSequence) -> Result<FrameSequence> {
    ConcatCompositor::new().composite(a, b, 0.0)
}

/// Alpha blend of two aligned clips
pub fn blend(a: &FrameSequence, b: &FrameSequence, alpha: f32) -> Result<FrameSequence> {
    BlendCompositor::new().composite(a, b, alpha)
}

/// Split-screen composite of two aligned clips
pub fn split(a: &FrameSequence, b: &FrameSequence, position: f32) -> Result<FrameSequence> {
    SplitCompositor::new().composite(a, b, position)
}
