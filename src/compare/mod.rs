//! # Comparison Pipeline
//!
//! Aligns two clips and renders a comparison. Each stage is a plain function
//! over [`FrameSequence`](crate::video::FrameSequence)s, and
//! [`FrameComparator`] strings them together with encoding.

pub mod comparator;
pub mod compositors;
pub mod dimensions;
pub mod mode;
pub mod request;
pub mod sync;

pub use comparator::FrameComparator;
pub use compositors::{Compositor, CompositorRegistry};
pub use dimensions::{match_dimensions, resize_sequence};
pub use mode::{ComparisonMode, SliderDirection};
pub use request::{ComparisonRequest, ComparisonResult, ComparisonUi, Presentation};
pub use sync::sync_lengths;
