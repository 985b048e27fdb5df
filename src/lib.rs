//! # Video-Compare
//!
//! Align two video clips frame by frame and render a visual comparison.
//!
//! Clips are stacks of normalized frames. Before comparing, the longer clip is
//! trimmed to the shorter one and both are center-cropped or zero-padded to a
//! shared frame shape. The comparison itself is a side-by-side concatenation,
//! an alpha blend, or a split screen.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use video_compare::{
//!     compare::{ComparisonMode, FrameComparator},
//!     config::Config,
//!     video::FrameLoader,
//! };
//!
//! # fn main() -> video_compare::Result<()> {
//! let loader = FrameLoader::new();
//! let video_a = loader.load("renders/baseline/")?;
//! let video_b = loader.load("renders/candidate.mp4")?;
//!
//! let comparator = FrameComparator::with_defaults(Config::default());
//! let request = comparator
//!     .request(video_a, video_b)
//!     .with_position(0.3);
//!
//! let presentation = comparator.present(&request)?;
//! println!("{}", presentation.ui.video_a_url);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`compare`] - Length sync, dimension matching, compositors, and the pipeline
//! - [`video`] - Frame model, loading, encoding, and output locations
//! - [`config`] - Configuration management
//!
//! ## Plugging In a Host
//!
//! Hosts supply their own [`VideoEncoder`](video::VideoEncoder) and
//! [`OutputLocator`](video::OutputLocator):
//!
//! ```rust,no_run
//! use std::path::Path;
//! use video_compare::video::{OutputLocator, StorageType};
//!
//! struct HostOutputs;
//!
//! impl OutputLocator for HostOutputs {
//!     fn output_dir(&self) -> &Path {
//!         Path::new("/srv/host/output")
//!     }
//!
//!     fn storage_type(&self) -> StorageType {
//!         StorageType::Output
//!     }
//! }
//! ```

pub mod compare;
pub mod config;
pub mod error;
pub mod video;

// Re-export commonly used types for convenience
pub use crate::{
    compare::{ComparisonMode, ComparisonRequest, FrameComparator},
    config::Config,
    error::{CompareError, Result},
    video::{Frame, FrameSequence},
};
