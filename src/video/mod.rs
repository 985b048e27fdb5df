//! # Video Module
//!
//! Frame data model, input loading, video encoding, and output locations.

pub mod types;
pub mod encoder;
pub mod loader;
pub mod locator;

pub use types::{Frame, FrameDims, FrameSequence};
pub use encoder::{EncodedVideo, EncoderSettings, FfmpegEncoder, VideoEncoder};
pub use loader::FrameLoader;
pub use locator::{OutputLocator, StorageType, TempDirLocator, ViewReference};
