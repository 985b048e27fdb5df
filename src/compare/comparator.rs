use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    compare::{
        compositors::CompositorRegistry,
        dimensions::match_dimensions,
        mode::ComparisonMode,
        request::{ComparisonRequest, ComparisonResult, ComparisonUi, Presentation},
        sync::sync_lengths,
    },
    config::Config,
    error::{InvalidModeError, Result, ValidationError},
    video::{FfmpegEncoder, FrameSequence, OutputLocator, TempDirLocator, VideoEncoder, ViewReference},
};

/// Runs the comparison pipeline and hands results to the host
///
/// The pipeline is fixed:
/// 1. Length sync - trim both clips to the shorter one
/// 2. Dimension match - crop/pad both to the element-wise minimum shape
/// 3. Composite - concat, blend or split frame by frame
/// 4. Encode - write videos through the injected [`VideoEncoder`]
pub struct FrameComparator {
    config: Config,
    registry: CompositorRegistry,
    encoder: Box<dyn VideoEncoder>,
    locator: Box<dyn OutputLocator>,
}

impl FrameComparator {
    /// Create a comparator with explicit encoding and location collaborators
    pub fn new(config: Config, encoder: Box<dyn VideoEncoder>, locator: Box<dyn OutputLocator>) -> Self {
        Self {
            config,
            registry: CompositorRegistry::new(),
            encoder,
            locator,
        }
    }

    /// Create a comparator that encodes with FFmpeg into the configured directory
    pub fn with_defaults(config: Config) -> Self {
        let encoder = FfmpegEncoder::new(config.output.encoder_settings());
        let locator = match &config.output.temp_dir {
            Some(dir) => TempDirLocator::new(dir.clone()),
            None => TempDirLocator::default(),
        }
        .with_subfolder(config.output.subfolder.clone());

        Self::new(config, Box::new(encoder), Box::new(locator))
    }

    /// Replace the compositor registry
    pub fn with_registry(mut self, registry: CompositorRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Start a request for two clips using the configured defaults
    pub fn request(&self, video_a: FrameSequence, video_b: FrameSequence) -> ComparisonRequest {
        let defaults = &self.config.compare;
        ComparisonRequest::new(video_a, video_b, defaults.mode)
            .with_position(defaults.position)
            .with_frame_rate(self.config.output.frame_rate)
            .with_sync(defaults.sync)
            .with_direction(defaults.direction)
    }

    /// Synchronize and dimension-match the two clips of a request
    pub fn align(&self, request: &ComparisonRequest) -> Result<(FrameSequence, FrameSequence)> {
        let (a, b) = (&request.video_a, &request.video_b);

        let (a, b) = if request.sync {
            sync_lengths(a.clone(), b.clone())
        } else if a.len() != b.len() {
            return Err(ValidationError::LengthMismatch { a: a.len(), b: b.len() }.into());
        } else {
            (a.clone(), b.clone())
        };

        match_dimensions(&a, &b)
    }

    /// Produce the composite clip for a request
    pub fn compare(&self, request: &ComparisonRequest) -> Result<ComparisonResult> {
        let (_, _, result) = self.run(request)?;
        Ok(result)
    }

    /// Compare, then write the videos the frontend plays
    ///
    /// Concatenated comparisons are written as one combined video. The other
    /// modes write the aligned A and B clips separately so the frontend can
    /// slide between them.
    pub fn present(&self, request: &ComparisonRequest) -> Result<Presentation> {
        let (a, b, result) = self.run(request)?;
        let id = Self::mint_id();

        let (video_a_url, video_b_url) = if request.mode.is_slider() {
            let ref_a = self.encode_to(&a, request.frame_rate, &self.output_name("a", &id))?;
            let ref_b = self.encode_to(&b, request.frame_rate, &self.output_name("b", &id))?;
            (ref_a.url(), ref_b.url())
        } else {
            let combined = self.encode_to(&result.frames, request.frame_rate, &self.output_name("combined", &id))?;
            (combined.url(), String::new())
        };

        let ui = ComparisonUi {
            video_a_url,
            video_b_url,
            comparison_mode: request.mode,
            slider_direction: request.direction,
            frame_count: result.frame_count,
            frame_rate: request.frame_rate,
        };

        Ok(Presentation { ui, result })
    }

    fn run(&self, request: &ComparisonRequest) -> Result<(FrameSequence, FrameSequence, ComparisonResult)> {
        request.validate()?;
        let compositor = self.registry.get(request.mode).ok_or_else(|| InvalidModeError {
            mode: request.mode.to_string(),
            expected: self
                .registry
                .available_modes()
                .iter()
                .map(ComparisonMode::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        })?;

        info!(
            "Starting {} comparison: A {:?}, B {:?}",
            request.mode,
            request.video_a.shape(),
            request.video_b.shape()
        );

        let (a, b) = self.align(request)?;
        info!("Processing {} frames at {}", a.len(), a.dims());

        let frames = compositor.composite(&a, &b, request.position)?;
        debug!("{} produced {:?}", compositor.name(), frames.shape());

        let result = ComparisonResult {
            frame_count: frames.len(),
            frames,
            frame_rate: request.frame_rate,
            mode: request.mode,
        };
        Ok((a, b, result))
    }

    fn mint_id() -> String {
        Uuid::new_v4().simple().to_string()[..8].to_string()
    }

    fn output_name(&self, tag: &str, id: &str) -> String {
        format!(
            "{}_{}_{}.{}",
            self.config.output.filename_prefix, tag, id, self.config.output.container
        )
    }

    fn encode_to(&self, frames: &FrameSequence, frame_rate: u32, filename: &str) -> Result<ViewReference> {
        let path = self.locator.path_for(filename);
        self.encoder.encode(frames, frame_rate, &path)?;
        Ok(self.locator.reference(filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    use crate::video::{EncodedVideo, Frame, FrameDims};

    #[derive(Default)]
    struct NullEncoder {
        calls: RefCell<Vec<(PathBuf, usize)>>,
    }

    impl VideoEncoder for NullEncoder {
        fn encode(&self, frames: &FrameSequence, frame_rate: u32, output_path: &Path) -> Result<EncodedVideo> {
            self.calls.borrow_mut().push((output_path.to_path_buf(), frames.len()));
            Ok(EncodedVideo {
                path: output_path.to_path_buf(),
                frame_count: frames.len(),
                frame_rate,
                file_size: 0,
            })
        }
    }

    fn clip(len: usize, dims: FrameDims, value: f32) -> FrameSequence {
        FrameSequence::with_frames(dims, vec![Frame::filled(dims, value); len]).unwrap()
    }

    fn comparator() -> FrameComparator {
        FrameComparator::new(
            Config::default(),
            Box::new(NullEncoder::default()),
            Box::new(TempDirLocator::new("/tmp/compare-tests")),
        )
    }

    #[test]
    fn test_request_uses_config_defaults() {
        let mut config = Config::default();
        config.compare.mode = ComparisonMode::Split;
        config.compare.position = 0.25;
        config.output.frame_rate = 12;
        let comparator = FrameComparator::new(
            config,
            Box::new(NullEncoder::default()),
            Box::new(TempDirLocator::default()),
        );

        let dims = FrameDims::new(2, 2, 3);
        let req = comparator.request(clip(1, dims, 0.0), clip(1, dims, 1.0));
        assert_eq!(req.mode, ComparisonMode::Split);
        assert_eq!(req.position, 0.25);
        assert_eq!(req.frame_rate, 12);
    }

    #[test]
    fn test_no_sync_with_unequal_lengths_fails() {
        let dims = FrameDims::new(2, 2, 3);
        let req = ComparisonRequest::new(clip(3, dims, 0.0), clip(4, dims, 1.0), ComparisonMode::Blend)
            .with_sync(false);

        let err = comparator().compare(&req).unwrap_err();
        assert!(matches!(
            err,
            crate::error::CompareError::Validation(ValidationError::LengthMismatch { a: 3, b: 4 })
        ));
    }

    #[test]
    fn test_output_names_share_id() {
        let comparator = comparator();
        let id = FrameComparator::mint_id();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(
            comparator.output_name("a", &id),
            format!("video_compare_a_{}.mp4", id)
        );
    }
}
