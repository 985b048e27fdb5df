use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{EncodingError, Result};
use crate::video::types::FrameSequence;

/// Represents an encoded video output
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedVideo {
    pub path: PathBuf,
    pub frame_count: usize,
    pub frame_rate: u32,
    pub file_size: u64,
}

/// Turns a frame sequence into a playable video file
///
/// Implementations either leave a complete file at `output_path` or return an
/// error with nothing left there.
pub trait VideoEncoder {
    fn encode(&self, frames: &FrameSequence, frame_rate: u32, output_path: &Path) -> Result<EncodedVideo>;
}

/// Codec parameters handed to FFmpeg
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderSettings {
    /// FFmpeg video codec name
    pub codec: String,

    /// Quality setting (0-100, higher is better)
    pub quality: u8,

    /// Container extension, also selects the muxer
    pub container: String,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            codec: "libx264".to_string(),
            quality: 85,
            container: "mp4".to_string(),
        }
    }
}

impl EncoderSettings {
    fn muxer(&self) -> &str {
        match self.container.as_str() {
            "mkv" => "matroska",
            other => other,
        }
    }

    fn crf(&self) -> u8 {
        (51 - ((self.quality.min(100) as f32 / 100.0) * 51.0) as u8).clamp(0, 51)
    }
}

/// Encoder backed by the system `ffmpeg` binary
///
/// Frames are piped as raw 8-bit RGB; the output is yuv420p, padded to even
/// dimensions, so browsers can play it.
pub struct FfmpegEncoder {
    settings: EncoderSettings,
}

impl FfmpegEncoder {
    pub fn new(settings: EncoderSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EncoderSettings {
        &self.settings
    }

    pub fn check_ffmpeg_available() -> bool {
        Command::new("ffmpeg")
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Hidden sibling file FFmpeg writes to before the final rename
    fn partial_path(output_path: &Path) -> PathBuf {
        let name = output_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "video".to_string());
        output_path.with_file_name(format!(".{}.partial", name))
    }

    fn build_command(&self, frames: &FrameSequence, frame_rate: u32, target: &Path) -> Command {
        let dims = frames.dims();
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        cmd.args([
            "-y",
            "-loglevel", "error",
            "-f", "rawvideo",
            "-pix_fmt", "rgb24",
            "-s", &format!("{}x{}", dims.width, dims.height),
            "-r", &frame_rate.to_string(),
            "-i", "pipe:0",
            "-an",
            "-vf", "pad=ceil(iw/2)*2:ceil(ih/2)*2",
            "-c:v", &self.settings.codec,
            "-pix_fmt", "yuv420p",
            "-crf", &self.settings.crf().to_string(),
        ]);

        if matches!(self.settings.muxer(), "mp4" | "mov") {
            cmd.args(["-movflags", "+faststart"]);
        }

        cmd.args(["-f", self.settings.muxer()]).arg(target);
        cmd
    }

    fn run_ffmpeg(&self, frames: &FrameSequence, frame_rate: u32, target: &Path) -> Result<()> {
        let mut child = self
            .build_command(frames, frame_rate, target)
            .spawn()
            .map_err(|e| EncodingError::ProcessFailed {
                reason: format!("failed to spawn ffmpeg: {}", e),
            })?;

        let written = {
            let mut stdin = child.stdin.take().ok_or_else(|| EncodingError::ProcessFailed {
                reason: "failed to open ffmpeg stdin".to_string(),
            })?;
            frames
                .iter()
                .try_for_each(|frame| stdin.write_all(&frame.to_rgb_bytes()))
        };

        let output = child.wait_with_output().map_err(|e| EncodingError::ProcessFailed {
            reason: format!("failed to wait for ffmpeg: {}", e),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EncodingError::FfmpegFailed {
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            }
            .into());
        }

        written.map_err(|e| EncodingError::ProcessFailed {
            reason: format!("failed to write frames to ffmpeg: {}", e),
        })?;

        Ok(())
    }
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::new(EncoderSettings::default())
    }
}

impl VideoEncoder for FfmpegEncoder {
    fn encode(&self, frames: &FrameSequence, frame_rate: u32, output_path: &Path) -> Result<EncodedVideo> {
        if frames.is_empty() {
            return Err(EncodingError::EmptySequence.into());
        }

        let dims = frames.dims();
        if dims.height == 0 || dims.width == 0 || dims.channels == 0 {
            return Err(EncodingError::UnsupportedShape {
                details: dims.to_string(),
            }
            .into());
        }

        if !Self::check_ffmpeg_available() {
            return Err(EncodingError::FfmpegNotFound.into());
        }

        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let partial = Self::partial_path(output_path);
        debug!(
            "Encoding {} frames ({}) at {} fps via {}",
            frames.len(),
            dims,
            frame_rate,
            partial.display()
        );

        if let Err(e) = self.run_ffmpeg(frames, frame_rate, &partial) {
            if partial.exists() {
                if let Err(rm) = fs::remove_file(&partial) {
                    warn!("Failed to remove partial output {}: {}", partial.display(), rm);
                }
            }
            return Err(e);
        }

        fs::rename(&partial, output_path).map_err(|e| {
            let _ = fs::remove_file(&partial);
            EncodingError::FinalizeFailed {
                path: output_path.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        let file_size = fs::metadata(output_path)?.len();
        info!("Saved video: {} ({} KB)", output_path.display(), file_size / 1024);

        Ok(EncodedVideo {
            path: output_path.to_path_buf(),
            frame_count: frames.len(),
            frame_rate,
            file_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompareError;
    use crate::video::types::{Frame, FrameDims};

    #[test]
    fn test_quality_to_crf() {
        let mut settings = EncoderSettings::default();
        settings.quality = 100;
        assert_eq!(settings.crf(), 0);
        settings.quality = 0;
        assert_eq!(settings.crf(), 51);
        settings.quality = 85;
        assert_eq!(settings.crf(), 8);
    }

    #[test]
    fn test_partial_path_is_hidden_sibling() {
        let partial = FfmpegEncoder::partial_path(Path::new("/tmp/out/video_compare_a_1.mp4"));
        assert_eq!(partial, PathBuf::from("/tmp/out/.video_compare_a_1.mp4.partial"));
    }

    #[test]
    fn test_empty_sequence_is_rejected_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("empty.mp4");
        let frames = FrameSequence::new(FrameDims::new(4, 4, 3));

        let err = FfmpegEncoder::default().encode(&frames, 30, &target).unwrap_err();
        assert!(matches!(err, CompareError::Encoding(EncodingError::EmptySequence)));
        assert!(!target.exists());
    }

    #[test]
    fn test_failed_encode_leaves_no_files() {
        if !FfmpegEncoder::check_ffmpeg_available() {
            println!("ffmpeg not on PATH, skipping");
            return;
        }

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("broken.mp4");
        let dims = FrameDims::new(4, 4, 3);
        let frames = FrameSequence::with_frames(dims, vec![Frame::filled(dims, 0.5); 3]).unwrap();

        let encoder = FfmpegEncoder::new(EncoderSettings {
            codec: "no_such_codec".to_string(),
            ..EncoderSettings::default()
        });
        let err = encoder.encode(&frames, 30, &target).unwrap_err();
        assert!(matches!(err, CompareError::Encoding(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_mkv_uses_matroska_muxer() {
        let settings = EncoderSettings {
            container: "mkv".to_string(),
            ..EncoderSettings::default()
        };
        assert_eq!(settings.muxer(), "matroska");
    }
}
