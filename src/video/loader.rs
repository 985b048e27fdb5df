use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{InputError, Result};
use crate::video::types::{Frame, FrameSequence};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "mkv", "avi", "webm"];

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    width: Option<usize>,
    height: Option<usize>,
}

/// Loads frame sequences from image folders, single images, or video files
#[derive(Debug, Clone, Default)]
pub struct FrameLoader {
    max_frames: Option<usize>,
}

impl FrameLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop after `max_frames` frames
    pub fn with_max_frames(mut self, max_frames: Option<usize>) -> Self {
        self.max_frames = max_frames;
        self
    }

    fn extension(path: &Path) -> Option<String> {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
    }

    pub fn is_image_file<P: AsRef<Path>>(path: P) -> bool {
        Self::extension(path.as_ref()).map_or(false, |e| IMAGE_EXTENSIONS.contains(&e.as_str()))
    }

    pub fn is_video_file<P: AsRef<Path>>(path: P) -> bool {
        Self::extension(path.as_ref()).map_or(false, |e| VIDEO_EXTENSIONS.contains(&e.as_str()))
    }

    pub fn is_supported<P: AsRef<Path>>(path: P) -> bool {
        Self::is_image_file(&path) || Self::is_video_file(&path)
    }

    fn is_hidden_file(path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map_or(false, |n| n.starts_with('.'))
    }

    /// Load a directory of frames, a single image, or a video file
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<FrameSequence> {
        let path = path.as_ref();

        if path.is_dir() {
            self.load_directory(path)
        } else if !path.exists() {
            Err(InputError::LoadFailed {
                path: path.display().to_string(),
            }
            .into())
        } else if Self::is_image_file(path) {
            FrameSequence::from_frames(vec![self.load_image(path)?])
        } else if Self::is_video_file(path) {
            self.load_video(path)
        } else {
            Err(InputError::Unsupported {
                path: path.display().to_string(),
            }
            .into())
        }
    }

    /// Load every supported image in `dir`, ordered by file name
    pub fn load_directory<P: AsRef<Path>>(&self, dir: P) -> Result<FrameSequence> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|_| InputError::LoadFailed {
            path: dir.display().to_string(),
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() || Self::is_hidden_file(&path) {
                continue;
            }
            if Self::is_image_file(&path) {
                paths.push(path);
            } else {
                debug!("Skipping non-image file: {}", path.display());
            }
        }
        paths.sort();

        if let Some(max) = self.max_frames {
            paths.truncate(max);
        }

        if paths.is_empty() {
            return Err(InputError::NoFramesFound {
                path: dir.display().to_string(),
            }
            .into());
        }

        let frames = paths
            .iter()
            .map(|p| self.load_image(p))
            .collect::<Result<Vec<_>>>()?;

        let sequence = FrameSequence::from_frames(frames)?;
        info!("Loaded {} frames ({}) from {}", sequence.len(), sequence.dims(), dir.display());
        Ok(sequence)
    }

    fn load_image(&self, path: &Path) -> Result<Frame> {
        let image = image::open(path).map_err(|_| InputError::LoadFailed {
            path: path.display().to_string(),
        })?;
        Ok(Frame::from_image(&image))
    }

    fn probe_dimensions(&self, path: &Path) -> Result<(usize, usize)> {
        let output = Command::new("ffprobe")
            .args([
                "-v", "error",
                "-select_streams", "v:0",
                "-show_entries", "stream=width,height",
                "-of", "json",
            ])
            .arg(path)
            .output()
            .map_err(|e| InputError::DecodeFailed {
                path: path.display().to_string(),
                reason: format!("ffprobe failed to start: {}", e),
            })?;

        if !output.status.success() {
            return Err(InputError::DecodeFailed {
                path: path.display().to_string(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        let probe: ProbeOutput = serde_json::from_slice(&output.stdout).map_err(|e| InputError::DecodeFailed {
            path: path.display().to_string(),
            reason: format!("invalid ffprobe output: {}", e),
        })?;

        probe
            .streams
            .first()
            .and_then(|s| Some((s.width?, s.height?)))
            .ok_or_else(|| {
                InputError::DecodeFailed {
                    path: path.display().to_string(),
                    reason: "no video stream".to_string(),
                }
                .into()
            })
    }

    /// Decode a video file to RGB frames through FFmpeg
    pub fn load_video<P: AsRef<Path>>(&self, path: P) -> Result<FrameSequence> {
        let path = path.as_ref();
        let (width, height) = self.probe_dimensions(path)?;
        debug!("Decoding {} at {}x{}", path.display(), width, height);

        let mut cmd = Command::new("ffmpeg");
        cmd.args(["-v", "error", "-i"]).arg(path);
        if let Some(max) = self.max_frames {
            cmd.args(["-frames:v", &max.to_string()]);
        }
        cmd.args(["-f", "rawvideo", "-pix_fmt", "rgb24", "pipe:1"]);

        let output = cmd.output().map_err(|e| InputError::DecodeFailed {
            path: path.display().to_string(),
            reason: format!("ffmpeg failed to start: {}", e),
        })?;

        if !output.status.success() {
            return Err(InputError::DecodeFailed {
                path: path.display().to_string(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        let frame_size = width * height * 3;
        if frame_size == 0 || output.stdout.len() % frame_size != 0 {
            return Err(InputError::DecodeFailed {
                path: path.display().to_string(),
                reason: format!(
                    "{} decoded bytes do not divide into {}x{} RGB frames",
                    output.stdout.len(),
                    width,
                    height
                ),
            }
            .into());
        }

        let frames = output
            .stdout
            .chunks_exact(frame_size)
            .map(|chunk| Frame::from_rgb_bytes(width, height, chunk))
            .collect::<Result<Vec<_>>>()?;

        if frames.is_empty() {
            warn!("No frames decoded from {}", path.display());
            return Err(InputError::NoFramesFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let sequence = FrameSequence::from_frames(frames)?;
        info!("Decoded {} frames ({}) from {}", sequence.len(), sequence.dims(), path.display());
        Ok(sequence)
    }
}
