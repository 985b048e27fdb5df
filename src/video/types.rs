use std::fmt;
use std::path::Path;

use image::{DynamicImage, GrayAlphaImage, GrayImage, ImageBuffer, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};

/// Spatial and channel extent shared by every frame of a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameDims {
    pub height: usize,
    pub width: usize,
    pub channels: usize,
}

impl FrameDims {
    pub fn new(height: usize, width: usize, channels: usize) -> Self {
        Self { height, width, channels }
    }

    /// Number of samples in one frame of this size
    pub fn sample_count(&self) -> usize {
        self.height * self.width * self.channels
    }

    /// Like [`sample_count`](Self::sample_count), `None` on overflow
    pub fn checked_sample_count(&self) -> Option<usize> {
        self.height.checked_mul(self.width)?.checked_mul(self.channels)
    }

    /// Element-wise minimum of two extents
    pub fn min(self, other: FrameDims) -> FrameDims {
        FrameDims {
            height: self.height.min(other.height),
            width: self.width.min(other.width),
            channels: self.channels.min(other.channels),
        }
    }
}

impl fmt::Display for FrameDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.height, self.width, self.channels)
    }
}

/// A single video frame of normalized samples
///
/// Samples are `f32` values in `[0, 1]`, stored row-major as
/// height × width × channels.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    dims: FrameDims,
    data: Vec<f32>,
}

impl Frame {
    /// Create a frame from a sample buffer, checking its length against `dims`
    pub fn new(dims: FrameDims, data: Vec<f32>) -> Result<Self> {
        let expected = dims
            .checked_sample_count()
            .ok_or_else(|| ValidationError::parameter(format!("frame shape {} is too large", dims)))?;
        if data.len() != expected {
            return Err(ValidationError::DataLength {
                shape: vec![dims.height, dims.width, dims.channels],
                expected,
                actual: data.len(),
            }
            .into());
        }
        Ok(Self { dims, data })
    }

    /// Create a frame filled with zeros (black, fully transparent)
    pub fn zeros(dims: FrameDims) -> Self {
        Self {
            dims,
            data: vec![0.0; dims.sample_count()],
        }
    }

    /// Create a frame with every sample set to `value`
    pub fn filled(dims: FrameDims, value: f32) -> Self {
        Self {
            dims,
            data: vec![value; dims.sample_count()],
        }
    }

    /// Create a frame by evaluating `f(y, x, c)` for every sample
    pub fn from_fn<F>(dims: FrameDims, mut f: F) -> Self
    where
        F: FnMut(usize, usize, usize) -> f32,
    {
        let mut data = Vec::with_capacity(dims.sample_count());
        for y in 0..dims.height {
            for x in 0..dims.width {
                for c in 0..dims.channels {
                    data.push(f(y, x, c));
                }
            }
        }
        Self { dims, data }
    }

    pub fn dims(&self) -> FrameDims {
        self.dims
    }

    pub fn height(&self) -> usize {
        self.dims.height
    }

    pub fn width(&self) -> usize {
        self.dims.width
    }

    pub fn channels(&self) -> usize {
        self.dims.channels
    }

    #[inline]
    fn offset(&self, y: usize, x: usize, c: usize) -> usize {
        (y * self.dims.width + x) * self.dims.channels + c
    }

    /// Sample at row `y`, column `x`, channel `c`
    pub fn get(&self, y: usize, x: usize, c: usize) -> f32 {
        self.data[self.offset(y, x, c)]
    }

    pub fn set(&mut self, y: usize, x: usize, c: usize, value: f32) {
        let i = self.offset(y, x, c);
        self.data[i] = value;
    }

    /// All samples of row `y` (width × channels values)
    pub fn row(&self, y: usize) -> &[f32] {
        let stride = self.dims.width * self.dims.channels;
        &self.data[y * stride..(y + 1) * stride]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let stride = self.dims.width * self.dims.channels;
        &mut self.data[y * stride..(y + 1) * stride]
    }

    pub fn samples(&self) -> &[f32] {
        &self.data
    }

    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.data
    }

    /// Build a frame from a decoded image, keeping its channel layout
    ///
    /// Grayscale images give 1 channel, grayscale+alpha 2, RGB 3 and RGBA 4.
    pub fn from_image(image: &DynamicImage) -> Self {
        let (width, height) = (image.width() as usize, image.height() as usize);
        let (channels, raw) = match image.color().channel_count() {
            1 => (1, image.to_luma8().into_raw()),
            2 => (2, image.to_luma_alpha8().into_raw()),
            4 => (4, image.to_rgba8().into_raw()),
            _ => (3, image.to_rgb8().into_raw()),
        };

        Self {
            dims: FrameDims::new(height, width, channels),
            data: raw.into_iter().map(|b| b as f32 / 255.0).collect(),
        }
    }

    /// Build a frame from packed 8-bit RGB bytes
    pub fn from_rgb_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        let dims = FrameDims::new(height, width, 3);
        Self::new(dims, bytes.iter().map(|&b| b as f32 / 255.0).collect())
    }

    /// Quantize to packed 8-bit RGB
    ///
    /// Samples are clamped to `[0, 1]` and truncated after scaling by 255.
    /// Single-channel frames become gray, two-channel frames use their first
    /// channel, and anything past the third channel is dropped.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let channels = self.dims.channels;
        let mut out = Vec::with_capacity(self.dims.height * self.dims.width * 3);

        if channels == 0 {
            out.resize(self.dims.height * self.dims.width * 3, 0);
            return out;
        }

        for pixel in self.data.chunks_exact(channels) {
            match channels {
                1 | 2 => {
                    let v = quantize(pixel[0]);
                    out.extend_from_slice(&[v, v, v]);
                }
                _ => out.extend_from_slice(&[quantize(pixel[0]), quantize(pixel[1]), quantize(pixel[2])]),
            }
        }
        out
    }

    /// Convert to an 8-bit image with a matching color type
    pub fn to_image(&self) -> Result<DynamicImage> {
        let width = u32::try_from(self.dims.width)
            .map_err(|_| ValidationError::parameter(format!("frame width {} too large", self.dims.width)))?;
        let height = u32::try_from(self.dims.height)
            .map_err(|_| ValidationError::parameter(format!("frame height {} too large", self.dims.height)))?;
        let bytes: Vec<u8> = self.data.iter().map(|&v| quantize(v)).collect();

        let image = match self.dims.channels {
            1 => GrayImage::from_raw(width, height, bytes).map(DynamicImage::ImageLuma8),
            2 => GrayAlphaImage::from_raw(width, height, bytes).map(DynamicImage::ImageLumaA8),
            3 => RgbImage::from_raw(width, height, bytes).map(DynamicImage::ImageRgb8),
            4 => RgbaImage::from_raw(width, height, bytes).map(DynamicImage::ImageRgba8),
            _ => ImageBuffer::from_raw(width, height, self.to_rgb_bytes()).map(DynamicImage::ImageRgb8),
        };

        image.ok_or_else(|| {
            ValidationError::parameter(format!("cannot build an image from a {} frame", self.dims)).into()
        })
    }

    /// Save the frame as a PNG file
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.to_image()?.save(path).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("failed to save {}: {}", path.display(), e),
            )
        })?;
        Ok(())
    }
}

#[inline]
fn quantize(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0) as u8
}

/// An ordered stack of equally-shaped frames
///
/// The sequence remembers its frame dimensions even when it holds no frames,
/// so an empty clip still has a well-defined `(0, h, w, c)` shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSequence {
    dims: FrameDims,
    frames: Vec<Frame>,
}

impl FrameSequence {
    /// Create an empty sequence with the given frame dimensions
    pub fn new(dims: FrameDims) -> Self {
        Self { dims, frames: Vec::new() }
    }

    /// Create a sequence from frames that must all be shaped `dims`
    pub fn with_frames(dims: FrameDims, frames: Vec<Frame>) -> Result<Self> {
        for (index, frame) in frames.iter().enumerate() {
            if frame.dims() != dims {
                return Err(ValidationError::InconsistentFrame {
                    index,
                    expected: dims.to_string(),
                    actual: frame.dims().to_string(),
                }
                .into());
            }
        }
        Ok(Self { dims, frames })
    }

    /// Create a sequence whose dimensions come from its first frame
    pub fn from_frames(frames: Vec<Frame>) -> Result<Self> {
        let dims = frames
            .first()
            .map(Frame::dims)
            .ok_or_else(|| ValidationError::parameter("cannot infer dimensions of an empty frame list"))?;
        Self::with_frames(dims, frames)
    }

    /// Create a sequence from a flat tensor buffer and its shape
    ///
    /// `shape` must be `[frames, height, width, channels]`.
    pub fn from_raw(shape: &[usize], data: Vec<f32>) -> Result<Self> {
        let [count, height, width, channels] = <[usize; 4]>::try_from(shape)
            .map_err(|_| ValidationError::NotRank4 { rank: shape.len() })?;

        let dims = FrameDims::new(height, width, channels);
        let too_large = || ValidationError::parameter(format!("tensor shape {:?} is too large", shape));
        let per_frame = dims.checked_sample_count().ok_or_else(too_large)?;
        let expected = count.checked_mul(per_frame).ok_or_else(too_large)?;
        if data.len() != expected {
            return Err(ValidationError::DataLength {
                shape: shape.to_vec(),
                expected,
                actual: data.len(),
            }
            .into());
        }

        if per_frame == 0 && count > 0 {
            return Err(ValidationError::parameter(format!(
                "tensor shape {:?} has {} frames of zero size",
                shape, count
            ))
            .into());
        }

        let frames = data
            .chunks_exact(per_frame.max(1))
            .map(|chunk| Frame { dims, data: chunk.to_vec() })
            .collect();

        Ok(Self { dims, frames })
    }

    /// Flatten into `(shape, samples)` tensor form
    pub fn to_raw(&self) -> ([usize; 4], Vec<f32>) {
        let mut data = Vec::with_capacity(self.frames.len() * self.dims.sample_count());
        for frame in &self.frames {
            data.extend_from_slice(frame.samples());
        }
        (self.shape(), data)
    }

    pub fn dims(&self) -> FrameDims {
        self.dims
    }

    /// `[frames, height, width, channels]`
    pub fn shape(&self) -> [usize; 4] {
        [self.frames.len(), self.dims.height, self.dims.width, self.dims.channels]
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }

    /// Append a frame, rejecting one whose shape differs from the sequence
    pub fn push(&mut self, frame: Frame) -> Result<()> {
        if frame.dims() != self.dims {
            return Err(ValidationError::InconsistentFrame {
                index: self.frames.len(),
                expected: self.dims.to_string(),
                actual: frame.dims().to_string(),
            }
            .into());
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Drop trailing frames so at most `len` remain
    pub fn truncate(&mut self, len: usize) {
        self.frames.truncate(len);
    }
}
