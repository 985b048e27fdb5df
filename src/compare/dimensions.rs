use tracing::debug;

use crate::error::{Result, ValidationError};
use crate::video::{Frame, FrameDims, FrameSequence};

/// Leading offset and copy length for one axis of a crop-or-pad
///
/// A larger axis keeps its centered window (leading offset floored); a
/// smaller one is copied whole and zero-filled at the end.
fn axis_window(actual: usize, target: usize) -> (usize, usize) {
    if actual > target {
        ((actual - target) / 2, target)
    } else {
        (0, actual)
    }
}

/// Center-crop or zero-pad a frame to `target`
pub fn resize_frame(frame: &Frame, target: FrameDims) -> Frame {
    let source = frame.dims();
    if source == target {
        return frame.clone();
    }

    let (y0, rows) = axis_window(source.height, target.height);
    let (x0, cols) = axis_window(source.width, target.width);
    let (c0, chans) = axis_window(source.channels, target.channels);

    let mut out = Frame::zeros(target);
    if chans == 0 {
        return out;
    }

    for y in 0..rows {
        let src_row = frame.row(y0 + y);
        let dst_row = out.row_mut(y);
        for x in 0..cols {
            let src = (x0 + x) * source.channels + c0;
            let dst = x * target.channels;
            dst_row[dst..dst + chans].copy_from_slice(&src_row[src..src + chans]);
        }
    }
    out
}

/// Center-crop or zero-pad every frame of a sequence to `target`
pub fn resize_sequence(sequence: &FrameSequence, target: FrameDims) -> Result<FrameSequence> {
    if sequence.dims() == target {
        return Ok(sequence.clone());
    }

    let frames = sequence.iter().map(|frame| resize_frame(frame, target)).collect();
    FrameSequence::with_frames(target, frames)
}

/// Bring two equal-length clips to a shared frame shape
///
/// The shared shape is the element-wise minimum of both, so the larger clip
/// loses its margins.
pub fn match_dimensions(a: &FrameSequence, b: &FrameSequence) -> Result<(FrameSequence, FrameSequence)> {
    if a.len() != b.len() {
        return Err(ValidationError::LengthMismatch { a: a.len(), b: b.len() }.into());
    }

    let target = a.dims().min(b.dims());
    debug!("Target dimensions: {} (from {} and {})", target, a.dims(), b.dims());

    Ok((resize_sequence(a, target)?, resize_sequence(b, target)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indexed(dims: FrameDims) -> Frame {
        Frame::from_fn(dims, |y, x, c| (y * 100 + x * 10 + c) as f32)
    }

    #[test]
    fn test_center_crop_uses_floor_offset() {
        // height 5 -> 2 drops 3 rows: offset 1
        let frame = indexed(FrameDims::new(5, 4, 1));
        let out = resize_frame(&frame, FrameDims::new(2, 1, 1));

        assert_eq!(out.dims(), FrameDims::new(2, 1, 1));
        // width 4 -> 1: offset 1
        assert_eq!(out.get(0, 0, 0), 110.0);
        assert_eq!(out.get(1, 0, 0), 210.0);
    }

    #[test]
    fn test_channel_axis_is_center_cropped() {
        let frame = indexed(FrameDims::new(1, 1, 4));
        let out = resize_frame(&frame, FrameDims::new(1, 1, 1));
        assert_eq!(out.samples(), &[1.0]);

        let out = resize_frame(&frame, FrameDims::new(1, 1, 3));
        assert_eq!(out.samples(), &[0.0, 1.0, 2.0]);

        // RGBA against LA: offset (4 - 2) / 2 keeps channels 1 and 2
        let out = resize_frame(&frame, FrameDims::new(1, 1, 2));
        assert_eq!(out.samples(), &[1.0, 2.0]);
    }

    #[test]
    fn test_pad_appends_zeros() {
        let frame = Frame::filled(FrameDims::new(2, 2, 1), 1.0);
        let out = resize_frame(&frame, FrameDims::new(3, 3, 2));

        for y in 0..3 {
            for x in 0..3 {
                let inside = y < 2 && x < 2;
                assert_eq!(out.get(y, x, 0), if inside { 1.0 } else { 0.0 });
                assert_eq!(out.get(y, x, 1), 0.0);
            }
        }
    }

    #[test]
    fn test_crop_one_axis_pad_another() {
        let frame = indexed(FrameDims::new(4, 1, 1));
        let out = resize_frame(&frame, FrameDims::new(2, 2, 1));
        assert_eq!(out.samples(), &[100.0, 0.0, 200.0, 0.0]);
    }

    #[test]
    fn test_match_dimensions_scenario() {
        let a = FrameSequence::from_raw(&[30, 240, 320, 3], vec![0.25; 30 * 240 * 320 * 3]).unwrap();
        let b = FrameSequence::from_raw(&[30, 180, 240, 3], vec![0.75; 30 * 180 * 240 * 3]).unwrap();

        let (a, b) = match_dimensions(&a, &b).unwrap();
        assert_eq!(a.shape(), [30, 180, 240, 3]);
        assert_eq!(b.shape(), [30, 180, 240, 3]);
        assert!(a.frames()[0].samples().iter().all(|&v| v == 0.25));
    }

    #[test]
    fn test_match_dimensions_mixed_min() {
        let a = FrameSequence::from_raw(&[2, 10, 4, 4], vec![0.5; 2 * 10 * 4 * 4]).unwrap();
        let b = FrameSequence::from_raw(&[2, 6, 8, 3], vec![0.5; 2 * 6 * 8 * 3]).unwrap();

        let (a, b) = match_dimensions(&a, &b).unwrap();
        assert_eq!(a.dims(), FrameDims::new(6, 4, 3));
        assert_eq!(b.dims(), FrameDims::new(6, 4, 3));
    }

    #[test]
    fn test_match_dimensions_requires_equal_lengths() {
        let a = FrameSequence::from_raw(&[2, 2, 2, 3], vec![0.0; 24]).unwrap();
        let b = FrameSequence::from_raw(&[1, 2, 2, 3], vec![0.0; 12]).unwrap();
        assert!(match_dimensions(&a, &b).is_err());
    }
}
