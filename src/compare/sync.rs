use tracing::debug;

use crate::video::FrameSequence;

/// Trim two clips to a common frame count
///
/// Clips of equal length come back untouched; otherwise trailing frames of
/// the longer one are dropped. No resampling happens.
pub fn sync_lengths(mut a: FrameSequence, mut b: FrameSequence) -> (FrameSequence, FrameSequence) {
    if a.len() == b.len() {
        return (a, b);
    }

    let target = a.len().min(b.len());
    debug!("Syncing {} and {} frames to {}", a.len(), b.len(), target);
    a.truncate(target);
    b.truncate(target);
    (a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::{Frame, FrameDims};

    fn clip(len: usize, value: f32) -> FrameSequence {
        let dims = FrameDims::new(2, 3, 3);
        let frames = (0..len).map(|i| Frame::filled(dims, value + i as f32)).collect();
        FrameSequence::with_frames(dims, frames).unwrap()
    }

    #[test]
    fn test_truncates_longer_clip() {
        let (a, b) = sync_lengths(clip(30, 0.0), clip(45, 100.0));
        assert_eq!(a.len(), 30);
        assert_eq!(b.len(), 30);
        // leading frames survive
        assert_eq!(b.frames()[29].get(0, 0, 0), 129.0);
    }

    #[test]
    fn test_equal_lengths_unchanged() {
        let original_a = clip(7, 0.0);
        let original_b = clip(7, 1.0);
        let (a, b) = sync_lengths(original_a.clone(), original_b.clone());
        assert_eq!(a, original_a);
        assert_eq!(b, original_b);
    }

    #[test]
    fn test_empty_side_empties_both() {
        let (a, b) = sync_lengths(clip(0, 0.0), clip(5, 0.0));
        assert!(a.is_empty());
        assert!(b.is_empty());
        assert_eq!(b.dims(), FrameDims::new(2, 3, 3));
    }
}
