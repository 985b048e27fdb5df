use crate::{
    compare::{compositors::Compositor, mode::ComparisonMode},
    video::Frame,
};

/// First column that shows B for a frame `width` wide
///
/// `floor(width * position)`, held to `[0, width]`.
pub fn split_column(width: usize, position: f32) -> usize {
    let column = (width as f64 * position as f64).floor();
    if column.is_nan() || column <= 0.0 {
        0
    } else {
        (column as usize).min(width)
    }
}

/// Hard vertical split: A left of the line, B right of it
pub struct SplitCompositor;

impl SplitCompositor {
    pub fn new() -> Self {
        Self
    }
}

impl Compositor for SplitCompositor {
    fn name(&self) -> &str {
        "split"
    }

    fn description(&self) -> &str {
        "Split screen: columns left of the split from A, the rest from B"
    }

    fn mode(&self) -> ComparisonMode {
        ComparisonMode::Split
    }

    fn composite_frame(&self, a: &Frame, b: &Frame, position: f32) -> Frame {
        let left = split_column(a.width(), position) * a.channels();
        let mut out = b.clone();

        for y in 0..a.height() {
            out.row_mut(y)[..left].copy_from_slice(&a.row(y)[..left]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::FrameDims;

    #[test]
    fn test_split_column() {
        assert_eq!(split_column(10, 0.5), 5);
        assert_eq!(split_column(7, 0.5), 3);
        assert_eq!(split_column(10, 0.0), 0);
        assert_eq!(split_column(10, 1.0), 10);
        assert_eq!(split_column(10, 1.7), 10);
        assert_eq!(split_column(10, -0.3), 0);
        assert_eq!(split_column(10, f32::NAN), 0);
    }

    #[test]
    fn test_columns_come_from_each_side() {
        let dims = FrameDims::new(2, 7, 3);
        let a = Frame::filled(dims, 0.1);
        let b = Frame::filled(dims, 0.8);

        let out = SplitCompositor::new().composite_frame(&a, &b, 0.5);
        for y in 0..2 {
            for x in 0..7 {
                let expected = if x < 3 { 0.1 } else { 0.8 };
                for c in 0..3 {
                    assert_eq!(out.get(y, x, c), expected);
                }
            }
        }
    }

    #[test]
    fn test_extremes_show_one_clip() {
        let dims = FrameDims::new(2, 4, 1);
        let a = Frame::filled(dims, 0.0);
        let b = Frame::filled(dims, 1.0);
        let split = SplitCompositor::new();

        assert_eq!(split.composite_frame(&a, &b, 0.0), b);
        assert_eq!(split.composite_frame(&a, &b, 1.0), a);
    }
}
