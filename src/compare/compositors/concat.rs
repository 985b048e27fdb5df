use crate::{
    compare::{compositors::Compositor, mode::ComparisonMode},
    video::{Frame, FrameDims},
};

/// Places A and B next to each other along the width axis
pub struct ConcatCompositor;

impl ConcatCompositor {
    pub fn new() -> Self {
        Self
    }
}

impl Compositor for ConcatCompositor {
    fn name(&self) -> &str {
        "concat"
    }

    fn description(&self) -> &str {
        "Side-by-side view: A on the left half, B on the right half"
    }

    fn mode(&self) -> ComparisonMode {
        ComparisonMode::Concat
    }

    fn output_dims(&self, input: FrameDims) -> FrameDims {
        FrameDims {
            width: input.width * 2,
            ..input
        }
    }

    fn composite_frame(&self, a: &Frame, b: &Frame, _position: f32) -> Frame {
        let mut out = Frame::zeros(self.output_dims(a.dims()));
        let half = a.width() * a.channels();

        for y in 0..a.height() {
            let row = out.row_mut(y);
            row[..half].copy_from_slice(a.row(y));
            row[half..].copy_from_slice(b.row(y));
        }
        out
    }
}
