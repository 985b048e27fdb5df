use crate::{
    compare::{compositors::Compositor, mode::ComparisonMode},
    video::Frame,
};

/// Linear mix `(1 - alpha) * A + alpha * B`, clamped to `[0, 1]`
pub struct BlendCompositor;

impl BlendCompositor {
    pub fn new() -> Self {
        Self
    }
}

impl Compositor for BlendCompositor {
    fn name(&self) -> &str {
        "blend"
    }

    fn description(&self) -> &str {
        "Alpha blend: 0 shows only A, 1 shows only B"
    }

    fn mode(&self) -> ComparisonMode {
        ComparisonMode::Blend
    }

    fn composite_frame(&self, a: &Frame, b: &Frame, alpha: f32) -> Frame {
        let keep = 1.0 - alpha;
        let mut out = a.clone();

        for (o, &bv) in out.samples_mut().iter_mut().zip(b.samples()) {
            *o = (keep * *o + alpha * bv).clamp(0.0, 1.0);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::FrameDims;

    fn pair() -> (Frame, Frame) {
        let dims = FrameDims::new(4, 5, 3);
        let a = Frame::from_fn(dims, |y, x, c| ((y * 7 + x * 3 + c) % 11) as f32 / 10.0);
        let b = Frame::from_fn(dims, |y, x, c| ((y + x * 5 + c * 2) % 9) as f32 / 8.0);
        (a, b)
    }

    #[test]
    fn test_endpoints_are_exact() {
        let (a, b) = pair();
        let blend = BlendCompositor::new();

        assert_eq!(blend.composite_frame(&a, &b, 0.0), a);
        assert_eq!(blend.composite_frame(&a, &b, 1.0), b);
    }

    #[test]
    fn test_midpoint_and_clamp() {
        let dims = FrameDims::new(1, 1, 1);
        let a = Frame::filled(dims, 0.2);
        let b = Frame::filled(dims, 0.6);
        let blend = BlendCompositor::new();

        assert!((blend.composite_frame(&a, &b, 0.5).get(0, 0, 0) - 0.4).abs() < 1e-6);
        // extrapolation stays in range
        assert_eq!(blend.composite_frame(&a, &b, 3.0).get(0, 0, 0), 1.0);
        assert_eq!(blend.composite_frame(&a, &b, -2.0).get(0, 0, 0), 0.0);
    }

    #[test]
    fn test_self_blend_is_identity() {
        let (a, _) = pair();
        let blend = BlendCompositor::new();

        for alpha in [0.1_f32, 0.33, 0.5, 0.9] {
            let out = blend.composite_frame(&a, &a, alpha);
            for (o, v) in out.samples().iter().zip(a.samples()) {
                assert!((o - v).abs() <= 1e-6);
            }
        }
    }
}
