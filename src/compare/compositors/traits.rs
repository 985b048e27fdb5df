use crate::{
    compare::mode::ComparisonMode,
    error::{Result, ValidationError},
    video::{Frame, FrameDims, FrameSequence},
};

/// Core trait every comparison transform implements
pub trait Compositor {
    /// Returns the unique name of this compositor
    fn name(&self) -> &str;

    /// Returns a human-readable description of this compositor
    fn description(&self) -> &str;

    /// Mode this compositor renders
    fn mode(&self) -> ComparisonMode;

    /// Combine one pair of equally-shaped frames
    ///
    /// # Arguments
    ///
    /// * `a` - Frame from the first clip
    /// * `b` - Frame from the second clip, same shape as `a`
    /// * `position` - Blend weight or split position; ignored where it has no meaning
    fn composite_frame(&self, a: &Frame, b: &Frame, position: f32) -> Frame;

    /// Shape of the output frames for inputs shaped `input`
    fn output_dims(&self, input: FrameDims) -> FrameDims {
        input
    }

    /// Combine two aligned clips frame by frame
    ///
    /// Both clips must share frame count and frame shape.
    fn composite(&self, a: &FrameSequence, b: &FrameSequence, position: f32) -> Result<FrameSequence> {
        if a.shape() != b.shape() {
            return Err(ValidationError::ShapeMismatch {
                a: format!("{:?}", a.shape()),
                b: format!("{:?}", b.shape()),
            }
            .into());
        }

        let frames = a
            .iter()
            .zip(b.iter())
            .map(|(fa, fb)| self.composite_frame(fa, fb, position))
            .collect();

        FrameSequence::with_frames(self.output_dims(a.dims()), frames)
    }
}
