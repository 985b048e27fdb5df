// Minimal smoke run of the comparison core, no FFmpeg needed

use video_compare::{
    compare::{match_dimensions, sync_lengths, CompositorRegistry},
    video::{Frame, FrameDims, FrameSequence},
};

fn gradient_clip(frames: usize, height: usize, width: usize) -> Result<FrameSequence, Box<dyn std::error::Error>> {
    let dims = FrameDims::new(height, width, 3);
    let clip = (0..frames)
        .map(|i| {
            let t = i as f32 / frames as f32;
            Frame::from_fn(dims, |y, x, c| {
                let u = x as f32 / width as f32;
                let v = y as f32 / height as f32;
                let phase = match c {
                    0 => u + t,
                    1 => v + t,
                    _ => u * v + t,
                };
                (2.0 * std::f32::consts::PI * phase).sin() * 0.5 + 0.5
            })
        })
        .collect();
    Ok(FrameSequence::with_frames(dims, clip)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Testing Video-Compare core functionality");

    println!("\n1. Building synthetic clips...");
    let video_a = gradient_clip(15, 120, 160)?;
    let video_b = gradient_clip(20, 100, 140)?;
    println!("   A: {:?}", video_a.shape());
    println!("   B: {:?}", video_b.shape());

    println!("\n2. Aligning...");
    let (video_a, video_b) = sync_lengths(video_a, video_b);
    let (video_a, video_b) = match_dimensions(&video_a, &video_b)?;
    println!("   Aligned to {:?}", video_a.shape());
    assert_eq!(video_a.shape(), video_b.shape());

    println!("\n3. Compositing...");
    let registry = CompositorRegistry::new();
    for mode in registry.available_modes() {
        let compositor = registry.get(mode).ok_or("compositor missing")?;
        let result = compositor.composite(&video_a, &video_b, 0.7)?;
        println!("   {} -> {:?} ({})", compositor.name(), result.shape(), compositor.description());

        let middle = result.get(result.len() / 2).ok_or("empty result")?;
        let path = format!("minimal_{}.png", compositor.name());
        match middle.save_png(&path) {
            Ok(()) => println!("   Saved middle frame to: {}", path),
            Err(e) => println!("   Could not save file: {}", e),
        }
    }

    println!("\nAll comparisons rendered.");
    Ok(())
}
