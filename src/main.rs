use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use video_compare::{
    compare::{ComparisonMode, FrameComparator, SliderDirection},
    config::Config,
    video::FrameLoader,
};

#[derive(Parser)]
#[command(
    name = "video-compare",
    version,
    about = "Compare two video clips side by side, blended, or split-screen",
    long_about = "Video-Compare aligns two clips (frame folders, images, or video files) to a common length and frame size, renders a comparison, and writes browser-playable videos plus the metadata a slider widget needs."
)]
struct Cli {
    /// First clip: directory of frames, image, or video file
    video_a: PathBuf,

    /// Second clip: directory of frames, image, or video file
    video_b: PathBuf,

    /// Comparison mode (concat, blend, split)
    #[arg(short, long)]
    mode: Option<String>,

    /// Blend weight or split position (0.0-1.0)
    #[arg(short, long)]
    position: Option<f32>,

    /// Output frame rate
    #[arg(short = 'r', long)]
    frame_rate: Option<u32>,

    /// Slider direction reported to the frontend (horizontal, vertical, diagonal)
    #[arg(short, long)]
    direction: Option<String>,

    /// Fail instead of trimming clips of different lengths
    #[arg(long)]
    no_sync: bool,

    /// Directory for written videos (defaults to the OS temp dir)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also write the composite frames as numbered PNGs into this directory
    #[arg(long)]
    result_frames: Option<PathBuf>,

    /// Load at most this many frames per clip
    #[arg(long)]
    max_frames: Option<usize>,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout carries the JSON result
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Video-Compare v{}", env!("CARGO_PKG_VERSION"));
    info!("Video A: {:?}", cli.video_a);
    info!("Video B: {:?}", cli.video_b);

    // Load configuration
    let mut config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };

    if let Some(mode) = &cli.mode {
        config.compare.mode = mode.parse::<ComparisonMode>()?;
    }
    if let Some(position) = cli.position {
        config.compare.position = position;
    }
    if let Some(direction) = &cli.direction {
        config.compare.direction = direction.parse::<SliderDirection>()?;
    }
    if let Some(frame_rate) = cli.frame_rate {
        config.output.frame_rate = frame_rate;
    }
    if cli.no_sync {
        config.compare.sync = false;
    }
    if let Some(dir) = &cli.output_dir {
        config.output.temp_dir = Some(dir.clone());
    }
    config.validate()?;

    let loader = FrameLoader::new().with_max_frames(cli.max_frames);
    let video_a = loader
        .load(&cli.video_a)
        .with_context(|| format!("loading {}", cli.video_a.display()))?;
    let video_b = loader
        .load(&cli.video_b)
        .with_context(|| format!("loading {}", cli.video_b.display()))?;

    let comparator = FrameComparator::with_defaults(config);
    let request = comparator.request(video_a, video_b);

    let presentation = comparator.present(&request).map_err(|e| {
        anyhow::anyhow!(e.user_message())
    })?;

    if let Some(dir) = &cli.result_frames {
        std::fs::create_dir_all(dir)?;
        for (i, frame) in presentation.result.frames.iter().enumerate() {
            frame.save_png(dir.join(format!("frame_{:06}.png", i)))?;
        }
        info!("Wrote {} result frames to {:?}", presentation.result.frame_count, dir);
    }

    println!("{}", serde_json::to_string_pretty(&presentation.ui)?);
    info!("Comparison complete: {} frames", presentation.ui.frame_count);
    Ok(())
}
