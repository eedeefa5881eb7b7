use std::io::Write;
use std::time::Duration;

use clap::Args;
use paraboard_core::animation::ascii;
use paraboard_core::{Animator, Bounds, Config, ParticleField};

use crate::common::{print_json, CliResult};

#[derive(Args)]
pub struct AnimateArgs {
    /// Number of frames to simulate
    #[arg(long, default_value_t = 90)]
    pub frames: u64,
    /// Terminal columns
    #[arg(long, default_value_t = 60)]
    pub cols: usize,
    /// Terminal rows
    #[arg(long, default_value_t = 16)]
    pub rows: usize,
    /// Seed for reproducible particles; overrides animation.seed
    #[arg(long)]
    pub seed: Option<u64>,
    /// Play frames at the configured fps instead of printing only the last one
    #[arg(long)]
    pub live: bool,
    /// Print the last frame's draw list as JSON
    #[arg(long, conflicts_with = "live")]
    pub json: bool,
}

pub fn run(args: AnimateArgs) -> CliResult {
    let config = Config::load_or_default();
    let anim = &config.animation;
    if !anim.enabled {
        tracing::info!("background animation is disabled in config");
        return Ok(());
    }

    let bounds = Bounds::new(f64::from(anim.width), f64::from(anim.height));
    let field = ParticleField::new(anim.particles as usize, bounds, args.seed.or(anim.seed));
    let mut animator = Animator::new(field);
    let frame_ms = 1000 / u64::from(anim.fps.max(1));

    let mut last = None;
    for i in 0..args.frames {
        let frame = animator.frame(i * frame_ms);
        if args.live {
            let mut stdout = std::io::stdout().lock();
            write!(stdout, "\x1b[2J\x1b[H")?;
            for line in ascii::rasterize(&frame, args.cols, args.rows) {
                writeln!(stdout, "{line}")?;
            }
            stdout.flush()?;
            std::thread::sleep(Duration::from_millis(frame_ms));
        }
        last = Some(frame);
    }
    tracing::debug!(frames = animator.frames_drawn(), "animation finished");

    let Some(frame) = last else {
        return Ok(());
    };
    if args.json {
        return print_json(&frame);
    }
    if !args.live {
        for line in ascii::rasterize(&frame, args.cols, args.rows) {
            println!("{line}");
        }
    }
    Ok(())
}
