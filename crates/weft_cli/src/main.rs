mod cli;

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use weft_renderer::Renderer;

use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG applies unless --log-level was given
    let env = env_logger::Env::default().default_filter_or("info");
    let mut logger = env_logger::Builder::from_env(env);
    if let Some(level) = args.log_filter() {
        logger.filter_level(level);
    }
    logger.init();

    let scene_path = args.scene_path();
    let scene = weft_core::load_scene(scene_path)
        .with_context(|| format!("Failed to load scene {}", scene_path.display()))?;

    let config = args.render_config();
    let mut renderer = Renderer::new(config).context("Invalid render settings")?;

    let mut total = Duration::ZERO;
    for run in 1..=args.runs {
        let start = Instant::now();
        let stats = renderer.render(&scene).context("Render failed")?;
        let elapsed = start.elapsed();
        total += elapsed;

        log::info!(
            "Run {}/{}: {:.2?} ({} pixels, {} claims)",
            run,
            args.runs,
            elapsed,
            stats.pixels(),
            stats.claims
        );
    }

    log::info!(
        "Threads: {} average time taken ({} run(s)): {}ms",
        config.workers,
        args.runs,
        (total / args.runs).as_millis()
    );

    let output = args.output_path();
    let buffer = renderer.buffer();
    // Dimensions are bounded by the render limits, well inside u32
    weft_core::write_bmp(
        &output,
        &buffer.pixels,
        buffer.width as u32,
        buffer.height as u32,
        buffer.stride(),
    )
    .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(())
}
