//! Multi-threaded frame orchestration.
//!
//! A render spawns one named OS thread per worker inside a
//! [`std::thread::scope`], lets each run its strategy's loop over a shared
//! pixel buffer and joins them all before returning. The static strategy
//! hands every worker its own slice; the claiming strategies share the
//! buffer through [`SharedPixels`] and a [`WorkCursor`].

use std::fmt;
use std::io;
use std::thread::{self, Scope, ScopedJoinHandle};
use std::time::Instant;

use thiserror::Error;

use crate::buffer::{PixelBuffer, SharedPixels};
use crate::sampler::Frame;
use crate::schedule::{StaticPartition, WorkCursor};
use crate::worker;
use crate::world::World;

/// Largest accepted image width.
pub const MAX_WIDTH: usize = 4096;
/// Largest accepted image height.
pub const MAX_HEIGHT: usize = 4096;

/// How pixels are divided between workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// One fixed band of the flattened image per worker
    Static,
    /// Whole rows claimed from a shared counter
    RowClaim,
    /// Square blocks claimed from a shared counter
    BlockClaim { block_size: usize },
}

impl Strategy {
    pub const DEFAULT_BLOCK_SIZE: usize = 64;
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Static => write!(f, "static"),
            Strategy::RowClaim => write!(f, "row claim"),
            Strategy::BlockClaim { block_size } => write!(f, "block claim ({}px)", block_size),
        }
    }
}

/// Rejected render configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("image dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },

    #[error("image {width}x{height} exceeds the {max_width}x{max_height} limit")]
    TooLarge {
        width: usize,
        height: usize,
        max_width: usize,
        max_height: usize,
    },

    #[error("at least one worker thread is required")]
    ZeroWorkers,

    #[error("anti-aliasing level must be at least 1")]
    ZeroSamples,

    #[error("block size must be positive")]
    ZeroBlockSize,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] io::Error),
}

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,
    /// Samples per axis per pixel
    pub aa_level: u32,
    /// Number of worker threads
    pub workers: usize,
    pub strategy: Strategy,
    /// Tint pixels by the worker that rendered them
    pub colour_rise: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            aa_level: 1,
            workers: 1,
            strategy: Strategy::Static,
            colour_rise: false,
        }
    }
}

impl RenderConfig {
    /// Check every field before any worker is spawned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.width > MAX_WIDTH || self.height > MAX_HEIGHT {
            return Err(ConfigError::TooLarge {
                width: self.width,
                height: self.height,
                max_width: MAX_WIDTH,
                max_height: MAX_HEIGHT,
            });
        }
        if self.workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        if self.aa_level == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if let Strategy::BlockClaim { block_size: 0 } = self.strategy {
            return Err(ConfigError::ZeroBlockSize);
        }
        Ok(())
    }

    pub fn frame(&self) -> Frame {
        Frame {
            width: self.width,
            height: self.height,
            aa_level: self.aa_level,
            colour_rise: self.colour_rise,
        }
    }
}

/// What the workers of one render did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStats {
    /// Pixels written by each worker, indexed by worker
    pub pixels_per_worker: Vec<usize>,
    /// Claims taken from the work cursor, including each worker's final
    /// empty claim. Zero for the static strategy.
    pub claims: usize,
}

impl RenderStats {
    pub fn pixels(&self) -> usize {
        self.pixels_per_worker.iter().sum()
    }
}

/// Renders frames for a fixed configuration, reusing its buffer and work
/// cursor between runs.
pub struct Renderer {
    config: RenderConfig,
    buffer: PixelBuffer,
    cursor: WorkCursor,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            buffer: PixelBuffer::new(config.width, config.height),
            cursor: WorkCursor::new(),
            config,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }

    /// Render one frame of `world` into the buffer.
    pub fn render<W: World + Sync + ?Sized>(
        &mut self,
        world: &W,
    ) -> Result<RenderStats, RenderError> {
        let config = self.config;
        let frame = config.frame();
        let workers = config.workers;

        log::info!(
            "Rendering {}x{} at {}x{} AA with {} worker(s), {} strategy",
            config.width,
            config.height,
            config.aa_level,
            config.aa_level,
            workers,
            config.strategy
        );
        let start = Instant::now();

        self.cursor.reset();
        let cursor = &self.cursor;
        let pixels = &mut self.buffer.pixels;

        let pixels_per_worker = match config.strategy {
            Strategy::Static => run_static(world, frame, workers, pixels)?,
            Strategy::RowClaim => run_shared(workers, pixels, |index, shared| {
                worker::render_row_claim(world, frame, index, cursor, shared)
            })?,
            Strategy::BlockClaim { block_size } => run_shared(workers, pixels, |index, shared| {
                worker::render_block_claim(world, frame, index, block_size, cursor, shared)
            })?,
        };

        let claims = match config.strategy {
            Strategy::Static => 0,
            _ => self.cursor.claims(),
        };
        let stats = RenderStats {
            pixels_per_worker,
            claims,
        };

        log::info!("Rendered {} pixels in {:.2?}", stats.pixels(), start.elapsed());
        Ok(stats)
    }
}

/// Validate `config`, render `world` once and return the finished buffer.
pub fn render<W: World + Sync + ?Sized>(
    world: &W,
    config: RenderConfig,
) -> Result<PixelBuffer, RenderError> {
    let mut renderer = Renderer::new(config)?;
    renderer.render(world)?;
    Ok(renderer.into_buffer())
}

fn spawn_worker<'scope, F>(
    scope: &'scope Scope<'scope, '_>,
    worker: usize,
    job: F,
) -> io::Result<ScopedJoinHandle<'scope, usize>>
where
    F: FnOnce() -> usize + Send + 'scope,
{
    thread::Builder::new()
        .name(format!("weft-worker-{}", worker))
        .spawn_scoped(scope, job)
}

fn join_workers(handles: Vec<ScopedJoinHandle<'_, usize>>) -> Vec<usize> {
    handles
        .into_iter()
        .enumerate()
        .map(|(worker, handle)| match handle.join() {
            Ok(written) => {
                log::debug!("Worker {} finished: {} pixels", worker, written);
                written
            }
            Err(panic) => std::panic::resume_unwind(panic),
        })
        .collect()
}

/// Split the buffer into one band per worker up front.
fn run_static<W: World + Sync + ?Sized>(
    world: &W,
    frame: Frame,
    workers: usize,
    pixels: &mut [u32],
) -> Result<Vec<usize>, RenderError> {
    let partition = StaticPartition::new(frame.width, frame.height, workers);

    thread::scope(|s| -> Result<Vec<usize>, RenderError> {
        let mut rest = pixels;
        let mut handles = Vec::with_capacity(workers);

        for index in 0..workers {
            let (band, tail) = std::mem::take(&mut rest).split_at_mut(partition.band(index).len());
            rest = tail;
            handles.push(spawn_worker(s, index, move || {
                worker::render_static(world, frame, index, workers, band)
            })?);
        }

        Ok(join_workers(handles))
    })
}

/// Run `job` on every worker against one shared view of the buffer.
fn run_shared<F>(workers: usize, pixels: &mut [u32], job: F) -> Result<Vec<usize>, RenderError>
where
    F: Fn(usize, &SharedPixels<'_>) -> usize + Sync,
{
    let shared = SharedPixels::new(pixels);
    let shared = &shared;
    let job = &job;

    thread::scope(|s| -> Result<Vec<usize>, RenderError> {
        let handles = (0..workers)
            .map(|index| spawn_worker(s, index, move || job(index, shared)))
            .collect::<io::Result<Vec<_>>>()?;

        Ok(join_workers(handles))
    })
}
