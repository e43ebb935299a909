//! Weft renderer: a multi-threaded recursive ray tracer.
//!
//! Primary rays are generated per pixel with grid super-sampling and
//! followed through reflective and refractive surfaces by a depth-bounded
//! kernel. Frames are split between OS worker threads by one of three
//! distribution strategies (static bands, claimed rows, claimed blocks)
//! that each cover every pixel exactly once.

mod buffer;
mod hittable;
mod kernel;
mod lighting;
mod plane;
mod renderer;
mod sampler;
pub mod schedule;
mod sphere;
mod triangle;
mod worker;
mod world;

pub use buffer::{PixelBuffer, SharedPixels};
pub use hittable::{Hit, Hittable, Intersection, HIT_EPSILON, HIT_RANGE};
pub use kernel::{reflect, refract, trace, transmitted_cosine, DEFAULT_REFRACTIVE_INDEX, MAX_DEPTH};
pub use lighting::shade;
pub use renderer::{
    render, ConfigError, RenderConfig, RenderError, RenderStats, Renderer, Strategy, MAX_HEIGHT,
    MAX_WIDTH,
};
pub use sampler::{Frame, PixelSampler};
pub use worker::{render_block_claim, render_row_claim, render_static};
pub use world::World;

/// Re-export common math types from weft_math
pub use weft_math::{Colour, Interval, Ray, Vec3};
