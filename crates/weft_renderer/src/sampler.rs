//! Primary ray generation and anti-aliased pixel sampling.

use weft_math::{normalise, Colour, Ray, Vec3};

use crate::kernel::trace;
use crate::world::World;

/// Image-wide parameters shared by every worker of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    /// Sub-samples per axis per pixel
    pub aa_level: u32,
    /// Tint each pixel by the worker that rendered it
    pub colour_rise: bool,
}

/// Maps pixel coordinates to camera rays and averages the traced colour of
/// an `aa_level × aa_level` grid of sub-samples.
///
/// Pixel `(x, y)` of the buffer sits at view-plane coordinates
/// `(x - width/2, y - height/2)`, so row 0 is the bottom of the image.
pub struct PixelSampler<'w, W: World + ?Sized> {
    world: &'w W,
    frame: Frame,
    origin: Vec3,
    dir_step: f32,
    cos_yaw: f32,
    sin_yaw: f32,
    exposure: f32,
    sample_weight: f32,
}

impl<'w, W: World + ?Sized> PixelSampler<'w, W> {
    pub fn new(world: &'w W, frame: Frame) -> Self {
        let camera = world.camera();
        let half_fov = (std::f32::consts::PI / 180.0) * 0.5 * camera.field_of_view;
        let dir_step = 1.0 / (0.5 * frame.width as f32 / half_fov.tan());
        let aa = frame.aa_level as f32;

        Self {
            world,
            frame,
            origin: camera.position,
            dir_step,
            cos_yaw: camera.rotation.cos(),
            sin_yaw: camera.rotation.sin(),
            exposure: camera.exposure,
            sample_weight: 1.0 / (aa * aa),
        }
    }

    /// View-plane offset of a buffer column or row.
    pub fn centred(coordinate: usize, extent: usize) -> i32 {
        coordinate as i32 - (extent / 2) as i32
    }

    /// Camera ray through view-plane point `(fx, fy)`.
    pub fn primary_ray(&self, fx: f32, fy: f32) -> Ray {
        let dir = Vec3::new(fx * self.dir_step, fy * self.dir_step, 1.0);
        let rotated = Vec3::new(
            dir.x * self.cos_yaw - dir.z * self.sin_yaw,
            dir.y,
            dir.x * self.sin_yaw + dir.z * self.cos_yaw,
        );
        Ray::new(self.origin, normalise(rotated))
    }

    /// Average colour of buffer pixel `(x, y)`.
    pub fn sample(&self, x: usize, y: usize) -> Colour {
        let aa = self.frame.aa_level;
        let xc = Self::centred(x, self.frame.width) as f32;
        let yc = Self::centred(y, self.frame.height) as f32;

        let mut output = Colour::BLACK;
        for i in 0..aa {
            let fx = xc + i as f32 / aa as f32;
            for j in 0..aa {
                let fy = yc + j as f32 / aa as f32;
                output += self.sample_weight * trace(self.world, self.primary_ray(fx, fy));
            }
        }
        output
    }

    /// Final packed value of buffer pixel `(x, y)` rendered by `worker`.
    pub fn pixel(&self, x: usize, y: usize, worker: usize) -> u32 {
        let mut colour = self.sample(x, y);
        if self.frame.colour_rise {
            colour.colourise((worker % 7) as u32);
        }
        colour.convert_to_pixel(self.exposure)
    }
}
