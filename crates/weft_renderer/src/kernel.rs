//! Recursive ray-tracing kernel.
//!
//! A ray is followed through at most [`MAX_DEPTH`] bounces. Each hit adds
//! its local lighting scaled by the running transmission coefficient, then
//! either mirrors the ray, bends it through the surface, or stops. Rays that
//! escape (or run out of bounces) pick up the sky colour.

use weft_core::Surface;
use weft_math::{normalise, Colour, Ray};

use crate::hittable::Intersection;
use crate::world::World;

/// Maximum number of surface interactions followed per primary ray.
pub const MAX_DEPTH: u32 = 10;

/// Refractive index outside every object (air).
pub const DEFAULT_REFRACTIVE_INDEX: f32 = 1.0;

/// Follow a single ray until it escapes, stops on an opaque surface, or
/// reaches the bounce limit.
pub fn trace<W: World + ?Sized>(world: &W, ray: Ray) -> Colour {
    let mut output = Colour::BLACK;
    let mut refractive_index = DEFAULT_REFRACTIVE_INDEX;
    let mut coefficient = 1.0f32;
    let mut ray = ray;

    for _ in 0..MAX_DEPTH {
        let Some(hit) = world.intersect(&ray) else {
            break;
        };

        let intersection = world.resolve_surface(&ray, &hit);

        if !intersection.inside {
            output += coefficient * world.shade(&ray, &intersection);
        }

        match intersection.material.surface {
            Surface::Reflective { coefficient: reflection } => {
                ray = reflect(&ray, &intersection);
                coefficient *= reflection;
            }
            Surface::Refractive {
                coefficient: refraction,
                density,
            } => {
                let (refracted, index) = refract(&ray, &intersection, density, refractive_index);
                ray = refracted;
                refractive_index = index;
                coefficient *= refraction;
            }
            Surface::Opaque => return output,
        }
    }

    if coefficient > 0.0 {
        output += coefficient * world.sky().diffuse;
    }

    output
}

/// Mirror the ray about the surface normal: `d' = d - 2(d·n)n`.
pub fn reflect(ray: &Ray, intersection: &Intersection<'_>) -> Ray {
    let direction = ray.direction() - intersection.normal * (intersection.view_projection * 2.0);
    Ray::new(intersection.position, direction)
}

/// Bend the ray through the surface with Snell's law.
///
/// Returns the transmitted ray and the refractive index of the medium it
/// now travels through: the material's density when entering, the default
/// index when leaving.
pub fn refract(
    ray: &Ray,
    intersection: &Intersection<'_>,
    density: f32,
    refractive_index: f32,
) -> (Ray, f32) {
    let new_index = if intersection.inside {
        DEFAULT_REFRACTIVE_INDEX
    } else {
        density
    };
    let ratio = refractive_index / new_index;

    let cos_i = intersection.view_projection.abs();
    let cos_t = transmitted_cosine(cos_i, ratio);

    let n = intersection.normal;
    let direction = (ray.direction() + n * cos_i) * ratio - n * cos_t;

    (Ray::new(intersection.position, normalise(direction)), new_index)
}

/// Cosine of the transmitted angle for incidence cosine `cos_i` and index
/// ratio `ratio`.
///
/// Rays along the normal pass straight through (`1`). Past the critical
/// angle there is no transmitted component (`0`).
pub fn transmitted_cosine(cos_i: f32, ratio: f32) -> f32 {
    if cos_i >= 1.0 {
        return 1.0;
    }

    let sin_t = ratio * (1.0 - cos_i * cos_i).sqrt();
    let radicand = 1.0 - sin_t * sin_t;
    if radicand <= 0.0 {
        0.0
    } else {
        radicand.sqrt()
    }
}
