//! The capabilities the tracer needs from a scene.
//!
//! `World` is the seam between the kernel and the scene: nearest-hit
//! queries, surface resolution, local lighting and the environment. The
//! renderer only ever talks to a `World`, so the kernel and schedulers can
//! be exercised against small hand-built worlds.

use weft_core::{Camera, Material, Scene};
use weft_math::{Colour, Interval, Ray};

use crate::hittable::{Hit, Hittable, Intersection, HIT_RANGE};
use crate::lighting;

pub trait World {
    /// Camera used to generate primary rays.
    fn camera(&self) -> &Camera;

    /// Nearest hit of `ray`, if any.
    fn intersect(&self, ray: &Ray) -> Option<Hit>;

    /// Normal, material and inside/outside state at a hit.
    fn resolve_surface(&self, ray: &Ray, hit: &Hit) -> Intersection<'_>;

    /// Local (diffuse + specular) lighting at an intersection.
    fn shade(&self, ray: &Ray, intersection: &Intersection<'_>) -> Colour;

    /// Material seen where rays escape the scene.
    fn sky(&self) -> &Material;
}

/// Nearest object hit within `ray_t`.
pub(crate) fn nearest_hit(scene: &Scene, ray: &Ray, ray_t: Interval) -> Option<Hit> {
    let mut closest: Option<Hit> = None;

    for (index, object) in scene.objects.iter().enumerate() {
        let max = closest.map_or(ray_t.max, |hit| hit.t);
        if let Some(t) = object.shape.hit(ray, Interval::new(ray_t.min, max)) {
            closest = Some(Hit { t, object: index });
        }
    }

    closest
}

impl World for Scene {
    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        nearest_hit(self, ray, HIT_RANGE)
    }

    fn resolve_surface(&self, ray: &Ray, hit: &Hit) -> Intersection<'_> {
        let object = &self.objects[hit.object];
        let position = ray.at(hit.t);

        Intersection::new(
            ray,
            position,
            object.shape.outward_normal(position),
            self.material(object.material),
            object.solid,
        )
    }

    fn shade(&self, ray: &Ray, intersection: &Intersection<'_>) -> Colour {
        lighting::shade(self, ray, intersection)
    }

    fn sky(&self) -> &Material {
        Scene::sky(self)
    }
}
