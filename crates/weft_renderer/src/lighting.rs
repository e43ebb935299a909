//! Local lighting: Lambert diffuse plus Blinn-Phong specular from point
//! lights, with hard shadows.

use weft_core::Scene;
use weft_math::{normalise, Colour, Interval, Ray};

use crate::hittable::{Intersection, HIT_EPSILON};
use crate::world::nearest_hit;

/// Sum the direct contribution of every light visible from the hit point.
pub fn shade(scene: &Scene, ray: &Ray, intersection: &Intersection<'_>) -> Colour {
    let material = intersection.material;
    let mut output = Colour::BLACK;

    for light in &scene.lights {
        let to_light = light.position - intersection.position;
        let distance = to_light.length();
        if distance < HIT_EPSILON {
            continue;
        }
        let light_dir = to_light / distance;

        // Surface faces away from the light
        let lambert = light_dir.dot(intersection.normal);
        if lambert <= 0.0 {
            continue;
        }

        let shadow_ray = Ray::new(intersection.position, light_dir);
        if nearest_hit(scene, &shadow_ray, Interval::new(HIT_EPSILON, distance)).is_some() {
            continue;
        }

        output += lambert * (light.intensity * material.diffuse);

        let half = normalise(light_dir - ray.direction());
        let blinn = half.dot(intersection.normal).max(0.0).powf(material.power);
        output += blinn * (light.intensity * material.specular);
    }

    output
}
