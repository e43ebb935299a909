//! Ray-triangle intersection.
//!
//! Uses the Möller-Trumbore algorithm.

use crate::hittable::Hittable;
use weft_core::Triangle;
use weft_math::{Interval, Ray, Vec3};

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction().cross(edge2);
        let a = edge1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < 1e-8 {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(h);

        // Check if intersection is outside triangle (u parameter)
        if !Interval::UNIT.contains(u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = f * ray.direction().dot(q);

        // Check if intersection is outside triangle (v parameter)
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(q);
        ray_t.surrounds(t).then_some(t)
    }

    fn outward_normal(&self, _point: Vec3) -> Vec3 {
        self.normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::HIT_RANGE;

    fn facing_camera() -> Triangle {
        // Triangle in XY plane at z=1, normal towards -Z
        Triangle::new(
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
        )
    }

    #[test]
    fn test_triangle_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let t = facing_camera().hit(&ray, HIT_RANGE).unwrap();
        assert!((t - 1.0).abs() < 1e-5);
        assert!((facing_camera().outward_normal(Vec3::ZERO) + Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_triangle_miss() {
        // Ray pointing away
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert!(facing_camera().hit(&ray, HIT_RANGE).is_none());

        // Ray passing beside the triangle
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::Z);
        assert!(facing_camera().hit(&ray, HIT_RANGE).is_none());
    }
}
