//! Ray-sphere intersection.

use crate::hittable::Hittable;
use weft_core::Sphere;
use weft_math::{Interval, Ray, Vec3};

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        let oc = self.centre - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        Some(root)
    }

    fn outward_normal(&self, point: Vec3) -> Vec3 {
        (point - self.centre) / self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::HIT_RANGE;

    fn unit_sphere_ahead() -> Sphere {
        Sphere {
            centre: Vec3::new(0.0, 0.0, 3.0),
            radius: 1.0,
        }
    }

    #[test]
    fn test_sphere_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let t = unit_sphere_ahead().hit(&ray, HIT_RANGE).unwrap();
        assert!((t - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert!(unit_sphere_ahead().hit(&ray, HIT_RANGE).is_none());

        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(unit_sphere_ahead().hit(&ray, HIT_RANGE).is_none());
    }

    #[test]
    fn test_hit_from_inside_uses_far_root() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Z);
        let t = unit_sphere_ahead().hit(&ray, HIT_RANGE).unwrap();
        assert!((t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_outward_normal() {
        let n = unit_sphere_ahead().outward_normal(Vec3::new(0.0, 1.0, 3.0));
        assert_eq!(n, Vec3::Y);
    }
}
