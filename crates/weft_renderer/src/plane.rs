//! Ray-plane intersection.

use crate::hittable::Hittable;
use weft_core::Plane;
use weft_math::{Interval, Ray, Vec3};

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        let denom = self.normal.dot(ray.direction());

        // Ray is parallel to the plane
        if denom.abs() < 1e-8 {
            return None;
        }

        let t = (self.offset - self.normal.dot(ray.origin())) / denom;
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

    #[test]
    fn test_plane_hit_from_both_sides() {
        let floor = Plane::new(Vec3::Y, -1.0);

        let down = Ray::new(Vec3::ZERO, -Vec3::Y);
        assert_eq!(floor.hit(&down, HIT_RANGE), Some(1.0));

        let up = Ray::new(Vec3::new(0.0, -3.0, 0.0), Vec3::Y);
        assert_eq!(floor.hit(&up, HIT_RANGE), Some(2.0));
    }

    #[test]
    fn test_parallel_ray_misses() {
        let floor = Plane::new(Vec3::Y, -1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert!(floor.hit(&ray, HIT_RANGE).is_none());
    }

    #[test]
    fn test_plane_behind_ray_misses() {
        let floor = Plane::new(Vec3::Y, -1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(floor.hit(&ray, HIT_RANGE).is_none());
    }
}
