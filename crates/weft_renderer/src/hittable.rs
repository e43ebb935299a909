//! Hittable trait and the per-step intersection record.

use weft_core::{Material, Shape};
use weft_math::{Interval, Ray, Vec3};

/// Hits closer than this are treated as self-intersections and ignored.
pub const HIT_EPSILON: f32 = 1e-3;

/// Valid hit distances for rays leaving a surface.
pub const HIT_RANGE: Interval = Interval::new(HIT_EPSILON, f32::INFINITY);

/// The nearest hit of a ray: distance along the ray and the index of the
/// object that was hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub t: f32,
    pub object: usize,
}

/// Surface response at a hit, rebuilt for every trace step.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    /// Point of intersection
    pub position: Vec3,
    /// Unit surface normal, always facing against the incoming ray
    pub normal: Vec3,
    /// `direction · normal`; never positive since the normal faces the ray
    pub view_projection: f32,
    /// Material at the intersection point
    pub material: &'a Material,
    /// Whether the ray started inside the object it hit
    pub inside: bool,
}

impl<'a> Intersection<'a> {
    /// Build the record from the shape's outward normal.
    ///
    /// If the ray travels along the outward normal it is leaving the
    /// object: `inside` is set (for solid objects) and the normal is flipped
    /// so it faces the ray.
    pub fn new(
        ray: &Ray,
        position: Vec3,
        outward_normal: Vec3,
        material: &'a Material,
        solid: bool,
    ) -> Self {
        let projection = ray.direction().dot(outward_normal);
        let leaving = projection > 0.0;

        let (normal, view_projection) = if leaving {
            (-outward_normal, -projection)
        } else {
            (outward_normal, projection)
        };

        Self {
            position,
            normal,
            view_projection,
            material,
            inside: solid && leaving,
        }
    }
}

/// Geometry that rays can intersect.
pub trait Hittable {
    /// Distance to the nearest hit strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f32>;

    /// Unit outward normal at a point on the surface.
    fn outward_normal(&self, point: Vec3) -> Vec3;
}

impl Hittable for Shape {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        match self {
            Shape::Sphere(s) => s.hit(ray, ray_t),
            Shape::Plane(p) => p.hit(ray, ray_t),
            Shape::Triangle(t) => t.hit(ray, ray_t),
        }
    }

    fn outward_normal(&self, point: Vec3) -> Vec3 {
        match self {
            Shape::Sphere(s) => s.outward_normal(point),
            Shape::Plane(p) => p.outward_normal(point),
            Shape::Triangle(t) => t.outward_normal(point),
        }
    }
}
