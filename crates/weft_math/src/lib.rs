// Re-export glam for convenience
pub use glam::*;

// Weft math types
mod colour;
mod interval;
mod ray;
pub use colour::Colour;
pub use interval::Interval;
pub use ray::Ray;

/// Normalise a vector, leaving it unchanged when its length is too small to
/// divide by.
#[inline]
pub fn normalise(v: Vec3) -> Vec3 {
    let length = v.length();
    if length < f32::EPSILON {
        return v;
    }
    v / length
}
