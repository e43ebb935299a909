/// A closed range of `f32` values, used for valid hit distances and for
/// clamping colour channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// The unit interval [0, 1].
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_contains() {
        let interval = Interval::new(0.0, 10.0);

        // Inclusive bounds
        assert!(interval.contains(0.0));
        assert!(interval.contains(10.0));
        assert!(interval.contains(5.0));

        assert!(!interval.contains(-0.1));
        assert!(!interval.contains(10.1));
    }

    #[test]
    fn test_interval_surrounds() {
        let interval = Interval::new(0.0, 10.0);

        // Exclusive bounds - endpoints NOT included
        assert!(!interval.surrounds(0.0));
        assert!(!interval.surrounds(10.0));
        assert!(interval.surrounds(0.1));
        assert!(interval.surrounds(9.9));
    }

    #[test]
    fn test_interval_clamp() {
        assert_eq!(Interval::UNIT.clamp(-5.0), 0.0);
        assert_eq!(Interval::UNIT.clamp(0.5), 0.5);
        assert_eq!(Interval::UNIT.clamp(15.0), 1.0);
    }

    #[test]
    fn test_open_ended_interval() {
        let hits = Interval::new(1e-3, f32::INFINITY);
        assert!(hits.surrounds(1e9));
        assert!(!hits.surrounds(0.0));
    }
}
