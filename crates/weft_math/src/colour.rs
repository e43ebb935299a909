//! RGB colour accumulated by the tracer and packed into pixels.

use std::ops::{Add, AddAssign, Mul};

use crate::Interval;

/// Linear RGB radiance. Channels are non-negative and unbounded above until
/// the colour is mapped to a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Colour {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

/// Scale applied to channels that colour-rise does not keep.
const DIMMED_CHANNEL: f32 = 0.25;

impl Colour {
    pub const BLACK: Colour = Colour::new(0.0, 0.0, 0.0);
    pub const WHITE: Colour = Colour::new(1.0, 1.0, 1.0);

    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    /// Tint the colour to identify which worker produced it.
    ///
    /// `tint` is expected in `0..7`; bit `k` of `tint + 1` keeps channel `k`
    /// (red, green, blue) at full strength and the rest are dimmed, so the
    /// seven possible tints are all distinct and none is black.
    pub fn colourise(&mut self, tint: u32) {
        let mask = tint % 7 + 1;
        let scale = |bit: u32| if mask & bit != 0 { 1.0 } else { DIMMED_CHANNEL };
        self.red *= scale(0b001);
        self.green *= scale(0b010);
        self.blue *= scale(0b100);
    }

    /// Apply exposure and pack into a `0x00RRGGBB` pixel.
    ///
    /// Exposure follows `1 - e^(channel * exposure)`, so it is negative for
    /// a visible image (the default scene exposure is `-1.0`).
    pub fn convert_to_pixel(&self, exposure: f32) -> u32 {
        let channel = |c: f32| (255.0 * Interval::UNIT.clamp(1.0 - (c * exposure).exp())) as u32;
        (channel(self.red) << 16) | (channel(self.green) << 8) | channel(self.blue)
    }

    /// Split a packed pixel back into `[r, g, b]` bytes.
    pub fn unpack_pixel(pixel: u32) -> [u8; 3] {
        [(pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8]
    }
}

impl Add for Colour {
    type Output = Colour;

    fn add(self, rhs: Colour) -> Colour {
        Colour::new(self.red + rhs.red, self.green + rhs.green, self.blue + rhs.blue)
    }
}

impl AddAssign for Colour {
    fn add_assign(&mut self, rhs: Colour) {
        self.red += rhs.red;
        self.green += rhs.green;
        self.blue += rhs.blue;
    }
}

impl Mul<f32> for Colour {
    type Output = Colour;

    fn mul(self, rhs: f32) -> Colour {
        Colour::new(self.red * rhs, self.green * rhs, self.blue * rhs)
    }
}

impl Mul<Colour> for f32 {
    type Output = Colour;

    fn mul(self, rhs: Colour) -> Colour {
        rhs * self
    }
}

/// Component-wise product, used to filter light by a surface colour.
impl Mul for Colour {
    type Output = Colour;

    fn mul(self, rhs: Colour) -> Colour {
        Colour::new(self.red * rhs.red, self.green * rhs.green, self.blue * rhs.blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weighted_accumulation() {
        let mut out = Colour::BLACK;
        out += 0.5 * Colour::new(1.0, 0.5, 0.25);
        out += Colour::new(0.5, 0.5, 0.5) * 0.5;
        assert_eq!(out, Colour::new(0.75, 0.5, 0.375));
    }

    #[test]
    fn test_black_maps_to_zero() {
        assert_eq!(Colour::BLACK.convert_to_pixel(-1.0), 0);
    }

    #[test]
    fn test_bright_colour_saturates() {
        let pixel = Colour::new(100.0, 100.0, 100.0).convert_to_pixel(-1.0);
        assert_eq!(Colour::unpack_pixel(pixel), [255, 255, 255]);
    }

    #[test]
    fn test_positive_exposure_clamps_to_black() {
        let pixel = Colour::new(1.0, 1.0, 1.0).convert_to_pixel(1.0);
        assert_eq!(pixel, 0);
    }

    #[test]
    fn test_channel_packing_order() {
        let pixel = Colour::new(100.0, 0.0, 0.0).convert_to_pixel(-1.0);
        assert_eq!(pixel, 0x00FF_0000);
        assert_eq!(Colour::unpack_pixel(0x0012_3456), [0x12, 0x34, 0x56]);
    }

    #[test]
    fn test_exposure_curve() {
        // 1 - e^-1 = 0.632..., times 255 = 161.2
        let pixel = Colour::new(1.0, 0.0, 0.0).convert_to_pixel(-1.0);
        assert_eq!(Colour::unpack_pixel(pixel)[0], 161);
    }

    #[test]
    fn test_colourise_is_deterministic_and_distinct() {
        let mut seen = Vec::new();
        for tint in 0..7 {
            let mut a = Colour::WHITE;
            let mut b = Colour::WHITE;
            a.colourise(tint);
            b.colourise(tint);
            assert_eq!(a, b);
            assert!(!seen.contains(&a), "tint {} repeats an earlier tint", tint);
            seen.push(a);
        }
        // Worker 7 wraps back to the first tint
        let mut wrapped = Colour::WHITE;
        wrapped.colourise(7);
        assert_eq!(wrapped, seen[0]);
    }
}
