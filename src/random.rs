//! Palette-driven random colors and gradients.

use alloc::vec::Vec;
use core::ops::Range;

use crate::render::lerp;
use crate::types::{Color, GradPoint, Gradient, Palette};

/// Number of discrete blend steps between the two colors of a range.
const COLOR_STEPS: u32 = 64;

/// Source of random numbers.
///
/// Implement this over a hardware RNG on the device; use [`XorShift32`] or a
/// scripted source in tests.
pub trait RandomSource {
    /// Returns the next random 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Returns a value uniformly drawn from the half-open `range`.
    ///
    /// The range must be non-empty.
    fn uniform(&mut self, range: Range<u32>) -> u32 {
        debug_assert!(range.end > range.start);
        range.start + self.next_u32() % (range.end - range.start)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// Seedable xorshift32 generator.
#[derive(Debug, Clone)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Creates a generator. A zero seed is replaced, since xorshift never
    /// leaves the all-zero state.
    pub const fn new(seed: u32) -> Self {
        let state = if seed == 0 { 0x9E37_79B9 } else { seed };
        Self { state }
    }
}

impl RandomSource for XorShift32 {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

/// Samples a color from a random range of the palette.
///
/// The color is one of 65 evenly spaced blends between the range's two ends.
pub fn random_color<R: RandomSource>(palette: &Palette, rng: &mut R) -> Color {
    let ranges = palette.ranges();
    let range = ranges[rng.uniform(0..ranges.len() as u32) as usize];
    let step = rng.uniform(0..COLOR_STEPS + 1);
    lerp(range.c1, range.c2, step, COLOR_STEPS)
}

/// Builds a gradient of `count` random points spread over `[0, span)`.
///
/// Positions are sorted ascending and may repeat.
pub fn random_gradient<R: RandomSource>(
    palette: &Palette,
    count: usize,
    span: u16,
    rng: &mut R,
) -> Gradient {
    let mut positions: Vec<u16> = (0..count)
        .map(|_| rng.uniform(0..span as u32) as u16)
        .collect();
    positions.sort_unstable();

    let points = positions
        .into_iter()
        .map(|position| GradPoint::new(position, random_color(palette, rng)))
        .collect();
    Gradient::from_sorted(points)
}
