//! Shared test infrastructure for pxpattern integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use pxpattern::colors::BLACK;
use pxpattern::{Color, NUM_PX, PixelSink, RandomSource};

// ============================================================================
// Mock Strip
// ============================================================================

/// Mock strip that stores pixels and counts presents
pub struct MockStrip {
    len: usize,
    pixels: [Color; NUM_PX],
    presented: [Color; NUM_PX],
    present_count: usize,
}

impl MockStrip {
    pub fn new() -> Self {
        Self::filled(BLACK)
    }

    pub fn filled(color: Color) -> Self {
        Self::short(NUM_PX, color)
    }

    /// Strip reporting only `len` pixels; touching any other pixel panics
    pub fn short(len: usize, color: Color) -> Self {
        assert!(len <= NUM_PX);
        Self {
            len,
            pixels: [color; NUM_PX],
            presented: [color; NUM_PX],
            present_count: 0,
        }
    }

    pub fn pixels(&self) -> &[Color; NUM_PX] {
        &self.pixels
    }

    /// Pixels as of the last present
    pub fn presented(&self) -> &[Color; NUM_PX] {
        &self.presented
    }

    pub fn present_count(&self) -> usize {
        self.present_count
    }
}

impl PixelSink for MockStrip {
    fn len(&self) -> usize {
        self.len
    }

    fn set_pixel(&mut self, index: usize, color: Color) {
        assert!(index < self.len, "pixel {index} is off the strip");
        self.pixels[index] = color;
    }

    fn pixel(&self, index: usize) -> Color {
        assert!(index < self.len, "pixel {index} is off the strip");
        self.pixels[index]
    }

    fn present(&mut self) {
        self.presented = self.pixels;
        self.present_count += 1;
    }
}

// ============================================================================
// Scripted Random Source
// ============================================================================

/// Random source replaying a fixed script of values, cycling when exhausted
pub struct ScriptedRng {
    values: Vec<u32>,
    next: usize,
}

impl ScriptedRng {
    pub fn new(values: &[u32]) -> Self {
        assert!(!values.is_empty());
        Self {
            values: values.to_vec(),
            next: 0,
        }
    }

    /// Always returns zero, so `uniform` always yields the range start
    pub fn zeros() -> Self {
        Self::new(&[0])
    }
}

impl RandomSource for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        let value = self.values[self.next % self.values.len()];
        self.next += 1;
        value
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub fn grey(level: u8) -> Color {
    Color::new(level, level, level)
}

pub fn brightness(color: Color) -> u32 {
    color.red as u32 + color.green as u32 + color.blue as u32
}
