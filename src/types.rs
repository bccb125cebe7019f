//! Core types shared by the parser, renderer and animation engine.

use alloc::vec::Vec;
use bitflags::bitflags;
use palette::Srgb;

/// An 8-bit RGB color as stored on the strip.
pub type Color = Srgb<u8>;

/// A color anchored at a strip index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradPoint {
    /// Strip index of this point.
    pub position: u16,

    /// Color at that index.
    pub color: Color,
}

impl GradPoint {
    /// Creates a new gradient point.
    #[inline]
    pub const fn new(position: u16, color: Color) -> Self {
        Self { position, color }
    }
}

/// A color ramp defined by sparse points along the strip.
///
/// Point positions never decrease; repeated positions are allowed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Gradient {
    points: Vec<GradPoint>,
}

impl Gradient {
    /// Creates a gradient, validating that positions are non-decreasing.
    ///
    /// # Errors
    /// * `OutOfOrder` - A point lies before its predecessor
    pub fn new(points: Vec<GradPoint>) -> Result<Self, ParseError> {
        if points.windows(2).any(|w| w[1].position < w[0].position) {
            return Err(ParseError::OutOfOrder);
        }
        Ok(Self { points })
    }

    /// Wraps points that the caller has already sorted.
    pub(crate) fn from_sorted(points: Vec<GradPoint>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].position <= w[1].position));
        Self { points }
    }

    /// Returns the points of this gradient in strip order.
    pub fn points(&self) -> &[GradPoint] {
        &self.points
    }

    /// Returns the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the gradient has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// How an animated gradient frame moves to the next one.
///
/// Only `Hold` behaves differently; every other mode blends linearly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlendMode {
    /// Show the frame unchanged for its whole duration.
    Hold,
    /// Linear per-pixel blend toward the next frame.
    Linear,
    Dissolve,
    RSlide,
    LSlide,
}

impl BlendMode {
    /// Decodes a wire blend byte. Unknown values blend linearly.
    pub fn from_wire(byte: u8) -> Self {
        match byte {
            1 => BlendMode::Hold,
            3 => BlendMode::Dissolve,
            4 => BlendMode::RSlide,
            5 => BlendMode::LSlide,
            _ => BlendMode::Linear,
        }
    }

    /// Returns the wire byte for this mode.
    pub fn to_wire(self) -> u8 {
        match self {
            BlendMode::Hold => 1,
            BlendMode::Linear => 2,
            BlendMode::Dissolve => 3,
            BlendMode::RSlide => 4,
            BlendMode::LSlide => 5,
        }
    }
}

/// One keyframe of an animated gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Ticks spent on this frame before moving on.
    pub duration: u16,

    /// Blend toward the following frame.
    pub blend: BlendMode,

    pub gradient: Gradient,
}

/// A pair of colors to sample random colors between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRange {
    pub c1: Color,
    pub c2: Color,
}

impl ColorRange {
    #[inline]
    pub const fn new(c1: Color, c2: Color) -> Self {
        Self { c1, c2 }
    }
}

/// A non-empty set of color ranges used for random sampling.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    ranges: Vec<ColorRange>,
}

impl Palette {
    /// Creates a palette.
    ///
    /// # Errors
    /// * `EmptySection` - No ranges were given
    pub fn new(ranges: Vec<ColorRange>) -> Result<Self, ParseError> {
        if ranges.is_empty() {
            return Err(ParseError::EmptySection);
        }
        Ok(Self { ranges })
    }

    /// Returns the ranges of this palette. Never empty.
    pub fn ranges(&self) -> &[ColorRange] {
        &self.ranges
    }
}

bitflags! {
    /// Spot kinds a popping pattern may spawn.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct SpotKinds: u8 {
        /// Spot fades from its center to its edge.
        const FUZZ = 1 << 0;
        /// Whole spot lit evenly.
        const SOLID = 1 << 1;
    }
}

/// Packet decoding errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Packet is shorter than the header plus the fixed body of its type.
    TooShort,

    /// Packet exceeds the maximum packet length.
    TooLarge,

    /// Header names a pattern type that does not exist.
    UnknownType(u8),

    /// A variable-length section does not exactly fill the remaining bytes.
    LengthMismatch,

    /// Gradient positions decrease.
    OutOfOrder,

    /// Empty palette or animated gradient without frames.
    EmptySection,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::TooShort => write!(f, "packet too short for its pattern type"),
            ParseError::TooLarge => write!(f, "packet exceeds maximum length"),
            ParseError::UnknownType(t) => write!(f, "unknown pattern type {}", t),
            ParseError::LengthMismatch => {
                write!(f, "declared section size does not match remaining bytes")
            }
            ParseError::OutOfOrder => write!(f, "gradient point positions decrease"),
            ParseError::EmptySection => {
                write!(f, "palette or frame list must not be empty")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}
