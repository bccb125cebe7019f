//! The decoded, owned animation state for one strip.

use alloc::vec::Vec;
use core::ops::Range;

use crate::spots::SpotRing;
use crate::types::{Color, Frame, Gradient, Palette, SpotKinds};
use crate::wire::PatternType;
use crate::MAX_SPOTS;

/// A looping sequence of gradient frames.
#[derive(Debug, Clone, PartialEq)]
pub struct AniGradient {
    /// Never empty.
    pub frames: Vec<Frame>,
    pub current_frame: usize,
    /// Ticks spent on the current frame.
    pub current_step: u16,
}

/// Blends forever between randomly generated gradients.
#[derive(Debug, Clone, PartialEq)]
pub struct RandGradient {
    /// Point count of each generated gradient.
    pub gradpoints: Range<u32>,
    /// Ticks spent blending from one gradient to the next.
    pub duration: Range<u32>,
    pub palette: Palette,
    pub frame1: Gradient,
    pub frame2: Gradient,
    pub current_step: u32,
    pub current_duration: u32,
}

/// Random spots that grow in and fade back to the background.
#[derive(Debug, Clone)]
pub struct Popping {
    /// Per-channel decay applied on fade ticks.
    pub fadeamt: u8,
    /// Ticks skipped between fades.
    pub fadeskip: u16,
    pub fade_countdown: u16,
    /// Ticks between spawns.
    pub spawn_interval: Range<u32>,
    pub spawn_countdown: u32,
    pub growtime: Range<u32>,
    pub size: Range<u32>,
    pub kinds: SpotKinds,
    pub background: Color,
    pub palette: Palette,
    pub spots: SpotRing<MAX_SPOTS>,
}

/// The active pattern and its animation state.
#[derive(Debug, Clone, Default)]
pub enum Pattern {
    #[default]
    None,
    Gradient(Gradient),
    AniGradient(AniGradient),
    RandGradient(RandGradient),
    Popping(Popping),
}

impl Pattern {
    /// Returns the type tag matching this pattern.
    pub fn pattern_type(&self) -> PatternType {
        match self {
            Pattern::None => PatternType::None,
            Pattern::Gradient(_) => PatternType::Gradient,
            Pattern::AniGradient(_) => PatternType::AniGradient,
            Pattern::RandGradient(_) => PatternType::RandGradient,
            Pattern::Popping(_) => PatternType::Popping,
        }
    }
}

/// A pattern together with the timeout it was sent with.
///
/// Created by a successful parse and mutated only by animation ticks.
#[derive(Debug, Clone, Default)]
pub struct PatternContext {
    /// Seconds the sender wants the pattern shown. Not enforced here; `0`
    /// means no timeout.
    pub timeout: u16,
    pub pattern: Pattern,
}

impl PatternContext {
    pub fn new(timeout: u16, pattern: Pattern) -> Self {
        Self { timeout, pattern }
    }

    pub fn pattern_type(&self) -> PatternType {
        self.pattern.pattern_type()
    }

    /// Releases everything owned by the active pattern and resets it to
    /// `None`. Calling it again is a no-op.
    pub fn teardown(&mut self) {
        self.pattern = Pattern::None;
    }
}
