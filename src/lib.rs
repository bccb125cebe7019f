#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`parse`**: Decodes a pattern packet into an owned `PatternContext`
//! - **`PatternContext`**: The active pattern plus its animation state
//! - **`advance`**: Draws one animation tick of a context onto a `PixelSink`
//! - **`StripController`**: Owns a strip, its random source and the active pattern
//! - **`PixelSink`**: Trait to implement for your strip hardware
//! - **`RandomSource`**: Trait to implement for your random number source
//! - **`PacketWriter`**: Builds packets in the wire format the parser accepts
//!
//! Colors are `Srgb<u8>` and all interpolation is integer arithmetic.

extern crate alloc;

#[macro_use]
mod fmt;

pub mod colors;
pub mod context;
pub mod controller;
pub mod engine;
pub mod parser;
pub mod random;
pub mod render;
pub mod spots;
pub mod types;
pub mod wire;

pub use context::{AniGradient, Pattern, PatternContext, Popping, RandGradient};
pub use controller::{ServiceTiming, StripController};
pub use engine::{PixelSink, advance};
pub use parser::parse;
pub use random::{RandomSource, XorShift32};
pub use spots::{Spot, SpotKind, SpotRing};
pub use types::{BlendMode, Color, ColorRange, Frame, GradPoint, Gradient, Palette, ParseError, SpotKinds};
pub use wire::{MAX_PACKET_LEN, PacketWriter, PatternType};

/// Number of pixels on the strip.
pub const NUM_PX: usize = 109;

/// Slots in the popping spot ring; at most `MAX_SPOTS - 1` spots are live.
pub const MAX_SPOTS: usize = 32;
