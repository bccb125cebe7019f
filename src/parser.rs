//! Packet decoding into a [`PatternContext`].
//!
//! A packet either decodes completely into a fresh context or is rejected
//! with a [`ParseError`]; nothing partially built survives a failure.

use alloc::vec::Vec;
use core::ops::Range;

use crate::context::{AniGradient, Pattern, PatternContext, Popping, RandGradient};
use crate::random::{RandomSource, random_gradient};
use crate::spots::SpotRing;
use crate::types::{BlendMode, ColorRange, Frame, GradPoint, Gradient, Palette, ParseError, SpotKinds};
use crate::wire::{
    COLORRANGE_LEN, GRADPOINT_LEN, HEADER_LEN, MAX_PACKET_LEN, PatternType, Reader,
};
use crate::NUM_PX;

/// Decodes a packet.
///
/// Random patterns draw their initial gradients from `rng`.
///
/// # Errors
/// * `TooLarge` - Packet exceeds [`MAX_PACKET_LEN`]
/// * `TooShort` - Packet is smaller than the header plus its type's fixed body
/// * `UnknownType` - Header type byte is not a known pattern
/// * `LengthMismatch` - A variable-length section does not exactly fill the packet
/// * `OutOfOrder` - Gradient positions decrease
/// * `EmptySection` - Palette without ranges or animated gradient without frames
pub fn parse<R: RandomSource>(bytes: &[u8], rng: &mut R) -> Result<PatternContext, ParseError> {
    let result = parse_packet(bytes, rng);
    if let Err(err) = &result {
        warn!("rejected {} byte packet: {}", bytes.len(), err);
    }
    result
}

fn parse_packet<R: RandomSource>(bytes: &[u8], rng: &mut R) -> Result<PatternContext, ParseError> {
    if bytes.len() > MAX_PACKET_LEN {
        return Err(ParseError::TooLarge);
    }
    if bytes.len() < HEADER_LEN {
        return Err(ParseError::TooShort);
    }

    let mut reader = Reader::new(bytes);
    let pattern_type = PatternType::try_from(reader.u8()?)?;
    let timeout = reader.u16()?;

    if reader.remaining() < pattern_type.min_body_len() {
        return Err(ParseError::TooShort);
    }

    let pattern = match pattern_type {
        PatternType::Gradient => Pattern::Gradient(parse_gradient(&mut reader, true)?),
        PatternType::AniGradient => Pattern::AniGradient(parse_anigradient(&mut reader)?),
        PatternType::RandGradient => Pattern::RandGradient(parse_randgradient(&mut reader, rng)?),
        PatternType::Popping => Pattern::Popping(parse_popping(&mut reader)?),
        PatternType::None => return Err(ParseError::UnknownType(PatternType::None as u8)),
    };

    Ok(PatternContext::new(timeout, pattern))
}

/// Reads a point count and its points. A top-level gradient must end
/// exactly at the end of the packet; a nested one only has to fit.
fn parse_gradient(reader: &mut Reader<'_>, exact: bool) -> Result<Gradient, ParseError> {
    let count = reader.u16()? as usize;
    let mut items = reader.array(count, GRADPOINT_LEN, exact)?;

    let mut points = Vec::with_capacity(count);
    let mut last = 0;
    for _ in 0..count {
        let position = items.u16()?;
        if position < last {
            return Err(ParseError::OutOfOrder);
        }
        last = position;
        points.push(GradPoint::new(position, items.color()?));
    }

    Ok(Gradient::from_sorted(points))
}

fn parse_anigradient(reader: &mut Reader<'_>) -> Result<AniGradient, ParseError> {
    let framecount = reader.u16()? as usize;
    if framecount == 0 {
        return Err(ParseError::EmptySection);
    }

    let mut frames = Vec::with_capacity(framecount);
    for _ in 0..framecount {
        let duration = reader.u16()?;
        let blend = BlendMode::from_wire(reader.u8()?);
        let gradient = parse_gradient(reader, false)?;
        frames.push(Frame {
            duration,
            blend,
            gradient,
        });
    }

    if reader.remaining() != 0 {
        return Err(ParseError::LengthMismatch);
    }

    Ok(AniGradient {
        frames,
        current_frame: 0,
        current_step: 0,
    })
}

fn parse_randgradient<R: RandomSource>(
    reader: &mut Reader<'_>,
    rng: &mut R,
) -> Result<RandGradient, ParseError> {
    let points_min = reader.u8()?;
    let points_max = reader.u8()?;
    let duration_min = reader.u16()?;
    let duration_max = reader.u16()?;
    let palette = parse_palette(reader)?;

    let gradpoints = normalize_range(points_min as u32, points_max as u32, 1);
    let duration = normalize_range(duration_min as u32, duration_max as u32, 1);

    let frame1 = random_frame(&palette, &gradpoints, rng);
    let frame2 = random_frame(&palette, &gradpoints, rng);
    let current_duration = rng.uniform(duration.clone());

    Ok(RandGradient {
        gradpoints,
        duration,
        palette,
        frame1,
        frame2,
        current_step: 0,
        current_duration,
    })
}

fn parse_popping(reader: &mut Reader<'_>) -> Result<Popping, ParseError> {
    let fadeamt = reader.u8()?;
    let fadeskip = reader.u16()?;
    let tillspot_min = reader.u16()?;
    let tillspot_max = reader.u16()?;
    let grow_min = reader.u16()?;
    let grow_max = reader.u16()?;
    let size_min = reader.u16()?;
    let size_max = reader.u16()?;
    let kinds = SpotKinds::from_bits_truncate(reader.u8()?);
    let background = reader.color()?;
    let palette = parse_palette(reader)?;

    Ok(Popping {
        fadeamt,
        fadeskip,
        fade_countdown: 0,
        spawn_interval: normalize_range(tillspot_min as u32, tillspot_max as u32, 0),
        spawn_countdown: 0,
        // spot colors are divided by their growtime
        growtime: normalize_range(grow_min as u32, grow_max as u32, 1),
        size: normalize_range(size_min as u32, size_max as u32, 0),
        kinds,
        background,
        palette,
        spots: SpotRing::new(),
    })
}

/// Reads a range count and its ranges, which must end the packet.
fn parse_palette(reader: &mut Reader<'_>) -> Result<Palette, ParseError> {
    let count = reader.u16()? as usize;
    let mut items = reader.array(count, COLORRANGE_LEN, true)?;

    let mut ranges = Vec::with_capacity(count);
    for _ in 0..count {
        let c1 = items.color()?;
        let c2 = items.color()?;
        ranges.push(ColorRange::new(c1, c2));
    }

    Palette::new(ranges)
}

/// Turns an inclusive wire range into a non-empty half-open one.
///
/// `min` is raised to `floor`, `max` is made exclusive, and a range that
/// would be empty is widened to a single value.
fn normalize_range(min: u32, max: u32, floor: u32) -> Range<u32> {
    let min = min.max(floor);
    let mut max = max + 1;
    if max <= min {
        max = min + 1;
    }
    min..max
}

/// Generates a strip-wide random gradient with a point count drawn from
/// `gradpoints`.
pub(crate) fn random_frame<R: RandomSource>(
    palette: &Palette,
    gradpoints: &Range<u32>,
    rng: &mut R,
) -> Gradient {
    let count = rng.uniform(gradpoints.clone()) as usize;
    random_gradient(palette, count, NUM_PX as u16, rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_makes_half_open_ranges() {
        assert_eq!(normalize_range(0, 0, 1), 1..2);
        assert_eq!(normalize_range(2, 5, 1), 2..6);
        assert_eq!(normalize_range(9, 3, 1), 9..10);
        assert_eq!(normalize_range(0, 0, 0), 0..1);
        assert_eq!(normalize_range(0, u16::MAX as u32, 1), 1..65536);
    }
}
