//! Packet wire format.
//!
//! All packets are packed with no padding. Multi-byte integers are little
//! endian and colors travel as `g, r, b`.
//!
//! ```text
//! header        type:u8 timeout:u16
//! gradient      count:u16 { position:u16 color:grb }*
//! anigradient   framecount:u16 { duration:u16 blend:u8 gradient }*
//! randgradient  points_min:u8 points_max:u8 duration_min:u16 duration_max:u16 palette
//! popping       fadeamt:u8 fadeskip:u16 tillspot_min:u16 tillspot_max:u16
//!               grow_min:u16 grow_max:u16 size_min:u16 size_max:u16
//!               spot_flags:u8 bg:grb palette
//! palette       count:u16 { c1:grb c2:grb }*
//! ```

use alloc::vec::Vec;

use crate::colors::{from_grb, to_grb};
use crate::types::{BlendMode, Color, ColorRange, GradPoint, ParseError};

/// Largest packet accepted by the parser.
pub const MAX_PACKET_LEN: usize = 0x8FFF;

pub const HEADER_LEN: usize = 3;
pub const COLOR_LEN: usize = 3;
pub const GRADPOINT_LEN: usize = 2 + COLOR_LEN;
pub const COLORRANGE_LEN: usize = 2 * COLOR_LEN;
pub const COUNT_LEN: usize = 2;

/// Fixed fields of a random gradient body, excluding the palette count.
pub const RANDGRADIENT_FIXED_LEN: usize = 6;

/// Fixed fields of a popping body, excluding the palette count.
pub const POPPING_FIXED_LEN: usize = 1 + 2 + 2 * 6 + 1 + COLOR_LEN;

/// Pattern type tag carried in the packet header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PatternType {
    None = 0,
    Gradient = 1,
    AniGradient = 2,
    RandGradient = 3,
    Popping = 4,
}

impl PatternType {
    /// Smallest body a packet of this type can have.
    pub const fn min_body_len(self) -> usize {
        match self {
            PatternType::None => 0,
            PatternType::Gradient | PatternType::AniGradient => COUNT_LEN,
            PatternType::RandGradient => RANDGRADIENT_FIXED_LEN + COUNT_LEN,
            PatternType::Popping => POPPING_FIXED_LEN + COUNT_LEN,
        }
    }
}

impl TryFrom<u8> for PatternType {
    type Error = ParseError;

    /// Decodes a header type byte. `None` is never sent on the wire.
    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            1 => Ok(PatternType::Gradient),
            2 => Ok(PatternType::AniGradient),
            3 => Ok(PatternType::RandGradient),
            4 => Ok(PatternType::Popping),
            other => Err(ParseError::UnknownType(other)),
        }
    }
}

/// Bounds-checked cursor over packet bytes.
///
/// Reads past the end fail with `LengthMismatch`; callers check fixed-size
/// prefixes up front and report `TooShort` themselves.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    /// Splits off the next `len` bytes.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], ParseError> {
        if len > self.buf.len() {
            return Err(ParseError::LengthMismatch);
        }
        let (head, tail) = self.buf.split_at(len);
        self.buf = tail;
        Ok(head)
    }

    pub fn u8(&mut self) -> Result<u8, ParseError> {
        Ok(self.take(1)?[0])
    }

    pub fn u16(&mut self) -> Result<u16, ParseError> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn color(&mut self) -> Result<Color, ParseError> {
        let bytes = self.take(COLOR_LEN)?;
        Ok(from_grb(bytes[0], bytes[1], bytes[2]))
    }

    /// Takes exactly `count` items of `item_len` bytes each.
    ///
    /// With `exact`, the items must also consume every remaining byte.
    pub fn array(&mut self, count: usize, item_len: usize, exact: bool) -> Result<Reader<'a>, ParseError> {
        let len = count * item_len;
        if len > self.remaining() || (exact && len != self.remaining()) {
            return Err(ParseError::LengthMismatch);
        }
        Ok(Reader::new(self.take(len)?))
    }
}

/// Serializes pattern packets in the format accepted by the parser.
///
/// Counts travel as `u16`, so a gradient or palette holds at most 65535
/// entries.
#[derive(Debug, Clone, Default)]
pub struct PacketWriter {
    buf: Vec<u8>,
}

impl PacketWriter {
    /// Starts a packet with its header.
    pub fn new(pattern: PatternType, timeout: u16) -> Self {
        let mut writer = Self { buf: Vec::new() };
        writer.u8(pattern as u8).u16(timeout);
        writer
    }

    pub fn u8(&mut self, value: u8) -> &mut Self {
        self.buf.push(value);
        self
    }

    pub fn u16(&mut self, value: u16) -> &mut Self {
        self.buf.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn color(&mut self, color: Color) -> &mut Self {
        self.buf.extend_from_slice(&to_grb(color));
        self
    }

    /// Writes a point count followed by the points.
    pub fn gradient(&mut self, points: &[GradPoint]) -> &mut Self {
        debug_assert!(points.len() <= u16::MAX as usize, "too many gradient points");
        self.u16(points.len() as u16);
        for point in points {
            self.u16(point.position).color(point.color);
        }
        self
    }

    /// Writes one animated gradient frame.
    pub fn frame(&mut self, duration: u16, blend: BlendMode, points: &[GradPoint]) -> &mut Self {
        self.u16(duration).u8(blend.to_wire()).gradient(points)
    }

    /// Writes a range count followed by the ranges.
    pub fn palette(&mut self, ranges: &[ColorRange]) -> &mut Self {
        debug_assert!(ranges.len() <= u16::MAX as usize, "too many palette ranges");
        self.u16(ranges.len() as u16);
        for range in ranges {
            self.color(range.c1).color(range.c2);
        }
        self
    }

    /// Returns the finished packet.
    pub fn finish(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::RED;

    #[test]
    fn header_layout() {
        let bytes = PacketWriter::new(PatternType::Popping, 0x1234).finish();
        assert_eq!(bytes.as_slice(), &[4, 0x34, 0x12]);
    }

    #[test]
    fn colors_are_green_first() {
        let bytes = PacketWriter::new(PatternType::Gradient, 0)
            .gradient(&[GradPoint::new(0x0102, RED)])
            .finish();
        assert_eq!(&bytes[3..], &[1, 0, 0x02, 0x01, 0, 255, 0]);
    }

    #[test]
    fn reader_rejects_overrun() {
        let mut reader = Reader::new(&[1, 2, 3]);
        assert_eq!(reader.u16(), Ok(0x0201));
        assert_eq!(reader.u16(), Err(ParseError::LengthMismatch));
    }

    #[test]
    fn exact_array_rejects_trailing_bytes() {
        let mut reader = Reader::new(&[0; 11]);
        assert!(reader.clone().array(2, GRADPOINT_LEN, true).is_err());
        assert!(reader.array(2, GRADPOINT_LEN, false).is_ok());
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "too many gradient points")]
    fn gradient_count_must_fit_u16() {
        let points = alloc::vec![GradPoint::new(0, RED); u16::MAX as usize + 1];
        PacketWriter::new(PatternType::Gradient, 0).gradient(&points);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "too many palette ranges")]
    fn palette_count_must_fit_u16() {
        let ranges = alloc::vec![ColorRange::new(RED, RED); u16::MAX as usize + 1];
        PacketWriter::new(PatternType::RandGradient, 0).palette(&ranges);
    }

    #[test]
    fn popping_minimum_body() {
        assert_eq!(PatternType::Popping.min_body_len(), 21);
        assert_eq!(PatternType::try_from(0), Err(ParseError::UnknownType(0)));
    }
}
