//! Color constants and channel helpers.
//!
//! Packets carry colors in `g, r, b` byte order; everything inside the crate
//! works with [`Color`] values and never touches that ordering directly.

use crate::types::Color;

pub const BLACK: Color = Color::new(0, 0, 0);
pub const WHITE: Color = Color::new(255, 255, 255);
pub const RED: Color = Color::new(255, 0, 0);
pub const GREEN: Color = Color::new(0, 255, 0);
pub const BLUE: Color = Color::new(0, 0, 255);

/// Builds a color from its wire byte order.
#[inline]
pub const fn from_grb(g: u8, r: u8, b: u8) -> Color {
    Color::new(r, g, b)
}

/// Returns the wire byte order of a color.
#[inline]
pub const fn to_grb(color: Color) -> [u8; 3] {
    [color.green, color.red, color.blue]
}

/// Adds two colors channel-wise, wrapping on overflow.
#[inline]
pub fn wrapping_add(a: Color, b: Color) -> Color {
    Color::new(
        a.red.wrapping_add(b.red),
        a.green.wrapping_add(b.green),
        a.blue.wrapping_add(b.blue),
    )
}

/// Divides each channel by `divisor`, which must be non-zero.
#[inline]
pub fn div(color: Color, divisor: u16) -> Color {
    let d = divisor as u32;
    Color::new(
        (color.red as u32 / d) as u8,
        (color.green as u32 / d) as u8,
        (color.blue as u32 / d) as u8,
    )
}

/// Moves each channel of `color` up to `amount` toward `target`.
#[inline]
pub fn approach(color: Color, target: Color, amount: u8) -> Color {
    fn channel(c: u8, t: u8, amount: u8) -> u8 {
        if c > t {
            c.saturating_sub(amount).max(t)
        } else {
            c.saturating_add(amount).min(t)
        }
    }

    Color::new(
        channel(color.red, target.red, amount),
        channel(color.green, target.green, amount),
        channel(color.blue, target.blue, amount),
    )
}
