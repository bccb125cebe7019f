//! Gradient rendering and integer color interpolation.
//!
//! Everything here is stateless. Lines are plain slices of [`Color`], one
//! entry per strip pixel, so the same code renders into scratch buffers and
//! into a copy of the live strip.

use crate::types::{Color, GradPoint};

/// Interpolates between two colors, `step` parts of `span` toward `c2`.
///
/// Each channel is computed as `c1 + ((c2 - c1) * step) / span` with signed
/// arithmetic truncating toward zero. `span` must be non-zero.
#[inline]
pub fn lerp(c1: Color, c2: Color, step: u32, span: u32) -> Color {
    debug_assert!(span > 0);
    let step = step as i32;
    let span = span as i32;
    let channel = |a: u8, b: u8| -> u8 {
        let a = a as i32;
        let b = b as i32;
        (a + ((b - a) * step) / span) as u8
    };

    Color::new(
        channel(c1.red, c2.red),
        channel(c1.green, c2.green),
        channel(c1.blue, c2.blue),
    )
}

/// Renders a gradient into `line`.
///
/// Pixels up to the first point take its color, pixels between two points
/// are interpolated, and pixels after the last point take its color. A
/// gradient without points leaves `line` untouched.
pub fn render(points: &[GradPoint], line: &mut [Color]) {
    let Some(first) = points.first() else {
        return;
    };
    let len = line.len();

    let head = first.position as usize;
    for px in line.iter_mut().take(head.saturating_add(1)) {
        *px = first.color;
    }
    if head >= len {
        return;
    }

    for pair in points.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        let start = p1.position as usize;
        let end = p2.position as usize;
        let span = end.saturating_sub(start) as u32;

        for idx in (start + 1)..end {
            if idx >= len {
                return;
            }
            line[idx] = lerp(p1.color, p2.color, (idx - start) as u32, span);
        }

        if end >= len {
            return;
        }
        line[end] = p2.color;
    }

    // `points` is non-empty here
    let last = points[points.len() - 1];
    for px in line.iter_mut().skip(last.position as usize + 1) {
        *px = last.color;
    }
}

/// Blends two lines pixel by pixel into `out`, `step` parts of `span`.
pub fn blend(from: &[Color], to: &[Color], step: u32, span: u32, out: &mut [Color]) {
    for ((o, a), b) in out.iter_mut().zip(from).zip(to) {
        *o = lerp(*a, *b, step, span);
    }
}
