//! Integration tests for gradient rendering

mod common;
use common::*;

use proptest::prelude::*;
use pxpattern::colors::{BLACK, BLUE, GREEN, RED, WHITE};
use pxpattern::render::{lerp, render};
use pxpattern::{Color, GradPoint, NUM_PX};

#[test]
fn single_point_at_origin_fills_strip() {
    let mut line = [BLACK; NUM_PX];
    render(&[GradPoint::new(0, RED)], &mut line);
    assert!(line.iter().all(|c| *c == RED));
}

#[test]
fn single_point_mid_strip_fills_both_sides() {
    let mut line = [BLACK; NUM_PX];
    render(&[GradPoint::new(50, GREEN)], &mut line);
    assert!(line.iter().all(|c| *c == GREEN));
}

#[test]
fn black_to_white_ramp_is_monotonic() {
    let points = [
        GradPoint::new(0, BLACK),
        GradPoint::new((NUM_PX - 1) as u16, WHITE),
    ];
    let mut line = [RED; NUM_PX];
    render(&points, &mut line);

    assert_eq!(line[0], BLACK);
    assert_eq!(line[NUM_PX - 1], WHITE);
    assert!(line.windows(2).all(|w| brightness(w[0]) <= brightness(w[1])));
    assert!(line.iter().all(|c| c.red == c.green && c.green == c.blue));
}

#[test]
fn interior_pixels_use_lerp() {
    let points = [GradPoint::new(10, RED), GradPoint::new(20, BLUE)];
    let mut line = [BLACK; NUM_PX];
    render(&points, &mut line);

    for idx in 11..20 {
        assert_eq!(line[idx], lerp(RED, BLUE, (idx - 10) as u32, 10));
    }
    assert!(line[..=10].iter().all(|c| *c == RED));
    assert!(line[20..].iter().all(|c| *c == BLUE));
}

#[test]
fn empty_gradient_leaves_line_untouched() {
    let mut line = [grey(42); NUM_PX];
    render(&[], &mut line);
    assert!(line.iter().all(|c| *c == grey(42)));
}

#[test]
fn points_past_strip_end_are_clipped() {
    let points = [
        GradPoint::new(100, RED),
        GradPoint::new(500, BLUE),
        GradPoint::new(900, GREEN),
    ];
    let mut line = [BLACK; NUM_PX];
    render(&points, &mut line);

    assert!(line[..=100].iter().all(|c| *c == RED));
    assert_eq!(line[108], lerp(RED, BLUE, 8, 400));
}

#[test]
fn lerp_matches_signed_truncation() {
    let from = Color::new(200, 10, 0);
    let to = Color::new(0, 250, 3);
    // 200 + (-200 * 1) / 3 = 134, 10 + (240 * 1) / 3 = 90, 0 + 3 / 3 = 1
    assert_eq!(lerp(from, to, 1, 3), Color::new(134, 90, 1));
}

proptest! {
    #[test]
    fn render_is_idempotent(
        raw in prop::collection::vec((0u16..200, any::<u8>()), 0..16),
        fill in any::<u8>(),
    ) {
        let mut raw = raw;
        raw.sort_by_key(|(position, _)| *position);
        let points: Vec<GradPoint> = raw
            .into_iter()
            .map(|(position, level)| GradPoint::new(position, grey(level)))
            .collect();

        let mut first = [grey(fill); NUM_PX];
        render(&points, &mut first);
        let mut second = first;
        render(&points, &mut second);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn lerp_stays_between_endpoints(a in any::<u8>(), b in any::<u8>(), span in 1u32..500, step in 0u32..500) {
        let step = step % (span + 1);
        let c = lerp(grey(a), grey(b), step, span);
        prop_assert!(c.red >= a.min(b) && c.red <= a.max(b));
    }
}
