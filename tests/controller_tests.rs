//! Integration tests for StripController

mod common;
use common::*;

use pxpattern::colors::{BLACK, BLUE, RED};
use pxpattern::{
    ColorRange, GradPoint, PacketWriter, ParseError, PatternType, ServiceTiming, StripController,
    XorShift32,
};

fn gradient_packet(timeout: u16, color: pxpattern::Color) -> Vec<u8> {
    PacketWriter::new(PatternType::Gradient, timeout)
        .gradient(&[GradPoint::new(0, color)])
        .finish()
}

fn controller() -> StripController<MockStrip, XorShift32> {
    StripController::new(MockStrip::filled(RED), XorShift32::new(1))
}

#[test]
fn new_controller_blanks_strip() {
    let controller = controller();
    assert!(controller.sink().presented().iter().all(|c| *c == BLACK));
    assert_eq!(controller.sink().present_count(), 1);
    assert_eq!(controller.context().pattern_type(), PatternType::None);
}

#[test]
fn blanking_stays_within_strip_length() {
    let mut controller = StripController::new(MockStrip::short(10, RED), XorShift32::new(1));
    assert!(controller.sink().pixels()[..10].iter().all(|c| *c == BLACK));
    assert!(controller.sink().pixels()[10..].iter().all(|c| *c == RED));

    controller.clear();
    assert_eq!(controller.sink().present_count(), 2);
}

#[test]
fn idle_controller_does_not_present() {
    let mut controller = controller();
    assert_eq!(controller.service(1), ServiceTiming::Idle);
    assert_eq!(controller.sink().present_count(), 1);
}

#[test]
fn loaded_pattern_is_presented() {
    let mut controller = controller();
    assert_eq!(controller.load(&gradient_packet(12, BLUE)), Ok(PatternType::Gradient));
    assert_eq!(controller.timeout(), 12);

    assert_eq!(controller.service(1), ServiceTiming::Continuous);
    assert!(controller.sink().presented().iter().all(|c| *c == BLUE));
    assert_eq!(controller.sink().present_count(), 2);
}

#[test]
fn failed_load_keeps_previous_pattern() {
    let mut controller = controller();
    controller.load(&gradient_packet(7, BLUE)).unwrap();

    let mut bad = gradient_packet(99, RED);
    bad.push(0);
    assert_eq!(controller.load(&bad), Err(ParseError::LengthMismatch));
    assert_eq!(controller.load(&[42, 0, 0]), Err(ParseError::UnknownType(42)));

    assert_eq!(controller.context().pattern_type(), PatternType::Gradient);
    assert_eq!(controller.timeout(), 7);
    controller.service(1);
    assert!(controller.sink().presented().iter().all(|c| *c == BLUE));
}

#[test]
fn new_pattern_replaces_old() {
    let mut controller = controller();
    controller.load(&gradient_packet(1, BLUE)).unwrap();
    controller.service(1);

    let popping = PacketWriter::new(PatternType::Popping, 3)
        .u8(1)
        .u16(0)
        .u16(2)
        .u16(4)
        .u16(1)
        .u16(5)
        .u16(3)
        .u16(7)
        .u8(3)
        .color(BLACK)
        .palette(&[ColorRange::new(RED, BLUE)])
        .finish();
    assert_eq!(controller.load(&popping), Ok(PatternType::Popping));
    assert_eq!(controller.timeout(), 3);

    for _ in 0..50 {
        assert_eq!(controller.service(1), ServiceTiming::Continuous);
    }
}

#[test]
fn clear_blanks_and_idles() {
    let mut controller = controller();
    controller.load(&gradient_packet(1, BLUE)).unwrap();
    controller.service(1);

    controller.clear();
    assert_eq!(controller.context().pattern_type(), PatternType::None);
    assert!(controller.sink().presented().iter().all(|c| *c == BLACK));
    assert_eq!(controller.service(1), ServiceTiming::Idle);

    // clearing twice is harmless
    controller.clear();
    assert_eq!(controller.context().pattern_type(), PatternType::None);
}

#[test]
fn timeout_is_not_enforced() {
    let mut controller = controller();
    controller.load(&gradient_packet(1, grey(5))).unwrap();
    for _ in 0..10_000 {
        controller.service(u16::MAX);
    }
    assert_eq!(controller.context().pattern_type(), PatternType::Gradient);
}
