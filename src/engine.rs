//! Per-tick animation of a [`PatternContext`] onto a [`PixelSink`].

use core::mem;

use crate::colors::{BLACK, approach, div, wrapping_add};
use crate::context::{AniGradient, Pattern, PatternContext, Popping, RandGradient};
use crate::parser::random_frame;
use crate::random::{RandomSource, random_color};
use crate::render::{blend, lerp, render};
use crate::spots::{Spot, SpotKind};
use crate::types::{BlendMode, Color, Gradient, SpotKinds};
use crate::NUM_PX;

/// Trait for abstracting the LED strip hardware.
///
/// Implement this for your strip driver. The sink must remember the last
/// color written to each pixel; popping patterns read colors back to fade
/// them.
pub trait PixelSink {
    /// Number of pixels on the strip, normally [`NUM_PX`].
    ///
    /// Patterns draw at most [`NUM_PX`] pixels; any beyond that are left alone.
    fn len(&self) -> usize;

    /// Returns true if the strip has no pixels.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stores the color of one pixel. `index` is below [`PixelSink::len`].
    fn set_pixel(&mut self, index: usize, color: Color);

    /// Returns the last color stored for a pixel.
    fn pixel(&self, index: usize) -> Color;

    /// Pushes the stored colors out to the strip.
    fn present(&mut self);
}

type Line = [Color; NUM_PX];

/// Pixels of `sink` that patterns draw on.
fn drawn_len<P: PixelSink>(sink: &P) -> usize {
    sink.len().min(NUM_PX)
}

fn read_line<P: PixelSink>(sink: &P) -> Line {
    let len = drawn_len(sink);
    core::array::from_fn(|idx| if idx < len { sink.pixel(idx) } else { BLACK })
}

fn write_line<P: PixelSink>(sink: &mut P, line: &Line) {
    let len = drawn_len(sink);
    for (idx, color) in line.iter().enumerate().take(len) {
        sink.set_pixel(idx, *color);
    }
}

/// Advances the active pattern by `elapsed_ticks` and draws it into `sink`.
///
/// Returns whether the pattern wants further ticks. Presenting the sink is
/// left to the caller.
pub fn advance<P, R>(ctx: &mut PatternContext, sink: &mut P, rng: &mut R, elapsed_ticks: u16) -> bool
where
    P: PixelSink,
    R: RandomSource,
{
    match &mut ctx.pattern {
        Pattern::None => false,
        Pattern::Gradient(gradient) => {
            draw_gradient(gradient, sink);
            true
        }
        Pattern::AniGradient(ani) => {
            advance_anigradient(ani, sink, elapsed_ticks);
            true
        }
        Pattern::RandGradient(rand) => {
            advance_randgradient(rand, sink, rng, elapsed_ticks);
            true
        }
        Pattern::Popping(popping) => {
            advance_popping(popping, sink, rng);
            true
        }
    }
}

fn draw_gradient<P: PixelSink>(gradient: &Gradient, sink: &mut P) {
    let mut line = read_line(sink);
    render(gradient.points(), &mut line);
    write_line(sink, &line);
}

/// Renders `from` blended `step` parts of `span` toward `to`.
fn draw_blend<P: PixelSink>(from: &Gradient, to: &Gradient, step: u32, span: u32, sink: &mut P) {
    let mut from_line = read_line(sink);
    let mut to_line = from_line;
    render(from.points(), &mut from_line);
    render(to.points(), &mut to_line);

    let mut line = from_line;
    blend(&from_line, &to_line, step, span, &mut line);
    write_line(sink, &line);
}

fn advance_anigradient<P: PixelSink>(ani: &mut AniGradient, sink: &mut P, elapsed_ticks: u16) {
    let framecount = ani.frames.len();
    let next = (ani.current_frame + 1) % framecount;
    let current = &ani.frames[ani.current_frame];
    let duration = current.duration;

    if framecount == 1
        || ani.current_step == 0
        || ani.current_step >= duration
        || current.blend == BlendMode::Hold
    {
        draw_gradient(&current.gradient, sink);
    } else {
        let upcoming = &ani.frames[next];
        draw_blend(
            &current.gradient,
            &upcoming.gradient,
            ani.current_step as u32,
            duration as u32,
            sink,
        );
    }

    ani.current_step = ani.current_step.saturating_add(elapsed_ticks);
    if ani.current_step >= duration {
        ani.current_step = 0;
        ani.current_frame = next;
    }
}

fn advance_randgradient<P, R>(rand: &mut RandGradient, sink: &mut P, rng: &mut R, elapsed_ticks: u16)
where
    P: PixelSink,
    R: RandomSource,
{
    if rand.current_step >= rand.current_duration {
        let fresh = random_frame(&rand.palette, &rand.gradpoints, rng);
        rand.frame1 = mem::replace(&mut rand.frame2, fresh);
        rand.current_step = 0;
        rand.current_duration = rng.uniform(rand.duration.clone());
        draw_gradient(&rand.frame1, sink);
    } else {
        draw_blend(
            &rand.frame1,
            &rand.frame2,
            rand.current_step,
            rand.current_duration,
            sink,
        );
    }

    rand.current_step = rand.current_step.saturating_add(elapsed_ticks as u32);
}

fn advance_popping<P, R>(popping: &mut Popping, sink: &mut P, rng: &mut R)
where
    P: PixelSink,
    R: RandomSource,
{
    if popping.fade_countdown == 0 {
        for idx in 0..drawn_len(sink) {
            let faded = approach(sink.pixel(idx), popping.background, popping.fadeamt);
            sink.set_pixel(idx, faded);
        }
        popping.fade_countdown = popping.fadeskip;
    } else {
        popping.fade_countdown -= 1;
    }

    if popping.spawn_countdown == 0 && !popping.spots.is_full() {
        let spot = spawn_spot(popping, rng);
        // not full, checked above
        let _ = popping.spots.push(spot);
        popping.spawn_countdown = rng.uniform(popping.spawn_interval.clone());
    } else {
        popping.spawn_countdown = popping.spawn_countdown.saturating_sub(1);
    }

    popping.spots.retain_mut(|spot| {
        grow_spot(spot, sink);
        spot.growtime = spot.growtime.saturating_sub(1);
        spot.growtime > 0
    });
}

fn spawn_spot<R: RandomSource>(popping: &Popping, rng: &mut R) -> Spot {
    let position = rng.uniform(0..NUM_PX as u32 + 1) as u16;
    let size = rng.uniform(popping.size.clone()) as u16;
    let growtime = rng.uniform(popping.growtime.clone()) as u16;
    let kind = pick_kind(popping.kinds, rng);
    let color = div(random_color(&popping.palette, rng), growtime);

    debug!("spawned spot at {} size {} growtime {}", position, size, growtime);
    Spot::new(position, kind, color, size, growtime)
}

/// Picks uniformly among the allowed kinds, defaulting to solid spots when
/// none are allowed.
fn pick_kind<R: RandomSource>(kinds: SpotKinds, rng: &mut R) -> SpotKind {
    let mut allowed: heapless::Vec<SpotKind, 2> = heapless::Vec::new();
    if kinds.contains(SpotKinds::FUZZ) {
        let _ = allowed.push(SpotKind::Fuzz);
    }
    if kinds.contains(SpotKinds::SOLID) {
        let _ = allowed.push(SpotKind::Solid);
    }

    match allowed.len() {
        0 => SpotKind::Solid,
        1 => allowed[0],
        n => allowed[rng.uniform(0..n as u32) as usize],
    }
}

/// Adds one tick of a spot's color onto the strip, wrapping per channel.
fn grow_spot<P: PixelSink>(spot: &Spot, sink: &mut P) {
    let center = spot.position as i32;
    let first = center - spot.half_size as i32;
    let end = (first + spot.size as i32).min(drawn_len(sink) as i32);

    for idx in first.max(0)..end {
        let increment = match spot.kind {
            SpotKind::Fuzz if spot.half_size > 0 => {
                let distance = (idx - center).unsigned_abs();
                lerp(spot.color, BLACK, distance, spot.half_size as u32)
            }
            _ => spot.color,
        };
        let idx = idx as usize;
        sink.set_pixel(idx, wrapping_add(sink.pixel(idx), increment));
    }
}
