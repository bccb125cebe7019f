//! Strip controller tying the parser, the animation engine and the pixel
//! sink together.
//!
//! Provides [`StripController`], which owns one strip's sink, its random
//! source and the active [`PatternContext`]. The surrounding firmware feeds
//! it packets from its transport and calls [`StripController::service`] on
//! its own tick cadence.

use crate::colors::BLACK;
use crate::context::PatternContext;
use crate::engine::{PixelSink, advance};
use crate::parser::parse;
use crate::random::RandomSource;
use crate::types::ParseError;
use crate::wire::PatternType;

/// Timing information returned by [`StripController::service`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceTiming {
    /// The pattern is animating. Service again on the next tick.
    Continuous,

    /// No pattern is active. No servicing is needed until a new pattern is
    /// loaded.
    Idle,
}

/// Controls one LED strip through decoded pattern packets.
///
/// # Type Parameters
/// * `P` - Pixel sink implementation
/// * `R` - Random source used by random and popping patterns
pub struct StripController<P: PixelSink, R: RandomSource> {
    sink: P,
    rng: R,
    context: PatternContext,
}

impl<P: PixelSink, R: RandomSource> StripController<P, R> {
    /// Creates an idle controller with the strip blanked.
    pub fn new(mut sink: P, rng: R) -> Self {
        blank(&mut sink);

        Self {
            sink,
            rng,
            context: PatternContext::default(),
        }
    }

    /// Decodes a packet and makes it the active pattern.
    ///
    /// On failure the previous pattern stays active and unchanged.
    ///
    /// # Returns
    /// * `Ok(PatternType)` - Type of the newly active pattern
    /// * `Err` - The packet was rejected
    pub fn load(&mut self, bytes: &[u8]) -> Result<PatternType, ParseError> {
        let context = parse(bytes, &mut self.rng)?;
        let pattern_type = context.pattern_type();
        debug!("loaded pattern {}, timeout {}s", pattern_type, context.timeout);

        self.context = context;
        Ok(pattern_type)
    }

    /// Advances the active pattern by `elapsed_ticks` and presents the strip.
    ///
    /// # Returns
    /// * `ServiceTiming::Continuous` - The pattern wants further ticks
    /// * `ServiceTiming::Idle` - Nothing is animating
    pub fn service(&mut self, elapsed_ticks: u16) -> ServiceTiming {
        if advance(&mut self.context, &mut self.sink, &mut self.rng, elapsed_ticks) {
            self.sink.present();
            ServiceTiming::Continuous
        } else {
            ServiceTiming::Idle
        }
    }

    /// Drops the active pattern and blanks the strip.
    pub fn clear(&mut self) {
        debug!("clearing pattern {}", self.context.pattern_type());
        self.context.teardown();
        blank(&mut self.sink);
    }

    /// Returns the active pattern context.
    pub fn context(&self) -> &PatternContext {
        &self.context
    }

    /// Returns the timeout sent with the active pattern, in seconds.
    ///
    /// The controller never expires patterns itself.
    pub fn timeout(&self) -> u16 {
        self.context.timeout
    }

    /// Returns a reference to the pixel sink.
    pub fn sink(&self) -> &P {
        &self.sink
    }

    /// Returns a mutable reference to the pixel sink.
    pub fn sink_mut(&mut self) -> &mut P {
        &mut self.sink
    }
}

fn blank<P: PixelSink>(sink: &mut P) {
    for idx in 0..sink.len() {
        sink.set_pixel(idx, BLACK);
    }
    sink.present();
}
