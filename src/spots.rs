//! Growing spots for the popping pattern and the ring buffer holding them.

use crate::colors::BLACK;
use crate::types::Color;

/// How a spot distributes its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpotKind {
    /// Brightest at the center, fading to nothing at the edge.
    Fuzz,
    /// Evenly lit across its whole size.
    Solid,
}

/// A transient particle that adds its color onto the strip each tick while
/// it grows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spot {
    /// Center pixel.
    pub position: u16,
    pub kind: SpotKind,
    /// Color added per grow tick.
    pub color: Color,
    /// Diameter in pixels.
    pub size: u16,
    pub half_size: u16,
    /// Grow ticks left before the spot is retired.
    pub growtime: u16,
}

impl Spot {
    const EMPTY: Spot = Spot {
        position: 0,
        kind: SpotKind::Solid,
        color: BLACK,
        size: 0,
        half_size: 0,
        growtime: 0,
    };

    /// Creates a spot. `color` is the per-tick increment.
    pub fn new(position: u16, kind: SpotKind, color: Color, size: u16, growtime: u16) -> Self {
        Self {
            position,
            kind,
            color,
            size,
            half_size: size / 2,
            growtime,
        }
    }
}

/// Fixed-capacity circular buffer of live spots.
///
/// One slot always stays free, so the buffer holds at most `N - 1` spots.
/// Removal swaps the oldest spot into the freed slot; live spots have no
/// meaningful order.
#[derive(Debug, Clone)]
pub struct SpotRing<const N: usize> {
    slots: [Spot; N],
    start: usize,
    next: usize,
}

impl<const N: usize> SpotRing<N> {
    /// Creates an empty ring.
    pub const fn new() -> Self {
        Self {
            slots: [Spot::EMPTY; N],
            start: 0,
            next: 0,
        }
    }

    /// Returns the number of live spots.
    pub fn len(&self) -> usize {
        (self.next + N - self.start) % N
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.next
    }

    pub fn is_full(&self) -> bool {
        (self.next + 1) % N == self.start
    }

    /// Maximum number of live spots.
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Adds a spot, handing it back if the ring is full.
    pub fn push(&mut self, spot: Spot) -> Result<(), Spot> {
        if self.is_full() {
            return Err(spot);
        }
        self.slots[self.next] = spot;
        self.next = (self.next + 1) % N;
        Ok(())
    }

    /// Returns the oldest live spot.
    pub fn peek(&self) -> Option<&Spot> {
        if self.is_empty() {
            None
        } else {
            Some(&self.slots[self.start])
        }
    }

    /// Removes the `offset`-th live spot, counting from the oldest.
    ///
    /// The oldest spot takes its slot.
    pub fn remove_at(&mut self, offset: usize) -> Option<Spot> {
        if offset >= self.len() {
            return None;
        }
        let idx = (self.start + offset) % N;
        let removed = self.slots[idx];
        self.slots[idx] = self.slots[self.start];
        self.start = (self.start + 1) % N;
        Some(removed)
    }

    /// Iterates live spots from the oldest.
    pub fn iter(&self) -> impl Iterator<Item = &Spot> {
        (0..self.len()).map(move |offset| &self.slots[(self.start + offset) % N])
    }

    /// Visits every live spot once, retiring those for which `f` returns
    /// false.
    pub fn retain_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Spot) -> bool,
    {
        let mut idx = self.start;
        while idx != self.next {
            if !f(&mut self.slots[idx]) {
                // the spot at `start` has already been visited
                self.slots[idx] = self.slots[self.start];
                self.start = (self.start + 1) % N;
            }
            idx = (idx + 1) % N;
        }
    }

    /// Drops every live spot.
    pub fn clear(&mut self) {
        self.start = 0;
        self.next = 0;
    }
}

impl<const N: usize> Default for SpotRing<N> {
    fn default() -> Self {
        Self::new()
    }
}
