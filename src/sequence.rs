//! The growing color sequence at the heart of a game.
//!
//! A [`ColorSequence`] owns two things: the *master* list of colors generated
//! so far this game, and the *active prefix length* — how deep into the
//! master the current player currently is. In single-player the two lengths
//! track each other; in pass-and-play the master is fixed by whichever player
//! got furthest, and later players replay its prefix from the start.

use crate::color::GameColor;
use heapless::Vec;
use rand::Rng;

/// A bounded color sequence with an active prefix.
///
/// # Type Parameters
/// * `N` - Maximum number of elements the sequence can hold. Must cover the
///   `max_sequence_length` of the hardest difficulty in use (31 for the
///   canonical tiers).
#[derive(Debug, Clone, Default)]
pub struct ColorSequence<const N: usize> {
    colors: Vec<GameColor, N>,
    active_len: usize,
}

impl<const N: usize> ColorSequence<N> {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self {
            colors: Vec::new(),
            active_len: 0,
        }
    }

    /// Discards all colors. Called at the start of a new game.
    pub fn clear(&mut self) {
        self.colors.clear();
        self.active_len = 0;
    }

    /// Resets the active prefix to empty while keeping the master colors.
    ///
    /// Called when the turn passes to the next player: their first round
    /// replays master element 1 rather than drawing a fresh color.
    pub fn rewind(&mut self) {
        self.active_len = 0;
    }

    /// Grows the active prefix by one element.
    ///
    /// If the master already holds a color at the new depth (a replaying
    /// player catching up), that color is revealed; otherwise one new color
    /// is drawn uniformly from the four-color set and appended to the
    /// master. Consecutive duplicates are valid draws.
    ///
    /// Returns the element now at the end of the active prefix, or `None`
    /// if the sequence is at capacity.
    pub fn extend<R: Rng>(&mut self, rng: &mut R) -> Option<GameColor> {
        if self.active_len < self.colors.len() {
            // Replaying the fixed master prefix.
            self.active_len += 1;
            return self.get(self.active_len - 1);
        }

        let color = GameColor::ALL[rng.gen_range(0..GameColor::COUNT)];
        if self.colors.push(color).is_err() {
            return None;
        }
        self.active_len += 1;
        Some(color)
    }

    /// Returns the element at `index` within the active prefix.
    pub fn get(&self, index: usize) -> Option<GameColor> {
        if index < self.active_len {
            self.colors.get(index).copied()
        } else {
            None
        }
    }

    /// Length of the active prefix (the depth the current player faces).
    #[inline]
    pub fn active_len(&self) -> usize {
        self.active_len
    }

    /// Length of the master sequence generated so far.
    #[inline]
    pub fn master_len(&self) -> usize {
        self.colors.len()
    }

    /// The active prefix as a slice.
    pub fn active(&self) -> &[GameColor] {
        &self.colors[..self.active_len]
    }
}
