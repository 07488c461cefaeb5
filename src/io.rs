//! Hardware collaborator traits: button input and LED/audio output.
//!
//! Implement these for your board. The engine treats both as stateless
//! request/acknowledge interfaces and never shares mutable state with them.

use crate::color::GameColor;

/// Trait for abstracting the four colored buttons plus the power/exit button.
///
/// Debouncing is the implementation's responsibility; the engine only wants
/// clean edge events.
pub trait InputSource {
    /// Returns the color whose button was pressed since the last poll, if
    /// any. Consumes the edge: a single physical press is reported exactly
    /// once.
    fn poll_just_pressed(&mut self) -> Option<GameColor>;

    /// Returns true while the power/exit button is held down.
    fn is_exit_held(&self) -> bool;
}

/// Trait for abstracting the LED and speaker hardware.
///
/// Implementations should handle hardware errors internally - these methods
/// cannot fail. A call with `blocking = true` must not return until the tone
/// has finished sounding; the engine relies on this to keep playback elements
/// atomic.
pub trait OutputSink {
    /// Turns on the signal (LED) for a color.
    fn activate(&mut self, color: GameColor);

    /// Turns off the signal (LED) for a color.
    fn deactivate(&mut self, color: GameColor);

    /// Sounds the tone associated with a color for `duration_ms`.
    fn play_tone(&mut self, color: GameColor, duration_ms: u16, blocking: bool);

    /// Plays a named feedback melody, blocking until it finishes.
    ///
    /// Implementations are free to pair the melody with an LED animation
    /// (the error melody traditionally flashes all four signals).
    fn play_melody(&mut self, melody: Melody);
}

/// Named feedback melodies the engine can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Melody {
    /// Played when a new game begins.
    GameStart,
    /// Sad trombone on a failed round.
    GameOver,
    /// Played when the maximum sequence length is reached (a win).
    Success,
    /// Short error buzz/flash on a failed round.
    Error,
    /// Celebration for a new high score.
    HighScore,
}
