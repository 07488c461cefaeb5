//! Time abstraction traits for platform-agnostic timing.
//!
//! The engine never reads a clock directly. Implement [`TimeSource`] for your
//! platform (host `Instant`, embassy-time, a hardware timer) and the engine
//! uses it both to measure input windows and to pace blocking playback
//! bursts.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;

    /// Blocks the calling context for the given duration.
    ///
    /// Used to pace sequence playback and the fixed pauses between rounds.
    /// The engine only calls this from inside a playback burst, so a busy
    /// wait or a scheduler sleep are both acceptable.
    fn delay(&self, duration: I::Duration);
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}
