//! Fixed engine pauses and holds.

/// Pauses and display holds that do not vary with difficulty.
///
/// Defaults reproduce the classic cabinet feel; adjust via
/// [`tuning_mut`](crate::engine::GameEngine::tuning_mut) before starting a
/// game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineTuning {
    /// Quiet gap between entering playback and the first element (ms).
    pub pre_playback_delay_ms: u16,
    /// Pause after a completed round before the next playback (ms).
    pub round_pause_ms: u16,
    /// Pause while the hardware changes hands between participants (ms).
    pub rotation_pause_ms: u16,
    /// Minimum time the game-over screen holds before a press can restart;
    /// absorbs input bleed-through from the failed round (ms).
    pub game_over_hold_ms: u16,
    /// How long the high-score celebration holds before game over (ms).
    pub high_score_hold_ms: u16,
}

impl Default for EngineTuning {
    fn default() -> Self {
        Self {
            pre_playback_delay_ms: 500,
            round_pause_ms: 200,
            rotation_pause_ms: 2000,
            game_over_hold_ms: 2000,
            high_score_hold_ms: 2000,
        }
    }
}
