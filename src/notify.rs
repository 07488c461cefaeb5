//! Realtime notification collaborator.
//!
//! The engine publishes state snapshots and gameplay events for whatever
//! realtime surface is attached (WebSocket broadcaster, serial console,
//! nothing at all). Publishing is fire-and-forget: the engine never waits,
//! never retries, and never depends on a notifier for correctness.

use crate::color::GameColor;
use crate::difficulty::Difficulty;
use crate::engine::{GameState, MAX_PLAYERS};

/// Read-only view of the engine, safe to hand to any transport.
///
/// Snapshots and events flow outward only, so they implement `Serialize`
/// but not `Deserialize`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Snapshot {
    pub state: GameState,
    /// Current player's score.
    pub score: u8,
    /// Stored best for the active tier.
    pub high_score: u8,
    pub difficulty: Difficulty,
    /// Display name of the active tier.
    pub difficulty_name: &'static str,
    /// True while a game is in progress (neither idle nor game over).
    pub is_active: bool,
    /// Present only during pass-and-play games.
    pub multiplayer: Option<MultiplayerSnapshot>,
}

/// Pass-and-play portion of a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MultiplayerSnapshot {
    /// Index of the participant currently at the buttons.
    pub current_index: u8,
    /// Scores in participant order.
    pub scores: heapless::Vec<u8, MAX_PLAYERS>,
}

/// Events the engine publishes while running.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum GameEvent {
    /// The state machine moved; carries a fresh snapshot.
    StateChanged(Snapshot),
    /// A sequence of this length was just played back.
    SequencePlayed { length: u8 },
    /// A color button was pressed during input.
    ButtonPress { color: GameColor, correct: bool },
    /// A turn or game finished.
    GameOver { score: u8, new_high_score: bool },
    /// Pass-and-play rotation moved to another participant.
    TurnChanged { player_index: u8 },
}

/// Trait for abstracting the realtime broadcast surface.
pub trait RealtimeNotifier {
    /// Publishes one event. Must not block; failures are the
    /// implementation's problem and are invisible to the engine.
    fn publish(&mut self, event: &GameEvent);
}

/// Null object for running without a realtime surface.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl RealtimeNotifier for NullNotifier {
    fn publish(&mut self, _event: &GameEvent) {}
}
