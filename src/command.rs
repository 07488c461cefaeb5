//! Command-based control for the engine.
//!
//! Control surfaces (a network API handler, a serial console) can drive the
//! engine through a single enum instead of calling individual methods.

use crate::difficulty::Difficulty;
use crate::engine::MAX_PLAYERS;
use crate::storage::PlayerId;

/// Commands accepted by [`GameEngine::handle_command`](crate::engine::GameEngine::handle_command).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineCommand {
    /// Begin a single-player game.
    StartSinglePlayer { difficulty: Difficulty },
    /// Begin a pass-and-play game; participant count is validated.
    StartMultiplayer {
        players: heapless::Vec<PlayerId, MAX_PLAYERS>,
        difficulty: Difficulty,
    },
    /// Abort any game in progress and return to idle.
    Stop,
    /// Change the difficulty; rejected mid-game.
    SetDifficulty { difficulty: Difficulty },
    /// Attribute upcoming single-player sessions to a player; rejected
    /// mid-game.
    SetCurrentPlayer { player: PlayerId },
}
