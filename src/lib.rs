#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`GameEngine`**: The tick-driven state machine owning sequence, score, and turn rotation
//! - **`GameColor`**: One of the four colored input/output channels
//! - **`Difficulty`** / **`DifficultyProfile`**: Named tiers bundling timing and length presets
//! - **`ColorSequence`**: The bounded master sequence with its active prefix
//! - **`InputSource`** / **`OutputSink`**: Traits to implement for your buttons and LEDs/speaker
//! - **`PersistenceSink`**: Trait for the best-effort score/player store
//! - **`RealtimeNotifier`**: Trait for the fire-and-forget event feed
//! - **`TimeSource`**: Trait to implement for your timing system
//! - **`EngineCommand`**: Command-based control for network/console surfaces
//!
//! The engine is `no_std`-compatible and allocation-free: sequences, turn
//! records, and names all live in `heapless` containers.

pub mod color;
pub mod command;
pub mod difficulty;
pub mod engine;
pub mod io;
pub mod notify;
pub mod sequence;
pub mod storage;
pub mod time;
pub mod tuning;

pub use color::GameColor;
pub use command::EngineCommand;
pub use difficulty::{DEFAULT_DIFFICULTY, Difficulty, DifficultyProfile, TIER_COUNT};
pub use engine::{
    EngineError, GameEngine, GameMode, GameState, MAX_PLAYERS, MIN_PLAYERS, PlayerTurnRecord,
};
pub use io::{InputSource, Melody, OutputSink};
pub use notify::{GameEvent, MultiplayerSnapshot, NullNotifier, RealtimeNotifier, Snapshot};
pub use sequence::ColorSequence;
pub use storage::{
    DisplayName, GameSession, MAX_NAME_LEN, NullPersistence, PersistenceSink, PlayerId,
    StorageError,
};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use tuning::EngineTuning;

/// Sequence capacity covering the hardest canonical tier (Expert, 31).
pub const MAX_SEQUENCE_LENGTH: usize = 31;
