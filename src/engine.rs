//! The Simon game engine: state machine, scoring, and turn rotation.
//!
//! Provides [`GameEngine`] which owns the color sequence, score, and
//! pass-and-play turn state for the duration of a game, and drives all
//! timing decisions. The engine is purely reactive: an external loop calls
//! [`tick`](GameEngine::tick) at a steady short cadence, and the engine
//! polls input, mutates state, and issues calls into its collaborators.
//!
//! Sequence playback and feedback melodies are *blocking bursts*: they run
//! to completion inside a single `tick` call, pacing themselves through the
//! time source. Because `tick` takes `&mut self`, a second tick cannot start
//! while a burst is executing — the single-threaded confinement is enforced
//! by construction rather than checked at runtime.

use crate::color::GameColor;
use crate::command::EngineCommand;
use crate::difficulty::{Difficulty, DifficultyProfile, TIER_COUNT};
use crate::io::{InputSource, Melody, OutputSink};
use crate::notify::{GameEvent, MultiplayerSnapshot, RealtimeNotifier, Snapshot};
use crate::sequence::ColorSequence;
use crate::storage::{DisplayName, GameSession, PersistenceSink, PlayerId};
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::tuning::EngineTuning;
use core::fmt::Write as _;
use heapless::Vec;
use rand::RngCore;

/// Minimum participants in a pass-and-play game.
pub const MIN_PLAYERS: usize = 2;

/// Maximum participants in a pass-and-play game.
pub const MAX_PLAYERS: usize = 4;

/// The current state of the game machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameState {
    /// Waiting for a button press to start a game.
    Idle,
    /// Playing the sequence back to the player (blocking burst).
    ShowingSequence,
    /// Waiting for the player to repeat the sequence.
    WaitingForInput,
    /// The whole sequence was repeated correctly.
    RoundComplete,
    /// Wrong color or input timeout.
    RoundFailed,
    /// Terminal display state; a press after the hold starts a new game.
    GameOver,
    /// High-score celebration; falls through to `GameOver` after a hold.
    NewHighScore,
}

/// Which kind of game is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameMode {
    SinglePlayer,
    /// Participants take sequential turns on shared hardware, each facing
    /// the same master sequence until they individually fail.
    PassAndPlay,
}

/// One participant's standing in a pass-and-play game.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerTurnRecord {
    pub id: PlayerId,
    pub display_name: DisplayName,
    /// Rounds fully repeated so far this turn.
    pub score: u8,
    /// True once this participant's turn has ended.
    pub has_played: bool,
}

/// Errors reported at the engine's API boundary.
///
/// Every variant is rejected synchronously, before any state mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineError {
    /// Pass-and-play requires 2 to 4 participants.
    InvalidPlayerCount {
        /// The participant count that was actually given.
        given: usize,
    },
    /// Configuration can only change between games.
    GameInProgress,
}

impl core::fmt::Display for EngineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EngineError::InvalidPlayerCount { given } => {
                write!(
                    f,
                    "invalid participant count: expected {}..={}, got {}",
                    MIN_PLAYERS, MAX_PLAYERS, given
                )
            }
            EngineError::GameInProgress => {
                write!(f, "configuration cannot change while a game is in progress")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}

/// The Simon game engine.
///
/// Owns the master sequence, score, high-score table, and turn rotation.
/// All hardware, storage, and realtime collaborators are injected at
/// construction; the engine holds no global state.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `In` - Input source (buttons) implementation
/// * `Out` - Output sink (LEDs/audio) implementation
/// * `S` - Persistence sink implementation
/// * `W` - Realtime notifier implementation
/// * `T` - Time source implementation type
/// * `R` - Random number generator, injected pre-seeded
/// * `N` - Sequence capacity; must cover the hardest tier's max length
pub struct GameEngine<'t, I, In, Out, S, W, T, R, const N: usize>
where
    I: TimeInstant,
    In: InputSource,
    Out: OutputSink,
    S: PersistenceSink,
    W: RealtimeNotifier,
    T: TimeSource<I>,
    R: RngCore,
{
    input: In,
    output: Out,
    storage: S,
    notifier: W,
    time_source: &'t T,
    rng: R,

    state: GameState,
    mode: GameMode,
    difficulty: Difficulty,
    profile: &'static DifficultyProfile,
    tuning: EngineTuning,

    sequence: ColorSequence<N>,
    /// How many elements the player has correctly repeated this round.
    cursor: usize,
    score: u8,
    high_scores: [u8; TIER_COUNT],

    players: Vec<PlayerTurnRecord, MAX_PLAYERS>,
    current_player_index: usize,
    /// Session attribution for single-player games.
    current_player: Option<PlayerId>,

    state_entered_at: I,
    last_input_at: I,
    game_started_at: I,
}

impl<'t, I, In, Out, S, W, T, R, const N: usize> GameEngine<'t, I, In, Out, S, W, T, R, N>
where
    I: TimeInstant,
    In: InputSource,
    Out: OutputSink,
    S: PersistenceSink,
    W: RealtimeNotifier,
    T: TimeSource<I>,
    R: RngCore,
{
    /// Creates a new engine in `Idle` with the default difficulty (Easy).
    ///
    /// The RNG must arrive seeded; firmware typically seeds from a floating
    /// ADC pin or hardware RNG, tests from a fixed value.
    pub fn new(input: In, output: Out, storage: S, notifier: W, time_source: &'t T, rng: R) -> Self {
        let now = time_source.now();
        Self {
            input,
            output,
            storage,
            notifier,
            time_source,
            rng,
            state: GameState::Idle,
            mode: GameMode::SinglePlayer,
            difficulty: Difficulty::Easy,
            profile: Difficulty::Easy.profile(),
            tuning: EngineTuning::default(),
            sequence: ColorSequence::new(),
            cursor: 0,
            score: 0,
            high_scores: [0; TIER_COUNT],
            players: Vec::new(),
            current_player_index: 0,
            current_player: None,
            state_entered_at: now,
            last_input_at: now,
            game_started_at: now,
        }
    }

    /// Loads the high-score table from storage and enters `Idle`.
    ///
    /// Storage failures degrade to a best score of 0 per tier; the engine is
    /// fully playable without persistence.
    pub fn initialize(&mut self) {
        for tier in Difficulty::ALL {
            self.high_scores[tier.index()] = match self.storage.load_best_score(tier) {
                Ok(best) => best,
                Err(_err) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("no stored best score for {}: {}", tier, _err);
                    0
                }
            };
        }
        self.set_state(GameState::Idle);
    }

    /// Advances the state machine by one step.
    ///
    /// Call at a steady cadence of a few tens of milliseconds. Sequence
    /// playback and feedback melodies run to completion inside the call.
    pub fn tick(&mut self) {
        // The exit button cancels at any state boundary, never mid-element.
        if self.state != GameState::Idle && self.input.is_exit_held() {
            self.stop();
            return;
        }

        match self.state {
            GameState::Idle => self.handle_idle(),
            GameState::ShowingSequence => self.handle_showing_sequence(),
            GameState::WaitingForInput => self.handle_waiting_for_input(),
            GameState::RoundComplete => self.handle_round_complete(),
            GameState::RoundFailed => self.handle_round_failed(),
            GameState::GameOver => self.handle_game_over(),
            GameState::NewHighScore => self.handle_new_high_score(),
        }
    }

    /// Begins a single-player game at the given difficulty.
    pub fn start_single_player(&mut self, difficulty: Difficulty) {
        self.players.clear();
        self.mode = GameMode::SinglePlayer;
        self.begin_game(difficulty);
    }

    /// Begins a pass-and-play game for 2 to 4 participants.
    ///
    /// Display names are resolved through the persistence sink, falling back
    /// to "Player N". The first participant plays first; rotation then
    /// round-robins over participants who have not yet finished.
    ///
    /// # Errors
    /// * `InvalidPlayerCount` - participant count outside 2..=4; no state
    ///   is mutated.
    pub fn start_multiplayer(
        &mut self,
        participants: &[PlayerId],
        difficulty: Difficulty,
    ) -> Result<(), EngineError> {
        if participants.len() < MIN_PLAYERS || participants.len() > MAX_PLAYERS {
            return Err(EngineError::InvalidPlayerCount {
                given: participants.len(),
            });
        }

        self.players.clear();
        for (index, id) in participants.iter().enumerate() {
            let display_name = self
                .storage
                .lookup_display_name(id)
                .unwrap_or_else(|| fallback_player_name(index));
            let _ = self.players.push(PlayerTurnRecord {
                id: id.clone(),
                display_name,
                score: 0,
                has_played: false,
            });
        }
        self.mode = GameMode::PassAndPlay;
        self.current_player_index = 0;
        self.current_player = Some(participants[0].clone());
        self.begin_game(difficulty);
        Ok(())
    }

    /// Forces a return to `Idle`, discarding all in-flight game state.
    pub fn stop(&mut self) {
        self.sequence.clear();
        self.cursor = 0;
        self.score = 0;
        self.players.clear();
        self.mode = GameMode::SinglePlayer;
        self.set_state(GameState::Idle);
    }

    /// Changes the difficulty tier. Only allowed between games.
    ///
    /// # Errors
    /// * `GameInProgress` - a game is active; nothing changes.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<(), EngineError> {
        if self.is_active() {
            return Err(EngineError::GameInProgress);
        }
        self.difficulty = difficulty;
        self.profile = difficulty.profile();
        Ok(())
    }

    /// Sets the player future single-player sessions are attributed to.
    /// Only allowed between games.
    ///
    /// # Errors
    /// * `GameInProgress` - a game is active; nothing changes.
    pub fn set_current_player(&mut self, id: PlayerId) -> Result<(), EngineError> {
        if self.is_active() {
            return Err(EngineError::GameInProgress);
        }
        self.current_player = Some(id);
        Ok(())
    }

    /// Dispatches a control-surface command to the matching method.
    pub fn handle_command(&mut self, command: EngineCommand) -> Result<(), EngineError> {
        match command {
            EngineCommand::StartSinglePlayer { difficulty } => {
                self.start_single_player(difficulty);
                Ok(())
            }
            EngineCommand::StartMultiplayer {
                players,
                difficulty,
            } => self.start_multiplayer(&players, difficulty),
            EngineCommand::Stop => {
                self.stop();
                Ok(())
            }
            EngineCommand::SetDifficulty { difficulty } => self.set_difficulty(difficulty),
            EngineCommand::SetCurrentPlayer { player } => self.set_current_player(player),
        }
    }

    /// Returns a read-only snapshot of the engine. Side-effect free.
    pub fn snapshot(&self) -> Snapshot {
        let multiplayer = if self.mode == GameMode::PassAndPlay && !self.players.is_empty() {
            let mut scores = Vec::new();
            for player in &self.players {
                let _ = scores.push(player.score);
            }
            Some(MultiplayerSnapshot {
                current_index: self.current_player_index as u8,
                scores,
            })
        } else {
            None
        };

        Snapshot {
            state: self.state,
            score: self.score,
            high_score: self.high_scores[self.difficulty.index()],
            difficulty: self.difficulty,
            difficulty_name: self.difficulty.name(),
            is_active: self.is_active(),
            multiplayer,
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Returns the current score.
    pub fn score(&self) -> u8 {
        self.score
    }

    /// Returns the stored best score for the active tier.
    pub fn high_score(&self) -> u8 {
        self.high_scores[self.difficulty.index()]
    }

    /// Returns the active difficulty tier.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Returns the current game mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Returns true while a game is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, GameState::Idle | GameState::GameOver)
    }

    /// Returns the pass-and-play turn records (empty outside multiplayer).
    pub fn players(&self) -> &[PlayerTurnRecord] {
        &self.players
    }

    /// Returns the index of the participant currently at the buttons.
    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    /// Returns a mutable handle to the fixed-pause tuning knobs.
    pub fn tuning_mut(&mut self) -> &mut EngineTuning {
        &mut self.tuning
    }

    // ========================================================================
    // State handlers
    // ========================================================================

    fn handle_idle(&mut self) {
        if self.input.poll_just_pressed().is_some() {
            self.start_single_player(self.difficulty);
        }
    }

    /// Synchronous playback burst: grow the sequence by one, play every
    /// element, then hand control to the player.
    fn handle_showing_sequence(&mut self) {
        let _ = self.sequence.extend(&mut self.rng);
        let length = self.sequence.active_len();
        self.notifier.publish(&GameEvent::SequencePlayed {
            length: length as u8,
        });

        self.pause(self.tuning.pre_playback_delay_ms);

        for index in 0..length {
            let Some(color) = self.sequence.get(index) else {
                break;
            };
            // An element is atomic: signal on, tone, signal off.
            self.output.activate(color);
            self.output
                .play_tone(color, self.profile.tone_duration_ms, true);
            self.output.deactivate(color);
            // Pause between elements, not after the last one; the player may
            // answer immediately.
            if index + 1 < length {
                self.pause(self.profile.step_interval_ms);
            }
        }

        self.cursor = 0;
        self.last_input_at = self.time_source.now();
        self.set_state(GameState::WaitingForInput);
    }

    fn handle_waiting_for_input(&mut self) {
        // Timeout runs from the last accepted input: every symbol gets a
        // fresh window, not one window for the whole round.
        let now = self.time_source.now();
        let waited = now.duration_since(self.last_input_at).as_millis();
        if waited >= u64::from(self.profile.input_window_ms) {
            self.set_state(GameState::RoundFailed);
            return;
        }

        let Some(pressed) = self.input.poll_just_pressed() else {
            return;
        };

        // Echo the press on the hardware before judging it.
        self.output.activate(pressed);
        self.output
            .play_tone(pressed, self.profile.tone_duration_ms, true);
        self.output.deactivate(pressed);

        let correct = self.sequence.get(self.cursor) == Some(pressed);
        self.notifier.publish(&GameEvent::ButtonPress {
            color: pressed,
            correct,
        });

        if !correct {
            self.set_state(GameState::RoundFailed);
            return;
        }

        self.cursor += 1;
        if self.cursor >= self.sequence.active_len() {
            self.set_state(GameState::RoundComplete);
        } else {
            self.last_input_at = self.time_source.now();
        }
    }

    fn handle_round_complete(&mut self) {
        self.score = self.score.saturating_add(1);
        if self.mode == GameMode::PassAndPlay {
            let index = self.current_player_index;
            if let Some(record) = self.players.get_mut(index) {
                record.score = self.score;
            }
        }

        if self.sequence.active_len() >= self.max_len() {
            // Reaching the tier's maximum length is a win, not a failure.
            self.output.play_melody(Melody::Success);
            self.finish_turn();
            return;
        }

        self.pause(self.tuning.round_pause_ms);
        self.set_state(GameState::ShowingSequence);
    }

    fn handle_round_failed(&mut self) {
        self.output.play_melody(Melody::Error);
        self.output.play_melody(Melody::GameOver);
        self.finish_turn();
    }

    fn handle_game_over(&mut self) {
        // Poll unconditionally so stale edges from the failed round are
        // consumed and discarded during the hold.
        let pressed = self.input.poll_just_pressed();
        if self.state_time_ms() < u64::from(self.tuning.game_over_hold_ms) {
            return;
        }
        if pressed.is_some() {
            self.start_single_player(self.difficulty);
        }
    }

    fn handle_new_high_score(&mut self) {
        let _ = self.input.poll_just_pressed();
        if self.state_time_ms() >= u64::from(self.tuning.high_score_hold_ms) {
            self.set_state(GameState::GameOver);
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn begin_game(&mut self, difficulty: Difficulty) {
        self.output.play_melody(Melody::GameStart);
        self.difficulty = difficulty;
        self.profile = difficulty.profile();
        self.sequence.clear();
        self.cursor = 0;
        self.score = 0;
        self.game_started_at = self.time_source.now();
        #[cfg(feature = "defmt")]
        defmt::info!("new game: {} {}", self.mode, self.difficulty);
        self.set_state(GameState::ShowingSequence);
    }

    /// Ends the current turn: scores, persistence, and either the terminal
    /// states (single-player) or rotation to the next participant.
    fn finish_turn(&mut self) {
        match self.mode {
            GameMode::SinglePlayer => {
                let tier = self.difficulty.index();
                let new_high = self.score > self.high_scores[tier];
                if new_high {
                    self.high_scores[tier] = self.score;
                }
                let player = self.current_player.clone().unwrap_or_else(guest_id);
                self.record_session(&player);
                self.notifier.publish(&GameEvent::GameOver {
                    score: self.score,
                    new_high_score: new_high,
                });
                if new_high {
                    #[cfg(feature = "defmt")]
                    defmt::info!("new high score: {}", self.score);
                    self.output.play_melody(Melody::HighScore);
                    self.set_state(GameState::NewHighScore);
                } else {
                    self.set_state(GameState::GameOver);
                }
            }
            GameMode::PassAndPlay => {
                let index = self.current_player_index;
                if let Some(record) = self.players.get_mut(index) {
                    record.score = self.score;
                    record.has_played = true;
                }
                let player = self
                    .players
                    .get(index)
                    .map(|record| record.id.clone())
                    .unwrap_or_else(guest_id);
                self.record_session(&player);

                let tier = self.difficulty.index();
                if self.score > self.high_scores[tier] {
                    self.high_scores[tier] = self.score;
                }

                if self.all_players_finished() {
                    self.notifier.publish(&GameEvent::GameOver {
                        score: self.score,
                        new_high_score: false,
                    });
                    self.set_state(GameState::GameOver);
                } else {
                    self.next_player();
                    self.notifier.publish(&GameEvent::TurnChanged {
                        player_index: self.current_player_index as u8,
                    });
                    // Hardware changes hands.
                    self.pause(self.tuning.rotation_pause_ms);
                    self.score = 0;
                    self.cursor = 0;
                    // The next player replays the fixed master prefix from
                    // its start; the master is never regenerated.
                    self.sequence.rewind();
                    self.set_state(GameState::ShowingSequence);
                }
            }
        }
    }

    /// Advances to the next participant who has not yet played.
    fn next_player(&mut self) {
        let count = self.players.len();
        for offset in 1..=count {
            let index = (self.current_player_index + offset) % count;
            if !self.players[index].has_played {
                self.current_player_index = index;
                self.current_player = Some(self.players[index].id.clone());
                return;
            }
        }
    }

    fn all_players_finished(&self) -> bool {
        self.players.iter().all(|record| record.has_played)
    }

    /// Best-effort session write; failures leave the game untouched.
    fn record_session(&mut self, player_id: &PlayerId) {
        let duration_ms = self
            .time_source
            .now()
            .duration_since(self.game_started_at)
            .as_millis() as u32;
        let session = GameSession {
            player_id: player_id.clone(),
            score: self.score,
            difficulty: self.difficulty,
            duration_ms,
        };
        if self.storage.record_session(&session).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("session not recorded: storage write failed");
        }
    }

    fn set_state(&mut self, next: GameState) {
        #[cfg(feature = "defmt")]
        defmt::debug!("game state {} -> {}", self.state, next);
        self.state = next;
        self.state_entered_at = self.time_source.now();
        for color in GameColor::ALL {
            self.output.deactivate(color);
        }
        let snapshot = self.snapshot();
        self.notifier.publish(&GameEvent::StateChanged(snapshot));
    }

    /// Effective maximum length: the tier's cap, bounded by the sequence
    /// capacity `N`.
    fn max_len(&self) -> usize {
        (self.profile.max_sequence_length as usize).min(N)
    }

    fn state_time_ms(&self) -> u64 {
        self.time_source
            .now()
            .duration_since(self.state_entered_at)
            .as_millis()
    }

    fn pause(&self, duration_ms: u16) {
        self.time_source
            .delay(<I::Duration as TimeDuration>::from_millis(u64::from(
                duration_ms,
            )));
    }
}

fn guest_id() -> PlayerId {
    let mut id = PlayerId::new();
    let _ = id.push_str("guest");
    id
}

fn fallback_player_name(index: usize) -> DisplayName {
    let mut name = DisplayName::new();
    let _ = write!(name, "Player {}", index + 1);
    name
}
