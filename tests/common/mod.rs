//! Shared test infrastructure for simon-core integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use simon_core::{
    Difficulty, DisplayName, GameColor, GameEngine, GameEvent, GameSession, InputSource, Melody,
    OutputSink, PersistenceSink, PlayerId, RealtimeNotifier, StorageError, TIER_COUNT,
    TimeDuration, TimeInstant, TimeSource,
};

use rand_chacha::ChaCha8Rng;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement.
///
/// `delay` advances the clock, so the engine's blocking playback bursts move
/// test time forward exactly as they would wall time on hardware.
pub struct MockClock {
    current_time: Cell<u64>,
}

impl MockClock {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(0),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        self.current_time.set(self.current_time.get() + millis);
    }

    pub fn now_ms(&self) -> u64 {
        self.current_time.get()
    }
}

impl TimeSource<TestInstant> for MockClock {
    fn now(&self) -> TestInstant {
        TestInstant(self.current_time.get())
    }

    fn delay(&self, duration: TestDuration) {
        self.advance(duration.0);
    }
}

// ============================================================================
// Mock Buttons
// ============================================================================

/// Mock input source fed from an externally controllable press queue
#[derive(Clone, Default)]
pub struct MockButtons {
    presses: Rc<RefCell<VecDeque<GameColor>>>,
    exit_held: Rc<Cell<bool>>,
}

impl MockButtons {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a color button press for the next poll
    pub fn press(&self, color: GameColor) {
        self.presses.borrow_mut().push_back(color);
    }

    pub fn hold_exit(&self, held: bool) {
        self.exit_held.set(held);
    }
}

impl InputSource for MockButtons {
    fn poll_just_pressed(&mut self) -> Option<GameColor> {
        self.presses.borrow_mut().pop_front()
    }

    fn is_exit_held(&self) -> bool {
        self.exit_held.get()
    }
}

// ============================================================================
// Mock Panel (LEDs + speaker)
// ============================================================================

/// One recorded output-sink call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputCall {
    Activate(GameColor),
    Deactivate(GameColor),
    Tone(GameColor, u16),
    Melody(Melody),
}

/// Mock output sink that records every hardware call
#[derive(Clone, Default)]
pub struct MockPanel {
    calls: Rc<RefCell<Vec<OutputCall>>>,
}

impl MockPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<OutputCall> {
        self.calls.borrow().clone()
    }

    /// Colors of the tones recorded since the last `clear`
    pub fn tones(&self) -> Vec<GameColor> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                OutputCall::Tone(color, _) => Some(*color),
                _ => None,
            })
            .collect()
    }

    /// Melodies recorded since the last `clear`
    pub fn melodies(&self) -> Vec<Melody> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                OutputCall::Melody(melody) => Some(*melody),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl OutputSink for MockPanel {
    fn activate(&mut self, color: GameColor) {
        self.calls.borrow_mut().push(OutputCall::Activate(color));
    }

    fn deactivate(&mut self, color: GameColor) {
        self.calls.borrow_mut().push(OutputCall::Deactivate(color));
    }

    fn play_tone(&mut self, color: GameColor, duration_ms: u16, _blocking: bool) {
        self.calls
            .borrow_mut()
            .push(OutputCall::Tone(color, duration_ms));
    }

    fn play_melody(&mut self, melody: Melody) {
        self.calls.borrow_mut().push(OutputCall::Melody(melody));
    }
}

// ============================================================================
// Mock Store
// ============================================================================

#[derive(Default)]
struct StoreInner {
    best: [u8; TIER_COUNT],
    sessions: Vec<GameSession>,
    names: Vec<(PlayerId, DisplayName)>,
    fail_reads: bool,
    fail_writes: bool,
}

/// Mock persistence sink with injectable failures
#[derive(Clone, Default)]
pub struct MockStore {
    inner: Rc<RefCell<StoreInner>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_best(&self, difficulty: Difficulty, score: u8) {
        self.inner.borrow_mut().best[difficulty.index()] = score;
    }

    pub fn set_name(&self, id: &str, name: &str) {
        self.inner
            .borrow_mut()
            .names
            .push((player_id(id), display_name(name)));
    }

    pub fn fail_reads(&self, fail: bool) {
        self.inner.borrow_mut().fail_reads = fail;
    }

    pub fn fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    pub fn sessions(&self) -> Vec<GameSession> {
        self.inner.borrow().sessions.clone()
    }
}

impl PersistenceSink for MockStore {
    fn load_best_score(&mut self, difficulty: Difficulty) -> Result<u8, StorageError> {
        let inner = self.inner.borrow();
        if inner.fail_reads {
            return Err(StorageError::ReadFailed);
        }
        Ok(inner.best[difficulty.index()])
    }

    fn record_session(&mut self, session: &GameSession) -> Result<(), StorageError> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_writes {
            return Err(StorageError::WriteFailed);
        }
        inner.sessions.push(session.clone());
        Ok(())
    }

    fn lookup_display_name(&mut self, id: &PlayerId) -> Option<DisplayName> {
        self.inner
            .borrow()
            .names
            .iter()
            .find(|(stored, _)| stored == id)
            .map(|(_, name)| name.clone())
    }
}

// ============================================================================
// Mock Feed (realtime notifier)
// ============================================================================

/// Mock notifier that records every published event
#[derive(Clone, Default)]
pub struct MockFeed {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl MockFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl RealtimeNotifier for MockFeed {
    fn publish(&mut self, event: &GameEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub type TestEngine<'t> = GameEngine<
    't,
    TestInstant,
    MockButtons,
    MockPanel,
    MockStore,
    MockFeed,
    MockClock,
    ChaCha8Rng,
    31,
>;

/// Builds an engine with a fixed RNG seed and handles to every mock
pub fn setup(clock: &MockClock) -> (TestEngine<'_>, MockButtons, MockPanel, MockStore, MockFeed) {
    setup_seeded(clock, 42)
}

pub fn setup_seeded(
    clock: &MockClock,
    seed: u64,
) -> (TestEngine<'_>, MockButtons, MockPanel, MockStore, MockFeed) {
    use rand::SeedableRng;

    let buttons = MockButtons::new();
    let panel = MockPanel::new();
    let store = MockStore::new();
    let feed = MockFeed::new();
    let engine = GameEngine::new(
        buttons.clone(),
        panel.clone(),
        store.clone(),
        feed.clone(),
        clock,
        ChaCha8Rng::seed_from_u64(seed),
    );
    (engine, buttons, panel, store, feed)
}

pub fn player_id(s: &str) -> PlayerId {
    let mut id = PlayerId::new();
    id.push_str(s).unwrap();
    id
}

pub fn display_name(s: &str) -> DisplayName {
    let mut name = DisplayName::new();
    name.push_str(s).unwrap();
    name
}
