//! Session flow: menu → playing → game over → menu
//!
//! Wraps the simulation with the stats log. A finished run is written exactly
//! once; storage failures are logged and never interrupt play.

use crate::config::Config;
use crate::sim::{GameEvent, GamePhase, GameState, Snapshot, TickInput, tick};
use crate::stats::{StatsRecord, StatsStore, unix_millis};

pub struct Session<S: StatsStore> {
    state: GameState,
    store: S,
    /// Summary of the most recent finished game, as last read from the store
    last_game: Option<StatsRecord>,
    /// Whether the current run's record has been written
    stats_saved: bool,
}

impl<S: StatsStore> Session<S> {
    /// New session sitting in the menu
    pub fn new(config: Config, store: S, seed: u64) -> Self {
        let mut session = Self {
            state: GameState::new(config, seed),
            store,
            last_game: None,
            stats_saved: false,
        };
        session.reload_last_game();
        session
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn last_game(&self) -> Option<&StatsRecord> {
        self.last_game.as_ref()
    }

    /// Begin a new run. Only valid from the menu; returns whether it started.
    pub fn start(&mut self) -> bool {
        if self.state.phase != GamePhase::Menu {
            return false;
        }
        self.state.setup();
        self.stats_saved = false;
        log::info!("New game started");
        true
    }

    /// Advance one frame
    pub fn tick(&mut self, input: &TickInput, dt: f32) -> Vec<GameEvent> {
        let events = tick(&mut self.state, input, dt);
        if events.contains(&GameEvent::PlayerDied) {
            self.end_game();
        }
        events
    }

    fn end_game(&mut self) {
        if self.stats_saved {
            return;
        }
        self.stats_saved = true;

        let record = StatsRecord {
            timestamp: unix_millis(),
            score: self.state.score,
            enemies_killed: self.state.enemies_killed,
            asteroids_destroyed: self.state.asteroids_destroyed,
            session_duration: self.state.elapsed_time,
        };
        log::info!(
            "Game over. Score: {}, enemies: {}, asteroids: {}, time: {:.1}s",
            record.score,
            record.enemies_killed,
            record.asteroids_destroyed,
            record.session_duration
        );
        match self.store.append(&record) {
            Ok(()) => log::info!("Game stats saved"),
            Err(e) => log::error!("Failed to save game stats: {}", e),
        }
    }

    /// Leave the game-over screen. Returns whether the phase changed.
    pub fn return_to_menu(&mut self) -> bool {
        if self.state.phase != GamePhase::GameOver {
            return false;
        }
        self.state.phase = GamePhase::Menu;
        self.reload_last_game();
        true
    }

    fn reload_last_game(&mut self) {
        self.last_game = match self.store.latest() {
            Ok(Some(record)) => {
                log::info!("Last game loaded: {} points", record.score);
                Some(record)
            }
            Ok(None) => {
                log::info!("No previous games recorded");
                None
            }
            Err(e) => {
                log::warn!("Failed to load game stats: {}", e);
                None
            }
        };
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.last_game.as_ref())
    }
}
