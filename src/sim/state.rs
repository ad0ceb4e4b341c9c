//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`].

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::hazard::{Hazard, HazardKind};
use super::player::Player;
use crate::config::Config;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulates
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended; frozen until the player returns to the menu
    GameOver,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    HazardSpawned { id: u32, kind: HazardKind },
    EnemyKilled { id: u32 },
    AsteroidHit { id: u32, hp_left: i32 },
    AsteroidDestroyed { id: u32 },
    PlayerHit { damage: i32, hp_left: i32 },
    /// Emitted once, on the tick that ends the run
    PlayerDied,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: Config,
    /// Seed the RNG stream was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    pub enemies_killed: u32,
    pub asteroids_destroyed: u32,
    /// Simulated seconds since `setup`
    pub elapsed_time: f32,
    /// Ticks simulated since `setup`
    pub time_ticks: u64,
    pub enemy_spawn_timer: f32,
    pub asteroid_spawn_timer: f32,
    /// `None` until the first run starts
    pub player: Option<Player>,
    /// Live enemies in spawn order
    pub enemies: Vec<Hazard>,
    /// Live asteroids in spawn order
    pub asteroids: Vec<Hazard>,
    pub(crate) next_id: u32,
}

impl GameState {
    /// Idle state sitting in the menu
    pub fn new(config: Config, seed: u64) -> Self {
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            score: 0,
            enemies_killed: 0,
            asteroids_destroyed: 0,
            elapsed_time: 0.0,
            time_ticks: 0,
            enemy_spawn_timer: 0.0,
            asteroid_spawn_timer: 0.0,
            player: None,
            enemies: Vec::new(),
            asteroids: Vec::new(),
            next_id: 1,
        }
    }

    /// Reset every per-run field and enter `Playing`.
    /// The RNG stream carries on from the previous run.
    pub fn setup(&mut self) {
        self.player = Some(Player::new(&self.config));
        self.enemies.clear();
        self.asteroids.clear();
        self.score = 0;
        self.enemies_killed = 0;
        self.asteroids_destroyed = 0;
        self.elapsed_time = 0.0;
        self.time_ticks = 0;
        self.enemy_spawn_timer = 0.0;
        self.asteroid_spawn_timer = 0.0;
        self.phase = GamePhase::Playing;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn one hazard at the top edge and return its ID
    pub fn spawn_hazard(&mut self, kind: HazardKind) -> u32 {
        let id = self.next_entity_id();
        let hazard = Hazard::spawn(id, kind, &self.config, &mut self.rng);
        log::debug!("Spawned {:?} #{} at x={}", kind, id, hazard.pos.x);
        match kind {
            HazardKind::Enemy => self.enemies.push(hazard),
            HazardKind::Asteroid => self.asteroids.push(hazard),
        }
        id
    }

    /// Insert a hazard built by the caller (scripted scenarios)
    pub fn push_hazard(&mut self, hazard: Hazard) {
        match hazard.kind {
            HazardKind::Enemy => self.enemies.push(hazard),
            HazardKind::Asteroid => self.asteroids.push(hazard),
        }
    }

    /// All live hazards, enemies first
    pub fn hazards(&self) -> impl Iterator<Item = &Hazard> {
        self.enemies.iter().chain(self.asteroids.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_menu() {
        let state = GameState::new(Config::default(), 1);
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.player.is_none());
    }

    #[test]
    fn test_setup_clears_previous_run() {
        let mut state = GameState::new(Config::default(), 1);
        state.setup();
        state.spawn_hazard(HazardKind::Enemy);
        state.spawn_hazard(HazardKind::Asteroid);
        state.score = 120;
        state.elapsed_time = 9.0;
        state.enemy_spawn_timer = 0.4;
        state.phase = GamePhase::GameOver;

        state.setup();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.hazards().count(), 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.elapsed_time, 0.0);
        assert_eq!(state.enemy_spawn_timer, 0.0);
        assert_eq!(state.player.as_ref().map(|p| p.hp), Some(5));
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = GameState::new(Config::default(), 42);
        let mut b = GameState::new(Config::default(), 42);
        for _ in 0..10 {
            a.spawn_hazard(HazardKind::Asteroid);
            b.spawn_hazard(HazardKind::Asteroid);
        }
        for (x, y) in a.asteroids.iter().zip(&b.asteroids) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.speed, y.speed);
        }
    }
}
