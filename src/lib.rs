//! Galactic Defender - simulation core for a vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, weapon state, collisions, tick)
//! - `session`: Menu / playing / game-over flow and end-of-game persistence
//! - `config`: Tunables resolved once at startup
//! - `stats`: Append-only log of finished games

pub mod config;
pub mod error;
pub mod session;
pub mod sim;
pub mod stats;

pub use config::{Config, Difficulty};
pub use error::{ConfigError, StatsError};
pub use session::Session;
pub use stats::{JsonlStatsStore, MemoryStatsStore, StatsRecord, StatsStore};

/// Game constants that are not exposed through the config file
pub mod consts {
    /// Fixed simulation timestep used by the bundled runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Configured speeds are pixels per frame at this rate
    pub const REFERENCE_FPS: f32 = 60.0;

    /// Player ship
    pub const PLAYER_START_Y: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Ship center may not get closer than this to either side wall
    pub const PLAYER_EDGE_MARGIN: f32 = 30.0;
    /// Shots leave from the nose of the ship
    pub const MUZZLE_OFFSET: f32 = 30.0;
    pub const HIT_FLASH_SECONDS: f32 = 0.3;
    pub const OVERHEAT_FLASH_SECONDS: f32 = 0.5;

    /// Weapon heat
    pub const SHOOT_COOLDOWN: f32 = 0.3;
    pub const MAX_HEAT: f32 = 100.0;
    pub const HEAT_PER_SHOT: f32 = 15.0;
    /// Heat lost per second
    pub const COOLING_RATE: f32 = 8.0;
    pub const OVERHEAT_THRESHOLD: f32 = 80.0;
    /// Overheat clears only below this (hysteresis floor)
    pub const OVERHEAT_RECOVERY: f32 = 30.0;

    /// Super shot
    pub const SUPER_SHOT_COOLDOWN: f32 = 25.0;
    pub const MAX_CHARGE: f32 = 100.0;
    pub const SUPER_SPEED_MULTIPLIER: f32 = 1.5;

    /// Projectiles
    pub const NORMAL_DAMAGE: i32 = 1;
    pub const SUPER_DAMAGE: i32 = 3;
    pub const NORMAL_SHOT_SIZE: (f32, f32) = (2.0, 15.0);
    pub const SUPER_SHOT_SIZE: (f32, f32) = (4.0, 20.0);
    /// Projectiles are dropped once this far above the top edge
    pub const PROJECTILE_EXIT_MARGIN: f32 = 50.0;

    /// Hazards
    pub const ENEMY_SIZE: f32 = 30.0;
    pub const ENEMY_HP: i32 = 1;
    pub const ASTEROID_SIZE: f32 = 40.0;
    pub const ASTEROID_HP: i32 = 2;
    pub const ASTEROID_MIN_SPEED: f32 = 1.0;
    pub const ASTEROID_MAX_SPEED: f32 = 3.0;
    /// Hazards spawn this far from the side walls
    pub const SPAWN_SIDE_MARGIN: i32 = 50;
    /// Hazards spawn this far above the top edge
    pub const SPAWN_ABOVE: f32 = 50.0;
    /// Hazards are dropped once fully this far below the bottom edge
    pub const HAZARD_EXIT_MARGIN: f32 = 50.0;
    /// Slack for float accumulation in spawn timers
    pub const SPAWN_TIMER_EPSILON: f32 = 1e-4;

    /// Damage dealt to the player on contact
    pub const ENEMY_CONTACT_DAMAGE: i32 = 1;
    pub const ASTEROID_CONTACT_DAMAGE: i32 = 2;
    /// Damage an asteroid takes from any projectile
    pub const ASTEROID_DAMAGE_PER_HIT: i32 = 1;

    /// Score
    pub const ENEMY_SCORE: u64 = 10;
    pub const ASTEROID_SCORE: u64 = 20;
}

/// Convert a per-reference-frame speed into pixels per second
#[inline]
pub fn per_second(speed_per_frame: f32) -> f32 {
    speed_per_frame * consts::REFERENCE_FPS
}
