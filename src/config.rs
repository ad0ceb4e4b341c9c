//! Game configuration
//!
//! Written by the launcher as JSON and read once before a session is created.
//! Every key is optional; a missing, mistyped or out-of-range value falls back
//! to its default so startup never fails.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ConfigError;

/// Config files tried in order by [`Config::load`]
pub const CONFIG_PATHS: [&str; 2] = ["config/current_config.json", "config/default_config.json"];

/// Difficulty label chosen in the launcher (informational only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Custom,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Custom => "custom",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" | "normal" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "custom" => Some(Difficulty::Custom),
            _ => None,
        }
    }
}

/// Resolved game tunables. Immutable once a session holds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Speeds (pixels per 60 Hz frame) ===
    pub player_speed: f32,
    pub enemy_speed: f32,
    pub laser_speed: f32,

    // === Health ===
    /// Carried for the launcher; a session ends on the first death
    pub player_lives: u32,
    pub player_hp: i32,
    pub enemy_hp: i32,

    // === Spawning (events per second) ===
    pub enemy_spawn_rate: f32,
    pub asteroid_spawn_rate: f32,

    pub difficulty: Difficulty,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            player_speed: 5.0,
            enemy_speed: 2.0,
            laser_speed: 7.0,
            player_lives: 3,
            player_hp: 5,
            enemy_hp: 1,
            enemy_spawn_rate: 1.0,
            asteroid_spawn_rate: 0.3,
            difficulty: Difficulty::Medium,
        }
    }
}

/// Smallest playfield the spawn and movement margins fit into
const MIN_SCREEN_SIDE: f32 = 200.0;

impl Config {
    /// Resolve a config from JSON text, falling back per key.
    ///
    /// Only a document that is not a JSON object at all is an error.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let value: Value =
            serde_json::from_str(json).map_err(|source| ConfigError::Parse { path: None, source })?;
        match value {
            Value::Object(map) => Ok(Self::from_map(&map)),
            _ => Err(ConfigError::NotAnObject),
        }
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        let d = Self::default();
        let side = |v: f32| v.is_finite() && v >= MIN_SCREEN_SIDE;
        let positive = |v: f32| v.is_finite() && v > 0.0;

        Self {
            screen_width: float_key(map, "screen_width", d.screen_width, side),
            screen_height: float_key(map, "screen_height", d.screen_height, side),
            player_speed: float_key(map, "player_speed", d.player_speed, positive),
            enemy_speed: float_key(map, "enemy_speed", d.enemy_speed, positive),
            laser_speed: float_key(map, "laser_speed", d.laser_speed, positive),
            player_lives: int_key(map, "player_lives", d.player_lives as i64) as u32,
            player_hp: int_key(map, "player_hp", d.player_hp as i64) as i32,
            enemy_hp: int_key(map, "enemy_hp", d.enemy_hp as i64) as i32,
            enemy_spawn_rate: float_key(map, "enemy_spawn_rate", d.enemy_spawn_rate, positive),
            asteroid_spawn_rate: float_key(
                map,
                "asteroid_spawn_rate",
                d.asteroid_spawn_rate,
                positive,
            ),
            difficulty: match map.get("difficulty") {
                None => d.difficulty,
                Some(v) => v.as_str().and_then(Difficulty::from_str).unwrap_or_else(|| {
                    log::warn!("Config key 'difficulty' has unusable value {}, using default", v);
                    d.difficulty
                }),
            },
        }
    }

    /// Read and resolve a single config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        })
    }

    /// Try each path in order; built-in defaults if none is usable
    pub fn load_first<P: AsRef<Path>>(paths: &[P]) -> (Self, Option<PathBuf>) {
        for path in paths {
            let path = path.as_ref();
            if !path.exists() {
                continue;
            }
            match Self::from_file(path) {
                Ok(config) => {
                    log::info!("Config loaded from {}", path.display());
                    return (config, Some(path.to_path_buf()));
                }
                Err(e) => log::warn!("{}", e),
            }
        }
        log::warn!("No config file found, using defaults");
        (Self::default(), None)
    }

    /// Load from the standard launcher locations
    pub fn load() -> Self {
        Self::load_first(&CONFIG_PATHS[..]).0
    }

    /// Seconds between spawns of one enemy
    pub fn enemy_spawn_interval(&self) -> f32 {
        1.0 / self.enemy_spawn_rate
    }

    /// Seconds between spawns of one asteroid
    pub fn asteroid_spawn_interval(&self) -> f32 {
        1.0 / self.asteroid_spawn_rate
    }

    /// Log the resolved values at startup
    pub fn log_summary(&self) {
        log::info!("Resolution: {}x{}", self.screen_width, self.screen_height);
        log::info!(
            "Speeds: player {}, enemy {}, laser {}",
            self.player_speed,
            self.enemy_speed,
            self.laser_speed
        );
        log::info!(
            "Player: {} HP, {} lives; enemy HP {}",
            self.player_hp,
            self.player_lives,
            self.enemy_hp
        );
        log::info!(
            "Spawn rates: enemies {}/s, asteroids {}/s",
            self.enemy_spawn_rate,
            self.asteroid_spawn_rate
        );
        log::info!("Difficulty: {}", self.difficulty.as_str());
    }
}

fn float_key(map: &Map<String, Value>, key: &str, default: f32, valid: impl Fn(f32) -> bool) -> f32 {
    match map.get(key) {
        None => default,
        Some(v) => match v.as_f64().map(|n| n as f32) {
            Some(n) if valid(n) => n,
            _ => {
                log::warn!("Config key '{}' has unusable value {}, using {}", key, v, default);
                default
            }
        },
    }
}

/// Integer keys must be at least 1
fn int_key(map: &Map<String, Value>, key: &str, default: i64) -> i64 {
    match map.get(key) {
        None => default,
        Some(v) => match v.as_i64() {
            Some(n) if (1..=i32::MAX as i64).contains(&n) => n,
            _ => {
                log::warn!("Config key '{}' has unusable value {}, using {}", key, v, default);
                default
            }
        },
    }
}
