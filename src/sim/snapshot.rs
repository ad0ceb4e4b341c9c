//! Read-only view of the playfield handed to the renderer each frame

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hazard::HazardKind;
use super::state::{GamePhase, GameState};
use crate::stats::StatsRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    pub alive: bool,
    pub heat: f32,
    pub overheated: bool,
    pub super_shot_ready: bool,
    pub super_shot_charge: f32,
    pub hit_flash: f32,
    pub overheat_flash: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub is_super: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HazardView {
    pub pos: Vec2,
    pub kind: HazardKind,
    pub hp: i32,
}

/// Everything the drawing side needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub enemies_killed: u32,
    pub asteroids_destroyed: u32,
    pub elapsed_time: f32,
    /// Ticks simulated this run
    pub ticks: u64,
    /// Seed of the hazard RNG, enough to replay the run with the same inputs
    pub seed: u64,
    pub player: Option<PlayerView>,
    pub projectiles: Vec<ProjectileView>,
    /// Enemies first, then asteroids
    pub hazards: Vec<HazardView>,
    /// Summary shown on the menu
    pub last_game: Option<StatsRecord>,
}

impl Snapshot {
    pub fn capture(state: &GameState, last_game: Option<&StatsRecord>) -> Self {
        let player = state.player.as_ref();
        Self {
            phase: state.phase,
            score: state.score,
            enemies_killed: state.enemies_killed,
            asteroids_destroyed: state.asteroids_destroyed,
            elapsed_time: state.elapsed_time,
            ticks: state.time_ticks,
            seed: state.seed,
            player: player.map(|p| PlayerView {
                pos: p.pos,
                hp: p.hp.clamp(0, p.max_hp),
                max_hp: p.max_hp,
                alive: p.alive,
                heat: p.heat,
                overheated: p.overheated,
                super_shot_ready: p.super_shot_ready,
                super_shot_charge: p.super_shot_charge,
                hit_flash: p.hit_flash,
                overheat_flash: p.overheat_flash,
            }),
            projectiles: player
                .map(|p| {
                    p.projectiles
                        .iter()
                        .filter(|s| s.active)
                        .map(|s| ProjectileView {
                            pos: s.pos,
                            is_super: s.is_super,
                        })
                        .collect()
                })
                .unwrap_or_default(),
            hazards: state
                .hazards()
                .filter(|h| h.alive)
                .map(|h| HazardView {
                    pos: h.pos,
                    kind: h.kind,
                    hp: h.hp,
                })
                .collect(),
            last_game: last_game.cloned(),
        }
    }
}
