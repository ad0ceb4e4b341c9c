//! Descending hazards: enemies and asteroids
//!
//! Both kinds share one record; the kind only decides size, starting hit
//! points and how a hit is applied.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::config::Config;
use crate::consts::*;
use crate::per_second;

/// Hazard types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    /// Dies to any hit
    Enemy,
    /// Loses one hit point per hit
    Asteroid,
}

/// A hazard entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub kind: HazardKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Descent speed in pixels per frame
    pub speed: f32,
    pub hp: i32,
    pub alive: bool,
}

impl Hazard {
    /// Enemy at the given position, descending at the configured speed
    pub fn enemy(id: u32, pos: Vec2, config: &Config) -> Self {
        Self {
            id,
            kind: HazardKind::Enemy,
            pos,
            size: Vec2::splat(ENEMY_SIZE),
            speed: config.enemy_speed,
            hp: config.enemy_hp.max(ENEMY_HP),
            alive: true,
        }
    }

    pub fn asteroid(id: u32, pos: Vec2, speed: f32) -> Self {
        Self {
            id,
            kind: HazardKind::Asteroid,
            pos,
            size: Vec2::splat(ASTEROID_SIZE),
            speed,
            hp: ASTEROID_HP,
            alive: true,
        }
    }

    /// Spawn a hazard of `kind` just above the top edge at a random column
    pub fn spawn<R: Rng>(id: u32, kind: HazardKind, config: &Config, rng: &mut R) -> Self {
        let lo = SPAWN_SIDE_MARGIN;
        let hi = (config.screen_width as i32 - SPAWN_SIDE_MARGIN).max(lo);
        let x = rng.random_range(lo..=hi) as f32;
        let pos = Vec2::new(x, config.screen_height + SPAWN_ABOVE);

        match kind {
            HazardKind::Enemy => Self::enemy(id, pos, config),
            HazardKind::Asteroid => {
                let speed = rng.random_range(ASTEROID_MIN_SPEED..=ASTEROID_MAX_SPEED);
                Self::asteroid(id, pos, speed)
            }
        }
    }

    /// Descend by speed * dt
    pub fn update(&mut self, dt: f32) {
        self.pos.y -= per_second(self.speed) * dt;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// Whole body has left through the bottom edge
    pub fn is_off_screen(&self) -> bool {
        self.bounds().top() < -HAZARD_EXIT_MARGIN
    }

    /// Apply a hit. Returns true if this hit destroyed the hazard.
    pub fn take_hit(&mut self, damage: i32) -> bool {
        if !self.alive {
            return false;
        }
        match self.kind {
            HazardKind::Enemy => self.hp = 0,
            HazardKind::Asteroid => self.hp -= damage,
        }
        if self.hp <= 0 {
            self.hp = 0;
            self.alive = false;
        }
        !self.alive
    }

    /// Remove on contact with the player
    pub fn kill(&mut self) {
        self.alive = false;
    }
}
