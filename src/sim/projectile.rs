//! Shots fired by the player

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::*;
use crate::per_second;

/// A fired shot. Shape is fixed at creation; only the position moves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Vertical speed in pixels per frame, upward positive
    pub speed: f32,
    pub is_super: bool,
    pub damage: i32,
    pub size: Vec2,
    pub active: bool,
}

impl Projectile {
    /// Regular laser bolt
    pub fn normal(pos: Vec2, laser_speed: f32) -> Self {
        Self {
            pos,
            speed: laser_speed,
            is_super: false,
            damage: NORMAL_DAMAGE,
            size: Vec2::from(NORMAL_SHOT_SIZE),
            active: true,
        }
    }

    /// Charged shot: heavier, larger and faster
    pub fn super_shot(pos: Vec2, laser_speed: f32) -> Self {
        Self {
            pos,
            speed: laser_speed * SUPER_SPEED_MULTIPLIER,
            is_super: true,
            damage: SUPER_DAMAGE,
            size: Vec2::from(SUPER_SHOT_SIZE),
            active: true,
        }
    }

    /// Advance and deactivate once past the top edge
    pub fn update(&mut self, dt: f32, screen_height: f32) {
        self.pos.y += per_second(self.speed) * dt;
        if self.pos.y > screen_height + PROJECTILE_EXIT_MARGIN {
            self.active = false;
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// Consume the shot on impact, returning its damage
    pub fn on_hit(&mut self) -> i32 {
        debug_assert!(self.active, "projectile hit twice");
        self.active = false;
        self.damage
    }
}
