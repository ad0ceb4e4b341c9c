//! The player's ship
//!
//! Owns movement, health, the shots it has fired, and two independent weapon
//! state machines:
//! - Heat: every normal shot adds heat; at the overheat threshold the gun locks
//!   until heat cools below a much lower recovery floor.
//! - Super shot: a charge that fills over a fixed time and is spent whole.
//!
//! All timing runs on the ship's own simulation clock, advanced by `update`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::projectile::Projectile;
use crate::config::Config;
use crate::consts::*;

/// Weapon status for HUD consumers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShootInfo {
    pub can_shoot: bool,
    pub heat: f32,
    pub overheated: bool,
    pub super_shot_ready: bool,
    pub super_shot_charge: f32,
    pub projectile_count: usize,
}

/// The player ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Horizontal pixels per move intent
    pub speed: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub alive: bool,
    /// Live shots in fire order
    pub projectiles: Vec<Projectile>,

    // Normal weapon
    pub can_shoot: bool,
    pub shoot_cooldown: f32,
    pub last_shot_time: f32,
    pub heat: f32,
    pub overheated: bool,

    // Super shot
    pub super_shot_ready: bool,
    pub super_shot_charge: f32,
    pub super_shot_timer: f32,
    pub super_shot_cooldown: f32,

    /// Seconds of hit flash left (visual only)
    pub hit_flash: f32,
    /// Seconds of overheat flash left (visual only)
    pub overheat_flash: f32,

    /// Simulation seconds this ship has lived
    pub clock: f32,

    screen_width: f32,
    screen_height: f32,
    laser_speed: f32,
}

impl Player {
    /// Fresh ship at the bottom center. The super shot starts ready with an
    /// empty charge gauge (unlike [`Player::reset`]).
    pub fn new(config: &Config) -> Self {
        Self {
            pos: Self::start_pos(config.screen_width),
            speed: config.player_speed,
            hp: config.player_hp,
            max_hp: config.player_hp,
            alive: true,
            projectiles: Vec::new(),
            can_shoot: true,
            shoot_cooldown: SHOOT_COOLDOWN,
            last_shot_time: 0.0,
            heat: 0.0,
            overheated: false,
            super_shot_ready: true,
            super_shot_charge: 0.0,
            super_shot_timer: 0.0,
            super_shot_cooldown: SUPER_SHOT_COOLDOWN,
            hit_flash: 0.0,
            overheat_flash: 0.0,
            clock: 0.0,
            screen_width: config.screen_width,
            screen_height: config.screen_height,
            laser_speed: config.laser_speed,
        }
    }

    fn start_pos(screen_width: f32) -> Vec2 {
        Vec2::new((screen_width / 2.0).floor(), PLAYER_START_Y)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }

    /// Advance timers, cool the gun, charge the super shot, move shots
    pub fn update(&mut self, dt: f32) {
        if !self.alive {
            return;
        }
        self.clock += dt;

        if !self.can_shoot && self.clock - self.last_shot_time >= self.shoot_cooldown {
            self.can_shoot = true;
        }

        if self.heat > 0.0 {
            self.heat = (self.heat - COOLING_RATE * dt).max(0.0);
            if self.overheated && self.heat < OVERHEAT_RECOVERY {
                self.overheated = false;
                log::debug!("Weapon cooled down");
            }
        }

        if !self.super_shot_ready {
            self.super_shot_timer += dt;
            self.super_shot_charge =
                (MAX_CHARGE * self.super_shot_timer / self.super_shot_cooldown).min(MAX_CHARGE);
            if self.super_shot_timer >= self.super_shot_cooldown {
                self.super_shot_ready = true;
                self.super_shot_timer = 0.0;
                self.super_shot_charge = MAX_CHARGE;
            }
        }

        self.hit_flash = (self.hit_flash - dt).max(0.0);
        self.overheat_flash = (self.overheat_flash - dt).max(0.0);

        let screen_height = self.screen_height;
        for shot in &mut self.projectiles {
            shot.update(dt, screen_height);
        }
        self.projectiles.retain(|p| p.active);
    }

    pub fn move_left(&mut self) {
        if self.alive {
            self.pos.x = (self.pos.x - self.speed).max(PLAYER_EDGE_MARGIN);
        }
    }

    pub fn move_right(&mut self) {
        if self.alive {
            self.pos.x = (self.pos.x + self.speed).min(self.screen_width - PLAYER_EDGE_MARGIN);
        }
    }

    fn muzzle(&self) -> Vec2 {
        self.pos + Vec2::new(0.0, MUZZLE_OFFSET)
    }

    fn set_overheated(&mut self) {
        self.overheated = true;
        self.overheat_flash = OVERHEAT_FLASH_SECONDS;
        log::debug!("Weapon overheated at {:.1}", self.heat);
    }

    /// Fire a normal shot. `None` if dead, cooling down between shots, or
    /// overheated.
    pub fn fire(&mut self) -> Option<&Projectile> {
        if !self.alive || !self.can_shoot || self.overheated {
            return None;
        }
        if self.heat >= OVERHEAT_THRESHOLD {
            self.set_overheated();
            return None;
        }

        self.projectiles
            .push(Projectile::normal(self.muzzle(), self.laser_speed));

        self.last_shot_time = self.clock;
        self.can_shoot = false;
        self.heat = (self.heat + HEAT_PER_SHOT).min(MAX_HEAT);
        if self.heat >= OVERHEAT_THRESHOLD {
            self.set_overheated();
        }

        self.projectiles.last()
    }

    /// Fire the super shot if fully charged
    pub fn fire_super(&mut self) -> Option<&Projectile> {
        if !self.alive || !self.super_shot_ready {
            return None;
        }

        self.projectiles
            .push(Projectile::super_shot(self.muzzle(), self.laser_speed));

        self.super_shot_ready = false;
        self.super_shot_timer = 0.0;
        self.super_shot_charge = 0.0;
        log::debug!("Super shot fired");

        self.projectiles.last()
    }

    /// Apply damage. Returns whether the ship is still alive; always false
    /// (and no effect) once dead. Negative amounts count as zero, so this
    /// never heals.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.hp -= amount.max(0);
        self.hit_flash = HIT_FLASH_SECONDS;
        if self.hp <= 0 {
            self.die();
        }
        self.alive
    }

    fn die(&mut self) {
        self.alive = false;
        self.hp = 0;
        log::info!("Player destroyed");
    }

    /// Restore a full-health ship. The super shot comes back ready with a full
    /// gauge.
    pub fn reset(&mut self) {
        self.pos = Self::start_pos(self.screen_width);
        self.hp = self.max_hp;
        self.alive = true;
        self.heat = 0.0;
        self.overheated = false;
        self.super_shot_ready = true;
        self.super_shot_timer = 0.0;
        self.super_shot_charge = MAX_CHARGE;
        self.projectiles.clear();
        self.can_shoot = true;
    }

    pub fn shoot_info(&self) -> ShootInfo {
        ShootInfo {
            can_shoot: self.can_shoot,
            heat: self.heat,
            overheated: self.overheated,
            super_shot_ready: self.super_shot_ready,
            super_shot_charge: self.super_shot_charge,
            projectile_count: self.projectiles.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn player() -> Player {
        Player::new(&Config::default())
    }

    #[test]
    fn test_fresh_player() {
        let p = player();
        assert_eq!(p.pos, Vec2::new(400.0, 50.0));
        assert_eq!(p.hp, 5);
        assert!(p.super_shot_ready);
        assert_eq!(p.super_shot_charge, 0.0);
    }

    #[test]
    fn test_fire_spawns_shot_and_locks() {
        let mut p = player();
        let shot = p.fire().cloned().unwrap();
        assert_eq!(shot.pos, Vec2::new(400.0, 80.0));
        assert!(!shot.is_super);
        assert_eq!(p.heat, 15.0);
        assert!(!p.can_shoot);

        // Still locked inside the cooldown
        p.update(0.25);
        assert!(p.fire().is_none());
        assert_eq!(p.projectiles.len(), 1);

        p.update(0.25);
        assert!(p.can_shoot);
        assert!(p.fire().is_some());
        assert_eq!(p.projectiles.len(), 2);
    }

    #[test]
    fn test_overheat_blocks_until_recovery_floor() {
        let mut p = player();
        let mut shots = 0;
        while !p.overheated {
            assert!(p.fire().is_some());
            shots += 1;
            p.update(0.5);
        }
        // 15 per shot minus 4 of cooling per 0.5 s gap
        assert_eq!(shots, 7);
        assert!(p.heat >= 70.0);

        // Cool to just above the floor: still locked even though far below 80
        while p.heat >= 32.0 {
            p.update(0.25);
        }
        assert!(p.overheated);
        let heat = p.heat;
        assert!(p.fire().is_none());
        assert_eq!(p.heat, heat);
        assert_eq!(p.projectiles.len(), 0);

        while p.overheated {
            p.update(0.25);
        }
        assert!(p.heat < 30.0);
        assert!(p.fire().is_some());
    }

    #[test]
    fn test_heat_already_past_threshold_sets_overheat() {
        let mut p = player();
        p.heat = 85.0;
        assert!(p.fire().is_none());
        assert!(p.overheated);
        assert_eq!(p.overheat_flash, OVERHEAT_FLASH_SECONDS);
        assert_eq!(p.heat, 85.0);
    }

    #[test]
    fn test_super_charge_reaches_full_at_cooldown() {
        let mut p = player();
        let shot = p.fire_super().cloned().unwrap();
        assert!(shot.is_super);
        assert_eq!(shot.damage, 3);
        assert!(!p.super_shot_ready);
        assert!(p.fire_super().is_none());

        for _ in 0..49 {
            p.update(0.5);
        }
        assert!(!p.super_shot_ready);
        assert_eq!(p.super_shot_charge, 98.0);

        p.update(0.5);
        assert!(p.super_shot_ready);
        assert_eq!(p.super_shot_charge, 100.0);
        assert_eq!(p.super_shot_timer, 0.0);
    }

    #[test]
    fn test_super_shot_ignores_heat() {
        let mut p = player();
        p.overheated = true;
        p.heat = 100.0;
        assert!(p.fire_super().is_some());
    }

    #[test]
    fn test_movement_clamped() {
        let mut p = player();
        for _ in 0..200 {
            p.move_left();
        }
        assert_eq!(p.pos.x, 30.0);
        for _ in 0..200 {
            p.move_right();
        }
        assert_eq!(p.pos.x, 770.0);
    }

    #[test]
    fn test_damage_and_single_death() {
        let mut p = player();
        assert!(p.take_damage(2));
        assert_eq!(p.hp, 3);
        assert_eq!(p.hit_flash, HIT_FLASH_SECONDS);

        assert!(!p.take_damage(5));
        assert!(!p.alive);
        assert_eq!(p.hp, 0);

        assert!(!p.take_damage(1));
        assert_eq!(p.hp, 0);

        // Dead ships ignore intents
        let x = p.pos.x;
        p.move_left();
        assert_eq!(p.pos.x, x);
        assert!(p.fire().is_none());
        assert!(p.fire_super().is_none());
    }

    #[test]
    fn test_negative_damage_does_not_heal() {
        let mut p = player();
        assert!(p.take_damage(-4));
        assert_eq!(p.hp, p.max_hp);
        assert!(p.take_damage(1));
        assert!(p.take_damage(-1));
        assert_eq!(p.hp, p.max_hp - 1);
    }

    #[test]
    fn test_reset_restores_full_charge() {
        let mut p = player();
        p.fire_super();
        p.fire();
        p.take_damage(10);
        p.reset();

        assert!(p.alive);
        assert_eq!(p.hp, p.max_hp);
        assert_eq!(p.heat, 0.0);
        assert!(!p.overheated);
        assert!(p.super_shot_ready);
        assert_eq!(p.super_shot_charge, 100.0);
        assert!(p.projectiles.is_empty());
        assert!(p.shoot_info().can_shoot);
    }

    #[test]
    fn test_projectiles_culled_off_top() {
        let mut p = player();
        p.fire();
        // 420 px/s from y=80 needs ~1.45 s to pass 650
        for _ in 0..15 {
            p.update(0.1);
        }
        assert!(p.projectiles.is_empty());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Fire,
        FireSuper,
        Tick(f32),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => Just(Op::Fire),
            1 => Just(Op::FireSuper),
            4 => (0.0f32..2.0).prop_map(Op::Tick),
        ]
    }

    proptest! {
        #[test]
        fn heat_and_charge_stay_in_range(ops in prop::collection::vec(op(), 0..400)) {
            let mut p = player();
            let mut super_fired = false;
            for op in ops {
                match op {
                    Op::Fire => { p.fire(); }
                    Op::FireSuper => { super_fired |= p.fire_super().is_some(); }
                    Op::Tick(dt) => p.update(dt),
                }
                prop_assert!((0.0..=MAX_HEAT).contains(&p.heat));
                prop_assert!((0.0..=MAX_CHARGE).contains(&p.super_shot_charge));
                if super_fired && p.super_shot_ready {
                    prop_assert_eq!(p.super_shot_charge, MAX_CHARGE);
                }
            }
        }

        #[test]
        fn overheat_flag_has_hysteresis(ops in prop::collection::vec(op(), 0..400)) {
            let mut p = player();
            for op in ops {
                let was_overheated = p.overheated;
                let heat_before = p.heat;
                let shots_before = p.projectiles.len();
                match op {
                    Op::Fire => {
                        let fired = p.fire().is_some();
                        if was_overheated {
                            prop_assert!(!fired);
                            prop_assert_eq!(p.heat, heat_before);
                            prop_assert_eq!(p.projectiles.len(), shots_before);
                        }
                    }
                    Op::FireSuper => { p.fire_super(); }
                    Op::Tick(dt) => p.update(dt),
                }
                if !was_overheated && p.overheated {
                    prop_assert!(p.heat >= OVERHEAT_THRESHOLD);
                }
                if was_overheated && !p.overheated {
                    prop_assert!(p.heat < OVERHEAT_RECOVERY);
                }
            }
        }
    }
}
