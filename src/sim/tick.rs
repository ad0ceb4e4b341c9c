//! Simulation tick
//!
//! Core game loop that advances the playfield by one frame.
//! Order inside a tick is fixed: input, player, spawning, hazard movement,
//! culling, then collisions (shots vs enemies, shots vs asteroids, ship vs
//! enemies, ship vs asteroids).

use super::hazard::{Hazard, HazardKind};
use super::player::Player;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Player intents for a single tick, applied before anything moves
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    pub fire_super: bool,
}

impl TickInput {
    pub fn is_empty(&self) -> bool {
        !(self.move_left || self.move_right || self.fire || self.fire_super)
    }
}

/// Advance the game state by `dt` seconds.
///
/// Only `Playing` simulates; other phases return immediately with no events.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }
    debug_assert!(dt.is_finite() && dt >= 0.0, "bad dt {dt}");

    let Some(player) = state.player.as_mut() else {
        debug_assert!(false, "playing without a player");
        return events;
    };

    apply_input(player, input);

    state.time_ticks += 1;
    state.elapsed_time += dt;

    player.update(dt);
    debug_assert!(player.alive, "dead player while playing");

    spawn_hazards(state, dt, &mut events);

    for hazard in state.enemies.iter_mut().chain(state.asteroids.iter_mut()) {
        hazard.update(dt);
    }
    cull_off_screen(&mut state.enemies);
    cull_off_screen(&mut state.asteroids);

    resolve_collisions(state, &mut events);

    events
}

fn apply_input(player: &mut Player, input: &TickInput) {
    if input.move_left {
        player.move_left();
    }
    if input.move_right {
        player.move_right();
    }
    if input.fire {
        player.fire();
    }
    if input.fire_super {
        player.fire_super();
    }
}

/// Fixed-interval spawners. At most one spawn per kind per tick; leftover
/// time past the interval is dropped.
fn spawn_hazards(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) {
    state.enemy_spawn_timer += dt;
    if state.enemy_spawn_timer + SPAWN_TIMER_EPSILON >= state.config.enemy_spawn_interval() {
        let id = state.spawn_hazard(HazardKind::Enemy);
        state.enemy_spawn_timer = 0.0;
        events.push(GameEvent::HazardSpawned {
            id,
            kind: HazardKind::Enemy,
        });
    }

    state.asteroid_spawn_timer += dt;
    if state.asteroid_spawn_timer + SPAWN_TIMER_EPSILON >= state.config.asteroid_spawn_interval() {
        let id = state.spawn_hazard(HazardKind::Asteroid);
        state.asteroid_spawn_timer = 0.0;
        events.push(GameEvent::HazardSpawned {
            id,
            kind: HazardKind::Asteroid,
        });
    }
}

fn cull_off_screen(hazards: &mut Vec<Hazard>) {
    for hazard in hazards.iter_mut() {
        if hazard.alive && hazard.is_off_screen() {
            hazard.kill();
        }
    }
    hazards.retain(|h| h.alive);
}

fn end_game(phase: &mut GamePhase, events: &mut Vec<GameEvent>) {
    debug_assert_eq!(*phase, GamePhase::Playing);
    *phase = GamePhase::GameOver;
    events.push(GameEvent::PlayerDied);
}

/// Combat resolution. Entities are marked during the passes and compacted
/// after, so every pass sees a stable list.
fn resolve_collisions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let GameState {
        player,
        enemies,
        asteroids,
        score,
        enemies_killed,
        asteroids_destroyed,
        phase,
        ..
    } = state;
    let Some(player) = player.as_mut() else {
        return;
    };

    // Shots vs enemies
    for shot in player.projectiles.iter_mut().filter(|p| p.active) {
        let shot_box = shot.bounds();
        if let Some(enemy) = enemies
            .iter_mut()
            .find(|e| e.alive && e.bounds().overlaps(&shot_box))
        {
            let damage = shot.on_hit();
            enemy.take_hit(damage);
            *score += ENEMY_SCORE;
            *enemies_killed += 1;
            events.push(GameEvent::EnemyKilled { id: enemy.id });
            log::debug!("Enemy #{} shot down", enemy.id);
        }
    }

    // Surviving shots vs asteroids; every shot chips exactly one hit point
    for shot in player.projectiles.iter_mut().filter(|p| p.active) {
        let shot_box = shot.bounds();
        if let Some(asteroid) = asteroids
            .iter_mut()
            .find(|a| a.alive && a.bounds().overlaps(&shot_box))
        {
            shot.on_hit();
            if asteroid.take_hit(ASTEROID_DAMAGE_PER_HIT) {
                *score += ASTEROID_SCORE;
                *asteroids_destroyed += 1;
                events.push(GameEvent::AsteroidDestroyed { id: asteroid.id });
                log::debug!("Asteroid #{} destroyed", asteroid.id);
            } else {
                events.push(GameEvent::AsteroidHit {
                    id: asteroid.id,
                    hp_left: asteroid.hp,
                });
            }
        }
    }

    player.projectiles.retain(|p| p.active);
    enemies.retain(|e| e.alive);
    asteroids.retain(|a| a.alive);

    let ship = player.bounds();
    for (hazards, damage) in [
        (enemies, ENEMY_CONTACT_DAMAGE),
        (asteroids, ASTEROID_CONTACT_DAMAGE),
    ] {
        let mut died = false;
        for hazard in hazards.iter_mut() {
            if !hazard.alive || !hazard.bounds().overlaps(&ship) {
                continue;
            }
            hazard.kill();
            let still_alive = player.take_damage(damage);
            events.push(GameEvent::PlayerHit {
                damage,
                hp_left: player.hp,
            });
            if !still_alive {
                died = true;
                break;
            }
        }
        hazards.retain(|h| h.alive);

        if died {
            end_game(phase, events);
            return;
        }
    }
}
