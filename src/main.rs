//! Galactic Defender headless runner
//!
//! Loads the launcher config, plays one session with a simple autopilot on
//! the fixed timestep, then prints the final snapshot and the stored summary.
//! Drawing is left to a front end consuming `Session::snapshot`.

use std::path::PathBuf;

use clap::Parser;

use galactic_defender::consts::*;
use galactic_defender::sim::{GamePhase, Snapshot, TickInput};
use galactic_defender::{Config, JsonlStatsStore, MemoryStatsStore, Session, StatsStore};

#[derive(Parser)]
#[command(name = "galactic-defender")]
#[command(about = "Run a headless Galactic Defender session with an autopilot")]
struct Args {
    /// Config file (defaults to config/current_config.json, then config/default_config.json)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Stats log to append the finished game to
    #[arg(long, default_value = JsonlStatsStore::DEFAULT_PATH)]
    stats: PathBuf,
    /// Keep stats in memory only
    #[arg(long)]
    memory: bool,
    /// RNG seed for hazard spawns
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Stop after this many simulated seconds even if the ship survives
    #[arg(long, default_value_t = 120.0)]
    max_seconds: f32,
    /// Simulated display refresh rate feeding the fixed-step accumulator
    #[arg(long, default_value_t = 30.0)]
    fps: f32,
}

/// Fixed-step accumulator between display frames and simulation ticks
struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    fn new() -> Self {
        Self { accumulator: 0.0 }
    }

    /// Run as many fixed ticks as the frame time covers
    fn advance(&mut self, frame_dt: f32, mut step: impl FnMut(f32)) {
        self.accumulator += frame_dt.min(0.1);
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            step(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }
}

/// Horizontal distance the autopilot tolerates before steering
const STEER_DEAD_ZONE: f32 = 15.0;

/// Chase the lowest enemy, shoot when lined up, spend the super shot on
/// anything directly ahead.
fn autopilot(snapshot: &Snapshot) -> TickInput {
    let mut input = TickInput::default();
    let Some(player) = &snapshot.player else {
        return input;
    };

    let target = snapshot
        .hazards
        .iter()
        .filter(|h| h.pos.y > player.pos.y)
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    if let Some(target) = target {
        let dx = target.pos.x - player.pos.x;
        input.move_left = dx < -STEER_DEAD_ZONE;
        input.move_right = dx > STEER_DEAD_ZONE;
        let lined_up = dx.abs() < ENEMY_SIZE / 2.0;
        input.fire = lined_up && !player.overheated;
        input.fire_super = lined_up && player.super_shot_ready;
    }
    input
}

fn run<S: StatsStore>(config: Config, store: S, args: &Args) {
    let mut session = Session::new(config, store, args.seed);
    if let Some(last) = session.last_game() {
        log::info!(
            "Previous game: {} points, {} enemies, {:.1}s",
            last.score,
            last.enemies_killed,
            last.session_duration
        );
    }

    session.start();
    let frame_dt = 1.0 / args.fps.max(1.0);
    let mut clock = FrameClock::new();

    while session.phase() == GamePhase::Playing && session.state().elapsed_time < args.max_seconds {
        let mut input = autopilot(&session.snapshot());
        if !input.is_empty() {
            log::trace!("Autopilot input: {:?}", input);
        }
        clock.advance(frame_dt, |dt| {
            session.tick(&input, dt);
            // Intents are edge-triggered: only the first substep sees them
            input = TickInput::default();
        });
    }

    let snapshot = session.snapshot();
    log::info!("Run finished after {} ticks (seed {})", snapshot.ticks, snapshot.seed);
    if session.phase() == GamePhase::Playing {
        log::info!(
            "Time limit reached alive with {} points",
            snapshot.score
        );
    } else {
        session.return_to_menu();
    }

    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to encode snapshot: {}", e),
    }
    if let Some(last) = session.last_game() {
        println!(
            "Last game: {} points, {} enemies, {} asteroids, {:.1}s",
            last.score, last.enemies_killed, last.asteroids_destroyed, last.session_duration
        );
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    log::info!("Galactic Defender (headless) starting...");

    let config = match &args.config {
        Some(path) => Config::load_first(std::slice::from_ref(path)).0,
        None => Config::load(),
    };
    config.log_summary();

    if args.memory {
        run(config, MemoryStatsStore::new(), &args);
    } else {
        run(config, JsonlStatsStore::new(&args.stats), &args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galactic_defender::sim::Hazard;
    use glam::Vec2;

    fn session_with_enemy_at(x: f32) -> Session<MemoryStatsStore> {
        let mut session = Session::new(Config::default(), MemoryStatsStore::new(), 1);
        session.start();
        let state = session.state_mut();
        let id = state.next_entity_id();
        let enemy = Hazard::enemy(id, Vec2::new(x, 400.0), &state.config);
        state.push_hazard(enemy);
        session
    }

    #[test]
    fn test_autopilot_holds_inside_dead_zone() {
        // Ship starts at x = 400
        let input = autopilot(&session_with_enemy_at(410.0).snapshot());
        assert!(!input.move_left && !input.move_right);
        assert!(input.fire);
        assert!(input.fire_super);
    }

    #[test]
    fn test_autopilot_steers_toward_target() {
        let input = autopilot(&session_with_enemy_at(430.0).snapshot());
        assert!(input.move_right && !input.move_left);
        assert!(!input.fire);

        let input = autopilot(&session_with_enemy_at(300.0).snapshot());
        assert!(input.move_left && !input.move_right);
    }

    #[test]
    fn test_frame_clock_clamps_long_frames() {
        let mut clock = FrameClock::new();
        let mut steps = 0;
        clock.advance(0.04, |_| steps += 1);
        assert_eq!(steps, 2);

        // A 5 s hitch counts as 0.1 s
        steps = 0;
        clock.advance(5.0, |_| steps += 1);
        assert_eq!(steps, 6);
    }
}
