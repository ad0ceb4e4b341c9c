//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through the `dt` passed to `tick`
//! - Seeded RNG only
//! - Stable iteration order (spawn order, fire order)
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod hazard;
pub mod player;
pub mod projectile;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::Aabb;
pub use hazard::{Hazard, HazardKind};
pub use player::{Player, ShootInfo};
pub use projectile::Projectile;
pub use snapshot::{HazardView, PlayerView, ProjectileView, Snapshot};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
