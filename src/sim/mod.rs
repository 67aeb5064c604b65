//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Per-tick movement (speeds are units per tick)
//! - Seeded RNG only, owned by the spawner
//! - Stable iteration order (spawn / fire order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use collision::{Bounds, enemy_touches_player, projectile_hits_enemy};
pub use snapshot::{HudReadout, Snapshot, build_snapshot, hud};
pub use spawner::{Edge, Spawner};
pub use state::{Enemy, EntityId, PLAYER_ID, Player, Projectile, SimulationState};
pub use tick::{Direction, FireRequest, IntentSet, TickInput, fire, tick};
