//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod frame;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{player_enemy_collisions, projectile_enemy_collisions};
pub use entity::{Entity, EntityKind, TickContext};
pub use frame::{DrawItem, Frame, HealthBar};
pub use rect::Rect;
pub use state::{
    AbilityOutcome, Enemy, GameEvent, GamePhase, GameState, Player, Projectile, nearest_enemy,
};
pub use tick::{TickInput, generate_wave, tick, wave_enemy_count, wave_enemy_speed};
