//! Shared entity capabilities
//!
//! Every actor in the arena has a bounding box, advances once per tick, and
//! carries an alive flag. Removal is lazy: an entity kills itself and the
//! owning `GameState` purges it at the next purge point.

use glam::Vec2;

use super::rect::Rect;
use super::tick::TickInput;

/// Read-only data an entity may consult while updating
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    /// Input for this tick
    pub input: &'a TickInput,
    /// Player center after this tick's movement (homing target)
    pub player_center: Vec2,
    /// Play area
    pub arena: Rect,
}

/// Entity variants, used for draw ordering and colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Enemy,
    Projectile,
}

/// Capability set shared by the player, enemies, and projectiles
pub trait Entity {
    fn kind(&self) -> EntityKind;

    /// Advance one tick
    fn update(&mut self, ctx: &TickContext);

    /// Current bounding box (always derived from the current position)
    fn bounds(&self) -> Rect;

    fn is_alive(&self) -> bool;

    /// Mark for removal at the next purge
    fn kill(&mut self);
}
