//! Per-tick description of what to draw
//!
//! The renderer only ever sees a `Frame`, never the live entity containers.

use super::entity::{Entity, EntityKind};
use super::rect::Rect;
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// One drawable entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub kind: EntityKind,
    pub bounds: Rect,
}

/// Health bar placement and fill
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthBar {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub current: i32,
    pub max: i32,
}

impl HealthBar {
    /// Width of the filled part, whole pixels, never negative
    pub fn fill_width(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        let ratio = self.current as f32 / self.max as f32;
        (self.width * ratio).floor().clamp(0.0, self.width)
    }

    pub fn outline(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn fill(&self) -> Rect {
        Rect::new(self.x, self.y, self.fill_width(), self.height)
    }
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone)]
pub struct Frame {
    /// Draw order: player, enemies, projectiles
    pub items: Vec<DrawItem>,
    pub health_bar: HealthBar,
    pub wave: u32,
    pub phase: GamePhase,
}

impl GameState {
    /// Snapshot the drawable state
    pub fn frame(&self) -> Frame {
        let mut items = Vec::with_capacity(1 + self.enemies.len() + self.projectiles.len());
        items.push(draw_item(&self.player));
        items.extend(self.enemies.iter().map(|e| draw_item(e)));
        items.extend(self.projectiles.iter().map(|p| draw_item(p)));

        Frame {
            items,
            health_bar: HealthBar {
                x: HEALTH_BAR_X,
                y: HEALTH_BAR_Y,
                width: HEALTH_BAR_WIDTH,
                height: HEALTH_BAR_HEIGHT,
                current: self.player.health,
                max: self.player.max_health,
            },
            wave: self.wave,
            phase: self.phase,
        }
    }
}

fn draw_item(entity: &impl Entity) -> DrawItem {
    DrawItem {
        kind: entity.kind(),
        bounds: entity.bounds(),
    }
}
