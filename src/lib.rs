//! Wave Survivor - A wave-based 2D survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, waves, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `assets`: Player sprite loading with placeholder fallback
//! - `config`: Screen size, tick rate and seed

pub mod assets;
pub mod config;
pub mod renderer;
pub mod sim;

pub use assets::PlayerSprite;
pub use config::Config;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default screen dimensions (pixels)
    pub const SCREEN_WIDTH: u32 = 800;
    pub const SCREEN_HEIGHT: u32 = 600;

    /// Nominal simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player defaults
    pub const PLAYER_START: (f32, f32) = (100.0, 100.0);
    pub const PLAYER_STEP: f32 = 5.0;
    pub const PLAYER_MAX_HEALTH: i32 = 10;
    /// Sprites are scaled to this width, keeping aspect ratio
    pub const PLAYER_SPRITE_WIDTH: f32 = 128.0;
    pub const ABILITY_COOLDOWN_MS: u64 = 1000;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 30.0;
    pub const ENEMY_BASE_SPEED: f32 = 2.0;
    pub const ENEMY_SPEED_PER_WAVE: f32 = 0.2;

    /// Projectile defaults
    pub const PROJECTILE_SIZE: f32 = 10.0;
    pub const PROJECTILE_SPEED: f32 = 10.0;

    /// Wave sizing: base + growth * (wave - 1)
    pub const WAVE_BASE_ENEMIES: u32 = 5;
    pub const WAVE_ENEMY_GROWTH: u32 = 2;

    /// Health bar placement (screen pixels)
    pub const HEALTH_BAR_X: f32 = 10.0;
    pub const HEALTH_BAR_Y: f32 = 10.0;
    pub const HEALTH_BAR_WIDTH: f32 = 200.0;
    pub const HEALTH_BAR_HEIGHT: f32 = 20.0;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Unit vector pointing from `a` to `b`
///
/// Coincident points have no direction; this returns `Vec2::ZERO` for them so
/// callers simply don't move.
#[inline]
pub fn direction(a: Vec2, b: Vec2) -> Vec2 {
    let delta = b - a;
    let dist = delta.length();
    if dist == 0.0 {
        return Vec2::ZERO;
    }
    delta / dist
}
