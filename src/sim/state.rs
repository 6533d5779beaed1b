//! Game state and core simulation types
//!
//! `GameState` owns every live entity. Entities only ever read each other
//! through the per-tick `TickContext`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityKind, TickContext};
use super::rect::Rect;
use crate::config::Config;
use crate::consts::*;
use crate::{direction, distance};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player health reached zero
    GameOver,
    /// Host asked to exit
    Exited,
}

/// Things that happened during a tick, drained by the host
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Ability fired at the enemy with this id
    AbilityFired { target: u32 },
    /// Cooldown elapsed but there was nothing to shoot
    AbilityIdle,
    /// Enemies reached the player
    PlayerHit { damage: i32, health: i32 },
    /// Enemy destroyed by a projectile
    EnemyDestroyed { id: u32 },
    WaveStarted { wave: u32, enemies: usize },
    GameOver { wave: u32, ticks: u64 },
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Can go negative when several enemies land in the same tick
    pub health: i32,
    pub max_health: i32,
    pub cooldown_ms: u64,
    pub last_ability_ms: u64,
}

/// Result of asking the player to use the ability
#[derive(Debug, Clone)]
pub enum AbilityOutcome {
    /// Cooldown still running
    Cooling,
    /// Cooldown consumed, no enemy to aim at
    NoTarget,
    /// Projectile spawned toward the enemy with id `target`
    Fired { projectile: Projectile, target: u32 },
}

impl Player {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            cooldown_ms: ABILITY_COOLDOWN_MS,
            last_ability_ms: 0,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }

    pub fn ability_ready(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_ability_ms) >= self.cooldown_ms
    }

    /// Fire at the nearest enemy if the cooldown has elapsed
    ///
    /// The cooldown restarts whenever it has elapsed, even if no enemy is
    /// alive to shoot at. The returned projectile has id 0; the caller
    /// assigns a real one.
    pub fn try_use_ability(&mut self, now_ms: u64, enemies: &[Enemy]) -> AbilityOutcome {
        if !self.ability_ready(now_ms) {
            return AbilityOutcome::Cooling;
        }
        self.last_ability_ms = now_ms;

        let origin = self.center();
        match nearest_enemy(origin, enemies) {
            Some(enemy) => AbilityOutcome::Fired {
                projectile: Projectile::aimed(0, origin, enemy.center(), PROJECTILE_SPEED),
                target: enemy.id,
            },
            None => AbilityOutcome::NoTarget,
        }
    }
}

impl Entity for Player {
    fn kind(&self) -> EntityKind {
        EntityKind::Player
    }

    fn update(&mut self, ctx: &TickContext) {
        // Each axis moves a full step, so diagonals are faster
        let input = ctx.input;
        if input.left {
            self.pos.x -= PLAYER_STEP;
        }
        if input.right {
            self.pos.x += PLAYER_STEP;
        }
        if input.up {
            self.pos.y -= PLAYER_STEP;
        }
        if input.down {
            self.pos.y += PLAYER_STEP;
        }
    }

    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// The player dies only through `health`; nothing in the tick calls this.
    /// It drops health to zero without ever raising it.
    fn kill(&mut self) {
        self.health = self.health.min(0);
    }
}

/// A homing enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    /// Pixels per tick
    pub speed: f32,
    pub alive: bool,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, speed: f32) -> Self {
        Self {
            id,
            pos,
            speed,
            alive: true,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }
}

impl Entity for Enemy {
    fn kind(&self) -> EntityKind {
        EntityKind::Enemy
    }

    fn update(&mut self, ctx: &TickContext) {
        // Re-aim every tick; standing on the player center yields no movement
        self.pos += direction(self.center(), ctx.player_center) * self.speed;
        if self.bounds().is_outside(&ctx.arena) {
            self.kill();
        }
    }

    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::splat(ENEMY_SIZE),
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn kill(&mut self) {
        self.alive = false;
    }
}

/// A fire-and-forget projectile
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    /// Fixed at spawn
    pub vel: Vec2,
    pub alive: bool,
}

impl Projectile {
    /// Spawn centered on `start`, heading for where `target` is right now
    ///
    /// If `start` and `target` coincide the projectile has zero velocity.
    pub fn aimed(id: u32, start: Vec2, target: Vec2, speed: f32) -> Self {
        Self {
            id,
            pos: Rect::from_center(start, Vec2::splat(PROJECTILE_SIZE)).pos,
            vel: direction(start, target) * speed,
            alive: true,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.bounds().center()
    }
}

impl Entity for Projectile {
    fn kind(&self) -> EntityKind {
        EntityKind::Projectile
    }

    fn update(&mut self, ctx: &TickContext) {
        self.pos += self.vel;
        if self.bounds().is_outside(&ctx.arena) {
            self.kill();
        }
    }

    fn bounds(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: Vec2::splat(PROJECTILE_SIZE),
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn kill(&mut self) {
        self.alive = false;
    }
}

/// Closest live enemy to `point`, by center distance
///
/// Ties keep the earliest enemy in slice order.
pub fn nearest_enemy(point: Vec2, enemies: &[Enemy]) -> Option<&Enemy> {
    let mut best: Option<(&Enemy, f32)> = None;
    for enemy in enemies.iter().filter(|e| e.alive) {
        let dist = distance(point, enemy.center());
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((enemy, dist)),
        }
    }
    best.map(|(enemy, _)| enemy)
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Play area (screen rectangle)
    pub arena: Rect,
    /// Ticks per second, used to derive the ability clock
    pub tick_rate: u32,
    /// Current wave (1-based)
    pub wave: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub player: Player,
    /// Live enemies (ascending id)
    pub enemies: Vec<Enemy>,
    /// Live projectiles (ascending id)
    pub projectiles: Vec<Projectile>,
    /// Events since the last `take_events`
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game with the first wave already spawned
    ///
    /// `player_size` comes from the loaded sprite (or its placeholder).
    pub fn new(seed: u64, config: &Config, player_size: Vec2) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            arena: config.arena(),
            tick_rate: config.tick_rate.max(1),
            wave: 1,
            time_ticks: 0,
            phase: GamePhase::Playing,
            player: Player::new(Vec2::new(PLAYER_START.0, PLAYER_START.1), player_size),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        super::tick::generate_wave(&mut state);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Simulation clock in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.time_ticks * 1000 / self.tick_rate as u64
    }

    /// Drop entities that were killed since the last purge
    pub fn purge_dead(&mut self) {
        self.enemies.retain(|e| e.is_alive());
        self.projectiles.retain(|p| p.is_alive());
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Drain recorded events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
