//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;
use rand::Rng;

use super::collision::{player_enemy_collisions, projectile_enemy_collisions};
use super::entity::{Entity, TickContext};
use super::state::{AbilityOutcome, Enemy, GameEvent, GamePhase, GameState, nearest_enemy};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Exit request from the host
    pub quit: bool,
    /// Idle/demo mode - AI steers the player
    pub idle_mode: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Playing {
        return;
    }

    // Idle/demo mode - AI picks the direction keys
    let mut input = input.clone();
    if input.idle_mode {
        steer_idle(state, &mut input);
    }
    let input = &input;

    state.time_ticks += 1;
    let now_ms = state.now_ms();

    // Ability fires before anything moves
    match state.player.try_use_ability(now_ms, &state.enemies) {
        AbilityOutcome::Cooling => {}
        AbilityOutcome::NoTarget => state.events.push(GameEvent::AbilityIdle),
        AbilityOutcome::Fired {
            mut projectile,
            target,
        } => {
            projectile.id = state.next_entity_id();
            log::trace!("Projectile {} fired at enemy {}", projectile.id, target);
            state.projectiles.push(projectile);
            state.events.push(GameEvent::AbilityFired { target });
        }
    }

    // Move everything. Enemies home on where the player ends up this tick.
    let arena = state.arena;
    let mut ctx = TickContext {
        input,
        player_center: state.player.center(),
        arena,
    };
    state.player.update(&ctx);
    ctx.player_center = state.player.center();
    for enemy in &mut state.enemies {
        enemy.update(&ctx);
    }
    for projectile in &mut state.projectiles {
        projectile.update(&ctx);
    }
    state.purge_dead();

    // Enemies that reach the player are consumed, one damage each
    let hits = player_enemy_collisions(&state.player, &mut state.enemies);
    if hits > 0 {
        state.player.health -= hits as i32;
        log::debug!("Player hit by {} (health {})", hits, state.player.health);
        state.events.push(GameEvent::PlayerHit {
            damage: hits as i32,
            health: state.player.health,
        });
    }

    let destroyed = projectile_enemy_collisions(&mut state.projectiles, &mut state.enemies);
    state
        .events
        .extend(destroyed.into_iter().map(|id| GameEvent::EnemyDestroyed { id }));
    state.purge_dead();

    if state.player.health <= 0 {
        log::info!(
            "Game over at wave {} after {} ticks",
            state.wave,
            state.time_ticks
        );
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            wave: state.wave,
            ticks: state.time_ticks,
        });
        return;
    }

    if state.enemies.is_empty() {
        state.wave += 1;
        generate_wave(state);
    }

    // Quit takes effect once the tick it arrived with has run
    if input.quit {
        log::info!("Exit requested at wave {}", state.wave);
        state.phase = GamePhase::Exited;
    }
}

/// Number of enemies in a wave (1-based)
pub fn wave_enemy_count(wave: u32) -> u32 {
    WAVE_BASE_ENEMIES + WAVE_ENEMY_GROWTH * wave.saturating_sub(1)
}

/// Speed shared by every enemy of a wave (pixels per tick)
pub fn wave_enemy_speed(wave: u32) -> f32 {
    ENEMY_BASE_SPEED + ENEMY_SPEED_PER_WAVE * wave as f32
}

/// Spawn the enemies for `state.wave` at random on-screen positions
pub fn generate_wave(state: &mut GameState) {
    let wave = state.wave;
    let count = wave_enemy_count(wave);
    let speed = wave_enemy_speed(wave);

    // Whole-pixel top-left corners that keep the enemy fully on screen
    let max_x = (state.arena.width() - ENEMY_SIZE).max(1.0) as u32;
    let max_y = (state.arena.height() - ENEMY_SIZE).max(1.0) as u32;
    let origin = state.arena.pos;

    for _ in 0..count {
        let x = state.rng.random_range(0..max_x) as f32;
        let y = state.rng.random_range(0..max_y) as f32;
        let id = state.next_entity_id();
        state
            .enemies
            .push(Enemy::new(id, origin + Vec2::new(x, y), speed));
    }

    log::info!("Wave {}: {} enemies at speed {:.1}", wave, count, speed);
    state.events.push(GameEvent::WaveStarted {
        wave,
        enemies: count as usize,
    });
}

/// Distance at which idle mode starts running from an enemy
const IDLE_DANGER_RADIUS: f32 = 250.0;
/// Margin from the screen edge where idle mode turns back toward the middle
const IDLE_EDGE_MARGIN: f32 = 40.0;
/// Ignore tiny components so the player doesn't jitter
const IDLE_DEAD_ZONE: f32 = 0.3;

/// Pick direction keys that move the player away from the nearest enemy
fn steer_idle(state: &GameState, input: &mut TickInput) {
    let player_box = state.player.bounds();
    let center = player_box.center();
    let arena = state.arena;

    let mut away = match nearest_enemy(center, &state.enemies) {
        Some(enemy) if crate::distance(center, enemy.center()) < IDLE_DANGER_RADIUS => {
            crate::direction(enemy.center(), center)
        }
        _ => Vec2::ZERO,
    };

    // Pull back toward the middle when cornered
    let near_edge = player_box.left() < arena.left() + IDLE_EDGE_MARGIN
        || player_box.right() > arena.right() - IDLE_EDGE_MARGIN
        || player_box.top() < arena.top() + IDLE_EDGE_MARGIN
        || player_box.bottom() > arena.bottom() - IDLE_EDGE_MARGIN;
    if near_edge {
        away += crate::direction(center, arena.center());
    }

    input.left = away.x < -IDLE_DEAD_ZONE;
    input.right = away.x > IDLE_DEAD_ZONE;
    input.up = away.y < -IDLE_DEAD_ZONE;
    input.down = away.y > IDLE_DEAD_ZONE;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::state::Projectile;
    use proptest::prelude::*;

    fn new_state() -> GameState {
        GameState::new(12345, &Config::default(), Vec2::splat(128.0))
    }

    /// Empty arena except for the player, so only placed enemies matter
    fn quiet_state() -> GameState {
        let mut state = new_state();
        state.enemies.clear();
        state.take_events();
        state
    }

    fn push_enemy(state: &mut GameState, pos: Vec2) -> u32 {
        let id = state.next_entity_id();
        state.enemies.push(Enemy::new(id, pos, 2.0));
        id
    }

    #[test]
    fn test_wave_sizes() {
        assert_eq!(wave_enemy_count(1), 5);
        assert_eq!(wave_enemy_count(2), 7);
        assert_eq!(wave_enemy_count(10), 23);
        assert!((wave_enemy_speed(1) - 2.2).abs() < 1e-5);
        assert!((wave_enemy_speed(5) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_generate_wave_on_screen() {
        let mut state = quiet_state();
        state.wave = 4;
        generate_wave(&mut state);
        assert_eq!(state.enemies.len(), 11);
        for enemy in &state.enemies {
            assert!(enemy.bounds().is_within(&state.arena));
            assert!((enemy.speed - 2.8).abs() < 1e-5);
            assert_eq!(enemy.pos, enemy.pos.floor());
        }
        assert_eq!(
            state.take_events(),
            vec![GameEvent::WaveStarted {
                wave: 4,
                enemies: 11
            }]
        );
    }

    #[test]
    fn test_player_hit_by_three_in_one_tick() {
        let mut state = quiet_state();
        // Player box is (100..228, 100..228); keep one enemy far away
        push_enemy(&mut state, Vec2::new(110.0, 110.0));
        push_enemy(&mut state, Vec2::new(150.0, 150.0));
        push_enemy(&mut state, Vec2::new(190.0, 190.0));
        let far = push_enemy(&mut state, Vec2::new(700.0, 500.0));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.player.health, 7);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].id, far);
        assert!(state.take_events().contains(&GameEvent::PlayerHit {
            damage: 3,
            health: 7
        }));
    }

    #[test]
    fn test_damage_is_not_capped() {
        let mut state = quiet_state();
        state.player.health = 2;
        for _ in 0..4 {
            push_enemy(&mut state, Vec2::new(150.0, 150.0));
        }
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.health, -2);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_projectile_kills_two_enemies() {
        let mut state = quiet_state();
        // Keep the ability from firing this tick
        state.player.last_ability_ms = u64::MAX / 2;
        let id = state.next_entity_id();
        let mut shot = Projectile::aimed(id, Vec2::new(500.0, 400.0), Vec2::new(600.0, 400.0), 10.0);
        // Already moved onto the pair next tick: 505..515 x 395..405
        shot.pos = Vec2::new(495.0, 395.0);
        state.projectiles.push(shot);
        let a = push_enemy(&mut state, Vec2::new(490.0, 370.0));
        let b = push_enemy(&mut state, Vec2::new(495.0, 400.0));
        push_enemy(&mut state, Vec2::new(50.0, 550.0));

        tick(&mut state, &TickInput::default());

        assert!(state.projectiles.is_empty());
        assert_eq!(state.enemies.len(), 1);
        let events = state.take_events();
        assert!(events.contains(&GameEvent::EnemyDestroyed { id: a }));
        assert!(events.contains(&GameEvent::EnemyDestroyed { id: b }));
    }

    #[test]
    fn test_ability_fires_each_second() {
        let mut state = quiet_state();
        push_enemy(&mut state, Vec2::new(600.0, 100.0));
        let input = TickInput::default();

        for _ in 0..59 {
            tick(&mut state, &input);
        }
        assert!(state.projectiles.is_empty());

        tick(&mut state, &input);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.player.last_ability_ms, 1000);
    }

    #[test]
    fn test_ability_without_enemies_still_resets_cooldown() {
        let mut state = quiet_state();
        state.time_ticks = 59;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.last_ability_ms, 1000);
        assert!(state.projectiles.is_empty());
        assert!(state.take_events().contains(&GameEvent::AbilityIdle));
    }

    #[test]
    fn test_wave_advances_when_cleared() {
        let mut state = quiet_state();
        assert_eq!(state.wave, 1);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.wave, 2);
        assert_eq!(state.enemies.len(), 7);
        assert!(
            state
                .take_events()
                .contains(&GameEvent::WaveStarted { wave: 2, enemies: 7 })
        );
    }

    #[test]
    fn test_game_over_after_ten_hits() {
        let mut state = quiet_state();
        for _ in 0..9 {
            push_enemy(&mut state, Vec2::new(150.0, 150.0));
        }
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.health, 1);
        assert_eq!(state.phase, GamePhase::Playing);

        // Drop the freshly spawned wave so only the placed enemy can hit
        state.enemies.clear();
        push_enemy(&mut state, Vec2::new(150.0, 150.0));
        tick(&mut state, &TickInput::default());
        assert_eq!(state.player.health, 0);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Further ticks are ignored
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_quit_exits() {
        let mut state = new_state();
        let input = TickInput {
            quit: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Exited);
        assert!(!state.is_running());

        // Nothing runs after the exit
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_quit_tick_still_runs() {
        let mut state = new_state();
        let before: Vec<Vec2> = state.enemies.iter().map(|e| e.pos).collect();
        let input = TickInput {
            quit: true,
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input);

        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.player.pos, Vec2::new(105.0, 100.0));
        let after: Vec<Vec2> = state.enemies.iter().map(|e| e.pos).collect();
        assert_ne!(before, after);
        assert_eq!(state.phase, GamePhase::Exited);
    }

    #[test]
    fn test_game_over_wins_over_quit() {
        let mut state = quiet_state();
        state.player.health = 1;
        push_enemy(&mut state, Vec2::new(150.0, 150.0));
        let input = TickInput {
            quit: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_idle_mode_runs_from_enemy() {
        let mut state = quiet_state();
        // Player center (364, 264); enemy just to its right
        state.player.pos = Vec2::new(300.0, 200.0);
        push_enemy(&mut state, Vec2::new(500.0, 249.0));
        let mut input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        steer_idle(&state, &mut input);
        assert!(input.left);
        assert!(!input.right);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = new_state();
        let mut state2 = new_state();
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        for _ in 0..600 {
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.wave, state2.wave);
        assert_eq!(state1.player.health, state2.player.health);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        for (a, b) in state1.enemies.iter().zip(&state2.enemies) {
            assert_eq!(a.pos, b.pos);
        }
    }

    proptest! {
        #[test]
        fn prop_wave_generation(wave in 1u32..40, seed in any::<u64>()) {
            let mut state = GameState::new(seed, &Config::default(), Vec2::splat(128.0));
            state.enemies.clear();
            state.wave = wave;
            generate_wave(&mut state);

            prop_assert_eq!(state.enemies.len() as u32, 5 + 2 * (wave - 1));
            let speed = 2.0 + 0.2 * wave as f32;
            for enemy in &state.enemies {
                prop_assert!((enemy.speed - speed).abs() < 1e-4);
                prop_assert!(enemy.bounds().is_within(&state.arena));
            }
        }

        #[test]
        fn prop_dead_entities_never_survive_a_tick(seed in any::<u64>(), ticks in 1usize..200) {
            let mut state = GameState::new(seed, &Config::default(), Vec2::splat(128.0));
            let input = TickInput { idle_mode: true, ..Default::default() };
            for _ in 0..ticks {
                tick(&mut state, &input);
                prop_assert!(state.enemies.iter().all(|e| e.alive));
                prop_assert!(state.projectiles.iter().all(|p| p.alive));
                if state.is_running() {
                    prop_assert!(!state.enemies.is_empty());
                }
            }
        }
    }
}
