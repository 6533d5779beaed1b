//! Collision resolution between the player, enemies, and projectiles
//!
//! Both passes only mark entities dead; the caller purges afterwards.

use super::entity::Entity;
use super::state::{Enemy, Player, Projectile};

/// Kill every live enemy touching the player
///
/// Returns how many enemies were consumed, which is the damage dealt.
pub fn player_enemy_collisions(player: &Player, enemies: &mut [Enemy]) -> u32 {
    let player_box = player.bounds();
    let mut hits = 0;
    for enemy in enemies.iter_mut().filter(|e| e.alive) {
        if enemy.bounds().intersects(&player_box) {
            enemy.kill();
            hits += 1;
        }
    }
    hits
}

/// Resolve projectile hits, in projectile order
///
/// A projectile kills every live enemy it overlaps and is consumed if it hit
/// anything. Enemies already killed by an earlier projectile this pass are
/// skipped. Returns the ids of the destroyed enemies.
pub fn projectile_enemy_collisions(
    projectiles: &mut [Projectile],
    enemies: &mut [Enemy],
) -> Vec<u32> {
    let mut destroyed = Vec::new();
    for projectile in projectiles.iter_mut().filter(|p| p.alive) {
        let shot = projectile.bounds();
        let before = destroyed.len();
        for enemy in enemies.iter_mut().filter(|e| e.alive) {
            if enemy.bounds().intersects(&shot) {
                enemy.kill();
                destroyed.push(enemy.id);
            }
        }
        if destroyed.len() > before {
            projectile.kill();
        }
    }
    destroyed
}
