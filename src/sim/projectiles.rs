//! Projectile motion and enemy hits
//!
//! Projectiles fly in straight lines. A non-piercing projectile is consumed
//! by the first enemy it touches. `bounce` and `explode` are carried through
//! untouched; nothing here changes trajectories or spawns fragments.

use super::state::GameState;
use crate::consts::{PROJECTILE_BOUNDS_MARGIN, PROJECTILE_HIT_RADIUS};

/// Move projectiles, apply hits, and drop expired or spent ones
pub fn tick(state: &mut GameState) {
    let arena = state.arena;

    let mut i = state.projectiles.len();
    while i > 0 {
        i -= 1;
        let projectile = &mut state.projectiles[i];
        projectile.pos += projectile.vel;
        projectile.age += 1;

        let mut spent = false;
        for enemy in state.enemies.iter_mut().filter(|e| !e.is_dead()) {
            if projectile.pos.distance(enemy.pos) < enemy.size + PROJECTILE_HIT_RADIUS {
                enemy.hp -= projectile.damage;
                if !projectile.pierce {
                    spent = true;
                    break;
                }
            }
        }

        let out_of_bounds = !arena.contains_with_margin(projectile.pos, PROJECTILE_BOUNDS_MARGIN);
        let expired = projectile.max_range.is_some_and(|range| projectile.age > range);
        if spent || out_of_bounds || expired {
            state.projectiles.swap_remove(i);
        }
    }

    super::enemies::reap_dead(state);
}
