//! Enemy spawner and chase AI
//!
//! Spawning is a single Bernoulli trial per tick, gated by a population cap
//! that grows with time and player level. Enemies home straight at the
//! player, are consumed on contact, and are shredded by orbiting claws.

use glam::Vec2;
use rand::Rng;

use super::abilities::{
    AbilityKind, CLAW_AFTERIMAGE_DELAY_TICKS, MAX_ABILITY_LEVEL, claw_hit_radius,
    contact_damage_reduction,
};
use super::deferred::{DeferredHit, HitSource};
use super::state::{Enemy, EnemyId, EnemyKind, GamePhase, GameState, XpOrb};
use crate::consts::*;

/// Wave number (1-based) for a tick count
pub fn wave_for_tick(time_ticks: u64) -> u32 {
    (time_ticks / WAVE_TICKS) as u32 + 1
}

/// Maximum simultaneous enemies
pub fn population_cap(time_ticks: u64, level: u32) -> usize {
    let cap = 15 + 5 * (time_ticks / 1800) as usize + 3 * (level / 3) as usize;
    cap.min(MAX_ENEMIES)
}

/// Whether `time_ticks` falls in the opening stretch of its wave
pub fn in_wave_start(time_ticks: u64) -> bool {
    time_ticks % WAVE_TICKS < WAVE_START_TICKS
}

/// Chance that a spawn happens this tick
pub fn spawn_probability(time_ticks: u64, level: u32) -> f64 {
    let wave = wave_for_tick(time_ticks) as f64;
    let base = 0.008 + (0.002 * wave).min(0.015) + (0.002 * level as f64).min(0.020);
    if in_wave_start(time_ticks) {
        base * 2.0
    } else {
        base
    }
}

/// Combined wave/level stat multiplier
pub fn stat_scaling(wave: u32, level: u32) -> f32 {
    (1.0 + 0.12 * (wave as f32 - 1.0)) * (1.0 + 0.05 * (level as f32 - 1.0))
}

/// Pick an archetype from a uniform roll in `[0, 1)`
pub fn choose_kind(wave: u32, level: u32, roll: f32) -> EnemyKind {
    if wave >= 4 && level >= 5 {
        if roll < 0.4 {
            EnemyKind::FastWeak
        } else if roll < 0.7 {
            EnemyKind::Medium
        } else {
            EnemyKind::Tough
        }
    } else if wave >= 2 && level >= 2 {
        if roll < 0.6 {
            EnemyKind::FastWeak
        } else {
            EnemyKind::Medium
        }
    } else {
        EnemyKind::FastWeak
    }
}

/// Build an enemy of `kind` scaled for the given wave and level
pub fn scaled_enemy(id: EnemyId, kind: EnemyKind, pos: Vec2, wave: u32, level: u32) -> Enemy {
    let base = kind.base_stats();
    let scaling = stat_scaling(wave, level);
    let hp = (base.hp * scaling).floor();

    Enemy {
        id,
        kind,
        pos,
        hp,
        max_hp: hp,
        speed: base.speed * scaling.min(2.5),
        damage: (base.damage * scaling).floor(),
        size: base.size,
        xp_reward: (base.xp as f32 * scaling.max(1.2)).floor() as u32,
        wave,
        facing: Default::default(),
    }
}

/// Spawn an enemy at `pos` using the current wave and level
pub fn spawn_enemy(state: &mut GameState, kind: EnemyKind, pos: Vec2) -> EnemyId {
    let id = state.next_entity_id();
    let enemy = scaled_enemy(id, kind, pos, state.wave(), state.player.level);
    state.enemies.push(enemy);
    id
}

/// Random point just outside one of the four arena edges
fn edge_spawn_position(state: &mut GameState) -> Vec2 {
    let arena = state.arena;
    let t = state.rng.random::<f32>();
    match state.rng.random_range(0..4u8) {
        0 => Vec2::new(t * arena.width, -SPAWN_EDGE_MARGIN),
        1 => Vec2::new(t * arena.width, arena.height + SPAWN_EDGE_MARGIN),
        2 => Vec2::new(-SPAWN_EDGE_MARGIN, t * arena.height),
        _ => Vec2::new(arena.width + SPAWN_EDGE_MARGIN, t * arena.height),
    }
}

/// Roll for at most one spawn; returns the new enemy's ID if one appeared
pub fn try_spawn(state: &mut GameState) -> Option<EnemyId> {
    if state.enemies.len() >= state.enemy_cap() {
        return None;
    }

    let p = spawn_probability(state.time_ticks, state.player.level);
    if !state.rng.random_bool(p) {
        return None;
    }

    let kind = choose_kind(state.wave(), state.player.level, state.rng.random::<f32>());
    let pos = edge_spawn_position(state);
    let id = spawn_enemy(state, kind, pos);
    log::debug!("Spawned {:?} #{} at ({:.0}, {:.0})", kind, id, pos.x, pos.y);
    Some(id)
}

/// Contact damage after the RestHeal reduction, never below 1
pub fn contact_damage(damage: f32, rest_heal_level: u8) -> f32 {
    (damage * contact_damage_reduction(rest_heal_level)).floor().max(1.0)
}

/// Move enemies, resolve player contact and claw hits, then reap the dead
///
/// A fatal contact stops the pass early, but enemies already killed this
/// tick are still reaped and counted.
pub fn tick(state: &mut GameState) {
    let player_pos = state.player.pos;
    let rest_heal_level = state.abilities.level(AbilityKind::RestHeal);

    let claws = state.abilities.get(AbilityKind::OrbitClaws);
    let claw_level = claws.level;
    let claw_damage = claws.params.power;
    let claw_radius = claw_hit_radius(claw_level);
    let afterimage_due = state.time_ticks + CLAW_AFTERIMAGE_DELAY_TICKS;

    let mut i = state.enemies.len();
    while i > 0 {
        i -= 1;
        let enemy = &mut state.enemies[i];

        if !enemy.is_dead() {
            let to_player = player_pos - enemy.pos;
            enemy.pos += to_player.normalize_or_zero() * enemy.speed;
            enemy.facing = enemy.facing.from_dx(to_player.x);

            let touching = enemy.pos.distance(player_pos) < enemy.size + PLAYER_RADIUS;
            if touching && !state.player.is_invulnerable() {
                let damage = contact_damage(enemy.damage, rest_heal_level);
                state.player.hp -= damage;
                state.player.invuln_ticks = CONTACT_INVULN_TICKS;
                log::debug!("{:?} #{} hit player for {}", enemy.kind, enemy.id, damage);
                state.enemies.swap_remove(i);

                if state.player.is_dead() {
                    log::info!("Player died at tick {}", state.time_ticks);
                    state.phase = GamePhase::GameOver;
                    break;
                }
                continue;
            }
        }

        if claw_level == 0 {
            continue;
        }
        for claw in &state.claws {
            if claw.pos.distance(enemy.pos) < claw_radius + enemy.size {
                enemy.hp -= claw_damage;
                if claw_level >= MAX_ABILITY_LEVEL {
                    state.deferred.schedule(DeferredHit {
                        target: enemy.id,
                        due_tick: afterimage_due,
                        damage: claw_damage * 0.5,
                        source: HitSource::ClawAfterimage,
                    });
                }
            }
        }
    }

    reap_dead(state);
}

/// Remove dead enemies, counting kills and dropping orbs
pub fn reap_dead(state: &mut GameState) {
    let mut i = state.enemies.len();
    while i > 0 {
        i -= 1;
        if !state.enemies[i].is_dead() {
            continue;
        }

        let enemy = state.enemies.swap_remove(i);
        state.kills += 1;
        if state.rng.random_bool(ORB_DROP_CHANCE) {
            state.orbs.push(XpOrb {
                pos: enemy.pos,
                value: enemy.xp_reward,
                ttl_ticks: ORB_LIFETIME_TICKS,
            });
        }
    }
}
