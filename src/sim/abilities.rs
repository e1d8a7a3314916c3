//! Ability system
//!
//! Five fixed abilities, each with a level (0 = not owned), a cooldown and a
//! small parameter table. Per-level behaviour changes are expressed as pure
//! functions of the level so they can be checked in isolation.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::deferred::{DeferredHit, HitSource};
use super::state::{Claw, GameState, Particle, ParticleKind, Projectile, ProjectileKind};
use crate::{direction_from_angle, polar_offset};

pub const MAX_ABILITY_LEVEL: u8 = 5;

/// Claw rotation step is `base speed * multiplier * CLAW_SPIN_FACTOR` per tick
const CLAW_SPIN_FACTOR: f32 = 0.02;
/// Delay before the second AreaSlam hit (200 ms at 60 Hz)
pub const SLAM_ECHO_DELAY_TICKS: u64 = 12;
/// Delay before a level-5 claw afterimage hits (100 ms at 60 Hz)
pub const CLAW_AFTERIMAGE_DELAY_TICKS: u64 = 6;
pub const SLAM_PARTICLE_LIFE: u32 = 30;
pub const REST_HEAL_INVULN_TICKS: u32 = 180;

/// The closed set of abilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    OrbitClaws,
    ForwardWhip,
    RandomBurst,
    AreaSlam,
    RestHeal,
}

impl AbilityKind {
    pub const ALL: [AbilityKind; 5] = [
        AbilityKind::OrbitClaws,
        AbilityKind::ForwardWhip,
        AbilityKind::RandomBurst,
        AbilityKind::AreaSlam,
        AbilityKind::RestHeal,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            AbilityKind::OrbitClaws => "Orbit Claws",
            AbilityKind::ForwardWhip => "Forward Whip",
            AbilityKind::RandomBurst => "Random Burst",
            AbilityKind::AreaSlam => "Area Slam",
            AbilityKind::RestHeal => "Rest Heal",
        }
    }

    /// Upgrade descriptions; entry `n` describes reaching level `n + 1`
    pub fn descriptions(self) -> &'static [&'static str; MAX_ABILITY_LEVEL as usize] {
        match self {
            AbilityKind::OrbitClaws => &[
                "Two claws orbit around you",
                "Claws spin twice as fast",
                "Four claws orbit around you",
                "Claws hit a wider area",
                "Claws spin four times as fast and leave afterimages",
            ],
            AbilityKind::ForwardWhip => &[
                "Lash a whip in the direction you face",
                "Whip cooldown reduced by 30%",
                "Whip reaches further",
                "Whip pierces through enemies",
                "Whip strikes both forward and behind",
            ],
            AbilityKind::RandomBurst => &[
                "Fire a bolt in a random direction",
                "Bolts deal 50% more damage",
                "Fire two bolts at once",
                "Bolts bounce",
                "Bolts explode",
            ],
            AbilityKind::AreaSlam => &[
                "Slam the ground, damaging nearby enemies",
                "Slam deals 20% more damage",
                "Slam radius increased by 50%",
                "Slam recharges 20% faster",
                "Slam strikes a second time",
            ],
            AbilityKind::RestHeal => &[
                "Periodically recover health",
                "Take 5% less contact damage",
                "Heal 50% more",
                "Become invulnerable briefly after healing",
                "Heal more often",
            ],
        }
    }

    /// Description of the upgrade from `level` to `level + 1`, if one exists
    pub fn next_description(self, level: u8) -> Option<&'static str> {
        self.descriptions().get(level as usize).copied()
    }

    pub fn params(self) -> AbilityParams {
        match self {
            AbilityKind::OrbitClaws => AbilityParams {
                cooldown: 0,
                power: 12.0,
                reach: 60.0,
                speed: 3.0,
            },
            AbilityKind::ForwardWhip => AbilityParams {
                cooldown: 60,
                power: 20.0,
                reach: 80.0,
                speed: 4.0,
            },
            AbilityKind::RandomBurst => AbilityParams {
                cooldown: 90,
                power: 15.0,
                reach: 0.0,
                speed: 3.0,
            },
            AbilityKind::AreaSlam => AbilityParams {
                cooldown: 180,
                power: 30.0,
                reach: 60.0,
                speed: 0.0,
            },
            AbilityKind::RestHeal => AbilityParams {
                cooldown: 1800,
                power: 20.0,
                reach: 0.0,
                speed: 0.0,
            },
        }
    }
}

/// Base tuning for one ability
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbilityParams {
    /// Ticks between triggers at low levels
    pub cooldown: u32,
    /// Damage, or healing for RestHeal
    pub power: f32,
    /// Orbit distance, whip range (ticks) or slam radius
    pub reach: f32,
    /// Rotation or projectile speed
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub kind: AbilityKind,
    pub level: u8,
    /// Ticks until the next trigger
    pub cooldown: i32,
    pub params: AbilityParams,
}

impl Ability {
    pub fn new(kind: AbilityKind, level: u8) -> Self {
        Self {
            kind,
            level,
            cooldown: 0,
            params: kind.params(),
        }
    }

    pub fn is_owned(&self) -> bool {
        self.level > 0
    }

    pub fn is_maxed(&self) -> bool {
        self.level >= MAX_ABILITY_LEVEL
    }

    /// Cooldown applied after a trigger at the current level
    pub fn max_cooldown(&self) -> i32 {
        let base = self.params.cooldown as f32;
        let ticks = match self.kind {
            AbilityKind::ForwardWhip if self.level >= 2 => base * 0.7,
            AbilityKind::AreaSlam if self.level >= 4 => base * 0.8,
            AbilityKind::RestHeal if self.level >= MAX_ABILITY_LEVEL => 1200.0,
            _ => base,
        };
        ticks.round() as i32
    }
}

/// Per-ability table indexed by [`AbilityKind::index`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Abilities {
    slots: [Ability; 5],
}

impl Default for Abilities {
    fn default() -> Self {
        Self {
            slots: AbilityKind::ALL.map(|kind| {
                let level = if kind == AbilityKind::OrbitClaws { 1 } else { 0 };
                Ability::new(kind, level)
            }),
        }
    }
}

impl Abilities {
    pub fn get(&self, kind: AbilityKind) -> &Ability {
        &self.slots[kind.index()]
    }

    pub fn get_mut(&mut self, kind: AbilityKind) -> &mut Ability {
        &mut self.slots[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ability> {
        self.slots.iter()
    }

    pub fn level(&self, kind: AbilityKind) -> u8 {
        self.get(kind).level
    }
}

pub fn claw_speed_multiplier(level: u8) -> f32 {
    match level {
        0..=1 => 1.0,
        2..=4 => 2.0,
        _ => 4.0,
    }
}

pub fn claw_count(level: u8) -> usize {
    if level >= 3 { 4 } else { 2 }
}

pub fn claw_hit_radius(level: u8) -> f32 {
    if level >= 4 { 20.0 } else { 16.0 }
}

/// Whip lifetime in ticks
pub fn whip_range(level: u8) -> u32 {
    if level >= 3 { 120 } else { 80 }
}

pub fn burst_count(level: u8) -> usize {
    if level >= 3 { 2 } else { 1 }
}

pub fn burst_damage(base: f32, level: u8) -> f32 {
    if level >= 2 { base * 1.5 } else { base }
}

pub fn slam_radius(base: f32, level: u8) -> f32 {
    if level >= 3 { base * 1.5 } else { base }
}

pub fn slam_damage(base: f32, level: u8) -> f32 {
    if level >= 2 { base * 1.2 } else { base }
}

pub fn heal_amount(base: f32, level: u8) -> f32 {
    if level >= 3 { base * 1.5 } else { base }
}

/// Multiplier applied to contact damage taken by the player
pub fn contact_damage_reduction(rest_heal_level: u8) -> f32 {
    if rest_heal_level >= 2 { 0.95 } else { 1.0 }
}

/// Reset claws to evenly spaced angles for the current OrbitClaws level
pub fn rebuild_claws(state: &mut GameState) {
    let ability = state.abilities.get(AbilityKind::OrbitClaws);
    let count = claw_count(ability.level);
    let distance = ability.params.reach;

    state.claws = (0..count)
        .map(|i| {
            let angle = i as f32 * TAU / count as f32;
            Claw {
                angle,
                distance,
                pos: polar_offset(state.player.pos, distance, state.claw_rotation + angle),
            }
        })
        .collect();
}

/// Advance claws, cooldowns and particles by one tick
pub fn tick(state: &mut GameState) {
    for particle in &mut state.particles {
        particle.life = particle.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);

    update_claws(state);

    for kind in AbilityKind::ALL {
        if kind == AbilityKind::OrbitClaws {
            continue;
        }

        let ability = state.abilities.get_mut(kind);
        if ability.cooldown > 0 {
            ability.cooldown -= 1;
        }
        if !ability.is_owned() || ability.cooldown > 0 {
            continue;
        }
        ability.cooldown = ability.max_cooldown();
        let level = ability.level;
        let params = ability.params;

        log::debug!("{} triggered (level {})", kind.name(), level);
        match kind {
            AbilityKind::ForwardWhip => fire_forward_whip(state, level, params),
            AbilityKind::RandomBurst => fire_random_burst(state, level, params),
            AbilityKind::AreaSlam => area_slam(state, level, params),
            AbilityKind::RestHeal => rest_heal(state, level, params),
            AbilityKind::OrbitClaws => {}
        }
    }
}

fn update_claws(state: &mut GameState) {
    let ability = state.abilities.get(AbilityKind::OrbitClaws);
    if !ability.is_owned() {
        return;
    }

    let step = ability.params.speed * claw_speed_multiplier(ability.level) * CLAW_SPIN_FACTOR;
    state.claw_rotation = (state.claw_rotation + step) % TAU;

    let center = state.player.pos;
    let rotation = state.claw_rotation;
    for claw in &mut state.claws {
        claw.pos = polar_offset(center, claw.distance, rotation + claw.angle);
    }
}

fn fire_forward_whip(state: &mut GameState, level: u8, params: AbilityParams) {
    let forward = Vec2::new(state.player.facing.sign(), 0.0);
    let directions: &[f32] = if level >= MAX_ABILITY_LEVEL { &[1.0, -1.0] } else { &[1.0] };

    for &dir in directions {
        state.projectiles.push(Projectile {
            kind: ProjectileKind::ForwardWhip,
            pos: state.player.pos,
            vel: forward * dir * params.speed,
            damage: params.power,
            age: 0,
            max_range: Some(whip_range(level)),
            pierce: level >= 4,
            bounce: false,
            explode: false,
        });
    }
}

fn fire_random_burst(state: &mut GameState, level: u8, params: AbilityParams) {
    for _ in 0..burst_count(level) {
        let theta = state.rng.random::<f32>() * TAU;
        state.projectiles.push(Projectile {
            kind: ProjectileKind::RandomBurst,
            pos: state.player.pos,
            vel: direction_from_angle(theta) * params.speed,
            damage: burst_damage(params.power, level),
            age: 0,
            max_range: None,
            pierce: false,
            bounce: level >= 4,
            explode: level >= MAX_ABILITY_LEVEL,
        });
    }
}

fn area_slam(state: &mut GameState, level: u8, params: AbilityParams) {
    let center = state.player.pos;
    let radius = slam_radius(params.reach, level);
    let damage = slam_damage(params.power, level);
    let echo_due = state.time_ticks + SLAM_ECHO_DELAY_TICKS;

    let mut hit = 0;
    for enemy in state.enemies.iter_mut().filter(|e| !e.is_dead()) {
        if enemy.pos.distance(center) > radius {
            continue;
        }
        enemy.hp -= damage;
        hit += 1;
        if level >= MAX_ABILITY_LEVEL {
            state.deferred.schedule(DeferredHit {
                target: enemy.id,
                due_tick: echo_due,
                damage: damage * 0.5,
                source: HitSource::SlamEcho,
            });
        }
    }
    log::debug!("Area slam r={radius} hit {hit} enemies");

    state.particles.push(Particle {
        kind: ParticleKind::SlamRing,
        pos: center,
        radius,
        life: SLAM_PARTICLE_LIFE,
    });
}

fn rest_heal(state: &mut GameState, level: u8, params: AbilityParams) {
    state.player.heal(heal_amount(params.power, level));
    if level >= 4 {
        state.player.invuln_ticks = state.player.invuln_ticks.max(REST_HEAL_INVULN_TICKS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemies::spawn_enemy;
    use crate::sim::state::EnemyKind;

    fn set_level(state: &mut GameState, kind: AbilityKind, level: u8) {
        state.abilities.get_mut(kind).level = level;
    }

    #[test]
    fn test_default_levels() {
        let abilities = Abilities::default();
        for ability in abilities.iter() {
            let expected = if ability.kind == AbilityKind::OrbitClaws { 1 } else { 0 };
            assert_eq!(ability.level, expected, "{:?}", ability.kind);
        }
    }

    #[test]
    fn test_descriptions_cover_every_level() {
        for kind in AbilityKind::ALL {
            for level in 0..MAX_ABILITY_LEVEL {
                assert!(kind.next_description(level).is_some());
            }
            assert!(kind.next_description(MAX_ABILITY_LEVEL).is_none());
        }
    }

    #[test]
    fn test_level_tables() {
        assert_eq!(claw_speed_multiplier(1), 1.0);
        assert_eq!(claw_speed_multiplier(2), 2.0);
        assert_eq!(claw_speed_multiplier(4), 2.0);
        assert_eq!(claw_speed_multiplier(5), 4.0);
        assert_eq!(claw_count(2), 2);
        assert_eq!(claw_count(3), 4);
        assert_eq!(claw_hit_radius(3), 16.0);
        assert_eq!(claw_hit_radius(4), 20.0);
        assert_eq!(whip_range(2), 80);
        assert_eq!(whip_range(3), 120);
        assert_eq!(burst_damage(15.0, 2), 22.5);
        assert_eq!(slam_radius(60.0, 3), 90.0);
        assert_eq!(slam_damage(30.0, 2), 36.0);
        assert_eq!(heal_amount(20.0, 3), 30.0);
        assert_eq!(contact_damage_reduction(1), 1.0);
        assert_eq!(contact_damage_reduction(2), 0.95);
    }

    #[test]
    fn test_max_cooldown_scaling() {
        let mut whip = Ability::new(AbilityKind::ForwardWhip, 1);
        assert_eq!(whip.max_cooldown(), 60);
        whip.level = 2;
        assert_eq!(whip.max_cooldown(), 42);

        let mut slam = Ability::new(AbilityKind::AreaSlam, 3);
        assert_eq!(slam.max_cooldown(), 180);
        slam.level = 4;
        assert_eq!(slam.max_cooldown(), 144);

        let mut heal = Ability::new(AbilityKind::RestHeal, 4);
        assert_eq!(heal.max_cooldown(), 1800);
        heal.level = 5;
        assert_eq!(heal.max_cooldown(), 1200);
    }

    #[test]
    fn test_claws_rebuild_on_level() {
        let mut state = GameState::new(7);
        assert_eq!(state.claws.len(), 2);
        set_level(&mut state, AbilityKind::OrbitClaws, 3);
        rebuild_claws(&mut state);
        assert_eq!(state.claws.len(), 4);
        for (i, claw) in state.claws.iter().enumerate() {
            assert!((claw.angle - i as f32 * TAU / 4.0).abs() < 1e-6);
            assert_eq!(claw.distance, 60.0);
            assert!((claw.pos.distance(state.player.pos) - 60.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_claws_rotate_each_tick() {
        let mut state = GameState::new(7);
        tick(&mut state);
        assert!((state.claw_rotation - 0.06).abs() < 1e-6);

        set_level(&mut state, AbilityKind::OrbitClaws, 5);
        tick(&mut state);
        assert!((state.claw_rotation - (0.06 + 0.24)).abs() < 1e-5);
        let expected = polar_offset(state.player.pos, 60.0, state.claw_rotation);
        assert!(state.claws[0].pos.distance(expected) < 1e-3);
    }

    #[test]
    fn test_unowned_abilities_never_trigger() {
        let mut state = GameState::new(7);
        for _ in 0..200 {
            tick(&mut state);
        }
        assert!(state.projectiles.is_empty());
        assert!(state.particles.is_empty());
        for ability in state.abilities.iter() {
            assert_eq!(ability.cooldown, 0, "{:?}", ability.kind);
        }
    }

    #[test]
    fn test_cooldown_counts_down_to_next_trigger() {
        let mut state = GameState::new(7);
        set_level(&mut state, AbilityKind::ForwardWhip, 1);
        tick(&mut state);
        assert_eq!(state.projectiles.len(), 1);
        for _ in 0..59 {
            tick(&mut state);
        }
        assert_eq!(state.abilities.get(AbilityKind::ForwardWhip).cooldown, 1);
        tick(&mut state);
        assert_eq!(state.abilities.get(AbilityKind::ForwardWhip).cooldown, 60);
        let whips = state
            .projectiles
            .iter()
            .filter(|p| p.kind == ProjectileKind::ForwardWhip)
            .count();
        assert_eq!(whips, 2);
    }

    #[test]
    fn test_forward_whip_levels() {
        let mut state = GameState::new(7);
        state.player.facing = crate::sim::Facing::Left;
        set_level(&mut state, AbilityKind::ForwardWhip, 1);
        tick(&mut state);
        assert_eq!(state.projectiles.len(), 1);
        let whip = &state.projectiles[0];
        assert_eq!(whip.vel, Vec2::new(-4.0, 0.0));
        assert_eq!(whip.max_range, Some(80));
        assert!(!whip.pierce);
        assert_eq!(state.abilities.get(AbilityKind::ForwardWhip).cooldown, 60);

        let mut state = GameState::new(7);
        set_level(&mut state, AbilityKind::ForwardWhip, 5);
        tick(&mut state);
        assert_eq!(state.projectiles.len(), 2);
        assert_eq!(state.projectiles[0].vel, -state.projectiles[1].vel);
        assert!(state.projectiles.iter().all(|p| p.pierce && p.max_range == Some(120)));
        assert_eq!(state.abilities.get(AbilityKind::ForwardWhip).cooldown, 42);
    }

    #[test]
    fn test_random_burst_flags() {
        let mut state = GameState::new(7);
        set_level(&mut state, AbilityKind::RandomBurst, 5);
        tick(&mut state);
        assert_eq!(state.projectiles.len(), 2);
        for p in &state.projectiles {
            assert!((p.vel.length() - 3.0).abs() < 1e-4);
            assert_eq!(p.damage, 22.5);
            assert!(p.bounce && p.explode);
            assert_eq!(p.max_range, None);
        }
    }

    #[test]
    fn test_area_slam_hits_within_radius() {
        let mut state = GameState::new(7);
        let center = state.player.pos;
        let near = spawn_enemy(&mut state, EnemyKind::Tough, center + Vec2::new(50.0, 0.0));
        let far = spawn_enemy(&mut state, EnemyKind::Tough, center + Vec2::new(70.0, 0.0));
        set_level(&mut state, AbilityKind::AreaSlam, 1);
        tick(&mut state);

        let hp = |id| state.enemies.iter().find(|e| e.id == id).map(|e| e.hp);
        assert_eq!(hp(near), Some(50.0));
        assert_eq!(hp(far), Some(80.0));
        assert_eq!(state.particles.len(), 1);
        assert_eq!(state.particles[0].life, SLAM_PARTICLE_LIFE);
        assert!(state.deferred.is_empty());
    }

    #[test]
    fn test_area_slam_level5_schedules_echo() {
        let mut state = GameState::new(7);
        let center = state.player.pos;
        spawn_enemy(&mut state, EnemyKind::Tough, center + Vec2::new(10.0, 0.0));
        set_level(&mut state, AbilityKind::AreaSlam, 5);
        tick(&mut state);
        assert_eq!(state.deferred.len(), 1);
        assert_eq!(state.enemies[0].hp, 80.0 - 36.0);
    }

    #[test]
    fn test_slam_particle_expires() {
        let mut state = GameState::new(7);
        set_level(&mut state, AbilityKind::AreaSlam, 1);
        tick(&mut state);
        for _ in 0..SLAM_PARTICLE_LIFE {
            tick(&mut state);
        }
        // Cooldown is 180, so no new ring has been emitted yet
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_rest_heal_caps_and_grants_invuln() {
        let mut state = GameState::new(7);
        state.player.hp = 90.0;
        set_level(&mut state, AbilityKind::RestHeal, 4);
        tick(&mut state);
        assert_eq!(state.player.hp, 100.0);
        assert_eq!(state.player.invuln_ticks, REST_HEAL_INVULN_TICKS);

        let mut state = GameState::new(7);
        state.player.hp = 40.0;
        set_level(&mut state, AbilityKind::RestHeal, 3);
        tick(&mut state);
        assert_eq!(state.player.hp, 70.0);
        assert_eq!(state.player.invuln_ticks, 0);
    }
}
