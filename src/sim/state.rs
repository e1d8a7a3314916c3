//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives in [`GameState`]. External
//! collaborators (renderer, HUD) only ever read it between ticks.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::abilities::{Abilities, AbilityKind};
use super::deferred::DeferredHits;
use super::enemies::{population_cap, wave_for_tick};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frozen while the player picks an upgrade
    LevelingUp,
    /// Paused by the player
    Paused,
    /// Run ended
    GameOver,
}

/// Horizontal facing, used by the whip and by sprite flipping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// +1 for right, -1 for left
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Facing implied by a horizontal delta, keeping `self` when there is none
    pub fn from_dx(self, dx: f32) -> Self {
        if dx < 0.0 {
            Facing::Left
        } else if dx > 0.0 {
            Facing::Right
        } else {
            self
        }
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// May dip below zero for the rest of the tick it died in
    pub hp: f32,
    pub max_hp: f32,
    pub level: u32,
    pub xp: u32,
    pub xp_next: u32,
    /// Pixels per tick
    pub speed: f32,
    pub invuln_ticks: u32,
    pub facing: Facing,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            level: 1,
            xp: 0,
            xp_next: PLAYER_START_XP_NEXT,
            speed: PLAYER_SPEED,
            invuln_ticks: 0,
            facing: Facing::Right,
        }
    }

    /// Heal, never exceeding max hp
    pub fn heal(&mut self, amount: f32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_ticks > 0
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }
}

/// A claw orbiting the player
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Claw {
    /// Offset from the shared rotation (radians)
    pub angle: f32,
    pub distance: f32,
    /// World position, recomputed every tick
    pub pos: Vec2,
}

pub type EnemyId = u32;

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    FastWeak,
    Medium,
    Tough,
}

/// Unscaled stats for an enemy archetype
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub hp: f32,
    pub speed: f32,
    pub damage: f32,
    pub size: f32,
    pub xp: u32,
}

impl EnemyKind {
    pub fn base_stats(self) -> EnemyStats {
        match self {
            EnemyKind::FastWeak => EnemyStats {
                hp: 12.0,
                speed: 1.5,
                damage: 5.0,
                size: 12.0,
                xp: 1,
            },
            EnemyKind::Medium => EnemyStats {
                hp: 30.0,
                speed: 1.0,
                damage: 10.0,
                size: 16.0,
                xp: 3,
            },
            EnemyKind::Tough => EnemyStats {
                hp: 80.0,
                speed: 0.7,
                damage: 20.0,
                size: 22.0,
                xp: 6,
            },
        }
    }
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    pub speed: f32,
    /// Contact damage before reductions
    pub damage: f32,
    /// Collision radius
    pub size: f32,
    pub xp_reward: u32,
    pub wave: u32,
    pub facing: Facing,
}

impl Enemy {
    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }
}

/// Projectile sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    ForwardWhip,
    RandomBurst,
}

/// A straight-line projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: f32,
    /// Ticks since spawn
    pub age: u32,
    /// Expire once `age` exceeds this many ticks
    pub max_range: Option<u32>,
    /// Survives hits
    pub pierce: bool,
    /// Carried for renderers; the engine does not bounce projectiles
    pub bounce: bool,
    /// Carried for renderers; the engine does not spawn fragments
    pub explode: bool,
}

/// An experience orb dropped by a dead enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpOrb {
    pub pos: Vec2,
    pub value: u32,
    pub ttl_ticks: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    SlamRing,
}

/// A particle for visual effects (not gameplay-affecting)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub radius: f32,
    pub life: u32,
}

/// One upgrade offered on level-up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeChoice {
    pub ability: AbilityKind,
    pub name: &'static str,
    /// The ability is not owned yet
    pub is_new: bool,
    /// What the next level does
    pub description: &'static str,
}

/// Playable area bounds, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl Arena {
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a point to the arena
    pub fn clamp(&self, pos: Vec2) -> Vec2 {
        pos.clamp(Vec2::ZERO, Vec2::new(self.width, self.height))
    }

    /// Whether `pos` lies within the arena grown by `margin` on every side
    pub fn contains_with_margin(&self, pos: Vec2, margin: f32) -> bool {
        pos.x >= -margin
            && pos.x <= self.width + margin
            && pos.y >= -margin
            && pos.y <= self.height + margin
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Single randomness source for the whole simulation
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub arena: Arena,
    pub player: Player,
    pub abilities: Abilities,
    /// Shared rotation of all claws (radians)
    pub claw_rotation: f32,
    pub claws: Vec<Claw>,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub orbs: Vec<XpOrb>,
    pub particles: Vec<Particle>,
    pub deferred: DeferredHits,
    /// Offers pending while in `LevelingUp`
    pub choices: Vec<UpgradeChoice>,
    pub kills: u32,
    /// Next entity ID
    next_id: EnemyId,
}

impl GameState {
    /// Create a new game state with the default arena
    pub fn new(seed: u64) -> Self {
        Self::with_arena(seed, Arena::default())
    }

    pub fn with_arena(seed: u64, arena: Arena) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Playing,
            arena,
            player: Player::new(arena.center()),
            abilities: Abilities::default(),
            claw_rotation: 0.0,
            claws: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            orbs: Vec::new(),
            particles: Vec::new(),
            deferred: DeferredHits::default(),
            choices: Vec::new(),
            kills: 0,
            next_id: 1,
        };

        super::abilities::rebuild_claws(&mut state);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EnemyId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Current wave (1-based)
    pub fn wave(&self) -> u32 {
        wave_for_tick(self.time_ticks)
    }

    /// Current enemy population cap
    pub fn enemy_cap(&self) -> usize {
        population_cap(self.time_ticks, self.player.level)
    }

    pub fn ability_level(&self, kind: AbilityKind) -> u8 {
        self.abilities.get(kind).level
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
