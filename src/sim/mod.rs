//! Simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform concerns:
//! - Fixed logical timestep only
//! - One seeded RNG owned by the state
//! - Systems run in a fixed order each tick

pub mod abilities;
pub mod deferred;
pub mod enemies;
pub mod input;
pub mod progression;
pub mod projectiles;
pub mod state;
pub mod tick;

pub use abilities::{Abilities, Ability, AbilityKind, MAX_ABILITY_LEVEL};
pub use deferred::{DeferredHit, DeferredHits, HitSource};
pub use input::{InputState, Key};
pub use progression::choose_upgrade;
pub use state::{
    Arena, Claw, Enemy, EnemyId, EnemyKind, Facing, GamePhase, GameState, Particle, ParticleKind,
    Player, Projectile, ProjectileKind, UpgradeChoice, XpOrb,
};
pub use tick::{TickInput, tick};
