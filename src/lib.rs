//! Claw Arena - a top-down arena survival game
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (player, abilities, enemies, projectiles, progression)
//! - `game`: Lifecycle wrapper around the simulation (start, tick, upgrades, high score)
//! - `renderer`: Render collaborator contract with primitive-shape fallbacks
//! - `platform`: Browser/native key normalization
//! - `highscores`: High score persistence
//! - `settings`: User-facing configuration

pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use game::{Game, HudSnapshot};
pub use highscores::{HighScoreStore, MemoryStore};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal tick rate. Ticks are logical units, not wall-clock time.
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_MAX_HP: f32 = 100.0;
    pub const PLAYER_SPEED: f32 = 3.0;
    /// Contact radius added to enemy size for player collisions
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_START_XP_NEXT: u32 = 10;
    /// Invulnerability granted after taking contact damage
    pub const CONTACT_INVULN_TICKS: u32 = 60;

    /// Enemies spawn this far outside the visible edge
    pub const SPAWN_EDGE_MARGIN: f32 = 20.0;
    /// Hard ceiling on the population cap
    pub const MAX_ENEMIES: usize = 50;
    pub const WAVE_TICKS: u64 = 1500;
    /// Spawn chance is doubled during the first part of each wave
    pub const WAVE_START_TICKS: u64 = 600;

    /// Projectile hit slop added to enemy size
    pub const PROJECTILE_HIT_RADIUS: f32 = 5.0;
    /// Projectiles may drift this far outside the arena before removal
    pub const PROJECTILE_BOUNDS_MARGIN: f32 = 50.0;

    /// XP orbs
    pub const ORB_LIFETIME_TICKS: u32 = 600;
    pub const ORB_ATTRACT_RADIUS: f32 = 30.0;
    pub const ORB_COLLECT_RADIUS: f32 = 20.0;
    /// Fraction of the distance to the player an attracted orb covers per tick
    pub const ORB_ATTRACT_STEP: f32 = 0.1;
    pub const ORB_DROP_CHANCE: f64 = 0.5;

    /// Level-up
    pub const LEVEL_UP_HEAL: f32 = 20.0;
    pub const UPGRADE_CHOICES: usize = 2;
}

/// Unit vector for an angle in radians
#[inline]
pub fn direction_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Convert polar (r, theta) around `center` to cartesian (x, y)
#[inline]
pub fn polar_offset(center: Vec2, r: f32, theta: f32) -> Vec2 {
    center + direction_from_angle(theta) * r
}
