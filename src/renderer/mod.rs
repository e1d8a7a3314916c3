//! Render collaborator contract
//!
//! The simulation never draws. A host implements [`RenderBackend`] and calls
//! [`render_world`] between ticks. Sprite failures (missing asset, backend
//! error) are logged and replaced by a primitive shape so a frame always
//! completes and nothing reaches the tick loop.
//!
//! The browser host draws on a canvas it owns; it goes through [`DrawList`],
//! which records the frame as serializable commands.

pub mod draw_list;
pub mod shapes;

pub use draw_list::{DrawCommand, DrawList};
pub use shapes::Shape;

use glam::Vec2;
use thiserror::Error;

use crate::sim::abilities::SLAM_PARTICLE_LIFE;
use crate::sim::{EnemyKind, Facing, GameState, ParticleKind, ProjectileKind};

/// Sprites a backend may have assets for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Player,
    Enemy(EnemyKind),
    Claw,
    Whip,
    Burst,
    Orb,
}

impl Sprite {
    pub const ALL: [Sprite; 8] = [
        Sprite::Player,
        Sprite::Enemy(EnemyKind::FastWeak),
        Sprite::Enemy(EnemyKind::Medium),
        Sprite::Enemy(EnemyKind::Tough),
        Sprite::Claw,
        Sprite::Whip,
        Sprite::Burst,
        Sprite::Orb,
    ];

    /// Asset name used by hosts
    pub fn name(self) -> &'static str {
        match self {
            Sprite::Player => "player",
            Sprite::Enemy(EnemyKind::FastWeak) => "enemy_fast",
            Sprite::Enemy(EnemyKind::Medium) => "enemy_medium",
            Sprite::Enemy(EnemyKind::Tough) => "enemy_tough",
            Sprite::Claw => "claw",
            Sprite::Whip => "whip",
            Sprite::Burst => "burst",
            Sprite::Orb => "orb",
        }
    }

    pub fn from_name(name: &str) -> Option<Sprite> {
        Sprite::ALL.into_iter().find(|s| s.name() == name)
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("missing asset for {0:?}")]
    MissingAsset(Sprite),
    #[error("backend failure: {0}")]
    Backend(String),
}

pub trait RenderBackend {
    fn draw_sprite(&mut self, sprite: Sprite, pos: Vec2, facing: Facing) -> Result<(), RenderError>;
    fn draw_shape(&mut self, shape: Shape);
}

/// Counts for one rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub sprites: usize,
    pub fallbacks: usize,
    pub shapes: usize,
}

struct Frame<'a, B: RenderBackend> {
    backend: &'a mut B,
    stats: FrameStats,
}

impl<B: RenderBackend> Frame<'_, B> {
    fn sprite(&mut self, sprite: Sprite, pos: Vec2, facing: Facing, size: f32) {
        match self.backend.draw_sprite(sprite, pos, facing) {
            Ok(()) => self.stats.sprites += 1,
            Err(e) => {
                match &e {
                    RenderError::MissingAsset(_) => log::debug!("{e}, using fallback shape"),
                    RenderError::Backend(_) => log::warn!("Sprite draw failed ({e}), using fallback shape"),
                }
                self.backend.draw_shape(shapes::fallback(sprite, pos, size));
                self.stats.fallbacks += 1;
            }
        }
    }

    fn shape(&mut self, shape: Shape) {
        self.backend.draw_shape(shape);
        self.stats.shapes += 1;
    }
}

/// Draw the whole world: particles, orbs, enemies, projectiles, claws, player
pub fn render_world<B: RenderBackend>(state: &GameState, backend: &mut B) -> FrameStats {
    let mut frame = Frame {
        backend,
        stats: FrameStats::default(),
    };

    for particle in &state.particles {
        match particle.kind {
            ParticleKind::SlamRing => frame.shape(shapes::slam_ring(
                particle.pos,
                particle.radius,
                particle.life,
                SLAM_PARTICLE_LIFE,
            )),
        }
    }

    for orb in &state.orbs {
        frame.sprite(Sprite::Orb, orb.pos, Facing::Right, 4.0);
    }

    for enemy in &state.enemies {
        frame.sprite(Sprite::Enemy(enemy.kind), enemy.pos, enemy.facing, enemy.size);
        if enemy.hp < enemy.max_hp {
            for bar in shapes::health_bar(enemy.pos, enemy.size, enemy.hp / enemy.max_hp) {
                frame.shape(bar);
            }
        }
    }

    for projectile in &state.projectiles {
        let sprite = match projectile.kind {
            ProjectileKind::ForwardWhip => Sprite::Whip,
            ProjectileKind::RandomBurst => Sprite::Burst,
        };
        let facing = Facing::Right.from_dx(projectile.vel.x);
        frame.sprite(sprite, projectile.pos, facing, 5.0);
    }

    for claw in &state.claws {
        frame.sprite(Sprite::Claw, claw.pos, Facing::Right, 8.0);
    }

    frame.sprite(Sprite::Player, state.player.pos, state.player.facing, 16.0);

    frame.stats
}
