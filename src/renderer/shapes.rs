//! Primitive shapes used when a sprite cannot be drawn

use glam::Vec2;
use serde::Serialize;

use super::Sprite;
use crate::sim::EnemyKind;

/// A primitive any backend can draw without assets
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
    },
    Ring {
        center: Vec2,
        radius: f32,
        thickness: f32,
        color: [f32; 4],
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: [f32; 4],
    },
}

fn enemy_color(kind: EnemyKind) -> [f32; 4] {
    match kind {
        EnemyKind::FastWeak => [0.9, 0.3, 0.3, 1.0],
        EnemyKind::Medium => [0.8, 0.5, 0.1, 1.0],
        EnemyKind::Tough => [0.5, 0.1, 0.6, 1.0],
    }
}

/// Stand-in shape for a sprite of the given size at `pos`
pub fn fallback(sprite: Sprite, pos: Vec2, size: f32) -> Shape {
    let color = match sprite {
        Sprite::Player => [0.3, 0.7, 1.0, 1.0],
        Sprite::Enemy(kind) => enemy_color(kind),
        Sprite::Claw => [0.9, 0.9, 0.9, 1.0],
        Sprite::Whip => [1.0, 0.85, 0.4, 1.0],
        Sprite::Burst => [0.6, 1.0, 0.6, 1.0],
        Sprite::Orb => [0.4, 0.9, 1.0, 1.0],
    };
    Shape::Circle {
        center: pos,
        radius: size,
        color,
    }
}

/// Expanding ring for the slam effect; fades as `life` runs out
pub fn slam_ring(center: Vec2, radius: f32, life: u32, max_life: u32) -> Shape {
    let t = life as f32 / max_life.max(1) as f32;
    Shape::Ring {
        center,
        radius: radius * (1.0 - 0.3 * t),
        thickness: 3.0,
        color: [1.0, 0.6, 0.2, t.clamp(0.0, 1.0)],
    }
}

/// Health bar over an enemy (background then fill)
pub fn health_bar(center: Vec2, size: f32, fraction: f32) -> [Shape; 2] {
    let half = size;
    let y = center.y - size - 6.0;
    let from = Vec2::new(center.x - half, y);
    let full = Vec2::new(center.x + half, y);
    let fill = from.lerp(full, fraction.clamp(0.0, 1.0));
    [
        Shape::Line {
            from,
            to: full,
            width: 3.0,
            color: [0.2, 0.2, 0.2, 0.8],
        },
        Shape::Line {
            from,
            to: fill,
            width: 3.0,
            color: [0.2, 0.9, 0.3, 1.0],
        },
    ]
}
