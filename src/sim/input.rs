//! Held-key input and player movement

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::GameState;

/// Normalized movement keys (WASD and arrows both map here)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    fn offset(self) -> Vec2 {
        match self {
            Key::Up => Vec2::NEG_Y,
            Key::Down => Vec2::Y,
            Key::Left => Vec2::NEG_X,
            Key::Right => Vec2::X,
        }
    }
}

/// Set of currently held keys, maintained by the input collaborator
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pressed: HashSet<Key>,
}

impl InputState {
    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    pub fn set(&mut self, key: Key, down: bool) {
        if down {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    /// Unit-length intent (zero when idle or when opposite keys cancel)
    pub fn direction(&self) -> Vec2 {
        self.pressed
            .iter()
            .fold(Vec2::ZERO, |acc, key| acc + key.offset())
            .normalize_or_zero()
    }
}

/// Move the player along `direction` and count down invulnerability
pub fn update_player(state: &mut GameState, direction: Vec2) {
    let player = &mut state.player;
    player.invuln_ticks = player.invuln_ticks.saturating_sub(1);

    if direction == Vec2::ZERO {
        return;
    }
    player.pos = state.arena.clamp(player.pos + direction * player.speed);
    player.facing = player.facing.from_dx(direction.x);
}
