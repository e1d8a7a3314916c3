//! Fixed timestep simulation tick
//!
//! Advances every system once, in a fixed order, while the game is playing.

use glam::Vec2;

use super::input::{self, InputState};
use super::state::{GamePhase, GameState};
use super::{abilities, deferred, enemies, progression, projectiles};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Unit movement intent
    pub direction: Vec2,
    /// Pause toggle
    pub pause: bool,
}

impl From<&InputState> for TickInput {
    fn from(input: &InputState) -> Self {
        Self {
            direction: input.direction(),
            pause: false,
        }
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    // Leveling up, paused and game over all freeze the world
    if state.phase != GamePhase::Playing {
        return;
    }

    let wave_before = state.wave();
    state.time_ticks += 1;
    if state.wave() != wave_before {
        log::info!("Wave {} begins at tick {}", state.wave(), state.time_ticks);
    }

    input::update_player(state, input.direction);
    abilities::tick(state);
    enemies::try_spawn(state);
    enemies::tick(state);
    if state.is_over() {
        return;
    }
    projectiles::tick(state);
    deferred::process(state);
    progression::tick(state);
}
