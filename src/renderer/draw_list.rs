//! Recorded frame for hosts that draw outside the crate

use std::collections::HashSet;

use glam::Vec2;
use serde::Serialize;

use super::{FrameStats, RenderBackend, RenderError, Shape, Sprite, render_world};
use crate::sim::{Facing, GameState};

/// One draw call, in painter's order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Sprite {
        sprite: &'static str,
        pos: Vec2,
        facing: Facing,
    },
    Shape {
        shape: Shape,
    },
}

/// Backend that records commands instead of drawing
///
/// Only sprites the host reported as loaded are emitted as sprites; the rest
/// come out as fallback shapes.
#[derive(Debug, Default)]
pub struct DrawList {
    loaded: HashSet<Sprite>,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn mark_loaded(&mut self, sprite: Sprite) {
        self.loaded.insert(sprite);
    }

    pub fn is_loaded(&self, sprite: Sprite) -> bool {
        self.loaded.contains(&sprite)
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Replace the recorded commands with a fresh frame of `state`
    pub fn record(&mut self, state: &GameState) -> FrameStats {
        self.commands.clear();
        render_world(state, self)
    }
}

impl RenderBackend for DrawList {
    fn draw_sprite(&mut self, sprite: Sprite, pos: Vec2, facing: Facing) -> Result<(), RenderError> {
        if !self.is_loaded(sprite) {
            return Err(RenderError::MissingAsset(sprite));
        }
        self.commands.push(DrawCommand::Sprite {
            sprite: sprite.name(),
            pos,
            facing,
        });
        Ok(())
    }

    fn draw_shape(&mut self, shape: Shape) {
        self.commands.push(DrawCommand::Shape { shape });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unloaded_sprites_become_shapes() {
        let state = GameState::new(3);
        let mut list = DrawList::default();
        let stats = list.record(&state);

        // 2 claws + player
        assert_eq!(stats.fallbacks, 3);
        assert_eq!(list.commands().len(), 3);
        assert!(list.commands().iter().all(|c| matches!(c, DrawCommand::Shape { .. })));
    }

    #[test]
    fn test_loaded_sprite_recorded_last() {
        let state = GameState::new(3);
        let mut list = DrawList::default();
        list.mark_loaded(Sprite::Player);
        list.record(&state);
        // Recording again replaces the previous frame
        let stats = list.record(&state);

        assert_eq!(stats.sprites, 1);
        assert_eq!(list.commands().len(), 3);
        assert_eq!(
            list.commands().last(),
            Some(&DrawCommand::Sprite {
                sprite: "player",
                pos: state.player.pos,
                facing: state.player.facing,
            })
        );
    }

    #[test]
    fn test_commands_serialize_with_op_tag() {
        let state = GameState::new(3);
        let mut list = DrawList::default();
        list.mark_loaded(Sprite::Player);
        list.record(&state);

        let json = serde_json::to_value(list.commands()).unwrap();
        assert_eq!(json[0]["op"], "shape");
        assert!(json[0]["shape"]["circle"]["radius"].is_number());
        assert_eq!(json[2]["op"], "sprite");
        assert_eq!(json[2]["sprite"], "player");
    }
}
