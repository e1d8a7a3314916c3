//! Browser bindings
//!
//! The page owns the frame loop, the canvas and the DOM widgets. It forwards
//! key events here, calls `tick` once per animation frame, and pulls JSON
//! views back out: the HUD snapshot and the recorded draw commands.

use wasm_bindgen::prelude::*;

use crate::Settings;
use crate::game::Game;
use crate::highscores::LocalStorageStore;
use crate::platform::{is_pause_key, normalize_key};
use crate::renderer::{DrawList, Sprite};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game<LocalStorageStore>,
    draw_list: DrawList,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let settings = Settings::load();
        // Persist defaults so the page's settings panel has something to edit
        settings.save();
        WebGame {
            game: Game::new(settings, LocalStorageStore),
            draw_list: DrawList::default(),
        }
    }

    pub fn start_game(&mut self) {
        self.game.start_game();
    }

    pub fn key_down(&mut self, key: &str) {
        if is_pause_key(key) {
            self.game.request_pause();
        } else if let Some(key) = normalize_key(key) {
            self.game.set_key(key, true);
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if let Some(key) = normalize_key(key) {
            self.game.set_key(key, false);
        }
    }

    pub fn toggle_pause(&mut self) {
        self.game.request_pause();
    }

    pub fn tick(&mut self) {
        self.game.tick();
    }

    /// Returns false when no offer exists at `index`
    pub fn choose_upgrade(&mut self, index: usize) -> bool {
        self.game.choose_upgrade(index).is_some()
    }

    pub fn hud_json(&self) -> String {
        serde_json::to_string(&self.game.hud()).unwrap_or_default()
    }

    /// Report a sprite image as ready; returns false for unknown names
    pub fn sprite_loaded(&mut self, name: &str) -> bool {
        match Sprite::from_name(name) {
            Some(sprite) => {
                self.draw_list.mark_loaded(sprite);
                true
            }
            None => {
                log::warn!("Unknown sprite asset {name:?}");
                false
            }
        }
    }

    /// Draw commands for the current state, in painter's order
    pub fn draw_json(&mut self) -> String {
        self.draw_list.record(self.game.state());
        serde_json::to_string(self.draw_list.commands()).unwrap_or_default()
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
