//! Game lifecycle
//!
//! Owns the simulation state, the held-key set and the high score store.
//! Hosts (browser bindings, the headless driver) talk to the game only
//! through this type.

use serde::Serialize;

use crate::highscores::{HighScoreStore, record_kills};
use crate::sim::{
    AbilityKind, GamePhase, GameState, InputState, Key, TickInput, UpgradeChoice, progression,
    tick,
};
use crate::Settings;

/// Read-only view for the HUD collaborator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub hp: f32,
    pub max_hp: f32,
    pub xp: u32,
    pub xp_next: u32,
    pub level: u32,
    pub time_ticks: u64,
    pub wave: u32,
    pub kills: u32,
    pub enemy_count: usize,
    pub enemy_cap: usize,
    pub phase: GamePhase,
    pub choices: Vec<UpgradeChoice>,
    pub ability_levels: Vec<(AbilityKind, u8)>,
    pub high_score: u32,
}

pub struct Game<S: HighScoreStore> {
    settings: Settings,
    state: GameState,
    input: InputState,
    pause_requested: bool,
    store: S,
    high_score: u32,
    /// Set once the current run's game over has been recorded
    score_recorded: bool,
}

impl<S: HighScoreStore> Game<S> {
    /// Create a game and start the first run
    pub fn new(settings: Settings, store: S) -> Self {
        let high_score = store.high_score();
        let state = new_run(&settings, high_score);
        Self {
            settings,
            state,
            input: InputState::default(),
            pause_requested: false,
            store,
            high_score,
            score_recorded: false,
        }
    }

    /// Reset everything for a fresh run (also the restart path after game over)
    pub fn start_game(&mut self) {
        self.high_score = self.store.high_score();
        self.state = new_run(&self.settings, self.high_score);
        self.input.clear();
        self.pause_requested = false;
        self.score_recorded = false;
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for hosts and tests that script scenarios
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn set_key(&mut self, key: Key, down: bool) {
        self.input.set(key, down);
    }

    /// Toggle pause on the next tick
    pub fn request_pause(&mut self) {
        self.pause_requested = true;
    }

    /// Advance one frame
    pub fn tick(&mut self) {
        let mut input = TickInput::from(&self.input);
        input.pause = std::mem::take(&mut self.pause_requested);
        tick(&mut self.state, &input);

        if self.state.is_over() && !self.score_recorded {
            self.score_recorded = true;
            self.high_score = record_kills(&mut self.store, self.state.kills);
            log::info!(
                "Game over: {} kills, level {}, wave {}",
                self.state.kills,
                self.state.player.level,
                self.state.wave()
            );
        }
    }

    pub fn choices(&self) -> &[UpgradeChoice] {
        &self.state.choices
    }

    /// Apply a pending upgrade offer
    pub fn choose_upgrade(&mut self, index: usize) -> Option<AbilityKind> {
        progression::choose_upgrade(&mut self.state, index)
    }

    pub fn hud(&self) -> HudSnapshot {
        let state = &self.state;
        HudSnapshot {
            hp: state.player.hp.max(0.0),
            max_hp: state.player.max_hp,
            xp: state.player.xp,
            xp_next: state.player.xp_next,
            level: state.player.level,
            time_ticks: state.time_ticks,
            wave: state.wave(),
            kills: state.kills,
            enemy_count: state.enemies.len(),
            enemy_cap: state.enemy_cap(),
            phase: state.phase,
            choices: state.choices.clone(),
            ability_levels: state.abilities.iter().map(|a| (a.kind, a.level)).collect(),
            high_score: self.high_score,
        }
    }
}

fn new_run(settings: &Settings, high_score: u32) -> GameState {
    let seed = settings.next_seed();
    log::info!("Game started (seed {seed}, high score {high_score})");
    GameState::with_arena(seed, settings.arena())
}
