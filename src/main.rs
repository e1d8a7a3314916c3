//! Claw Arena headless driver
//!
//! Runs one game without a window: a simple autopilot steers away from the
//! nearest enemy and always takes the first upgrade offer. Useful for
//! balance checks and for watching the simulation through the logs.
//!
//! Usage: `claw-arena [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use claw_arena::highscores::JsonFileStore;
    use claw_arena::sim::{GamePhase, GameState, Key};
    use claw_arena::{Game, Settings};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => {
            let settings = Settings::load_from(&path);
            // Leave an editable file behind on first run
            if !std::path::Path::new(&path).exists() {
                settings.save_to(&path);
            }
            settings
        }
        None => Settings::default(),
    };
    let store = JsonFileStore::new(&settings.high_score_path);
    let max_ticks = settings.headless_ticks;
    let mut game = Game::new(settings, store);

    /// Hold the keys that lead away from the closest enemy
    fn steer(state: &GameState) -> [(Key, bool); 4] {
        let player = state.player.pos;
        let away = state
            .enemies
            .iter()
            .min_by(|a, b| {
                a.pos
                    .distance_squared(player)
                    .total_cmp(&b.pos.distance_squared(player))
            })
            .map(|e| player - e.pos)
            .unwrap_or_default();
        // Drift back toward the middle so the player is not pinned to a wall
        let dir = away.normalize_or_zero() + (state.arena.center() - player) * 0.002;
        [
            (Key::Left, dir.x < -0.1),
            (Key::Right, dir.x > 0.1),
            (Key::Up, dir.y < -0.1),
            (Key::Down, dir.y > 0.1),
        ]
    }

    for _ in 0..max_ticks {
        match game.state().phase {
            GamePhase::GameOver => break,
            GamePhase::LevelingUp => {
                game.choose_upgrade(0);
            }
            _ => {}
        }
        for (key, down) in steer(game.state()) {
            game.set_key(key, down);
        }
        game.tick();
    }

    let hud = game.hud();
    println!(
        "phase={:?} ticks={} wave={} level={} kills={} hp={:.0} high_score={}",
        hud.phase, hud.time_ticks, hud.wave, hud.level, hud.kills, hud.hp, hud.high_score
    );
    for (kind, level) in hud.ability_levels {
        println!("  {:<14} lv{}", kind.name(), level);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
