//! Lifecycle and persistence scenarios driven through the public `Game` API

use claw_arena::highscores::HighScoreStore;
use claw_arena::sim::enemies::spawn_enemy;
use claw_arena::sim::{AbilityKind, EnemyKind, GamePhase, MAX_ABILITY_LEVEL};
use claw_arena::{Game, MemoryStore, Settings};

fn settings() -> Settings {
    Settings {
        seed: Some(777),
        ..Default::default()
    }
}

/// Drop a lethal enemy on the player and tick once
fn kill_player<S: HighScoreStore>(game: &mut Game<S>) {
    let state = game.state_mut();
    state.player.hp = 1.0;
    state.player.invuln_ticks = 0;
    let pos = state.player.pos;
    spawn_enemy(state, EnemyKind::Tough, pos);
    game.tick();
    assert_eq!(game.state().phase, GamePhase::GameOver);
}

#[test]
fn game_over_persists_higher_kill_count() {
    let mut game = Game::new(settings(), MemoryStore { value: 3 });
    game.state_mut().kills = 9;
    kill_player(&mut game);

    assert_eq!(game.store().high_score(), 9);
    assert_eq!(game.high_score(), 9);
    assert_eq!(game.hud().high_score, 9);
}

#[test]
fn game_over_keeps_better_previous_score() {
    let mut game = Game::new(settings(), MemoryStore { value: 30 });
    game.state_mut().kills = 9;
    kill_player(&mut game);
    assert_eq!(game.store().high_score(), 30);
}

#[test]
fn game_over_is_terminal_until_restart() {
    let mut game = Game::new(settings(), MemoryStore::default());
    game.state_mut().kills = 2;
    kill_player(&mut game);
    let frozen = game.state().time_ticks;

    for _ in 0..50 {
        game.tick();
    }
    assert_eq!(game.state().time_ticks, frozen);
    assert_eq!(game.state().phase, GamePhase::GameOver);

    game.start_game();
    let state = game.state();
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.time_ticks, 0);
    assert_eq!(state.kills, 0);
    assert_eq!(state.player.hp, 100.0);
    assert!(state.enemies.is_empty() && state.orbs.is_empty() && state.projectiles.is_empty());
    assert_eq!(state.ability_level(AbilityKind::OrbitClaws), 1);
    assert_eq!(state.ability_level(AbilityKind::AreaSlam), 0);
    assert_eq!(game.high_score(), 2);
}

#[test]
fn ten_xp_at_level_one_offers_two_upgrades() {
    let mut game = Game::new(settings(), MemoryStore::default());
    {
        let state = game.state_mut();
        state.player.hp = 50.0;
        state.player.xp = 10;
    }
    game.tick();

    let hud = game.hud();
    assert_eq!(hud.level, 2);
    assert_eq!(hud.xp_next, 11);
    assert_eq!(hud.phase, GamePhase::LevelingUp);
    assert_eq!(hud.choices.len(), 2);
    assert!(hud.hp >= 70.0 && hud.hp <= 100.0);

    let chosen = game.choose_upgrade(0).expect("offer");
    assert_eq!(game.state().phase, GamePhase::Playing);
    assert!(game.state().ability_level(chosen) >= 1);
    assert!(game.choose_upgrade(0).is_none());
}

#[test]
fn long_run_never_offers_maxed_ability() {
    let mut game = Game::new(settings(), MemoryStore::default());
    for _ in 0..40 {
        let state = game.state_mut();
        state.player.xp = state.player.xp_next;
        game.tick();
        if game.state().phase != GamePhase::LevelingUp {
            break;
        }
        for choice in game.choices() {
            assert!(game.state().ability_level(choice.ability) < MAX_ABILITY_LEVEL);
        }
        game.choose_upgrade(0);
        // Keep the run alive regardless of what spawned
        let state = game.state_mut();
        state.enemies.clear();
        state.player.hp = state.player.max_hp;
    }
    for kind in AbilityKind::ALL {
        assert!(game.state().ability_level(kind) <= MAX_ABILITY_LEVEL);
    }
}

#[test]
fn enemies_never_exceed_cap_during_play() {
    let mut game = Game::new(settings(), MemoryStore::default());
    for _ in 0..5000 {
        game.tick();
        let state = game.state_mut();
        assert!(state.enemies.len() <= state.enemy_cap());
        // Park the player out of reach so the run lasts
        state.player.invuln_ticks = 10;
        state.player.hp = state.player.max_hp;
        for enemy in &mut state.enemies {
            enemy.speed = 0.0;
        }
        if state.phase == GamePhase::LevelingUp {
            game.choose_upgrade(0);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod file_store {
    use claw_arena::highscores::{HighScoreStore, JsonFileStore, record_kills};

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("claw_arena_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn missing_file_reads_zero() {
        let store = JsonFileStore::new(temp_path("missing"));
        assert_eq!(store.high_score(), 0);
    }

    #[test]
    fn corrupt_file_reads_zero() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert_eq!(store.high_score(), 0);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn round_trip_keeps_maximum() {
        let path = temp_path("round_trip");
        let mut store = JsonFileStore::new(&path);
        assert_eq!(record_kills(&mut store, 14), 14);
        assert_eq!(record_kills(&mut store, 6), 14);

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.high_score(), 14);
        let _ = std::fs::remove_file(path);
    }
}
