//! Experience, leveling and upgrade selection
//!
//! ```text
//! Playing --xp >= xp_next--> LevelingUp --choose_upgrade--> Playing
//!    \______________________ hp <= 0 ______________________/--> GameOver
//! ```

use rand::Rng;
use rand::seq::SliceRandom;

use super::abilities::{Abilities, AbilityKind, MAX_ABILITY_LEVEL, rebuild_claws};
use super::state::{GamePhase, GameState, UpgradeChoice};
use crate::consts::*;

/// Collect orbs, then check for a level-up
pub fn tick(state: &mut GameState) {
    collect_orbs(state);
    check_level_up(state);
}

/// Attract, collect and expire XP orbs
pub fn collect_orbs(state: &mut GameState) {
    let player_pos = state.player.pos;

    let mut i = state.orbs.len();
    while i > 0 {
        i -= 1;
        let orb = &mut state.orbs[i];

        if orb.pos.distance(player_pos) < ORB_ATTRACT_RADIUS {
            orb.pos += (player_pos - orb.pos) * ORB_ATTRACT_STEP;
        }

        if orb.pos.distance(player_pos) < ORB_COLLECT_RADIUS {
            state.player.xp += orb.value;
            state.orbs.swap_remove(i);
            continue;
        }

        orb.ttl_ticks = orb.ttl_ticks.saturating_sub(1);
        if orb.ttl_ticks == 0 {
            state.orbs.swap_remove(i);
        }
    }
}

/// XP required for the level after `new_level`, given the previous requirement
pub fn next_xp_requirement(previous: u32, new_level: u32) -> u32 {
    let percent = if new_level <= 5 { 112 } else { 118 };
    (previous as u64 * percent / 100) as u32
}

/// Level up at most once if enough XP has been banked
///
/// Any XP left over after this level-up is looked at again next tick.
pub fn check_level_up(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing || state.player.xp < state.player.xp_next {
        return false;
    }

    let player = &mut state.player;
    player.xp -= player.xp_next;
    player.level += 1;
    player.xp_next = next_xp_requirement(player.xp_next, player.level);
    player.heal(LEVEL_UP_HEAL);
    log::info!(
        "Level up! now level {} (xp {}/{})",
        player.level,
        player.xp,
        player.xp_next
    );

    state.choices = generate_choices(&state.abilities, &mut state.rng);
    if state.choices.is_empty() {
        log::info!("Every ability is maxed, no upgrade to offer");
    } else {
        state.phase = GamePhase::LevelingUp;
    }
    true
}

/// Draw up to two distinct upgrades from abilities below max level
pub fn generate_choices(abilities: &Abilities, rng: &mut impl Rng) -> Vec<UpgradeChoice> {
    let mut pool: Vec<_> = abilities.iter().filter(|a| !a.is_maxed()).collect();
    pool.shuffle(rng);

    pool.into_iter()
        .take(UPGRADE_CHOICES)
        .filter_map(|ability| {
            Some(UpgradeChoice {
                ability: ability.kind,
                name: ability.kind.name(),
                is_new: !ability.is_owned(),
                description: ability.kind.next_description(ability.level)?,
            })
        })
        .collect()
}

/// Apply the offer at `index` and resume play
pub fn choose_upgrade(state: &mut GameState, index: usize) -> Option<AbilityKind> {
    if state.phase != GamePhase::LevelingUp {
        return None;
    }
    let kind = state.choices.get(index)?.ability;

    let ability = state.abilities.get_mut(kind);
    if ability.level < MAX_ABILITY_LEVEL {
        ability.level += 1;
    }
    log::info!("Upgraded {} to level {}", kind.name(), ability.level);

    if kind == AbilityKind::OrbitClaws {
        rebuild_claws(state);
    }

    state.choices.clear();
    state.phase = GamePhase::Playing;
    Some(kind)
}
