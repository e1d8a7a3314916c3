//! Delayed damage queue
//!
//! Follow-up hits (AreaSlam echo, claw afterimages) are queued against an
//! enemy ID and a due tick, then drained once per tick after projectile
//! resolution. A target that died or despawned in the meantime is skipped.

use serde::{Deserialize, Serialize};

use super::state::{EnemyId, GameState};

/// What scheduled a deferred hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitSource {
    SlamEcho,
    ClawAfterimage,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeferredHit {
    pub target: EnemyId,
    /// First tick on which the hit may land
    pub due_tick: u64,
    pub damage: f32,
    pub source: HitSource,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeferredHits {
    pending: Vec<DeferredHit>,
}

impl DeferredHits {
    pub fn schedule(&mut self, hit: DeferredHit) {
        self.pending.push(hit);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Remove and return every hit due at or before `now`
    pub fn take_due(&mut self, now: u64) -> Vec<DeferredHit> {
        let (due, pending) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|hit| hit.due_tick <= now);
        self.pending = pending;
        due
    }
}

/// Apply every due hit, then reap enemies it killed
pub fn process(state: &mut GameState) {
    let due = state.deferred.take_due(state.time_ticks);
    if due.is_empty() {
        return;
    }

    for hit in due {
        match state
            .enemies
            .iter_mut()
            .find(|e| e.id == hit.target && !e.is_dead())
        {
            Some(enemy) => enemy.hp -= hit.damage,
            None => log::trace!("{:?} hit on enemy {} skipped, target gone", hit.source, hit.target),
        }
    }

    super::enemies::reap_dead(state);
}
