/// Spawn scheduling: what to drop next, and when.
///
/// The decision is a pure function of the level, the bias and the injected
/// RNG.  Timing is a single-slot permit that re-arms once `delay` has
/// elapsed since the last spawn.

use std::time::Duration;

use rand::Rng;

use crate::entities::{LevelDefinition, SpawnBias, SpawnDecision, AVAILABLE_KINDS};

/// Pick the next ingredient to drop.
///
/// Draw order is fixed so seeded runs replay exactly: one draw for the
/// finisher roll, one for the mission roll, one for the pick.
pub fn next_spawn_kind<R: Rng + ?Sized>(
    definition: &LevelDefinition,
    bias: SpawnBias,
    rng: &mut R,
) -> SpawnDecision {
    let r1: f64 = rng.gen();
    if r1 < bias.finisher_chance {
        return SpawnDecision::Finisher;
    }

    let r2: f64 = rng.gen();
    if r2 < bias.mission_relevant_chance && !definition.missions.is_empty() {
        let pick = rng.gen_range(0..definition.missions.len());
        return SpawnDecision::MissionRelevant(definition.missions[pick].kind);
    }

    let pick = rng.gen_range(0..AVAILABLE_KINDS.len());
    SpawnDecision::Neutral(AVAILABLE_KINDS[pick])
}

/// Cooldown gate between spawns.  Holds at most one pending permit.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnScheduler {
    delay: Duration,
    elapsed: Duration,
    permit: bool,
}

impl SpawnScheduler {
    /// The first permit is available immediately.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            elapsed: Duration::ZERO,
            permit: true,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn has_permit(&self) -> bool {
        self.permit
    }

    /// Let `dt` pass.  While a permit is pending, time does not accumulate.
    pub fn advance(&mut self, dt: Duration) {
        if self.permit {
            return;
        }
        self.elapsed += dt;
        if self.elapsed >= self.delay {
            self.elapsed = Duration::ZERO;
            self.permit = true;
        }
    }

    /// Consume the pending permit, if any.
    pub fn take_permit(&mut self) -> bool {
        std::mem::replace(&mut self.permit, false)
    }
}
