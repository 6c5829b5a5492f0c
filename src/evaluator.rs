/// Mission progress evaluation.
///
/// Derives per-mission remaining counts and the win condition from a level
/// definition and the catch ledger.  Cheap enough (at most six missions) to
/// re-run after every single catch.

use crate::entities::{IngredientKind, LevelDefinition, MissionStatus};
use crate::ledger::CatchLedger;

/// Shown instead of a number once a mission is satisfied.
pub const SATISFIED_MARK: &str = "✓";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub statuses: Vec<MissionStatus>,
    pub won: bool,
}

/// Remaining count for every mission, in level order, plus the win flag.
pub fn evaluate(definition: &LevelDefinition, ledger: &CatchLedger) -> Evaluation {
    let statuses: Vec<MissionStatus> = definition
        .missions
        .iter()
        .map(|mission| {
            let remaining = mission.required.saturating_sub(ledger.count_of(mission.kind));
            MissionStatus {
                kind: mission.kind,
                remaining,
                satisfied: remaining == 0,
            }
        })
        .collect();

    let won = !statuses.is_empty() && statuses.iter().all(|s| s.satisfied);
    Evaluation { statuses, won }
}

/// Whether a catch of `kind` (already recorded in `ledger`) still counts
/// toward earnings.
///
/// Off-mission kinds never count.  A mission kind counts while its total
/// caught, this catch included, is at most the required amount.  When a
/// kind appears in several missions the first one decides.
pub fn is_catch_relevant(
    definition: &LevelDefinition,
    ledger: &CatchLedger,
    kind: IngredientKind,
) -> bool {
    definition
        .missions
        .iter()
        .find(|m| m.kind == kind)
        .map(|m| ledger.count_of(kind) <= m.required)
        .unwrap_or(false)
}

/// Text the HUD shows for one mission.
pub fn status_label(status: &MissionStatus) -> String {
    if status.satisfied {
        SATISFIED_MARK.to_string()
    } else {
        status.remaining.to_string()
    }
}
