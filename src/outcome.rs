/// Level outcome resolution.
///
/// `InProgress -> Won | Lost -> Finalized`.  Finalizing computes the payout,
/// applies it to the persisted progress and yields a `FinishReport`.  It runs
/// at most once per attempt; later calls are no-ops.

use crate::entities::{FinishReport, LevelDefinition, OutcomeState, ProgressState};
use crate::ledger::CatchLedger;
use crate::progress::{ProgressError, ProgressStore};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pricing {
    /// Money earned per required ingredient.
    pub unit_price: f64,
    /// Tip added on top of the payout, as a fraction of it.
    pub gratuity_rate: f64,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            unit_price: 0.6,
            gratuity_rate: 0.15,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Payout {
    pub payout: f64,
    pub gratuity: f64,
    pub total: f64,
}

/// Win payout: the required amount of every mission whose kind was caught
/// at least once, times the unit price, plus gratuity.  Overcatch is never
/// capped or rewarded; only the required amounts matter.
pub fn compute_payout(definition: &LevelDefinition, ledger: &CatchLedger, pricing: Pricing) -> Payout {
    let basis: u32 = definition
        .missions
        .iter()
        .filter(|m| ledger.count_of(m.kind) > 0)
        .map(|m| m.required)
        .sum();
    let payout = f64::from(basis) * pricing.unit_price;
    let gratuity = payout * pricing.gratuity_rate;
    Payout {
        payout,
        gratuity,
        total: payout + gratuity,
    }
}

/// Progress after a won attempt.
pub fn apply_win(progress: &ProgressState, total: f64) -> ProgressState {
    ProgressState {
        unlocked_level: progress.unlocked_level.saturating_add(1),
        currency: progress.currency + total,
    }
}

/// Progress after a lost attempt: one level back, never below the first.
pub fn apply_loss(progress: &ProgressState) -> ProgressState {
    ProgressState {
        unlocked_level: progress.unlocked_level.saturating_sub(1).max(1),
        currency: progress.currency,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OutcomeResolver {
    state: OutcomeState,
}

impl Default for OutcomeResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomeResolver {
    pub fn new() -> Self {
        Self {
            state: OutcomeState::InProgress,
        }
    }

    pub fn state(&self) -> OutcomeState {
        self.state
    }

    /// Enter `Won`.  Returns `false` if the attempt had already ended.
    pub fn win(&mut self) -> bool {
        self.transition(OutcomeState::Won)
    }

    /// Enter `Lost`.  Returns `false` if the attempt had already ended.
    pub fn lose(&mut self) -> bool {
        self.transition(OutcomeState::Lost)
    }

    fn transition(&mut self, to: OutcomeState) -> bool {
        if self.state != OutcomeState::InProgress {
            return false;
        }
        self.state = to;
        true
    }

    /// Settle a won or lost attempt against `store`.
    ///
    /// Returns `Ok(None)` while still in progress or once already finalized.
    /// On a save error the resolver stays in `Won`/`Lost` so the caller may
    /// retry without risking a double payout.
    pub fn finalize<S: ProgressStore>(
        &mut self,
        definition: &LevelDefinition,
        ledger: &CatchLedger,
        pricing: Pricing,
        store: &mut S,
    ) -> Result<Option<FinishReport>, ProgressError> {
        let won = match self.state {
            OutcomeState::Won => true,
            OutcomeState::Lost => false,
            OutcomeState::InProgress | OutcomeState::Finalized => return Ok(None),
        };

        let current = store.load();
        let report = if won {
            let figures = compute_payout(definition, ledger, pricing);
            store.save(&apply_win(&current, figures.total))?;
            log::info!(
                "level {} completed: payout {:.2} + tip {:.2} = {:.2}",
                definition.level,
                figures.payout,
                figures.gratuity,
                figures.total
            );
            FinishReport {
                level: definition.level,
                won: true,
                payout: figures.payout,
                gratuity: figures.gratuity,
                total: figures.total,
            }
        } else {
            let next = apply_loss(&current);
            store.save(&next)?;
            log::info!(
                "level {} failed: unlocked level now {}",
                definition.level,
                next.unlocked_level
            );
            FinishReport {
                level: definition.level,
                won: false,
                payout: 0.0,
                gratuity: 0.0,
                total: 0.0,
            }
        };

        self.state = OutcomeState::Finalized;
        Ok(Some(report))
    }
}
