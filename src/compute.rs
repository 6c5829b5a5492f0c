/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `AttemptState` (and, where needed, an RNG handle or a progress store) and
/// returns a brand-new `AttemptState`.  Side effects are limited to the
/// injected RNG and the store handed to `finalize_attempt`.

use std::time::Duration;

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{
    AttemptState, Catcher, FallingIngredient, GameEvent, IngredientKind, LevelDefinition,
    OutcomeState, FINISHER_KIND,
};
use crate::evaluator::{evaluate, is_catch_relevant};
use crate::ledger::CatchLedger;
use crate::outcome::OutcomeResolver;
use crate::progress::{ProgressError, ProgressStore};
use crate::spawner::{next_spawn_kind, SpawnScheduler};
use crate::tween::Tween;

/// Columns the catcher moves per step.
const CATCHER_STEP: i32 = 2;

/// Top row of the play area (row 0 is the HUD, row 1 the border).
const PLAY_TOP: i32 = 2;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the state for a fresh attempt at `definition`.
pub fn init_state(
    definition: LevelDefinition,
    config: &GameConfig,
    width: u16,
    height: u16,
) -> AttemptState {
    let ledger = CatchLedger::new();
    let statuses = evaluate(&definition, &ledger).statuses;
    let fall_speed = config.fall_speed_for(definition.level);
    log::info!(
        "starting level {} with {} missions",
        definition.level,
        definition.missions.len()
    );

    AttemptState {
        catcher: Catcher {
            x: (width / 2) as i32,
            y: height as i32 - 4,
        },
        falling: Vec::new(),
        stack: Vec::new(),
        ledger,
        statuses,
        relevant_catches: 0,
        scheduler: SpawnScheduler::new(config.spawn_delay()),
        bias: config.bias(),
        fall_speed,
        hit_precision: config.hit_precision,
        pricing: config.pricing(),
        outcome: OutcomeResolver::new(),
        finish_timer: Duration::ZERO,
        finish_delay: config.finish_delay(),
        sink: Tween::at_rest(0.0, config.sink_rate),
        report: None,
        events: Vec::new(),
        frame: 0,
        width,
        height,
        definition,
    }
}

// ── Geometry helpers ─────────────────────────────────────────────────────────

/// Whole rows the stack view has sunk so far.
pub fn sunk_rows(state: &AttemptState) -> i32 {
    state.sink.value().round() as i32
}

/// Layers the stack may show before it starts sinking.
pub fn sink_threshold(state: &AttemptState) -> usize {
    ((state.catcher.y - PLAY_TOP) / 2).max(1) as usize
}

/// Row at which the next falling ingredient lands on the stack.
pub fn landing_row(state: &AttemptState) -> i32 {
    state.catcher.y - 1 - state.stack.len() as i32 + sunk_rows(state)
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_catcher_left(state: &AttemptState) -> AttemptState {
    let new_x = (state.catcher.x - CATCHER_STEP).max(2);
    AttemptState {
        catcher: Catcher {
            x: new_x,
            ..state.catcher.clone()
        },
        ..state.clone()
    }
}

pub fn move_catcher_right(state: &AttemptState) -> AttemptState {
    let new_x = (state.catcher.x + CATCHER_STEP).min(state.width as i32 - 3);
    AttemptState {
        catcher: Catcher {
            x: new_x,
            ..state.catcher.clone()
        },
        ..state.clone()
    }
}

/// End the attempt as a loss from outside the simulation (player gave up).
pub fn abandon_attempt(state: &AttemptState) -> AttemptState {
    let mut next = state.clone();
    if next.outcome.lose() {
        log::info!("level {} abandoned", next.level());
        next.events.push(GameEvent::Lost);
    }
    next
}

// ── Catch handling ───────────────────────────────────────────────────────────

/// Apply one catch event.
///
/// The catch is always recorded.  It adds to earnings only while its kind
/// is still under target.  Missions are re-evaluated right away: a full
/// set wins, a finisher landing on an unfinished order loses.  Nothing is
/// catchable once the attempt has ended.
pub fn handle_catch(state: &AttemptState, kind: IngredientKind, is_finisher: bool) -> AttemptState {
    if state.is_finished() {
        return state.clone();
    }

    let mut next = state.clone();
    next.ledger.record(kind);
    next.stack.push(kind);

    let evaluation = evaluate(&next.definition, &next.ledger);
    next.statuses = evaluation.statuses;

    if is_catch_relevant(&next.definition, &next.ledger, kind) {
        next.relevant_catches += 1;
    }
    next.events.push(GameEvent::Caught { kind, is_finisher });
    log::debug!(
        "caught kind {kind} (finisher: {is_finisher}), {} in ledger",
        next.ledger.len()
    );

    if evaluation.won {
        if next.outcome.win() {
            log::info!("all missions of level {} collected", next.level());
            next.events.push(GameEvent::Won);
        }
    } else if is_finisher && next.outcome.lose() {
        log::info!("finisher caught with missions left on level {}", next.level());
        next.events.push(GameEvent::Lost);
    }

    let extra = next.stack.len().saturating_sub(sink_threshold(&next));
    next.sink.retarget(extra as f32);
    next
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by `dt`.  All randomness comes through `rng` so
/// callers control determinism (useful for tests with a seeded RNG).
pub fn tick(state: &AttemptState, dt: Duration, rng: &mut impl Rng) -> AttemptState {
    let mut next = AttemptState {
        frame: state.frame + 1,
        events: Vec::new(),
        ..state.clone()
    };

    // ── 1. Drop ingredients ──────────────────────────────────────────────────
    let fall = next.fall_speed * dt.as_secs_f32();
    for ingredient in &mut next.falling {
        ingredient.y += fall;
    }

    // ── 2. Landing: catch or fly away ────────────────────────────────────────
    let mut caught: Vec<usize> = Vec::new();
    for i in 0..next.falling.len() {
        let ingredient = &next.falling[i];
        if ingredient.flying_away || ingredient.y < landing_row(&next) as f32 {
            continue;
        }
        let kind = ingredient.kind;
        let on_target = (ingredient.x - next.catcher.x).abs() <= next.hit_precision;
        if on_target && !next.is_finished() {
            caught.push(i);
            next = handle_catch(&next, kind, kind == FINISHER_KIND);
        } else {
            next.falling[i].flying_away = true;
            next.events.push(GameEvent::Missed(kind));
        }
    }

    // ── 3. Drop caught and off-screen ingredients ────────────────────────────
    let bottom = next.height as f32 - 2.0;
    next.falling = next
        .falling
        .iter()
        .enumerate()
        .filter(|(i, f)| !caught.contains(i) && f.y < bottom)
        .map(|(_, f)| f.clone())
        .collect();

    // ── 4. Spawn ─────────────────────────────────────────────────────────────
    if !next.is_finished() {
        next.scheduler.advance(dt);
        if next.scheduler.take_permit() {
            let decision = next_spawn_kind(&next.definition, next.bias, rng);
            let max_x = (next.width as i32 - 3).max(2);
            let x = rng.gen_range(2..=max_x);
            next.falling.push(FallingIngredient {
                x,
                y: PLAY_TOP as f32,
                kind: decision.kind(),
                flying_away: false,
            });
            next.events.push(GameEvent::Spawned(decision));
            log::debug!("spawned {decision:?} at column {x}");
        }
    }

    // ── 5. Timers ────────────────────────────────────────────────────────────
    next.sink.advance(dt);
    if matches!(next.outcome.state(), OutcomeState::Won | OutcomeState::Lost) {
        next.finish_timer += dt;
    }

    next
}

// ── Finishing ────────────────────────────────────────────────────────────────

/// The attempt has ended and its finish delay has run out.
pub fn ready_to_finalize(state: &AttemptState) -> bool {
    matches!(state.outcome.state(), OutcomeState::Won | OutcomeState::Lost)
        && state.finish_timer >= state.finish_delay
}

/// Settle the attempt against `store` and attach the finish report.
/// Calling this again after it succeeded changes nothing.
pub fn finalize_attempt<S: ProgressStore>(
    state: &AttemptState,
    store: &mut S,
) -> Result<AttemptState, ProgressError> {
    let mut next = state.clone();
    if let Some(report) =
        next.outcome
            .finalize(&state.definition, &state.ledger, state.pricing, store)?
    {
        next.report = Some(report);
    }
    Ok(next)
}

/// Settle an ended attempt right away, ignoring whatever is left of the
/// finish delay.  Used when the player quits between the end of an attempt
/// and its report; an attempt still in progress is left unsettled.
pub fn settle_before_exit<S: ProgressStore>(
    state: &AttemptState,
    store: &mut S,
) -> Result<AttemptState, ProgressError> {
    if matches!(state.outcome.state(), OutcomeState::Won | OutcomeState::Lost) {
        finalize_attempt(state, store)
    } else {
        Ok(state.clone())
    }
}
