/// All game entity types, plus a few read-only accessors on them.

use std::time::Duration;

use crate::ledger::CatchLedger;
use crate::outcome::{OutcomeResolver, Pricing};
use crate::spawner::SpawnScheduler;
use crate::tween::Tween;

/// Ingredient identifier.  `1..=11` are regular ingredients, `0` is the
/// finisher (top bun).
pub type IngredientKind = u8;

pub const FINISHER_KIND: IngredientKind = 0;

/// Every regular (non-finisher) ingredient kind.
pub const AVAILABLE_KINDS: [IngredientKind; 11] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

/// Human-readable ingredient name.
pub fn ingredient_name(kind: IngredientKind) -> &'static str {
    match kind {
        0 => "Top Bun",
        1 => "Patty",
        2 => "Cheese",
        3 => "Lettuce",
        4 => "Tomato",
        5 => "Onion",
        6 => "Pickle",
        7 => "Bacon",
        8 => "Egg",
        9 => "Mushroom",
        10 => "Ketchup",
        11 => "Avocado",
        _ => "Mystery",
    }
}

// ── Missions ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MissionRequirement {
    pub kind: IngredientKind,
    pub required: u32,
}

/// Ordered missions of a single level (1 to 6 entries).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelDefinition {
    pub level: u32,
    pub missions: Vec<MissionRequirement>,
}

impl LevelDefinition {
    /// Sum of every mission's required count — the payout basis.
    pub fn total_required(&self) -> u32 {
        self.missions.iter().map(|m| m.required).sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MissionStatus {
    pub kind: IngredientKind,
    pub remaining: u32,
    pub satisfied: bool,
}

// ── Persistent progress ───────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct ProgressState {
    pub unlocked_level: u32,
    pub currency: f64,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            unlocked_level: 1,
            currency: 0.0,
        }
    }
}

// ── Spawning ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnBias {
    pub finisher_chance: f64,
    pub mission_relevant_chance: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnDecision {
    Finisher,
    MissionRelevant(IngredientKind),
    Neutral(IngredientKind),
}

impl SpawnDecision {
    pub fn kind(&self) -> IngredientKind {
        match self {
            SpawnDecision::Finisher => FINISHER_KIND,
            SpawnDecision::MissionRelevant(kind) | SpawnDecision::Neutral(kind) => *kind,
        }
    }
}

// ── Attempt outcome ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutcomeState {
    InProgress,
    Won,
    Lost,
    Finalized,
}

/// Figures handed to the presentation layer once an attempt is finalized.
#[derive(Clone, Debug, PartialEq)]
pub struct FinishReport {
    pub level: u32,
    pub won: bool,
    pub payout: f64,
    pub gratuity: f64,
    pub total: f64,
}

/// What happened during one `tick`, for anyone who wants to react
/// (logging, sound, UI flashes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Spawned(SpawnDecision),
    Caught { kind: IngredientKind, is_finisher: bool },
    Missed(IngredientKind),
    Won,
    Lost,
}

// ── Falling ingredients & catcher ─────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct FallingIngredient {
    pub x: i32,
    /// Vertical position in fractional rows (grows downward).
    pub y: f32,
    pub kind: IngredientKind,
    /// Missed the stack; keeps falling but can no longer be caught.
    pub flying_away: bool,
}

/// The bottom bun the player slides left and right.
#[derive(Clone, Debug, PartialEq)]
pub struct Catcher {
    pub x: i32,
    pub y: i32,
}

// ── Master attempt state ──────────────────────────────────────────────────────

/// Everything belonging to one playthrough of a level.  Cloneable so pure
/// update functions can return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct AttemptState {
    pub definition: LevelDefinition,
    pub catcher: Catcher,
    pub falling: Vec<FallingIngredient>,
    /// Caught ingredients from the bottom up, finisher included.
    pub stack: Vec<IngredientKind>,
    pub ledger: CatchLedger,
    /// Per-mission remaining counts, recomputed after every catch.
    pub statuses: Vec<MissionStatus>,
    /// Catches that still counted toward a mission when they landed.
    pub relevant_catches: u32,
    pub scheduler: SpawnScheduler,
    pub bias: SpawnBias,
    /// Fall speed in rows per second.
    pub fall_speed: f32,
    pub hit_precision: i32,
    pub pricing: Pricing,
    pub outcome: OutcomeResolver,
    /// Time spent in `Won`/`Lost` before the report is shown.
    pub finish_timer: Duration,
    pub finish_delay: Duration,
    /// Rows the stack view has sunk so the top stays on screen.
    pub sink: Tween,
    pub report: Option<FinishReport>,
    /// Events produced by the most recent tick.
    pub events: Vec<GameEvent>,
    pub frame: u64,
    pub width: u16,
    pub height: u16,
}

impl AttemptState {
    pub fn level(&self) -> u32 {
        self.definition.level
    }

    /// Live earnings from relevant catches so far.
    pub fn money_made(&self) -> f64 {
        f64::from(self.relevant_catches) * self.pricing.unit_price
    }

    /// `true` once the attempt has reached a terminal outcome.
    pub fn is_finished(&self) -> bool {
        self.outcome.state() != OutcomeState::InProgress
    }
}
