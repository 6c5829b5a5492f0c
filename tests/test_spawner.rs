use std::time::Duration;

use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

use sky_burger::catalog::lookup;
use sky_burger::entities::{SpawnBias, SpawnDecision, AVAILABLE_KINDS};
use sky_burger::spawner::*;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn bias(finisher_chance: f64, mission_relevant_chance: f64) -> SpawnBias {
    SpawnBias {
        finisher_chance,
        mission_relevant_chance,
    }
}

// ── next_spawn_kind ───────────────────────────────────────────────────────────

#[test]
fn zero_finisher_chance_never_yields_finisher() {
    let def = lookup(3).unwrap();
    let mut rng = seeded_rng();
    for _ in 0..10_000 {
        let decision = next_spawn_kind(&def, bias(0.0, 0.3), &mut rng);
        assert_ne!(decision, SpawnDecision::Finisher);
    }
}

#[test]
fn certain_finisher_chance_always_yields_finisher() {
    let def = lookup(3).unwrap();
    let mut rng = seeded_rng();
    for _ in 0..1_000 {
        assert_eq!(next_spawn_kind(&def, bias(1.0, 0.3), &mut rng), SpawnDecision::Finisher);
    }
}

#[test]
fn mission_relevant_picks_come_from_the_level() {
    let def = lookup(5).unwrap();
    let mut rng = seeded_rng();
    for _ in 0..2_000 {
        match next_spawn_kind(&def, bias(0.0, 1.0), &mut rng) {
            SpawnDecision::MissionRelevant(kind) => {
                assert!(def.missions.iter().any(|m| m.kind == kind));
            }
            other => panic!("expected a mission pick, got {other:?}"),
        }
    }
}

#[test]
fn neutral_picks_cover_the_full_kind_set() {
    let def = lookup(1).unwrap();
    let mut rng = seeded_rng();
    let mut seen = [false; 12];
    for _ in 0..5_000 {
        match next_spawn_kind(&def, bias(0.0, 0.0), &mut rng) {
            SpawnDecision::Neutral(kind) => {
                assert!(AVAILABLE_KINDS.contains(&kind));
                seen[kind as usize] = true;
            }
            other => panic!("expected a neutral pick, got {other:?}"),
        }
    }
    assert!(AVAILABLE_KINDS.iter().all(|&k| seen[k as usize]));
}

#[test]
fn low_draw_selects_finisher() {
    // StepRng(0, 0) always draws 0.0
    let def = lookup(1).unwrap();
    let mut rng = StepRng::new(0, 0);
    assert_eq!(next_spawn_kind(&def, bias(0.25, 0.3), &mut rng), SpawnDecision::Finisher);
}

#[test]
fn low_draw_without_finisher_selects_first_mission() {
    let def = lookup(2).unwrap();
    let mut rng = StepRng::new(0, 0);
    assert_eq!(
        next_spawn_kind(&def, bias(0.0, 0.3), &mut rng),
        SpawnDecision::MissionRelevant(2)
    );
}

#[test]
fn finisher_rate_tracks_the_bias() {
    let def = lookup(1).unwrap();
    let mut rng = seeded_rng();
    let draws = 10_000;
    let finishers = (0..draws)
        .filter(|_| next_spawn_kind(&def, bias(0.25, 0.3), &mut rng) == SpawnDecision::Finisher)
        .count();
    let rate = finishers as f64 / draws as f64;
    assert!((0.22..0.28).contains(&rate), "finisher rate {rate}");
}

// ── SpawnScheduler ────────────────────────────────────────────────────────────

#[test]
fn first_permit_is_immediate() {
    let mut scheduler = SpawnScheduler::new(Duration::from_secs(2));
    assert!(scheduler.has_permit());
    assert!(scheduler.take_permit());
    assert!(!scheduler.take_permit());
}

#[test]
fn permit_rearms_after_delay() {
    let mut scheduler = SpawnScheduler::new(Duration::from_secs(2));
    scheduler.take_permit();

    scheduler.advance(Duration::from_millis(1500));
    assert!(!scheduler.has_permit());

    scheduler.advance(Duration::from_millis(500));
    assert!(scheduler.has_permit());
}

#[test]
fn pending_permit_does_not_stack() {
    let mut scheduler = SpawnScheduler::new(Duration::from_secs(1));
    scheduler.take_permit();
    scheduler.advance(Duration::from_secs(5));
    assert!(scheduler.take_permit());
    assert!(!scheduler.take_permit());

    // Time spent while the permit sat unused does not carry over
    scheduler.advance(Duration::from_millis(900));
    assert!(!scheduler.has_permit());
}

#[test]
fn time_does_not_accumulate_while_permit_pending() {
    let mut scheduler = SpawnScheduler::new(Duration::from_secs(1));
    scheduler.advance(Duration::from_secs(10));
    scheduler.take_permit();
    scheduler.advance(Duration::from_millis(500));
    assert!(!scheduler.has_permit());
}
