use sky_burger::entities::*;

#[test]
fn entity_clone_and_eq() {
    assert_eq!(OutcomeState::Won, OutcomeState::Won);
    assert_ne!(OutcomeState::Won, OutcomeState::Lost);
    assert_eq!(SpawnDecision::Neutral(3), SpawnDecision::Neutral(3));
    assert_ne!(SpawnDecision::Neutral(3), SpawnDecision::MissionRelevant(3));

    let requirement = MissionRequirement { kind: 4, required: 2 };
    assert_eq!(requirement.clone(), MissionRequirement { kind: 4, required: 2 });
}

#[test]
fn spawn_decision_kind() {
    assert_eq!(SpawnDecision::Finisher.kind(), FINISHER_KIND);
    assert_eq!(SpawnDecision::MissionRelevant(7).kind(), 7);
    assert_eq!(SpawnDecision::Neutral(11).kind(), 11);
}

#[test]
fn total_required_sums_missions() {
    let definition = LevelDefinition {
        level: 1,
        missions: vec![
            MissionRequirement { kind: 1, required: 2 },
            MissionRequirement { kind: 2, required: 1 },
        ],
    };
    assert_eq!(definition.total_required(), 3);
}

#[test]
fn progress_defaults_to_first_level_and_no_money() {
    let progress = ProgressState::default();
    assert_eq!(progress.unlocked_level, 1);
    assert_eq!(progress.currency, 0.0);
}

#[test]
fn every_kind_has_a_name() {
    assert_eq!(ingredient_name(FINISHER_KIND), "Top Bun");
    for kind in AVAILABLE_KINDS {
        assert_ne!(ingredient_name(kind), "Mystery");
    }
    assert_eq!(ingredient_name(42), "Mystery");
}
