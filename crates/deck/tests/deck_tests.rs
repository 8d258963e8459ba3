//! Integration tests for the deck pipeline
//! Records whole decks and checks the timeline a renderer would receive.

use deck::{build_deck, Deck, DeckSettings, SceneName, SceneObject, Step};
use proptest::prelude::*;

fn full_deck() -> Deck {
    build_deck(&DeckSettings::default(), &SceneName::ALL).unwrap()
}

#[test]
fn test_full_deck_has_no_empty_slides() {
    let deck = full_deck();
    assert!(deck.slide_count() > 10);
    assert!(deck.slides.iter().all(|s| !s.steps.is_empty()));
}

#[test]
fn test_every_animation_references_a_known_object() {
    let deck = full_deck();
    for step in deck.slides.iter().flat_map(|s| &s.steps) {
        if let Step::Play { animations, .. } = step {
            for animation in animations {
                let ids = animation.objects();
                for id in ids {
                    assert!(deck.object(id).is_some(), "dangling object {:?}", id);
                }
            }
        }
    }
}

#[test]
fn test_scene_selection_is_ordered() {
    let lorenz_first = build_deck(
        &DeckSettings::default(),
        &[SceneName::LorenzSystem, SceneName::Title],
    )
    .unwrap();
    let Some(first) = lorenz_first.objects.iter().find_map(|o| match o {
        SceneObject::Text(t) => Some(t),
        _ => None,
    }) else {
        panic!("expected a text object");
    };
    assert_eq!(first.text, "Heater");
    let Some(SceneObject::Text(last)) = lorenz_first.objects.last() else {
        panic!("expected a text object last");
    };
    assert_eq!(last.text, "Chaos Theory");
}

#[test]
fn test_timeline_json_reloads() {
    let deck = build_deck(&DeckSettings::default(), &[SceneName::PendulumKinematics]).unwrap();
    let json = serde_json::to_string(&deck).unwrap();
    let reloaded: Deck = serde_json::from_str(&json).unwrap();
    assert_eq!(reloaded, deck);
}

#[test]
fn test_settings_font_size_flows_into_layout() {
    let mut settings = DeckSettings::default();
    settings.layout.font_size = 20.0;
    let deck = build_deck(&settings, &[SceneName::LorenzSystem]).unwrap();
    let equation = deck
        .objects
        .iter()
        .find_map(|o| match o {
            SceneObject::Equation(eq) => Some(eq),
            _ => None,
        })
        .unwrap();
    assert_eq!(equation.font_size(), 20.0);
}

#[test]
fn test_invalid_settings_fail_before_recording() {
    let mut settings = DeckSettings::default();
    settings.layout.row_gap_factor = -0.5;
    assert!(build_deck(&settings, &SceneName::ALL).is_err());
}

proptest! {
    #[test]
    fn prop_any_scene_subset_records(picks in prop::collection::vec(0..SceneName::ALL.len(), 0..6)) {
        let scenes: Vec<SceneName> = picks.iter().map(|&i| SceneName::ALL[i]).collect();
        let deck = build_deck(&DeckSettings::default(), &scenes).unwrap();
        prop_assert!(deck.slides.iter().all(|s| !s.steps.is_empty()));
        prop_assert_eq!(scenes.is_empty(), deck.slides.is_empty());
    }
}
