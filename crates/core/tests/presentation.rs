use std::time::Duration;

use keepsake_core::{
    render::SceneView,
    scene::GiftPhase,
    AppConfig, Content, IgnoreReason, InputEvent, NoJitter, Presentation, Scene, TapTarget,
    Transition,
};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn tap(presentation: &mut Presentation, target: TapTarget) {
    presentation.handle_input(InputEvent::tap(target));
}

fn demo() -> Presentation {
    Presentation::with_jitter(Content::demo(), AppConfig::default(), NoJitter)
}

#[test]
fn full_walkthrough_reaches_finale_and_replays() {
    let mut presentation = demo();

    // Intro: the begin button only responds after the reveal delay.
    tap(&mut presentation, TapTarget::Primary);
    assert_eq!(presentation.active_scene(), Scene::Intro);
    presentation.advance_by(ms(5_000));
    let SceneView::Intro(intro) = presentation.frame().view else {
        panic!("expected intro");
    };
    assert!(intro.button_visible);
    tap(&mut presentation, TapTarget::Primary);
    assert_eq!(presentation.active_scene(), Scene::PhotoJourney);

    // Journey: 13 photos at 3s each, then continue.
    presentation.advance_by(ms(3_000));
    let SceneView::PhotoJourney(journey) = presentation.frame().view else {
        panic!("expected journey");
    };
    assert_eq!(journey.carousel.current_index, 1);
    assert_eq!(journey.total, 13);
    assert_eq!(journey.frames.len(), 3);

    presentation.advance_by(ms(36_000));
    let SceneView::PhotoJourney(journey) = presentation.frame().view else {
        panic!("expected journey");
    };
    assert!(journey.carousel.completed);
    tap(&mut presentation, TapTarget::Primary);
    assert_eq!(presentation.active_scene(), Scene::GiftBox);

    // Gift: ribbon then burst, then automatic completion.
    tap(&mut presentation, TapTarget::Primary);
    presentation.advance_by(ms(2_000));
    let SceneView::GiftBox(gift) = presentation.frame().view else {
        panic!("expected gift box");
    };
    assert_eq!(gift.phase, GiftPhase::Opened);
    assert_eq!(gift.burst.len(), 30);
    presentation.advance_by(ms(2_000));
    assert_eq!(presentation.active_scene(), Scene::MemoryUniverse);

    // Universe: expand, page past the end, collapse, continue.
    tap(&mut presentation, TapTarget::Photo(12));
    tap(&mut presentation, TapTarget::Next);
    let SceneView::MemoryUniverse(universe) = presentation.frame().view else {
        panic!("expected universe");
    };
    assert_eq!(universe.expanded, Some(0));
    assert_eq!(universe.orbit.len(), 13);
    tap(&mut presentation, TapTarget::Close);
    tap(&mut presentation, TapTarget::Primary);
    assert_eq!(presentation.active_scene(), Scene::Timeline);

    // Timeline: milestones toggle, then continue.
    tap(&mut presentation, TapTarget::Milestone(2));
    let SceneView::Timeline(timeline) = presentation.frame().view else {
        panic!("expected timeline");
    };
    assert_eq!(timeline.milestones, 6);
    assert_eq!(timeline.expanded, Some(2));
    tap(&mut presentation, TapTarget::Primary);
    assert_eq!(presentation.active_scene(), Scene::Finale);

    // Finale: hearts laid out, lanterns later, replay restarts.
    let SceneView::Finale(finale) = presentation.frame().view else {
        panic!("expected finale");
    };
    assert_eq!(finale.hearts.len(), 13);
    assert!(!finale.lanterns_visible);
    presentation.advance_by(ms(2_000));
    let SceneView::Finale(finale) = presentation.frame().view else {
        panic!("expected finale");
    };
    assert!(finale.lanterns_visible);

    tap(&mut presentation, TapTarget::Primary);
    assert_eq!(presentation.active_scene(), Scene::Intro);
    assert_eq!(presentation.epoch(), 1);
}

#[test]
fn external_completion_is_idempotent() {
    let mut presentation = demo();
    let ticket = presentation.ticket();

    let first = presentation.complete(ticket);
    let second = presentation.complete(ticket);

    assert_eq!(
        first,
        Transition::Advanced {
            from: Scene::Intro,
            to: Scene::PhotoJourney
        }
    );
    assert_eq!(second, Transition::Ignored(IgnoreReason::Stale));
    assert_eq!(presentation.active_scene(), Scene::PhotoJourney);
}

#[test]
fn replay_mid_gift_leaves_no_pending_scene_timers() {
    let mut presentation = demo();
    for _ in 0..2 {
        let ticket = presentation.ticket();
        presentation.complete(ticket);
    }
    assert_eq!(presentation.active_scene(), Scene::GiftBox);
    tap(&mut presentation, TapTarget::Primary);

    presentation.replay();
    presentation.advance_by(ms(10_000));

    assert_eq!(presentation.active_scene(), Scene::Intro);
    assert_eq!(presentation.epoch(), 1);
    assert!(presentation.pending_timers().is_empty());
}

#[test]
fn empty_content_still_plays_through() {
    let mut presentation =
        Presentation::with_jitter(Content::default(), AppConfig::default(), NoJitter);
    presentation.advance_by(ms(5_000));
    tap(&mut presentation, TapTarget::Primary);

    let SceneView::PhotoJourney(journey) = presentation.frame().view else {
        panic!("expected journey");
    };
    assert!(journey.carousel.completed);
    assert!(journey.frames.is_empty());

    tap(&mut presentation, TapTarget::Primary);
    tap(&mut presentation, TapTarget::Primary);
    presentation.advance_by(ms(4_000));
    tap(&mut presentation, TapTarget::Photo(0));
    tap(&mut presentation, TapTarget::Primary);
    tap(&mut presentation, TapTarget::Primary);

    let SceneView::Finale(finale) = presentation.frame().view else {
        panic!("expected finale");
    };
    assert!(finale.hearts.is_empty());
}

#[test]
fn frames_serialize_for_the_renderer() {
    let presentation = demo();
    let json = serde_json::to_value(presentation.frame()).unwrap();

    assert_eq!(json["scene"], "intro");
    assert_eq!(json["view"]["kind"], "intro");
    assert_eq!(json["easter_egg"], false);
}
