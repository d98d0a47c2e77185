use serde::{Deserialize, Serialize};

use crate::{
    layout::{orbit_layout, OrbitPosition},
    render::{GiftView, SceneView},
    timeline::{OneShot, TimerHandle},
    AppConfig, InputEvent, TapTarget,
};

use super::{Scene, SceneBehavior, SceneContext, SceneSignal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GiftPhase {
    Closed,
    /// Ribbon and lid animating away.
    Opening,
    /// Light and particle burst.
    Opened,
}

/// Tap-to-unwrap gift. One tap runs the whole sequence; the scene completes
/// itself when the burst has played.
#[derive(Debug)]
pub struct GiftScene {
    phase: GiftPhase,
    ribbon: OneShot,
    burst: OneShot,
    burst_points: Vec<OrbitPosition>,
}

impl GiftScene {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            phase: GiftPhase::Closed,
            ribbon: OneShot::new(config.timing.gift_ribbon(), "gift-ribbon"),
            burst: OneShot::new(config.timing.gift_burst(), "gift-burst"),
            burst_points: orbit_layout(config.layout.burst_particles, config.layout.burst_distance),
        }
    }
}

impl SceneBehavior for GiftScene {
    fn scene(&self) -> Scene {
        Scene::GiftBox
    }

    fn handle_input(&mut self, input: &InputEvent, ctx: &mut SceneContext<'_>) -> SceneSignal {
        // Taps after the first are swallowed so the sequence cannot restart.
        if let InputEvent::Tap {
            target: TapTarget::Primary,
        } = input
        {
            if self.phase == GiftPhase::Closed {
                self.phase = GiftPhase::Opening;
                self.ribbon.arm(&mut ctx.timers);
            }
        }
        SceneSignal::Idle
    }

    fn handle_timer(&mut self, handle: TimerHandle, ctx: &mut SceneContext<'_>) -> SceneSignal {
        if self.ribbon.fire(handle) {
            self.phase = GiftPhase::Opened;
            self.burst.arm(&mut ctx.timers);
            SceneSignal::Idle
        } else if self.burst.fire(handle) {
            SceneSignal::Complete
        } else {
            SceneSignal::Idle
        }
    }

    fn unmount(&mut self, ctx: &mut SceneContext<'_>) {
        self.ribbon.cancel(&mut ctx.timers);
        self.burst.cancel(&mut ctx.timers);
    }

    fn view(&self) -> SceneView {
        let burst = match self.phase {
            GiftPhase::Opened => self.burst_points.clone(),
            GiftPhase::Closed | GiftPhase::Opening => Vec::new(),
        };
        SceneView::GiftBox(GiftView {
            phase: self.phase,
            burst,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{scene::test_support::Harness, Content};

    fn gift(harness: &Harness) -> GiftView {
        match harness.view() {
            SceneView::GiftBox(view) => view,
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn unwrap_sequence_completes_four_seconds_after_tap() {
        let mut harness = Harness::mount(Scene::GiftBox, Content::default());
        assert!(harness.scheduler.is_empty());
        assert_eq!(harness.advance(Duration::from_secs(10)), SceneSignal::Idle);

        harness.tap(TapTarget::Primary);
        assert_eq!(gift(&harness).phase, GiftPhase::Opening);
        assert!(gift(&harness).burst.is_empty());

        assert_eq!(harness.advance(Duration::from_secs(2)), SceneSignal::Idle);
        let view = gift(&harness);
        assert_eq!(view.phase, GiftPhase::Opened);
        assert_eq!(view.burst.len(), 30);

        assert_eq!(
            harness.advance(Duration::from_millis(1_999)),
            SceneSignal::Idle
        );
        assert_eq!(
            harness.advance(Duration::from_millis(1)),
            SceneSignal::Complete
        );
    }

    #[test]
    fn repeated_taps_do_not_restart_the_sequence() {
        let mut harness = Harness::mount(Scene::GiftBox, Content::default());
        harness.tap(TapTarget::Primary);
        harness.advance(Duration::from_secs(1));
        harness.tap(TapTarget::Primary);
        harness.tap(TapTarget::Primary);

        assert_eq!(harness.scheduler.len(), 1);
        assert_eq!(harness.scheduler.next_due(), Some(Duration::from_secs(2)));
    }
}
