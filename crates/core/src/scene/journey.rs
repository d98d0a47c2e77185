use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    layout::carousel_window,
    render::{JourneyView, SceneView},
    timeline::{AutoAdvance, AutoAdvanceEvent, TimerHandle},
    AppConfig, Content, InputEvent, TapTarget,
};

use super::{Scene, SceneBehavior, SceneContext, SceneSignal};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselState {
    pub current_index: usize,
    /// Latches once the last photo has had its full interval.
    pub completed: bool,
}

/// Polaroid carousel that walks through the photos on its own and offers a
/// continue button once every photo has been shown.
#[derive(Debug)]
pub struct JourneyScene {
    content: Arc<Content>,
    ticker: AutoAdvance,
    completed: bool,
}

impl JourneyScene {
    pub fn new(content: Arc<Content>, config: &AppConfig) -> Self {
        let ticker = AutoAdvance::new(content.photos.len(), config.timing.carousel_interval());
        Self {
            content,
            ticker,
            completed: false,
        }
    }

    pub fn state(&self) -> CarouselState {
        CarouselState {
            current_index: self.ticker.index(),
            completed: self.completed,
        }
    }

    fn apply(&mut self, event: Option<AutoAdvanceEvent>) {
        if let Some(AutoAdvanceEvent::Exhausted) = event {
            self.completed = true;
        }
    }
}

impl SceneBehavior for JourneyScene {
    fn scene(&self) -> Scene {
        Scene::PhotoJourney
    }

    fn mount(&mut self, ctx: &mut SceneContext<'_>) {
        let event = self.ticker.start(&mut ctx.timers);
        self.apply(event);
    }

    fn handle_input(&mut self, input: &InputEvent, _ctx: &mut SceneContext<'_>) -> SceneSignal {
        match input {
            InputEvent::Tap {
                target: TapTarget::Primary,
            } if self.completed => SceneSignal::Complete,
            _ => SceneSignal::Idle,
        }
    }

    fn handle_timer(&mut self, handle: TimerHandle, ctx: &mut SceneContext<'_>) -> SceneSignal {
        let event = self.ticker.on_fire(handle, &mut ctx.timers);
        self.apply(event);
        SceneSignal::Idle
    }

    fn unmount(&mut self, ctx: &mut SceneContext<'_>) {
        self.ticker.cancel(&mut ctx.timers);
    }

    fn view(&self) -> SceneView {
        let total = self.content.photos.len();
        let carousel = self.state();
        SceneView::PhotoJourney(JourneyView {
            carousel,
            total,
            frames: carousel_window(carousel.current_index, total),
        })
    }
}
