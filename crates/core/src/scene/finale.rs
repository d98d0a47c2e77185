use crate::{
    layout::{heart_curve, HeartPosition},
    render::{FinaleView, SceneView},
    timeline::{OneShot, TimerHandle},
    AppConfig, Content, InputEvent, TapTarget,
};

use super::{Scene, SceneBehavior, SceneContext, SceneSignal};

/// Heart-shaped photo collage with lanterns. The only way out is replay.
#[derive(Debug)]
pub struct FinaleScene {
    photo_count: usize,
    jitter_degrees: f64,
    hearts: Vec<HeartPosition>,
    lanterns: OneShot,
    lanterns_visible: bool,
}

impl FinaleScene {
    pub fn new(content: &Content, config: &AppConfig) -> Self {
        Self {
            photo_count: content.photos.len(),
            jitter_degrees: config.layout.heart_jitter_degrees,
            hearts: Vec::new(),
            lanterns: OneShot::new(config.timing.finale_lantern(), "finale-lanterns"),
            lanterns_visible: false,
        }
    }
}

impl SceneBehavior for FinaleScene {
    fn scene(&self) -> Scene {
        Scene::Finale
    }

    fn mount(&mut self, ctx: &mut SceneContext<'_>) {
        // Jitter is drawn once so the collage holds still between frames.
        self.hearts = heart_curve(self.photo_count, self.jitter_degrees, &mut *ctx.jitter);
        self.lanterns.arm(&mut ctx.timers);
    }

    fn handle_input(&mut self, input: &InputEvent, _ctx: &mut SceneContext<'_>) -> SceneSignal {
        match input {
            InputEvent::Tap {
                target: TapTarget::Primary,
            } => SceneSignal::Replay,
            _ => SceneSignal::Idle,
        }
    }

    fn handle_timer(&mut self, handle: TimerHandle, _ctx: &mut SceneContext<'_>) -> SceneSignal {
        if self.lanterns.fire(handle) {
            self.lanterns_visible = true;
        }
        SceneSignal::Idle
    }

    fn unmount(&mut self, ctx: &mut SceneContext<'_>) {
        self.lanterns.cancel(&mut ctx.timers);
    }

    fn view(&self) -> SceneView {
        SceneView::Finale(FinaleView {
            hearts: self.hearts.clone(),
            lanterns_visible: self.lanterns_visible,
        })
    }
}
