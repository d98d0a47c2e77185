use crate::{
    render::{IntroView, SceneView},
    timeline::{OneShot, TimerHandle},
    AppConfig, Content, InputEvent, TapTarget, Tilt,
};

use super::{Scene, SceneBehavior, SceneContext, SceneSignal};

/// Cover photo and title. The begin button only appears after the intro
/// animations have had time to play.
#[derive(Debug)]
pub struct IntroScene {
    cover_image: String,
    reveal: OneShot,
    button_visible: bool,
    tilt: Tilt,
    tilt_factor: f64,
}

impl IntroScene {
    pub fn new(content: &Content, config: &AppConfig) -> Self {
        Self {
            cover_image: content.cover_image.clone(),
            reveal: OneShot::new(config.timing.intro_reveal(), "intro-reveal"),
            button_visible: false,
            tilt: Tilt::NEUTRAL,
            tilt_factor: config.layout.tilt_factor,
        }
    }
}

impl SceneBehavior for IntroScene {
    fn scene(&self) -> Scene {
        Scene::Intro
    }

    fn mount(&mut self, ctx: &mut SceneContext<'_>) {
        self.reveal.arm(&mut ctx.timers);
    }

    fn handle_input(&mut self, input: &InputEvent, _ctx: &mut SceneContext<'_>) -> SceneSignal {
        match *input {
            InputEvent::Tap {
                target: TapTarget::Primary,
            } if self.button_visible => SceneSignal::Complete,
            InputEvent::Orientation { beta, gamma } => {
                self.tilt = Tilt::from_orientation(beta, gamma, self.tilt_factor);
                SceneSignal::Idle
            }
            _ => SceneSignal::Idle,
        }
    }

    fn handle_timer(&mut self, handle: TimerHandle, _ctx: &mut SceneContext<'_>) -> SceneSignal {
        if self.reveal.fire(handle) {
            self.button_visible = true;
        }
        SceneSignal::Idle
    }

    fn unmount(&mut self, ctx: &mut SceneContext<'_>) {
        self.reveal.cancel(&mut ctx.timers);
    }

    fn view(&self) -> SceneView {
        SceneView::Intro(IntroView {
            cover_image: self.cover_image.clone(),
            button_visible: self.button_visible,
            tilt: self.tilt,
        })
    }
}
