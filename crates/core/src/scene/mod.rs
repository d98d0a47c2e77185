use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    layout::JitterSource,
    render::SceneView,
    timeline::{TimerHandle, TimerScope},
    AppConfig, Content, InputEvent,
};

mod finale;
mod gift;
mod intro;
mod journey;
mod milestones;
mod universe;

pub use finale::FinaleScene;
pub use gift::{GiftPhase, GiftScene};
pub use intro::IntroScene;
pub use journey::{CarouselState, JourneyScene};
pub use milestones::TimelineScene;
pub use universe::{HeartBurst, MiniHeart, UniverseScene};

/// The six stages of the presentation, in playing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scene {
    Intro,
    PhotoJourney,
    GiftBox,
    MemoryUniverse,
    Timeline,
    Finale,
}

impl Scene {
    pub const ALL: [Scene; 6] = [
        Scene::Intro,
        Scene::PhotoJourney,
        Scene::GiftBox,
        Scene::MemoryUniverse,
        Scene::Timeline,
        Scene::Finale,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<Scene> {
        Self::ALL.get(self.index() + 1).copied()
    }
}

/// What a scene asks of the sequencer after handling an input or timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SceneSignal {
    Idle,
    Complete,
    /// Only the finale signals this.
    Replay,
}

/// Capabilities lent to a scene while it handles one callback.
pub struct SceneContext<'a> {
    /// Timers scheduled here are owned by the scene's ticket.
    pub timers: TimerScope<'a>,
    pub jitter: &'a mut dyn JitterSource,
}

impl fmt::Debug for SceneContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneContext")
            .field("timers", &self.timers)
            .finish_non_exhaustive()
    }
}

/// A mounted scene.
///
/// Scenes decide on their own when they are done and say so through the
/// returned [`SceneSignal`]; the presentation never looks inside.
pub trait SceneBehavior: fmt::Debug {
    fn scene(&self) -> Scene;

    fn mount(&mut self, _ctx: &mut SceneContext<'_>) {}

    fn handle_input(&mut self, input: &InputEvent, ctx: &mut SceneContext<'_>) -> SceneSignal;

    /// Called only for timers this scene instance scheduled and that are still current.
    fn handle_timer(&mut self, _handle: TimerHandle, _ctx: &mut SceneContext<'_>) -> SceneSignal {
        SceneSignal::Idle
    }

    fn unmount(&mut self, _ctx: &mut SceneContext<'_>) {}

    fn view(&self) -> SceneView;
}

/// Creates the behaviour for `scene`. The caller mounts it.
pub fn build(scene: Scene, content: &Arc<Content>, config: &AppConfig) -> Box<dyn SceneBehavior> {
    match scene {
        Scene::Intro => Box::new(IntroScene::new(content, config)),
        Scene::PhotoJourney => Box::new(JourneyScene::new(Arc::clone(content), config)),
        Scene::GiftBox => Box::new(GiftScene::new(config)),
        Scene::MemoryUniverse => Box::new(UniverseScene::new(content, config)),
        Scene::Timeline => Box::new(TimelineScene::new(Arc::clone(content))),
        Scene::Finale => Box::new(FinaleScene::new(content, config)),
    }
}
