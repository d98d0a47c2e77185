//! Declarative description of what the renderer should draw.
//!
//! The core never draws, loads assets or interpolates animations. Each
//! [`RenderFrame`] is a snapshot of scene state that the host turns into
//! pixels.

use serde::Serialize;

use crate::{
    layout::{CarouselFrame, HeartPosition, OrbitPosition},
    scene::{CarouselState, GiftPhase, HeartBurst},
    Scene, Tilt,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub at_ms: u64,
    pub epoch: u64,
    pub scene: Scene,
    /// Present while the previous scene is still fading out.
    pub transition: Option<TransitionFrame>,
    pub view: SceneView,
    pub easter_egg: bool,
}

/// Exit animation of the outgoing scene. Purely visual: the outgoing scene
/// receives no input or timers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransitionFrame {
    pub outgoing: Scene,
    pub elapsed_ms: u64,
    pub duration_ms: u64,
}

impl TransitionFrame {
    /// Normalised progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms as f64 / self.duration_ms as f64).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneView {
    Intro(IntroView),
    PhotoJourney(JourneyView),
    GiftBox(GiftView),
    MemoryUniverse(UniverseView),
    Timeline(TimelineView),
    Finale(FinaleView),
}

impl SceneView {
    pub fn scene(&self) -> Scene {
        match self {
            Self::Intro(_) => Scene::Intro,
            Self::PhotoJourney(_) => Scene::PhotoJourney,
            Self::GiftBox(_) => Scene::GiftBox,
            Self::MemoryUniverse(_) => Scene::MemoryUniverse,
            Self::Timeline(_) => Scene::Timeline,
            Self::Finale(_) => Scene::Finale,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntroView {
    pub cover_image: String,
    pub button_visible: bool,
    pub tilt: Tilt,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneyView {
    pub carousel: CarouselState,
    /// Total photo count, one progress dot each.
    pub total: usize,
    pub frames: Vec<CarouselFrame>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GiftView {
    pub phase: GiftPhase,
    /// Particle targets, only populated once the box is open.
    pub burst: Vec<OrbitPosition>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniverseView {
    pub orbit: Vec<OrbitPosition>,
    pub expanded: Option<usize>,
    pub heart_bursts: Vec<HeartBurst>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineView {
    pub milestones: usize,
    pub expanded: Option<usize>,
    pub expanded_photos: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinaleView {
    pub hearts: Vec<HeartPosition>,
    pub lanterns_visible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_progress_is_clamped() {
        let mut frame = TransitionFrame {
            outgoing: Scene::Intro,
            elapsed_ms: 400,
            duration_ms: 800,
        };
        assert!((frame.progress() - 0.5).abs() < 1e-9);

        frame.elapsed_ms = 1_200;
        assert_eq!(frame.progress(), 1.0);

        frame.duration_ms = 0;
        assert_eq!(frame.progress(), 1.0);
    }

    #[test]
    fn views_serialize_with_scene_tag() {
        let view = SceneView::Timeline(TimelineView {
            milestones: 6,
            expanded: Some(2),
            expanded_photos: Vec::new(),
        });
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["kind"], "timeline");
        assert_eq!(json["expanded"], 2);
        assert_eq!(view.scene(), Scene::Timeline);
    }
}
