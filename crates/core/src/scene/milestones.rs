use std::sync::Arc;

use crate::{
    render::{SceneView, TimelineView},
    Content, InputEvent, TapTarget,
};

use super::{Scene, SceneBehavior, SceneContext, SceneSignal};

/// Vertical milestone timeline. At most one milestone is expanded at a time.
#[derive(Debug)]
pub struct TimelineScene {
    content: Arc<Content>,
    expanded: Option<usize>,
}

impl TimelineScene {
    pub fn new(content: Arc<Content>) -> Self {
        Self {
            content,
            expanded: None,
        }
    }

    /// Photo URLs of the expanded milestone, if any.
    pub fn expanded_photos(&self) -> &[String] {
        self.expanded
            .and_then(|index| self.content.milestones.get(index))
            .map(|milestone| milestone.photos.as_slice())
            .unwrap_or_default()
    }
}

impl SceneBehavior for TimelineScene {
    fn scene(&self) -> Scene {
        Scene::Timeline
    }

    fn handle_input(&mut self, input: &InputEvent, _ctx: &mut SceneContext<'_>) -> SceneSignal {
        let InputEvent::Tap { target } = *input else {
            return SceneSignal::Idle;
        };

        match target {
            TapTarget::Primary => SceneSignal::Complete,
            TapTarget::Milestone(index) if index < self.content.milestones.len() => {
                self.expanded = if self.expanded == Some(index) {
                    None
                } else {
                    Some(index)
                };
                SceneSignal::Idle
            }
            _ => SceneSignal::Idle,
        }
    }

    fn view(&self) -> SceneView {
        SceneView::Timeline(TimelineView {
            milestones: self.content.milestones.len(),
            expanded: self.expanded,
            expanded_photos: self.expanded_photos().to_vec(),
        })
    }
}
