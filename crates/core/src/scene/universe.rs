use std::time::Duration;

use serde::Serialize;

use crate::{
    layout::{orbit_layout, OrbitPosition},
    render::{SceneView, UniverseView},
    timeline::TimerHandle,
    AppConfig, Content, InputEvent, TapTarget,
};

use super::{Scene, SceneBehavior, SceneContext, SceneSignal};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MiniHeart {
    pub x: f64,
    pub y: f64,
}

/// Hearts spawned by one double tap, removed together when `expiry` fires.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeartBurst {
    pub id: u64,
    pub hearts: Vec<MiniHeart>,
    #[serde(skip)]
    expiry: TimerHandle,
}

/// Photos orbiting a centre point. Any photo can be opened full size and
/// paged through; the viewer leaves with the continue button.
#[derive(Debug)]
pub struct UniverseScene {
    orbit: Vec<OrbitPosition>,
    expanded: Option<usize>,
    bursts: Vec<HeartBurst>,
    next_burst: u64,
    hearts_per_tap: usize,
    heart_spread: f64,
    burst_lifetime: Duration,
}

impl UniverseScene {
    pub fn new(content: &Content, config: &AppConfig) -> Self {
        Self {
            orbit: orbit_layout(content.photos.len(), config.layout.orbit_radius),
            expanded: None,
            bursts: Vec::new(),
            next_burst: 0,
            hearts_per_tap: config.layout.mini_hearts_per_tap,
            heart_spread: config.layout.mini_heart_spread,
            burst_lifetime: config.timing.heart_burst(),
        }
    }

    fn photo_count(&self) -> usize {
        self.orbit.len()
    }

    fn page(&mut self, forward: bool) {
        let count = self.photo_count();
        let Some(current) = self.expanded else {
            return;
        };
        if count == 0 {
            return;
        }
        self.expanded = Some(if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        });
    }

    fn spawn_hearts(&mut self, x: f64, y: f64, ctx: &mut SceneContext<'_>) {
        let half = self.heart_spread / 2.0;
        let hearts = (0..self.hearts_per_tap)
            .map(|_| MiniHeart {
                x: x + ctx.jitter.sample(-half, half),
                y: y + ctx.jitter.sample(-half, half),
            })
            .collect();
        let expiry = ctx.timers.schedule(self.burst_lifetime, "heart-burst");

        self.bursts.push(HeartBurst {
            id: self.next_burst,
            hearts,
            expiry,
        });
        self.next_burst += 1;
    }
}

impl SceneBehavior for UniverseScene {
    fn scene(&self) -> Scene {
        Scene::MemoryUniverse
    }

    fn handle_input(&mut self, input: &InputEvent, ctx: &mut SceneContext<'_>) -> SceneSignal {
        match *input {
            InputEvent::Tap { target } => match target {
                TapTarget::Primary => return SceneSignal::Complete,
                TapTarget::Photo(index) if index < self.photo_count() => {
                    self.expanded = Some(index);
                }
                TapTarget::Next => self.page(true),
                TapTarget::Previous => self.page(false),
                TapTarget::Close | TapTarget::Background => self.expanded = None,
                _ => {}
            },
            InputEvent::DoubleTap { x, y } if self.expanded.is_some() => {
                self.spawn_hearts(x, y, ctx);
            }
            _ => {}
        }
        SceneSignal::Idle
    }

    fn handle_timer(&mut self, handle: TimerHandle, _ctx: &mut SceneContext<'_>) -> SceneSignal {
        self.bursts.retain(|burst| burst.expiry != handle);
        SceneSignal::Idle
    }

    fn unmount(&mut self, ctx: &mut SceneContext<'_>) {
        for burst in self.bursts.drain(..) {
            ctx.timers.cancel(burst.expiry);
        }
    }

    fn view(&self) -> SceneView {
        SceneView::MemoryUniverse(UniverseView {
            orbit: self.orbit.clone(),
            expanded: self.expanded,
            heart_bursts: self.bursts.clone(),
        })
    }
}
