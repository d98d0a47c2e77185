//! Core library for the Keepsake anniversary presentation.
//!
//! The crate models a six-scene interactive keepsake as a headless state
//! machine. Each module owns a distinct concern (scene sequencing, timers
//! against a virtual clock, layout math, content, rendering descriptions)
//! and the [`Presentation`] shell ties them together so any renderer can
//! drive it with normalised input and draw the frames it produces.

pub mod config;
pub mod content;
pub mod error;
pub mod input;
pub mod layout;
pub mod render;
pub mod scene;
pub mod sequencer;
pub mod session;
pub mod timeline;

pub use config::{AppConfig, LayoutConfig, TimingConfig};
pub use content::{Content, Milestone, MilestoneIcon, Photo};
pub use error::{KeepsakeError, Result};
pub use input::{InputEvent, TapTarget, Tilt};
pub use layout::{JitterSource, NoJitter, RngJitter};
pub use render::{RenderFrame, SceneView};
pub use scene::{Scene, SceneBehavior, SceneSignal};
pub use sequencer::{IgnoreReason, SceneSequencer, SequencerState, Ticket, Transition};
pub use session::Presentation;
pub use timeline::{
    AutoAdvance, LongPress, PlaybackClock, ScheduledEvent, Scheduler, TimerHandle, TimerOwner,
};
