//! The presentation shell: one owned object that mounts exactly one scene at
//! a time and routes input and timers to it.

use std::{fmt, sync::Arc, time::Duration};

use tracing::{debug, info, trace};

use crate::{
    layout::{JitterSource, RngJitter},
    render::{RenderFrame, TransitionFrame},
    scene::{self, SceneBehavior, SceneContext, SceneSignal},
    timeline::{
        LongPress, OneShot, PlaybackClock, ScheduledEvent, Scheduler, TimerHandle, TimerOwner,
        TimerScope,
    },
    AppConfig, Content, IgnoreReason, InputEvent, Scene, SceneSequencer, SequencerState, Ticket,
    Transition,
};

#[derive(Debug, Clone, Copy)]
struct Outgoing {
    scene: Scene,
    since: Duration,
}

/// Runs the six-scene sequence against a virtual clock.
///
/// The host feeds normalised [`InputEvent`]s, advances time with
/// [`Presentation::advance_by`] and draws whatever [`Presentation::frame`]
/// describes.
pub struct Presentation {
    config: AppConfig,
    content: Arc<Content>,
    sequencer: SceneSequencer,
    scheduler: Scheduler,
    clock: PlaybackClock,
    scene: Box<dyn SceneBehavior>,
    outgoing: Option<Outgoing>,
    long_press: LongPress,
    easter_egg: OneShot,
    easter_egg_visible: bool,
    jitter: Box<dyn JitterSource>,
}

impl Presentation {
    pub fn new(content: impl Into<Arc<Content>>, config: AppConfig) -> Self {
        Self::with_jitter(content, config, RngJitter::from_entropy())
    }

    pub fn with_jitter(
        content: impl Into<Arc<Content>>,
        config: AppConfig,
        jitter: impl JitterSource + 'static,
    ) -> Self {
        let content = content.into();
        let sequencer = SceneSequencer::new();
        let scene = scene::build(sequencer.active(), &content, &config);

        let mut presentation = Self {
            long_press: LongPress::new(config.timing.long_press()),
            easter_egg: OneShot::new(config.timing.easter_egg_dismiss(), "easter-egg-dismiss"),
            config,
            content,
            sequencer,
            scheduler: Scheduler::new(),
            clock: PlaybackClock::default(),
            scene,
            outgoing: None,
            easter_egg_visible: false,
            jitter: Box::new(jitter),
        };
        presentation.mount_current();
        presentation
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn active_scene(&self) -> Scene {
        self.sequencer.active()
    }

    pub fn epoch(&self) -> u64 {
        self.sequencer.epoch()
    }

    pub fn state(&self) -> SequencerState {
        self.sequencer.state()
    }

    /// Completion ticket of the mounted scene, for hosts that drive
    /// completion themselves through [`Presentation::complete`].
    pub fn ticket(&self) -> Ticket {
        self.sequencer.ticket()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn pending_timers(&self) -> &[ScheduledEvent] {
        self.scheduler.pending()
    }

    pub fn easter_egg_visible(&self) -> bool {
        self.easter_egg_visible
    }

    /// Completion callback. Idempotent per scene instance.
    pub fn complete(&mut self, ticket: Ticket) -> Transition {
        let previous = self.sequencer.ticket();
        let transition = self.sequencer.complete(ticket);
        self.swap_scene(previous, transition);
        transition
    }

    /// Restarts from the intro under a new epoch.
    pub fn replay(&mut self) -> Transition {
        let previous = self.sequencer.ticket();
        let transition = self.sequencer.reset();
        self.swap_scene(previous, transition);
        transition
    }

    /// Routes one input. Press gestures drive the global long-press
    /// detector; everything else goes to the mounted scene, including taps
    /// made while the easter egg is showing.
    pub fn handle_input(&mut self, input: InputEvent) {
        let now = self.clock.now();
        match input {
            InputEvent::PressStart => {
                let mut timers = TimerScope::new(&mut self.scheduler, now, TimerOwner::Shell);
                if !self.long_press.press_start(&mut timers) {
                    trace!("press start ignored while a press is in progress");
                }
                return;
            }
            InputEvent::PressEnd => {
                let mut timers = TimerScope::new(&mut self.scheduler, now, TimerOwner::Shell);
                self.long_press.press_end(&mut timers);
                return;
            }
            _ => {}
        }

        let ticket = self.sequencer.ticket();
        let mut ctx = SceneContext {
            timers: TimerScope::new(&mut self.scheduler, now, TimerOwner::Scene(ticket)),
            jitter: &mut *self.jitter,
        };
        let signal = self.scene.handle_input(&input, &mut ctx);
        self.apply_signal(ticket, signal);
    }

    /// Moves the clock forward, firing due timers in order with the clock
    /// positioned at each timer's due time.
    pub fn advance_by(&mut self, delta: Duration) {
        let deadline = self.clock.now().saturating_add(delta);
        while let Some(fired) = self.scheduler.pop_due(deadline) {
            self.clock.advance_to(fired.due);
            self.dispatch_timer(fired);
        }
        self.clock.advance_to(deadline);

        if let Some(outgoing) = self.outgoing {
            let elapsed = self.clock.now().saturating_sub(outgoing.since);
            if elapsed >= self.config.timing.scene_transition() {
                self.outgoing = None;
            }
        }
    }

    pub fn frame(&self) -> RenderFrame {
        let now = self.clock.now();
        let duration = self.config.timing.scene_transition();
        let transition = self.outgoing.and_then(|outgoing| {
            let elapsed = now.saturating_sub(outgoing.since);
            (elapsed < duration).then(|| TransitionFrame {
                outgoing: outgoing.scene,
                elapsed_ms: millis(elapsed),
                duration_ms: millis(duration),
            })
        });

        RenderFrame {
            at_ms: millis(now),
            epoch: self.sequencer.epoch(),
            scene: self.sequencer.active(),
            transition,
            view: self.scene.view(),
            easter_egg: self.easter_egg_visible,
        }
    }

    /// Delivers one fired timer. Scene timers whose ticket is no longer
    /// current are dropped without touching any state.
    pub(crate) fn dispatch_timer(&mut self, fired: ScheduledEvent) {
        let ticket = match fired.owner {
            TimerOwner::Shell => {
                self.dispatch_shell_timer(fired.handle);
                return;
            }
            TimerOwner::Scene(ticket) => ticket,
        };

        if !self.sequencer.is_current(ticket) {
            trace!(?ticket, label = fired.label, "stale timer dropped");
            return;
        }

        let now = self.clock.now();
        let mut ctx = SceneContext {
            timers: TimerScope::new(&mut self.scheduler, now, TimerOwner::Scene(ticket)),
            jitter: &mut *self.jitter,
        };
        let signal = self.scene.handle_timer(fired.handle, &mut ctx);
        self.apply_signal(ticket, signal);
    }

    fn dispatch_shell_timer(&mut self, handle: TimerHandle) {
        if self.long_press.on_fire(handle) {
            info!("easter egg revealed");
            self.easter_egg_visible = true;
            let now = self.clock.now();
            let mut timers = TimerScope::new(&mut self.scheduler, now, TimerOwner::Shell);
            self.easter_egg.arm(&mut timers);
        } else if self.easter_egg.fire(handle) {
            self.easter_egg_visible = false;
        }
    }

    fn apply_signal(&mut self, ticket: Ticket, signal: SceneSignal) {
        match signal {
            SceneSignal::Idle => {}
            SceneSignal::Complete => {
                self.complete(ticket);
            }
            SceneSignal::Replay => {
                if self.sequencer.is_current(ticket) {
                    self.replay();
                } else {
                    trace!(?ticket, reason = ?IgnoreReason::Stale, "replay dropped");
                }
            }
        }
    }

    /// Tears down the scene owned by `previous` and mounts the sequencer's
    /// active scene, if `transition` changed anything.
    fn swap_scene(&mut self, previous: Ticket, transition: Transition) {
        let from = match transition {
            Transition::Advanced { from, .. } | Transition::Restarted { from, .. } => from,
            Transition::Ignored(reason) => {
                trace!(?reason, "transition ignored");
                return;
            }
        };

        let now = self.clock.now();
        let owner = TimerOwner::Scene(previous);
        let mut ctx = SceneContext {
            timers: TimerScope::new(&mut self.scheduler, now, owner),
            jitter: &mut *self.jitter,
        };
        self.scene.unmount(&mut ctx);
        let dropped = self.scheduler.cancel_owned_by(owner);

        debug!(?from, to = ?self.sequencer.active(), dropped, "swapping scene");
        self.outgoing = Some(Outgoing { scene: from, since: now });
        self.scene = scene::build(self.sequencer.active(), &self.content, &self.config);
        self.mount_current();
    }

    fn mount_current(&mut self) {
        let ticket = self.sequencer.ticket();
        let now = self.clock.now();
        let mut ctx = SceneContext {
            timers: TimerScope::new(&mut self.scheduler, now, TimerOwner::Scene(ticket)),
            jitter: &mut *self.jitter,
        };
        self.scene.mount(&mut ctx);
    }
}

impl fmt::Debug for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Presentation")
            .field("now", &self.clock.now())
            .field("sequencer", &self.sequencer)
            .field("scene", &self.scene)
            .field("pending_timers", &self.scheduler.len())
            .field("easter_egg_visible", &self.easter_egg_visible)
            .finish_non_exhaustive()
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{layout::NoJitter, render::SceneView, TapTarget};

    fn secs(value: u64) -> Duration {
        Duration::from_secs(value)
    }

    fn presentation() -> Presentation {
        Presentation::with_jitter(Content::demo(), AppConfig::default(), NoJitter)
    }

    fn tap(presentation: &mut Presentation) {
        presentation.handle_input(InputEvent::tap(TapTarget::Primary));
    }

    /// Plays forward until the gift box is mounted.
    fn reach_gift_box(presentation: &mut Presentation) {
        presentation.advance_by(secs(5));
        tap(presentation);
        presentation.advance_by(secs(39));
        tap(presentation);
        assert_eq!(presentation.active_scene(), Scene::GiftBox);
    }

    #[test]
    fn starts_on_intro_with_reveal_pending() {
        let presentation = presentation();
        assert_eq!(presentation.active_scene(), Scene::Intro);
        assert_eq!(presentation.epoch(), 0);
        assert_eq!(presentation.pending_timers().len(), 1);
        assert_eq!(presentation.pending_timers()[0].label, "intro-reveal");
    }

    #[test]
    fn scene_change_exposes_exit_transition() {
        let mut presentation = presentation();
        presentation.advance_by(secs(5));
        tap(&mut presentation);

        let frame = presentation.frame();
        assert_eq!(frame.scene, Scene::PhotoJourney);
        let transition = frame.transition.unwrap();
        assert_eq!(transition.outgoing, Scene::Intro);
        assert_eq!(transition.elapsed_ms, 0);

        presentation.advance_by(Duration::from_millis(400));
        assert_eq!(presentation.frame().transition.unwrap().elapsed_ms, 400);

        presentation.advance_by(Duration::from_millis(400));
        assert!(presentation.frame().transition.is_none());
    }

    #[test]
    fn outgoing_scene_timers_are_cancelled() {
        let mut presentation = presentation();
        reach_gift_box(&mut presentation);
        tap(&mut presentation);
        assert!(presentation
            .pending_timers()
            .iter()
            .any(|event| event.label == "gift-ribbon"));

        presentation.replay();
        assert!(presentation
            .pending_timers()
            .iter()
            .all(|event| event.label != "gift-ribbon"));
    }

    #[test]
    fn stale_timer_from_previous_epoch_is_a_no_op() {
        let mut presentation = presentation();
        reach_gift_box(&mut presentation);
        tap(&mut presentation);

        let stale = presentation
            .pending_timers()
            .iter()
            .find(|event| event.label == "gift-ribbon")
            .cloned()
            .unwrap();

        presentation.replay();
        let before = presentation.frame();

        // Force the torn-down timer through as if the host fired it late.
        presentation.dispatch_timer(stale);

        assert_eq!(presentation.frame(), before);
        assert_eq!(presentation.active_scene(), Scene::Intro);
        assert_eq!(presentation.epoch(), 1);
    }

    #[test]
    fn tap_and_timer_race_advances_once() {
        let mut presentation = presentation();
        presentation.advance_by(secs(5));
        let ticket = presentation.ticket();

        tap(&mut presentation);
        let transition = presentation.complete(ticket);

        assert_eq!(transition, Transition::Ignored(IgnoreReason::Stale));
        assert_eq!(presentation.active_scene(), Scene::PhotoJourney);
    }

    #[test]
    fn long_press_reveals_and_auto_dismisses_easter_egg() {
        let mut presentation = presentation();
        presentation.handle_input(InputEvent::PressStart);
        presentation.advance_by(Duration::from_millis(2_999));
        assert!(!presentation.easter_egg_visible());

        presentation.advance_by(Duration::from_millis(1));
        assert!(presentation.frame().easter_egg);

        presentation.handle_input(InputEvent::PressEnd);
        presentation.advance_by(secs(5));
        assert!(!presentation.easter_egg_visible());
    }

    #[test]
    fn short_press_does_nothing() {
        let mut presentation = presentation();
        presentation.handle_input(InputEvent::PressStart);
        presentation.advance_by(secs(2));
        presentation.handle_input(InputEvent::PressEnd);
        presentation.advance_by(secs(10));

        assert!(!presentation.easter_egg_visible());
    }

    #[test]
    fn taps_reach_the_scene_while_easter_egg_is_showing() {
        let mut presentation = presentation();
        presentation.handle_input(InputEvent::PressStart);
        presentation.advance_by(secs(5));
        presentation.handle_input(InputEvent::PressEnd);
        assert!(presentation.easter_egg_visible());

        // The intro button revealed at 5s; the overlay is still up until 8s.
        tap(&mut presentation);
        assert_eq!(presentation.active_scene(), Scene::PhotoJourney);
        assert!(presentation.frame().easter_egg);

        presentation.advance_by(Duration::from_millis(2_999));
        assert!(presentation.easter_egg_visible());
        presentation.advance_by(Duration::from_millis(1));
        assert!(!presentation.easter_egg_visible());
        assert_eq!(presentation.active_scene(), Scene::PhotoJourney);
    }

    #[test]
    fn finale_replay_starts_new_epoch() {
        let mut presentation = presentation();
        reach_gift_box(&mut presentation);
        tap(&mut presentation);
        presentation.advance_by(secs(4));
        assert_eq!(presentation.active_scene(), Scene::MemoryUniverse);
        tap(&mut presentation);
        tap(&mut presentation);
        assert_eq!(presentation.active_scene(), Scene::Finale);

        tap(&mut presentation);
        assert_eq!(presentation.active_scene(), Scene::Intro);
        assert_eq!(presentation.epoch(), 1);
        let SceneView::Intro(view) = presentation.frame().view else {
            panic!("expected intro view");
        };
        assert!(!view.button_visible);
    }
}
