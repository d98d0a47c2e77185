//! Virtual clock, timer queue and the reusable timer patterns the scenes
//! build on.
//!
//! Nothing here sleeps. The host advances the [`PlaybackClock`] and the
//! presentation drains due timers from the [`Scheduler`]. Every timer-driven
//! component remembers the [`TimerHandle`] it is waiting for and ignores any
//! other handle, so a callback that outlives a cancel is a no-op.

use std::time::Duration;

use serde::Serialize;

use crate::Ticket;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackClock {
    now: Duration,
}

impl PlaybackClock {
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn reset(&mut self) {
        self.now = Duration::ZERO;
    }

    pub fn advance(&mut self, delta: Duration) {
        self.now = self.now.saturating_add(delta);
    }

    /// Moves the clock forward to `instant`. Never moves it backwards.
    pub fn advance_to(&mut self, instant: Duration) {
        self.now = self.now.max(instant);
    }
}

/// Identifies one scheduled timer. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TimerHandle(u64);

/// Who a timer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TimerOwner {
    /// The presentation shell (long press, easter egg). Survives scene changes.
    Shell,
    /// A mounted scene instance.
    Scene(Ticket),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledEvent {
    pub handle: TimerHandle,
    pub due: Duration,
    pub owner: TimerOwner,
    pub label: &'static str,
}

/// Pending timers ordered by due time, then by scheduling order.
#[derive(Debug, Default)]
pub struct Scheduler {
    events: Vec<ScheduledEvent>,
    next_handle: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(
        &mut self,
        now: Duration,
        delay: Duration,
        owner: TimerOwner,
        label: &'static str,
    ) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;

        let event = ScheduledEvent {
            handle,
            due: now.saturating_add(delay),
            owner,
            label,
        };
        let position = self
            .events
            .partition_point(|queued| (queued.due, queued.handle) <= (event.due, event.handle));
        self.events.insert(position, event);
        handle
    }

    /// Removes a pending timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.events.iter().position(|event| event.handle == handle) {
            Some(index) => {
                self.events.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes every pending timer belonging to `owner`, returning how many were dropped.
    pub fn cancel_owned_by(&mut self, owner: TimerOwner) -> usize {
        let before = self.events.len();
        self.events.retain(|event| event.owner != owner);
        before - self.events.len()
    }

    /// Pops the earliest timer due at or before `deadline`.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<ScheduledEvent> {
        if self.events.first()?.due <= deadline {
            Some(self.events.remove(0))
        } else {
            None
        }
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.events.first().map(|event| event.due)
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.events.iter().any(|event| event.handle == handle)
    }

    pub fn pending(&self) -> &[ScheduledEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// A scheduler borrowed on behalf of one owner at the current instant.
#[derive(Debug)]
pub struct TimerScope<'a> {
    scheduler: &'a mut Scheduler,
    now: Duration,
    owner: TimerOwner,
}

impl<'a> TimerScope<'a> {
    pub fn new(scheduler: &'a mut Scheduler, now: Duration, owner: TimerOwner) -> Self {
        Self {
            scheduler,
            now,
            owner,
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn owner(&self) -> TimerOwner {
        self.owner
    }

    pub fn schedule(&mut self, delay: Duration, label: &'static str) -> TimerHandle {
        self.scheduler.schedule(self.now, delay, self.owner, label)
    }

    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.scheduler.cancel(handle)
    }
}

/// A single delayed callback that can be armed once at a time.
#[derive(Debug, Clone)]
pub struct OneShot {
    delay: Duration,
    label: &'static str,
    pending: Option<TimerHandle>,
}

impl OneShot {
    pub fn new(delay: Duration, label: &'static str) -> Self {
        Self {
            delay,
            label,
            pending: None,
        }
    }

    /// Arms the timer unless it is already pending.
    pub fn arm(&mut self, timers: &mut TimerScope<'_>) -> TimerHandle {
        match self.pending {
            Some(handle) => handle,
            None => {
                let handle = timers.schedule(self.delay, self.label);
                self.pending = Some(handle);
                handle
            }
        }
    }

    /// Consumes a fired handle. Returns `true` only for the handle this timer
    /// is currently waiting on.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self, timers: &mut TimerScope<'_>) {
        if let Some(handle) = self.pending.take() {
            timers.cancel(handle);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AutoAdvanceEvent {
    Advanced { index: usize },
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickerPhase {
    Idle,
    Running(TimerHandle),
    Exhausted,
    Cancelled,
}

/// Walks an index through `len` items, one step per interval.
///
/// Emits `len - 1` [`AutoAdvanceEvent::Advanced`] events at `T, 2T, ...`
/// followed by a single [`AutoAdvanceEvent::Exhausted`] one interval after
/// the last item became active. An empty sequence is exhausted on start.
#[derive(Debug, Clone)]
pub struct AutoAdvance {
    len: usize,
    interval: Duration,
    index: usize,
    phase: TickerPhase,
}

impl AutoAdvance {
    pub fn new(len: usize, interval: Duration) -> Self {
        Self {
            len,
            interval,
            index: 0,
            phase: TickerPhase::Idle,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_exhausted(&self) -> bool {
        self.phase == TickerPhase::Exhausted
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, TickerPhase::Running(_))
    }

    /// Starts ticking. Only valid once; later calls are ignored.
    pub fn start(&mut self, timers: &mut TimerScope<'_>) -> Option<AutoAdvanceEvent> {
        if self.phase != TickerPhase::Idle {
            return None;
        }
        if self.len == 0 {
            self.phase = TickerPhase::Exhausted;
            return Some(AutoAdvanceEvent::Exhausted);
        }
        self.phase = TickerPhase::Running(timers.schedule(self.interval, "auto-advance"));
        None
    }

    pub fn on_fire(
        &mut self,
        handle: TimerHandle,
        timers: &mut TimerScope<'_>,
    ) -> Option<AutoAdvanceEvent> {
        if self.phase != TickerPhase::Running(handle) {
            return None;
        }

        if self.index + 1 < self.len {
            self.index += 1;
            self.phase = TickerPhase::Running(timers.schedule(self.interval, "auto-advance"));
            Some(AutoAdvanceEvent::Advanced { index: self.index })
        } else {
            self.phase = TickerPhase::Exhausted;
            Some(AutoAdvanceEvent::Exhausted)
        }
    }

    /// Stops the ticker for good. No event is produced afterwards, even for a
    /// handle that was already in flight.
    pub fn cancel(&mut self, timers: &mut TimerScope<'_>) {
        if let TickerPhase::Running(handle) = self.phase {
            timers.cancel(handle);
        }
        if self.phase != TickerPhase::Exhausted {
            self.phase = TickerPhase::Cancelled;
        }
    }
}

/// Fires once when a press is held for the configured duration.
///
/// A press-start while a press is already in progress is ignored until the
/// matching press-end; the pending timer is never restarted.
#[derive(Debug, Clone)]
pub struct LongPress {
    hold: Duration,
    pressed: bool,
    pending: Option<TimerHandle>,
}

impl LongPress {
    pub fn new(hold: Duration) -> Self {
        Self {
            hold,
            pressed: false,
            pending: None,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Returns `true` when this call started a new press session.
    pub fn press_start(&mut self, timers: &mut TimerScope<'_>) -> bool {
        if self.pressed {
            return false;
        }
        self.pressed = true;
        self.pending = Some(timers.schedule(self.hold, "long-press"));
        true
    }

    pub fn press_end(&mut self, timers: &mut TimerScope<'_>) {
        self.cancel(timers);
    }

    /// Returns `true` exactly once per held press.
    pub fn on_fire(&mut self, handle: TimerHandle) -> bool {
        if self.pressed && self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self, timers: &mut TimerScope<'_>) {
        if let Some(handle) = self.pending.take() {
            timers.cancel(handle);
        }
        self.pressed = false;
    }
}
