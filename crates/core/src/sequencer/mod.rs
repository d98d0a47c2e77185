use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::Scene;

/// Identifies one mounted scene instance within one run of the sequence.
///
/// Handed to a scene when it mounts; the scene presents it back when it
/// completes and every scene-owned timer carries it. A ticket from an
/// earlier scene or an earlier epoch never matches again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket {
    pub epoch: u64,
    pub instance: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencerState {
    pub active_scene: Scene,
    pub sequence_epoch: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Transition {
    Advanced { from: Scene, to: Scene },
    Restarted { from: Scene, epoch: u64 },
    Ignored(IgnoreReason),
}

impl Transition {
    /// `true` when the active scene changed.
    pub fn changed(&self) -> bool {
        !matches!(self, Self::Ignored(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IgnoreReason {
    /// Advance requested from the finale. Only a replay leaves it.
    Terminal,
    /// The ticket belongs to a scene instance that is no longer mounted,
    /// including one that already completed.
    Stale,
}

/// Owns the active scene and the sequence epoch.
///
/// Exposes only forward steps and a full restart; there is no way to jump to
/// an arbitrary scene.
#[derive(Debug)]
pub struct SceneSequencer {
    active: Scene,
    epoch: u64,
    instance: u64,
}

impl Default for SceneSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneSequencer {
    pub fn new() -> Self {
        Self {
            active: Scene::Intro,
            epoch: 0,
            instance: 0,
        }
    }

    pub fn active(&self) -> Scene {
        self.active
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn state(&self) -> SequencerState {
        SequencerState {
            active_scene: self.active,
            sequence_epoch: self.epoch,
        }
    }

    /// Ticket of the currently mounted scene instance.
    pub fn ticket(&self) -> Ticket {
        Ticket {
            epoch: self.epoch,
            instance: self.instance,
        }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket == self.ticket()
    }

    /// Steps to the next scene. A no-op from the finale.
    pub fn advance(&mut self) -> Transition {
        let from = self.active;
        let Some(to) = from.next() else {
            debug!(scene = ?from, epoch = self.epoch, "advance ignored at final scene");
            return Transition::Ignored(IgnoreReason::Terminal);
        };

        self.active = to;
        self.instance += 1;
        debug!(?from, ?to, epoch = self.epoch, instance = self.instance, "scene advanced");
        Transition::Advanced { from, to }
    }

    /// Completion callback for the scene instance identified by `ticket`.
    ///
    /// Only the first completion of the mounted instance advances: advancing
    /// mounts a new instance, so repeats carry a stale ticket and are ignored.
    pub fn complete(&mut self, ticket: Ticket) -> Transition {
        if !self.is_current(ticket) {
            trace!(?ticket, current = ?self.ticket(), "stale completion dropped");
            return Transition::Ignored(IgnoreReason::Stale);
        }
        self.advance()
    }

    /// Returns to the intro under a new epoch. Valid from any scene.
    pub fn reset(&mut self) -> Transition {
        let from = self.active;
        self.active = Scene::Intro;
        self.epoch += 1;
        self.instance += 1;
        info!(?from, epoch = self.epoch, "sequence restarted");
        Transition::Restarted {
            from,
            epoch: self.epoch,
        }
    }
}
