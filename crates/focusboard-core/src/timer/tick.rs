//! Tick sources: the repeating one-second timers that drive a countdown.
//!
//! The engine never sleeps or spawns. It asks a [`TickSource`] to start a
//! repeating source and later hands the returned handle back to cancel it.
//! Hosts deliver each firing to [`TimerEngine::on_tick`] together with the
//! [`TickId`] the source was started with, so a tick from a cancelled source
//! can be recognised and dropped.
//!
//! [`TimerEngine::on_tick`]: super::TimerEngine::on_tick

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one started tick source. Never reused within an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TickId(pub u64);

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick#{}", self.0)
    }
}

/// Something that can fire `on_tick(id)` once per second until cancelled.
pub trait TickSource {
    /// Owned handle for a running source. Dropping it must not be relied
    /// on to stop the source; the engine always calls [`TickSource::cancel`].
    type Handle;

    /// Start a one-second repeating source whose firings carry `id`.
    fn start(&mut self, id: TickId) -> Self::Handle;

    /// Stop the source; no further firings for its id may be delivered.
    fn cancel(&mut self, handle: Self::Handle);
}

/// A tick source that never fires on its own.
///
/// Callers drive it by calling `on_tick` with [`ManualTicks::active`]. It
/// keeps a count of starts and cancels so leaks are observable.
#[derive(Debug, Default, Clone)]
pub struct ManualTicks {
    active: Option<TickId>,
    started: u32,
    cancelled: u32,
}

impl ManualTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The id of the currently running source, if any.
    pub fn active(&self) -> Option<TickId> {
        self.active
    }

    /// Number of sources started but not yet cancelled (0 or 1 when the
    /// single-source invariant holds).
    pub fn live(&self) -> u32 {
        self.started - self.cancelled
    }

    pub fn started(&self) -> u32 {
        self.started
    }

    pub fn cancelled(&self) -> u32 {
        self.cancelled
    }
}

impl TickSource for ManualTicks {
    type Handle = TickId;

    fn start(&mut self, id: TickId) -> TickId {
        self.started += 1;
        self.active = Some(id);
        id
    }

    fn cancel(&mut self, handle: TickId) {
        self.cancelled += 1;
        if self.active == Some(handle) {
            self.active = None;
        }
    }
}
