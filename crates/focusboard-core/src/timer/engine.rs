//! Timer engine implementation.
//!
//! The engine is a two-state machine driven by whole-second ticks. It owns
//! the only handle to the running tick source, so "at most one active tick
//! source" is enforced here and nowhere else.
//!
//! ## State Transitions
//!
//! ```text
//! Stopped --toggle/start--> Running --toggle/stop/reset/set_mode--> Stopped
//!                           Running --tick reaching 00:00--------> Stopped
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(Mode::Focus, ticks, view);
//! engine.toggle_running();
//! // Whenever the tick source fires:
//! engine.on_tick(id); // Returns Some(Event::TimerCompleted) at 00:00
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::mode::{format_clock, Mode};
use super::tick::{TickId, TickSource};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Stopped,
    Running,
}

/// Text of the Start/Pause control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleLabel {
    Start,
    Pause,
}

impl ToggleLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            ToggleLabel::Start => "Start",
            ToggleLabel::Pause => "Pause",
        }
    }
}

/// The parts of the page the timer writes to.
pub trait TimerView {
    /// Replace the clock text (`MM:SS`).
    fn render_clock(&mut self, text: &str);

    fn set_toggle_label(&mut self, label: ToggleLabel);

    /// Mark `mode`'s selector active and every other selector inactive.
    fn highlight_mode(&mut self, mode: Mode);

    /// Tell the user the countdown finished. May block.
    fn notify_complete(&mut self, mode: Mode);
}

/// Core timer engine.
///
/// Holds no thread and no clock: time only passes when the host delivers a
/// tick from the source the engine started.
pub struct TimerEngine<S: TickSource, V: TimerView> {
    source: S,
    view: V,
    mode: Mode,
    remaining_secs: u32,
    /// Id and handle of the running source. `Some` exactly while Running.
    ticker: Option<(TickId, S::Handle)>,
    next_tick_id: u64,
}

impl<S: TickSource, V: TimerView> TimerEngine<S, V> {
    /// Create a stopped engine for `mode` and render its initial state.
    pub fn new(mode: Mode, source: S, view: V) -> Self {
        let mut engine = Self {
            source,
            view,
            mode,
            remaining_secs: mode.duration_secs(),
            ticker: None,
            next_tick_id: 1,
        };
        engine.view.highlight_mode(mode);
        engine.render();
        engine.view.set_toggle_label(ToggleLabel::Start);
        engine
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        if self.ticker.is_some() {
            TimerState::Running
        } else {
            TimerState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Id of the active tick source, if running.
    pub fn active_tick(&self) -> Option<TickId> {
        self.ticker.as_ref().map(|(id, _)| *id)
    }

    /// Current clock text.
    pub fn display(&self) -> String {
        format_clock(self.remaining_secs)
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state(),
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            total_secs: self.mode.duration_secs(),
            display: self.display(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Switch mode: stop, refill to the new mode's duration, re-render.
    pub fn set_mode(&mut self, mode: Mode) -> Option<Event> {
        let from = self.mode;
        self.mode = mode;
        self.halt();
        self.remaining_secs = mode.duration_secs();
        self.render();
        self.view.highlight_mode(mode);
        Some(Event::ModeChanged {
            from,
            to: mode,
            duration_secs: mode.duration_secs(),
            at: Utc::now(),
        })
    }

    /// Start/Pause control.
    pub fn toggle_running(&mut self) -> Option<Event> {
        if self.is_running() {
            self.stop()
        } else {
            self.start()
        }
    }

    pub fn start(&mut self) -> Option<Event> {
        if self.is_running() {
            return None;
        }
        let id = TickId(self.next_tick_id);
        self.next_tick_id += 1;
        let handle = self.source.start(id);
        self.ticker = Some((id, handle));
        self.view.set_toggle_label(ToggleLabel::Pause);
        tracing::debug!(mode = %self.mode, %id, remaining = self.remaining_secs, "timer started");
        Some(Event::TimerStarted {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop the countdown. While already stopped this only normalizes the
    /// label and returns `None`.
    pub fn stop(&mut self) -> Option<Event> {
        if !self.halt() {
            return None;
        }
        Some(Event::TimerStopped {
            mode: self.mode,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop and refill the current mode. Callable from any state.
    pub fn reset(&mut self) -> Option<Event> {
        self.halt();
        self.remaining_secs = self.mode.duration_secs();
        self.render();
        Some(Event::TimerReset {
            mode: self.mode,
            duration_secs: self.mode.duration_secs(),
            at: Utc::now(),
        })
    }

    /// Deliver one firing of the tick source started with `id`.
    ///
    /// Returns `Some(Event::TimerCompleted)` on the tick that finishes the
    /// countdown. Ticks for any id other than the active one are ignored.
    pub fn on_tick(&mut self, id: TickId) -> Option<Event> {
        if self.active_tick() != Some(id) {
            tracing::trace!(%id, "ignoring stale tick");
            return None;
        }
        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
            self.render();
        }
        if self.remaining_secs > 0 {
            return None;
        }
        self.halt();
        tracing::info!(mode = %self.mode, "countdown finished");
        self.view.notify_complete(self.mode);
        Some(Event::TimerCompleted {
            mode: self.mode,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Cancel the active source (if any) and normalize the label.
    /// Returns whether a source was cancelled.
    fn halt(&mut self) -> bool {
        let cancelled = match self.ticker.take() {
            Some((id, handle)) => {
                self.source.cancel(handle);
                tracing::debug!(%id, remaining = self.remaining_secs, "timer stopped");
                true
            }
            None => false,
        };
        self.view.set_toggle_label(ToggleLabel::Start);
        cancelled
    }

    fn render(&mut self) {
        let text = format_clock(self.remaining_secs);
        self.view.render_clock(&text);
    }
}
