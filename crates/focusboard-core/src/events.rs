use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tasks::{TaskId, TaskList};
use crate::timer::{Mode, TimerState};

/// Every state change in the system produces an Event.
/// Hosts print or log them; nothing in the core depends on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerStopped {
        mode: Mode,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero and the user was notified.
    TimerCompleted {
        mode: Mode,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: Mode,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    ModeChanged {
        from: Mode,
        to: Mode,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        mode: Mode,
        remaining_secs: u32,
        total_secs: u32,
        display: String,
        at: DateTime<Utc>,
    },
    /// Server created a task and it was appended to the active list.
    TaskAdded {
        id: TaskId,
        description: String,
        assigned_by_admin: bool,
        at: DateTime<Utc>,
    },
    /// Server confirmed a toggle. `rendered` is false when no node was
    /// tracked for the id and the view was left alone.
    TaskToggled {
        id: TaskId,
        completed: bool,
        list: TaskList,
        rendered: bool,
        at: DateTime<Utc>,
    },
    /// Server confirmed a delete.
    TaskDeleted {
        id: TaskId,
        rendered: bool,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Short machine name of the variant, matching the serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::TimerStarted { .. } => "TimerStarted",
            Event::TimerStopped { .. } => "TimerStopped",
            Event::TimerCompleted { .. } => "TimerCompleted",
            Event::TimerReset { .. } => "TimerReset",
            Event::ModeChanged { .. } => "ModeChanged",
            Event::StateSnapshot { .. } => "StateSnapshot",
            Event::TaskAdded { .. } => "TaskAdded",
            Event::TaskToggled { .. } => "TaskToggled",
            Event::TaskDeleted { .. } => "TaskDeleted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_serialized_tag() {
        let event = Event::TaskDeleted {
            id: TaskId(7),
            rendered: true,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], event.kind());
        assert_eq!(json["id"], 7);
    }
}
