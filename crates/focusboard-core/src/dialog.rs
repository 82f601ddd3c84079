//! Confirmation dialogs as an owned registry of pending actions.
//!
//! Each dialog holds at most one pending task id. Arming replaces whatever
//! was pending, so a superseded confirmation can never fire; taking the
//! action empties the slot, so a confirmation fires at most once per arm.

use serde::{Deserialize, Serialize};

use crate::tasks::TaskId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogKind {
    Toggle,
    Delete,
}

impl DialogKind {
    pub const ALL: [DialogKind; 2] = [DialogKind::Toggle, DialogKind::Delete];

    /// Element id of the dialog container in the page.
    pub fn element_id(self) -> &'static str {
        match self {
            DialogKind::Toggle => "toggleTaskPopup",
            DialogKind::Delete => "deleteTaskPopup",
        }
    }

    pub fn confirm_button_id(self) -> &'static str {
        match self {
            DialogKind::Toggle => "confirmToggleButton",
            DialogKind::Delete => "confirmDeleteButton",
        }
    }

    pub fn cancel_button_id(self) -> &'static str {
        match self {
            DialogKind::Toggle => "cancelToggleButton",
            DialogKind::Delete => "cancelDeleteButton",
        }
    }
}

/// `{dialog → pending task}` with replace-on-arm and take-once semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogRegistry {
    toggle: Option<TaskId>,
    delete: Option<TaskId>,
}

impl DialogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, kind: DialogKind) -> &mut Option<TaskId> {
        match kind {
            DialogKind::Toggle => &mut self.toggle,
            DialogKind::Delete => &mut self.delete,
        }
    }

    /// Arm `kind` for `task`. Returns the action it superseded.
    pub fn arm(&mut self, kind: DialogKind, task: TaskId) -> Option<TaskId> {
        self.slot(kind).replace(task)
    }

    /// Consume the pending action.
    pub fn take(&mut self, kind: DialogKind) -> Option<TaskId> {
        self.slot(kind).take()
    }

    /// Drop the pending action without running it.
    pub fn disarm(&mut self, kind: DialogKind) -> Option<TaskId> {
        self.take(kind)
    }

    pub fn pending(&self, kind: DialogKind) -> Option<TaskId> {
        match kind {
            DialogKind::Toggle => self.toggle,
            DialogKind::Delete => self.delete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arm_replaces_previous_action() {
        let mut dialogs = DialogRegistry::new();
        assert_eq!(dialogs.arm(DialogKind::Toggle, TaskId(1)), None);
        assert_eq!(dialogs.arm(DialogKind::Toggle, TaskId(2)), Some(TaskId(1)));
        assert_eq!(dialogs.take(DialogKind::Toggle), Some(TaskId(2)));
    }

    #[test]
    fn take_is_single_use() {
        let mut dialogs = DialogRegistry::new();
        dialogs.arm(DialogKind::Delete, TaskId(7));
        assert_eq!(dialogs.take(DialogKind::Delete), Some(TaskId(7)));
        assert_eq!(dialogs.take(DialogKind::Delete), None);
    }

    #[test]
    fn dialogs_are_independent() {
        let mut dialogs = DialogRegistry::new();
        dialogs.arm(DialogKind::Toggle, TaskId(1));
        dialogs.arm(DialogKind::Delete, TaskId(2));

        dialogs.disarm(DialogKind::Toggle);
        assert_eq!(dialogs.pending(DialogKind::Toggle), None);
        assert_eq!(dialogs.pending(DialogKind::Delete), Some(TaskId(2)));
    }
}
