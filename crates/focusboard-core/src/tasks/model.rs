//! Task records and the JSON bodies exchanged with the backend.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl TaskId {
    /// Element id of the task's node in the page (`task-42`).
    pub fn dom_id(self) -> String {
        format!("task-{}", self.0)
    }

    /// Inverse of [`TaskId::dom_id`].
    pub fn from_dom_id(id: &str) -> Option<Self> {
        id.strip_prefix("task-")?.parse().ok().map(TaskId)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(TaskId)
    }
}

/// Which of the two list containers a task node lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskList {
    Active,
    Completed,
}

impl TaskList {
    /// The list a task with the given completion state belongs in.
    pub fn for_completed(completed: bool) -> Self {
        if completed {
            TaskList::Completed
        } else {
            TaskList::Active
        }
    }
}

/// Client mirror of a server-owned task.
///
/// `completed` is only ever copied from a server response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub assigned_by_admin: bool,
    #[serde(default = "default_estimate")]
    pub estimated: u32,
}

fn default_estimate() -> u32 {
    1
}

// ── Wire bodies ──────────────────────────────────────────────────────

/// `POST /add_task` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddTaskRequest {
    pub description: String,
    pub estimated: u32,
}

/// `POST /add_task` response. Success is signalled by the presence of `id`;
/// failures carry `error` instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddTaskResponse {
    #[serde(default)]
    pub id: Option<TaskId>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub estimated: Option<u32>,
    #[serde(default)]
    pub assigned_by_admin: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AddTaskResponse {
    /// Build the client mirror from a successful response.
    ///
    /// Falls back to the submitted description when the server omits it.
    /// A new task always starts active.
    pub fn into_task(self, submitted: &str) -> Option<Task> {
        let id = self.id?;
        Some(Task {
            id,
            description: self
                .description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| submitted.to_string()),
            completed: false,
            assigned_by_admin: self.assigned_by_admin.unwrap_or(false),
            estimated: self.estimated.unwrap_or_else(default_estimate),
        })
    }
}

/// `POST /toggle_task/{id}` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleTaskResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// `POST /delete_task/{id}` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTaskResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_id_round_trip() {
        assert_eq!(TaskId(42).dom_id(), "task-42");
        assert_eq!(TaskId::from_dom_id("task-42"), Some(TaskId(42)));
        assert_eq!(TaskId::from_dom_id("taskList"), None);
        assert_eq!(TaskId::from_dom_id("task-x"), None);
    }

    #[test]
    fn add_response_with_id_becomes_task() {
        let resp: AddTaskResponse = serde_json::from_str(
            r#"{"id": 5, "description": "Write report", "estimated": 1, "completed": false, "assigned_by_admin": false}"#,
        )
        .unwrap();
        let task = resp.into_task("Write report").unwrap();
        assert_eq!(task.id, TaskId(5));
        assert_eq!(task.description, "Write report");
        assert!(!task.completed);
    }

    #[test]
    fn added_task_starts_active_whatever_the_server_says() {
        let resp: AddTaskResponse =
            serde_json::from_str(r#"{"id": 4, "description": "Ship", "completed": true}"#).unwrap();
        let task = resp.into_task("Ship").unwrap();
        assert!(!task.completed);
        assert_eq!(TaskList::for_completed(task.completed), TaskList::Active);
    }

    #[test]
    fn add_response_without_optional_fields() {
        let resp: AddTaskResponse = serde_json::from_str(r#"{"id": 9}"#).unwrap();
        let task = resp.into_task("Call Bob").unwrap();
        assert_eq!(task.description, "Call Bob");
        assert!(!task.assigned_by_admin);
        assert_eq!(task.estimated, 1);
    }

    #[test]
    fn add_error_body_has_no_task() {
        let resp: AddTaskResponse =
            serde_json::from_str(r#"{"error": "Task description is required"}"#).unwrap();
        assert_eq!(resp.error.as_deref(), Some("Task description is required"));
        assert!(resp.into_task("x").is_none());
    }

    #[test]
    fn toggle_error_body_defaults_to_failure() {
        let resp: ToggleTaskResponse = serde_json::from_str(r#"{"error": "Unauthorized"}"#).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("Unauthorized"));
    }

    #[test]
    fn list_for_completion_state() {
        assert_eq!(TaskList::for_completed(true), TaskList::Completed);
        assert_eq!(TaskList::for_completed(false), TaskList::Active);
    }
}
