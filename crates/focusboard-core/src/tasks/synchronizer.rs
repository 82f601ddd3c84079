//! Task synchronizer: server-confirmed task list with confirmation dialogs.
//!
//! Every view mutation for a task happens after, and only because of, a
//! successful backend response for that task. Failures are logged and leave
//! the view exactly as it was.
//!
//! The synchronizer is meant to live on a single-threaded event loop and is
//! driven through `&self`. Interior state sits in `RefCell`s whose borrows
//! never span an `.await`, so several requests may be in flight at once;
//! whichever response arrives last is applied last.

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::Utc;

use super::backend::TaskBackend;
use super::model::{AddTaskRequest, Task, TaskId, TaskList};
use super::view::TaskView;
use crate::dialog::{DialogKind, DialogRegistry};
use crate::error::SyncError;
use crate::events::Event;

/// A tracked task and the node rendering it.
struct Entry<N> {
    task: Task,
    list: TaskList,
    node: N,
}

pub struct TaskSynchronizer<B: TaskBackend, V: TaskView> {
    backend: B,
    view: RefCell<V>,
    entries: RefCell<HashMap<TaskId, Entry<V::Node>>>,
    dialogs: RefCell<DialogRegistry>,
    default_estimate: u32,
}

impl<B: TaskBackend, V: TaskView> TaskSynchronizer<B, V> {
    pub fn new(backend: B, view: V) -> Self {
        Self {
            backend,
            view: RefCell::new(view),
            entries: RefCell::new(HashMap::new()),
            dialogs: RefCell::new(DialogRegistry::new()),
            default_estimate: 1,
        }
    }

    /// Estimate sent with every new task (defaults to 1).
    pub fn with_default_estimate(mut self, estimated: u32) -> Self {
        self.default_estimate = estimated;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run `f` against the view.
    pub fn with_view<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        f(&self.view.borrow())
    }

    pub fn task(&self, id: TaskId) -> Option<Task> {
        self.entries.borrow().get(&id).map(|e| e.task.clone())
    }

    /// Which list the task's node is in, if it is tracked.
    pub fn list_of(&self, id: TaskId) -> Option<TaskList> {
        self.entries.borrow().get(&id).map(|e| e.list)
    }

    pub fn node(&self, id: TaskId) -> Option<V::Node> {
        self.entries.borrow().get(&id).map(|e| e.node.clone())
    }

    /// Ids of all tracked tasks, ascending.
    pub fn tracked(&self) -> Vec<TaskId> {
        let mut ids: Vec<TaskId> = self.entries.borrow().keys().copied().collect();
        ids.sort();
        ids
    }

    /// Task id the dialog would act on if confirmed now.
    pub fn pending(&self, dialog: DialogKind) -> Option<TaskId> {
        self.dialogs.borrow().pending(dialog)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Register a task that is already rendered (e.g. server-side markup).
    ///
    /// The node is assumed to sit in the list matching `task.completed`.
    /// Returns the node previously tracked under the same id.
    pub fn track(&self, task: Task, node: V::Node) -> Option<V::Node> {
        let list = TaskList::for_completed(task.completed);
        self.entries
            .borrow_mut()
            .insert(task.id, Entry { task, list, node })
            .map(|old| old.node)
    }

    /// Create a task on the server and append it to the active list.
    ///
    /// Blank descriptions are rejected without a request.
    pub async fn add_task(&self, description: &str) -> Result<Event, SyncError> {
        let description = description.trim();
        if description.is_empty() {
            tracing::debug!("ignoring blank task description");
            return Err(SyncError::EmptyDescription);
        }

        let request = AddTaskRequest {
            description: description.to_string(),
            estimated: self.default_estimate,
        };
        let response = self
            .backend
            .add_task(&request)
            .await
            .map_err(|e| failed("add", None, e))?;
        let error = response.error.clone();
        let Some(task) = response.into_task(description) else {
            return Err(failed("add", None, SyncError::rejected("add", error)));
        };

        let id = task.id;
        let event = Event::TaskAdded {
            id,
            description: task.description.clone(),
            assigned_by_admin: task.assigned_by_admin,
            at: Utc::now(),
        };
        {
            let mut view = self.view.borrow_mut();
            let node = view.create_node(&task);
            view.append(TaskList::Active, &node);
            view.clear_input();
            view.close_creation_dialog();

            let entry = Entry {
                task,
                list: TaskList::Active,
                node,
            };
            if let Some(stale) = self.entries.borrow_mut().insert(id, entry) {
                tracing::warn!(task = %id, "server reused a tracked task id; replacing node");
                view.remove(&stale.node);
            }
        }
        tracing::info!(task = %id, "task added");
        Ok(event)
    }

    /// Open the toggle dialog for `id`. Returns the superseded pending task.
    pub fn request_toggle(&self, id: TaskId) -> Option<TaskId> {
        self.open(DialogKind::Toggle, id)
    }

    /// Open the delete dialog for `id`. Returns the superseded pending task.
    pub fn request_delete(&self, id: TaskId) -> Option<TaskId> {
        self.open(DialogKind::Delete, id)
    }

    fn open(&self, dialog: DialogKind, id: TaskId) -> Option<TaskId> {
        let superseded = self.dialogs.borrow_mut().arm(dialog, id);
        self.view.borrow_mut().set_dialog_visible(dialog, true);
        tracing::debug!(?dialog, task = %id, ?superseded, "confirmation requested");
        superseded
    }

    /// Close `dialog` and run its pending action, if any.
    ///
    /// `Ok(None)` means nothing was pending (already confirmed or cancelled).
    pub async fn confirm(&self, dialog: DialogKind) -> Result<Option<Event>, SyncError> {
        let pending = self.dialogs.borrow_mut().take(dialog);
        self.view.borrow_mut().set_dialog_visible(dialog, false);
        let Some(id) = pending else {
            return Ok(None);
        };
        let event = match dialog {
            DialogKind::Toggle => self.toggle_task(id).await?,
            DialogKind::Delete => self.delete_task(id).await?,
        };
        Ok(Some(event))
    }

    /// Close `dialog` without sending anything. Returns the dropped task.
    pub fn cancel(&self, dialog: DialogKind) -> Option<TaskId> {
        let dropped = self.dialogs.borrow_mut().disarm(dialog);
        self.view.borrow_mut().set_dialog_visible(dialog, false);
        dropped
    }

    /// Flip completion on the server, then restyle and move the node to
    /// match the server-reported state.
    pub async fn toggle_task(&self, id: TaskId) -> Result<Event, SyncError> {
        let response = self
            .backend
            .toggle_task(id)
            .await
            .map_err(|e| failed("toggle", Some(id), e))?;
        if !response.success {
            return Err(failed("toggle", Some(id), SyncError::rejected("toggle", response.error)));
        }

        let completed = response.completed;
        let list = TaskList::for_completed(completed);
        let rendered = match self.entries.borrow_mut().get_mut(&id) {
            Some(entry) => {
                entry.task.completed = completed;
                entry.list = list;
                let mut view = self.view.borrow_mut();
                view.set_completed(&entry.node, completed);
                view.append(list, &entry.node);
                true
            }
            None => {
                tracing::debug!(task = %id, "toggle confirmed for untracked task");
                false
            }
        };
        tracing::info!(task = %id, completed, "task toggled");
        Ok(Event::TaskToggled {
            id,
            completed,
            list,
            rendered,
            at: Utc::now(),
        })
    }

    /// Delete on the server, then drop the node.
    pub async fn delete_task(&self, id: TaskId) -> Result<Event, SyncError> {
        let response = self
            .backend
            .delete_task(id)
            .await
            .map_err(|e| failed("delete", Some(id), e))?;
        if !response.success {
            return Err(failed("delete", Some(id), SyncError::rejected("delete", response.error)));
        }

        let removed = self.entries.borrow_mut().remove(&id);
        let rendered = match removed {
            Some(entry) => {
                self.view.borrow_mut().remove(&entry.node);
                true
            }
            None => {
                tracing::debug!(task = %id, "delete confirmed for untracked task");
                false
            }
        };
        tracing::info!(task = %id, "task deleted");
        Ok(Event::TaskDeleted {
            id,
            rendered,
            at: Utc::now(),
        })
    }
}

/// Log a failed operation and hand the error back.
fn failed(operation: &'static str, id: Option<TaskId>, err: SyncError) -> SyncError {
    let task = id.map(|id| id.to_string()).unwrap_or_default();
    if err.is_application_failure() {
        tracing::warn!(operation, task = %task, "{err}");
    } else {
        tracing::error!(operation, task = %task, "{err}");
    }
    err
}
