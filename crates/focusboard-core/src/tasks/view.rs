//! The parts of the page the task synchronizer writes to.

use super::model::{Task, TaskList};
use crate::dialog::DialogKind;

/// Rendering surface for tasks.
///
/// `Node` is whatever handle the host uses for a rendered task (a DOM
/// element in the browser). The synchronizer keeps one per tracked task and
/// never looks nodes up by string.
pub trait TaskView {
    type Node: Clone;

    /// Build a node for a task that is not yet in the page.
    fn create_node(&mut self, task: &Task) -> Self::Node;

    /// Append `node` as the last child of `list`, detaching it from
    /// wherever it was.
    fn append(&mut self, list: TaskList, node: &Self::Node);

    /// Update the completion indicator and strikethrough.
    fn set_completed(&mut self, node: &Self::Node, completed: bool);

    /// Remove `node` from the page.
    fn remove(&mut self, node: &Self::Node);

    /// Empty the task creation input.
    fn clear_input(&mut self);

    /// Hide the task creation modal.
    fn close_creation_dialog(&mut self);

    fn set_dialog_visible(&mut self, dialog: DialogKind, visible: bool);
}
