//! Task rows and dialogs in the page.

use focusboard_core::tasks::{Task, TaskId, TaskList, TaskView};
use focusboard_core::DialogKind;
use wasm_bindgen::{JsValue, UnwrapThrowExt};
use web_sys::{Document, Element, HtmlInputElement};

use crate::dom;

pub const ACTIVE_LIST_ID: &str = "taskList";
pub const COMPLETED_LIST_ID: &str = "completedTaskList";
pub const ADD_FORM_ID: &str = "addTaskForm";
pub const DESCRIPTION_INPUT_ID: &str = "taskDescription";
pub const MODAL_ID: &str = "taskModal";

const DESC_CLASS: &str = "task-desc";
const DONE_CLASSES: [&str; 2] = ["line-through", "text-slate-400"];
const ADMIN_TITLE: &str = "Assigned by admin";

pub fn list_id(list: TaskList) -> &'static str {
    match list {
        TaskList::Active => ACTIVE_LIST_ID,
        TaskList::Completed => COMPLETED_LIST_ID,
    }
}

/// Which dialog a click on a row's `form.task-form` should open.
pub fn parse_form_id(form_id: &str) -> Option<(DialogKind, TaskId)> {
    let (dialog, rest) = if let Some(rest) = form_id.strip_prefix("toggle-task-") {
        (DialogKind::Toggle, rest)
    } else if let Some(rest) = form_id.strip_prefix("delete-task-") {
        (DialogKind::Delete, rest)
    } else {
        return None;
    };
    rest.parse().ok().map(|id| (dialog, TaskId(id)))
}

pub struct DomTaskView {
    document: Document,
    active: Element,
    completed: Element,
    input: HtmlInputElement,
    modal: Element,
    toggle_popup: Element,
    delete_popup: Element,
}

impl DomTaskView {
    pub fn new(document: Document) -> Result<Self, JsValue> {
        Ok(Self {
            active: dom::by_id(&document, ACTIVE_LIST_ID)?,
            completed: dom::by_id(&document, COMPLETED_LIST_ID)?,
            input: dom::input_by_id(&document, DESCRIPTION_INPUT_ID)?,
            modal: dom::by_id(&document, MODAL_ID)?,
            toggle_popup: dom::by_id(&document, DialogKind::Toggle.element_id())?,
            delete_popup: dom::by_id(&document, DialogKind::Delete.element_id())?,
            document,
        })
    }

    fn list(&self, list: TaskList) -> &Element {
        match list {
            TaskList::Active => &self.active,
            TaskList::Completed => &self.completed,
        }
    }

    fn element(&self, tag: &str, class: &str) -> Element {
        let element = self.document.create_element(tag).unwrap_throw();
        element.set_class_name(class);
        element
    }

    fn row_form(&self, prefix: &str, id: TaskId) -> Element {
        let form = self.element("form", "task-form");
        form.set_id(&format!("{prefix}-task-{id}"));
        let _ = form.set_attribute("data-task-id", &id.to_string());
        form
    }

    /// Reads a server-rendered row back into a task.
    pub fn read_row(row: &Element, list: TaskList) -> Option<Task> {
        let id = TaskId::from_dom_id(&row.id())?;
        let description = row
            .query_selector(&format!(".{DESC_CLASS}"))
            .ok()
            .flatten()
            .and_then(|desc| desc.text_content())
            .unwrap_or_default()
            .trim()
            .to_string();
        let assigned_by_admin = row
            .query_selector(&format!("[title='{ADMIN_TITLE}']"))
            .ok()
            .flatten()
            .is_some();
        Some(Task {
            id,
            description,
            completed: list == TaskList::Completed,
            assigned_by_admin,
            estimated: 1,
        })
    }

    /// Rows already present in `list` when the page loaded.
    pub fn rendered_rows(&self, list: TaskList) -> Vec<Element> {
        let children = self.list(list).children();
        (0..children.length()).filter_map(|i| children.item(i)).collect()
    }
}

impl TaskView for DomTaskView {
    type Node = Element;

    fn create_node(&mut self, task: &Task) -> Element {
        let row = self.element(
            "div",
            "flex items-center justify-between bg-white/70 rounded-xl border border-slate-200 p-3",
        );
        row.set_id(&task.id.dom_id());

        let left = self.element("div", "flex items-center gap-3");
        let toggle_form = self.row_form("toggle", task.id);
        let indicator = self.element(
            "button",
            "h-5 w-5 rounded-full border border-slate-300 flex items-center justify-center",
        );
        let _ = indicator.set_attribute("type", "button");
        let _ = toggle_form.append_child(&indicator);
        let _ = left.append_child(&toggle_form);

        let desc = self.element("span", DESC_CLASS);
        desc.set_text_content(Some(&task.description));
        let _ = left.append_child(&desc);

        if task.assigned_by_admin {
            let badge = self.element(
                "span",
                "ml-2 inline-flex items-center gap-1 text-[11px] px-2 py-0.5 rounded-full bg-amber-100 text-amber-700",
            );
            let _ = badge.set_attribute("title", ADMIN_TITLE);
            badge.set_text_content(Some("admin"));
            let _ = left.append_child(&badge);
        }
        let _ = row.append_child(&left);

        let delete_form = self.row_form("delete", task.id);
        let delete = self.element("button", "text-slate-500 hover:text-red-600");
        let _ = delete.set_attribute("type", "button");
        let _ = delete.set_attribute("title", "Delete");
        delete.set_text_content(Some("Delete"));
        let _ = delete_form.append_child(&delete);
        let _ = row.append_child(&delete_form);

        if task.completed {
            self.set_completed(&row, true);
        }
        row
    }

    fn append(&mut self, list: TaskList, node: &Element) {
        if let Err(err) = self.list(list).append_child(node) {
            tracing::error!(id = %node.id(), ?err, "could not move task row");
        }
    }

    fn set_completed(&mut self, node: &Element, completed: bool) {
        if let Ok(Some(indicator)) = node.query_selector("form button") {
            indicator.set_text_content(None);
            if completed {
                let dot = self.element("span", "h-3 w-3 rounded-full bg-accent-500 inline-block");
                let _ = indicator.append_child(&dot);
            }
        }
        if let Ok(Some(desc)) = node.query_selector(&format!(".{DESC_CLASS}")) {
            let classes = desc.class_list();
            let _ = if completed {
                classes.add_2(DONE_CLASSES[0], DONE_CLASSES[1])
            } else {
                classes.remove_2(DONE_CLASSES[0], DONE_CLASSES[1])
            };
        }
    }

    fn remove(&mut self, node: &Element) {
        node.remove();
    }

    fn clear_input(&mut self) {
        self.input.set_value("");
    }

    fn close_creation_dialog(&mut self) {
        dom::set_hidden(&self.modal, true);
    }

    fn set_dialog_visible(&mut self, dialog: DialogKind, visible: bool) {
        let popup = match dialog {
            DialogKind::Toggle => &self.toggle_popup,
            DialogKind::Delete => &self.delete_popup,
        };
        dom::set_hidden(popup, !visible);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_ids() {
        assert_eq!(parse_form_id("toggle-task-12"), Some((DialogKind::Toggle, TaskId(12))));
        assert_eq!(parse_form_id("delete-task-3"), Some((DialogKind::Delete, TaskId(3))));
        assert_eq!(parse_form_id("delete-task-x"), None);
        assert_eq!(parse_form_id("task-3"), None);
    }

    #[test]
    fn list_ids() {
        assert_eq!(list_id(TaskList::Active), "taskList");
        assert_eq!(list_id(TaskList::Completed), "completedTaskList");
    }
}
