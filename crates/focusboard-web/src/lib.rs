//! # Focusboard Web
//!
//! Browser host for the Focusboard core. On load it binds the timer engine
//! and the task synchronizer to the page markup, adopts the task rows the
//! server already rendered, and wires every control exactly once.

mod dom;
mod fetch;
mod task_view;
mod timer_view;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use focusboard_core::tasks::{TaskList, TaskSynchronizer};
use focusboard_core::timer::{Mode, TimerEngine};
use focusboard_core::{DialogKind, Event};
use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget};

pub use fetch::FetchBackend;
pub use task_view::DomTaskView;
pub use timer_view::{DomTimerView, IntervalTicks};

type Engine = TimerEngine<IntervalTicks, DomTimerView>;
type Board = TaskSynchronizer<FetchBackend, DomTaskView>;

const RESET_ID: &str = "resetBtn";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    wasm_tracing::set_as_global_default();

    let document = dom::document()?;
    mount_timer(&document)?;
    let board = mount_tasks(&document)?;

    tracing::info!(tasks = board.tracked().len(), "focusboard mounted");
    Ok(())
}

/// Show the task creation modal.
#[wasm_bindgen(js_name = openTaskModal)]
pub fn open_task_modal() -> Result<(), JsValue> {
    let document = dom::document()?;
    dom::set_hidden(&dom::by_id(&document, task_view::MODAL_ID)?, false);
    Ok(())
}

/// Hide the task creation modal without submitting.
#[wasm_bindgen(js_name = closeTaskModal)]
pub fn close_task_modal() -> Result<(), JsValue> {
    let document = dom::document()?;
    dom::set_hidden(&dom::by_id(&document, task_view::MODAL_ID)?, true);
    Ok(())
}

fn log_event(event: Option<Event>) {
    if let Some(event) = event {
        tracing::info!(kind = event.kind(), "{}", serde_json::to_string(&event).unwrap_or_default());
    }
}

/// Listeners live as long as the page.
fn listen(target: &EventTarget, event: &'static str, callback: impl FnMut(&web_sys::Event) + 'static) {
    EventListener::new(target, event, callback).forget();
}

fn mount_timer(document: &Document) -> Result<Rc<RefCell<Engine>>, JsValue> {
    let view = DomTimerView::new(document.clone())?;
    let engine = Rc::new_cyclic(|weak: &Weak<RefCell<Engine>>| {
        let weak = weak.clone();
        let ticks = IntervalTicks::new(move |id| {
            if let Some(engine) = weak.upgrade() {
                let event = engine.borrow_mut().on_tick(id);
                log_event(event);
            }
        });
        RefCell::new(TimerEngine::new(Mode::default(), ticks, view))
    });

    let toggle = dom::by_id(document, timer_view::TOGGLE_ID)?;
    let handle = Rc::clone(&engine);
    listen(&toggle, "click", move |_| {
        let event = handle.borrow_mut().toggle_running();
        log_event(event);
    });

    for button in dom::select_all(document, &format!(".{}", timer_view::TAB_CLASS)) {
        let Some(mode) = Mode::from_button_id(&button.id()) else {
            tracing::warn!(id = %button.id(), "tab is not a mode button");
            continue;
        };
        let handle = Rc::clone(&engine);
        listen(&button, "click", move |_| {
            let event = handle.borrow_mut().set_mode(mode);
            log_event(event);
        });
    }

    if let Some(reset) = document.get_element_by_id(RESET_ID) {
        let handle = Rc::clone(&engine);
        listen(&reset, "click", move |_| {
            let event = handle.borrow_mut().reset();
            log_event(event);
        });
    }

    Ok(engine)
}

fn mount_tasks(document: &Document) -> Result<Rc<Board>, JsValue> {
    let view = DomTaskView::new(document.clone())?;
    let rows: Vec<_> = [TaskList::Active, TaskList::Completed]
        .into_iter()
        .flat_map(|list| view.rendered_rows(list).into_iter().map(move |row| (list, row)))
        .collect();

    let board = Rc::new(TaskSynchronizer::new(FetchBackend::same_origin(), view));
    for (list, row) in rows {
        match DomTaskView::read_row(&row, list) {
            Some(task) => {
                board.track(task, row);
            }
            None => tracing::debug!(id = %row.id(), "skipping non-task row"),
        }
    }

    // One delegated listener per list covers rows added later.
    for list in [TaskList::Active, TaskList::Completed] {
        let element = dom::by_id(document, task_view::list_id(list))?;
        let board = Rc::clone(&board);
        listen(&element, "click", move |event| {
            let Some((dialog, id)) = clicked_row_action(event) else {
                return;
            };
            match dialog {
                DialogKind::Toggle => board.request_toggle(id),
                DialogKind::Delete => board.request_delete(id),
            };
        });
    }

    for dialog in DialogKind::ALL {
        let confirm = dom::by_id(document, dialog.confirm_button_id())?;
        let handle = Rc::clone(&board);
        listen(&confirm, "click", move |_| {
            let board = Rc::clone(&handle);
            wasm_bindgen_futures::spawn_local(async move {
                // Failures are logged by the synchronizer.
                if let Ok(event) = board.confirm(dialog).await {
                    log_event(event);
                }
            });
        });

        let cancel = dom::by_id(document, dialog.cancel_button_id())?;
        let handle = Rc::clone(&board);
        listen(&cancel, "click", move |_| {
            handle.cancel(dialog);
        });
    }

    let form = dom::by_id(document, task_view::ADD_FORM_ID)?;
    let input = dom::input_by_id(document, task_view::DESCRIPTION_INPUT_ID)?;
    let handle = Rc::clone(&board);
    listen(&form, "submit", move |event| {
        event.prevent_default();
        let description = input.value();
        let board = Rc::clone(&handle);
        wasm_bindgen_futures::spawn_local(async move {
            if let Ok(event) = board.add_task(&description).await {
                log_event(Some(event));
            }
        });
    });

    Ok(board)
}

fn clicked_row_action(event: &web_sys::Event) -> Option<(DialogKind, focusboard_core::TaskId)> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let form = target.closest("form.task-form").ok()??;
    task_view::parse_form_id(&form.id())
}
