//! Timer rendering and ticking in the browser.

use std::rc::Rc;

use focusboard_core::timer::{Mode, TickId, TickSource, TimerView, ToggleLabel};
use gloo::timers::callback::Interval;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::dom;

pub const CLOCK_ID: &str = "timer";
pub const TOGGLE_ID: &str = "startBtn";
pub const TAB_CLASS: &str = "tab";
const ACTIVE_TAB_CLASS: &str = "active-tab";

pub struct DomTimerView {
    document: Document,
    clock: Element,
    toggle: Element,
}

impl DomTimerView {
    pub fn new(document: Document) -> Result<Self, JsValue> {
        let clock = dom::by_id(&document, CLOCK_ID)?;
        let toggle = dom::by_id(&document, TOGGLE_ID)?;
        Ok(Self {
            document,
            clock,
            toggle,
        })
    }
}

impl TimerView for DomTimerView {
    fn render_clock(&mut self, text: &str) {
        self.clock.set_text_content(Some(text));
    }

    fn set_toggle_label(&mut self, label: ToggleLabel) {
        self.toggle.set_text_content(Some(label.as_str()));
    }

    fn highlight_mode(&mut self, mode: Mode) {
        for tab in dom::select_all(&self.document, &format!(".{TAB_CLASS}")) {
            let _ = tab.class_list().remove_1(ACTIVE_TAB_CLASS);
        }
        match self.document.get_element_by_id(&mode.button_id()) {
            Some(button) => {
                let _ = button.class_list().add_1(ACTIVE_TAB_CLASS);
            }
            None => tracing::warn!(mode = %mode, "no button for mode"),
        }
    }

    fn notify_complete(&mut self, _mode: Mode) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message("Time's up");
        }
    }
}

/// `setInterval`-backed tick source. Dropping the handle clears the interval.
pub struct IntervalTicks {
    on_tick: Rc<dyn Fn(TickId)>,
}

impl IntervalTicks {
    pub fn new(on_tick: impl Fn(TickId) + 'static) -> Self {
        Self {
            on_tick: Rc::new(on_tick),
        }
    }
}

impl TickSource for IntervalTicks {
    type Handle = Interval;

    fn start(&mut self, id: TickId) -> Interval {
        let on_tick = Rc::clone(&self.on_tick);
        Interval::new(1_000, move || on_tick(id))
    }

    fn cancel(&mut self, handle: Interval) {
        drop(handle);
    }
}
