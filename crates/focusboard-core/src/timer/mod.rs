mod engine;
mod mode;
mod tick;

pub use engine::{TimerEngine, TimerState, TimerView, ToggleLabel};
pub use mode::{format_clock, Mode};
pub use tick::{ManualTicks, TickId, TickSource};
