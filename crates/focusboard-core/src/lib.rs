//! # Focusboard Core Library
//!
//! Stateful core of the Focusboard widget: a countdown timer with three
//! fixed modes and a task list kept in step with a remote task store.
//! Hosts (the browser build, the terminal CLI) supply the rendering
//! surface, the tick source and the HTTP transport through traits; all
//! ordering rules live here.
//!
//! ## Architecture
//!
//! - **Timer Engine**: two-state countdown machine that owns the only
//!   handle to its tick source
//! - **Task Synchronizer**: applies task changes to the view only after the
//!   backend confirms them
//! - **Dialogs**: registry of pending confirmation actions
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`TaskSynchronizer`]: Server-confirmed task list
//! - [`DialogRegistry`]: One pending action per confirmation dialog
//! - [`Config`]: Application configuration management

pub mod dialog;
pub mod error;
pub mod events;
pub mod storage;
pub mod tasks;
pub mod timer;

pub use dialog::{DialogKind, DialogRegistry};
pub use error::{ConfigError, CoreError, SyncError};
pub use events::Event;
pub use storage::Config;
#[cfg(feature = "http")]
pub use tasks::HttpTaskBackend;
pub use tasks::{Task, TaskBackend, TaskId, TaskList, TaskSynchronizer, TaskView};
pub use timer::{Mode, TickId, TickSource, TimerEngine, TimerState, TimerView, ToggleLabel};
