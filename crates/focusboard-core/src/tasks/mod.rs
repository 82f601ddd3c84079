//! Task list synchronization against the remote task store.

mod backend;
#[cfg(feature = "http")]
mod http;
mod model;
mod synchronizer;
mod view;


pub use backend::{delete_task_path, toggle_task_path, TaskBackend, ADD_TASK_PATH, REQUESTED_WITH};
#[cfg(feature = "http")]
pub use http::HttpTaskBackend;
pub use model::{
    AddTaskRequest, AddTaskResponse, DeleteTaskResponse, Task, TaskId, TaskList, ToggleTaskResponse,
};
pub use synchronizer::TaskSynchronizer;
pub use view::TaskView;
