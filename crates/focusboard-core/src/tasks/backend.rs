//! The three backend endpoints the synchronizer depends on.

use super::model::{AddTaskRequest, AddTaskResponse, DeleteTaskResponse, TaskId, ToggleTaskResponse};
use crate::error::SyncError;

pub const ADD_TASK_PATH: &str = "/add_task";

pub fn toggle_task_path(id: TaskId) -> String {
    format!("/toggle_task/{id}")
}

pub fn delete_task_path(id: TaskId) -> String {
    format!("/delete_task/{id}")
}

/// Header value marking requests as coming from the page script rather than
/// a full-page form post.
pub const REQUESTED_WITH: &str = "XMLHttpRequest";

/// Remote task store.
///
/// Implementations perform exactly one request per call. `Err` means the
/// request produced no decodable body (network failure, non-JSON answer);
/// a decoded body that reports failure is returned as `Ok` and judged by
/// the caller.
#[allow(async_fn_in_trait)]
pub trait TaskBackend {
    async fn add_task(&self, request: &AddTaskRequest) -> Result<AddTaskResponse, SyncError>;

    async fn toggle_task(&self, id: TaskId) -> Result<ToggleTaskResponse, SyncError>;

    async fn delete_task(&self, id: TaskId) -> Result<DeleteTaskResponse, SyncError>;
}

impl<B: TaskBackend> TaskBackend for &B {
    async fn add_task(&self, request: &AddTaskRequest) -> Result<AddTaskResponse, SyncError> {
        (**self).add_task(request).await
    }

    async fn toggle_task(&self, id: TaskId) -> Result<ToggleTaskResponse, SyncError> {
        (**self).toggle_task(id).await
    }

    async fn delete_task(&self, id: TaskId) -> Result<DeleteTaskResponse, SyncError> {
        (**self).delete_task(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_paths() {
        assert_eq!(toggle_task_path(TaskId(42)), "/toggle_task/42");
        assert_eq!(delete_task_path(TaskId(7)), "/delete_task/7");
    }
}
