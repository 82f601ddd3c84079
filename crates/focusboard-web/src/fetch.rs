//! `TaskBackend` over the browser's `fetch`.

use focusboard_core::tasks::{
    delete_task_path, toggle_task_path, AddTaskRequest, AddTaskResponse, DeleteTaskResponse,
    TaskBackend, TaskId, ToggleTaskResponse, ADD_TASK_PATH, REQUESTED_WITH,
};
use focusboard_core::SyncError;
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

/// Posts to the backend the page was served from.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchBackend;

/// A request ready to hand to `fetch`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Outgoing {
    path: String,
    body: String,
}

/// Toggle and delete carry no fields but still post a JSON object.
const EMPTY_BODY: &str = "{}";

impl FetchBackend {
    pub fn same_origin() -> Self {
        Self
    }

    fn add_request(request: &AddTaskRequest) -> Result<Outgoing, SyncError> {
        let body = serde_json::to_string(request)
            .map_err(|e| SyncError::Transport(format!("could not encode request: {e}")))?;
        Ok(Outgoing {
            path: ADD_TASK_PATH.to_string(),
            body,
        })
    }

    fn toggle_request(id: TaskId) -> Outgoing {
        Outgoing {
            path: toggle_task_path(id),
            body: EMPTY_BODY.to_string(),
        }
    }

    fn delete_request(id: TaskId) -> Outgoing {
        Outgoing {
            path: delete_task_path(id),
            body: EMPTY_BODY.to_string(),
        }
    }

    async fn post<T: DeserializeOwned>(&self, outgoing: Outgoing) -> Result<T, SyncError> {
        let Outgoing { path, body } = outgoing;
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(&path, &init).map_err(transport)?;
        let headers = request.headers();
        headers.set("Content-Type", "application/json").map_err(transport)?;
        headers.set("X-Requested-With", REQUESTED_WITH).map_err(transport)?;

        let window = web_sys::window().ok_or_else(|| SyncError::Transport("no window".into()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(transport)?
            .dyn_into()
            .map_err(transport)?;
        let status = response.status();
        let text = JsFuture::from(response.text().map_err(transport)?)
            .await
            .map_err(transport)?
            .as_string()
            .unwrap_or_default();

        tracing::debug!(%path, status, "backend responded");
        serde_json::from_str(&text).map_err(|source| SyncError::Decode { status, source })
    }
}

fn transport(err: JsValue) -> SyncError {
    SyncError::Transport(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

impl TaskBackend for FetchBackend {
    async fn add_task(&self, request: &AddTaskRequest) -> Result<AddTaskResponse, SyncError> {
        self.post(Self::add_request(request)?).await
    }

    async fn toggle_task(&self, id: TaskId) -> Result<ToggleTaskResponse, SyncError> {
        self.post(Self::toggle_request(id)).await
    }

    async fn delete_task(&self, id: TaskId) -> Result<DeleteTaskResponse, SyncError> {
        self.post(Self::delete_request(id)).await
    }
}
