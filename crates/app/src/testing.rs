//! In-memory transport for operation tests.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

use thingif_domain::error::ThingIfError;
use thingif_domain::kii_app::{KiiApp, Site};

use crate::ports::{ApiRequest, ApiResponse, HttpTransport};

/// Records every request and answers with queued responses in order.
/// When the queue is empty it answers `204` with no body.
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<ApiResponse>>,
}

impl RecordingTransport {
    pub fn with_responses(responses: Vec<ApiResponse>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            responses: Mutex::new(responses.into()),
        }
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpTransport for RecordingTransport {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, ThingIfError>> + Send {
        self.requests.lock().unwrap().push(request);
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ApiResponse::new(204, None));
        async { Ok(response) }
    }
}

pub fn app() -> KiiApp {
    KiiApp::new("app-1", "key-1", Site::Jp).unwrap()
}

pub fn ok(body: serde_json::Value) -> ApiResponse {
    ApiResponse::new(200, Some(body))
}
