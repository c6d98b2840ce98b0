//! Mock backend for tests and offline runs.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::{Backend, BackendError, BackendFuture};
use crate::models::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Status,
    Process,
    Upload,
    Query,
    Clear,
    ModelStatus,
    Save,
    Load,
}

/// A request the mock received, with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Status,
    Process(DocumentSubmission),
    Upload(SelectedFile),
    Query(QueryRequest),
    Clear,
    ModelStatus,
    Save(DirectoryRequest),
    Load(DirectoryRequest),
}

impl Call {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Call::Status => Endpoint::Status,
            Call::Process(_) => Endpoint::Process,
            Call::Upload(_) => Endpoint::Upload,
            Call::Query(_) => Endpoint::Query,
            Call::Clear => Endpoint::Clear,
            Call::ModelStatus => Endpoint::ModelStatus,
            Call::Save(_) => Endpoint::Save,
            Call::Load(_) => Endpoint::Load,
        }
    }
}

/// A hand-rolled [`Backend`] that answers every endpoint with a canned JSON
/// value (or error) and records each call.
///
/// Responses are stored as JSON so tests can hand in exactly what a server
/// would send, including bodies that fail to decode.
pub struct MockBackend {
    responses: Mutex<HashMap<Endpoint, Result<Value, BackendError>>>,
    calls: Mutex<Vec<Call>>,
    delay: Option<Duration>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// A mock with a ready, empty knowledge base and successful mutations.
    pub fn new() -> Self {
        let mut responses = HashMap::new();
        responses.insert(
            Endpoint::Status,
            Ok(json!({ "status": "ready", "document_count": 0 })),
        );
        responses.insert(Endpoint::Process, Ok(json!({ "message": "Processed" })));
        responses.insert(Endpoint::Upload, Ok(json!({ "message": "Uploaded" })));
        responses.insert(
            Endpoint::Query,
            Ok(json!({ "answer": "No relevant information found.", "context": [] })),
        );
        responses.insert(
            Endpoint::Clear,
            Ok(json!({ "message": "All documents have been cleared" })),
        );
        responses.insert(
            Endpoint::ModelStatus,
            Ok(json!({ "connected": true, "message": "ok", "api_base": "http://127.0.0.1:1234" })),
        );
        responses.insert(Endpoint::Save, Ok(json!({ "message": "Saved" })));
        responses.insert(Endpoint::Load, Ok(json!({ "message": "Loaded" })));

        Self {
            responses: Mutex::new(responses),
            calls: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// Set simulated network latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn respond(&self, endpoint: Endpoint, response: Result<Value, BackendError>) {
        self.responses.lock().unwrap().insert(endpoint, response);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, endpoint: Endpoint) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| call.endpoint() == endpoint)
            .count()
    }

    fn answer<T>(&self, call: Call) -> BackendFuture<'_, T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let endpoint = call.endpoint();
        self.calls.lock().unwrap().push(call);
        let response = self
            .responses
            .lock()
            .unwrap()
            .get(&endpoint)
            .cloned()
            .unwrap_or_else(|| Err(BackendError::Transport("no mock response".to_string())));
        let delay = self.delay;

        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            let value = response?;
            serde_json::from_value(value)
                .map_err(|e| BackendError::Transport(format!("invalid response body: {e}")))
        })
    }
}

impl Backend for MockBackend {
    fn status(&self) -> BackendFuture<'_, StatusReport> {
        self.answer(Call::Status)
    }

    fn process_text<'a>(
        &'a self,
        submission: &'a DocumentSubmission,
    ) -> BackendFuture<'a, MessageResponse> {
        self.answer(Call::Process(submission.clone()))
    }

    fn upload_file<'a>(&'a self, file: &'a SelectedFile) -> BackendFuture<'a, MessageResponse> {
        self.answer(Call::Upload(file.clone()))
    }

    fn query<'a>(&'a self, request: &'a QueryRequest) -> BackendFuture<'a, QueryResult> {
        self.answer(Call::Query(request.clone()))
    }

    fn clear(&self) -> BackendFuture<'_, MessageResponse> {
        self.answer(Call::Clear)
    }

    fn model_status(&self) -> BackendFuture<'_, ModelStatus> {
        self.answer(Call::ModelStatus)
    }

    fn save<'a>(&'a self, request: &'a DirectoryRequest) -> BackendFuture<'a, MessageResponse> {
        self.answer(Call::Save(request.clone()))
    }

    fn load<'a>(&'a self, request: &'a DirectoryRequest) -> BackendFuture<'a, MessageResponse> {
        self.answer(Call::Load(request.clone()))
    }
}
