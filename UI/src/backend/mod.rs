//! Backend trait and implementations for the question-answering REST API.

pub mod http;
pub mod mock;

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::models::{
    DirectoryRequest, DocumentSubmission, MessageResponse, ModelStatus, QueryRequest,
    QueryResult, SelectedFile, StatusReport,
};

pub use http::HttpBackend;
pub use mock::{Call, Endpoint, MockBackend};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    /// The request never produced a usable response: network failure or a
    /// body that is not the expected JSON.
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("server responded with HTTP {status}")]
    Rejected { status: u16, message: Option<String> },
}

impl BackendError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: Some(message.into()),
        }
    }

    /// The message the server attached to a rejection, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            Self::Transport(_) => None,
        }
    }
}

pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, BackendError>> + Send + 'a>>;

/// The REST surface the controller talks to.
pub trait Backend: Send + Sync {
    /// `GET /api/status`
    fn status(&self) -> BackendFuture<'_, StatusReport>;

    /// `POST /api/process`
    fn process_text<'a>(
        &'a self,
        submission: &'a DocumentSubmission,
    ) -> BackendFuture<'a, MessageResponse>;

    /// `POST /api/upload` as multipart with a single `file` field.
    fn upload_file<'a>(&'a self, file: &'a SelectedFile) -> BackendFuture<'a, MessageResponse>;

    /// `POST /api/query`
    fn query<'a>(&'a self, request: &'a QueryRequest) -> BackendFuture<'a, QueryResult>;

    /// `DELETE /api/clear`
    fn clear(&self) -> BackendFuture<'_, MessageResponse>;

    /// `GET /api/lm-status`
    fn model_status(&self) -> BackendFuture<'_, ModelStatus>;

    /// `POST /api/save`
    fn save<'a>(&'a self, request: &'a DirectoryRequest) -> BackendFuture<'a, MessageResponse>;

    /// `POST /api/load`
    fn load<'a>(&'a self, request: &'a DirectoryRequest) -> BackendFuture<'a, MessageResponse>;
}
