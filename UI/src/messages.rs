//! User-facing strings shown by the controller.

use crate::backend::BackendError;

pub const STATUS_RUNNING: &str = "Running";
pub const STATUS_STOPPED: &str = "Stopped";
pub const STATUS_ERROR: &str = "Error";
pub const CONNECTION_FAILED: &str =
    "Unable to connect to server, please check your network connection";

pub const NO_FILE_SELECTED: &str = "No file selected";

pub const TEXT_INPUT_MISSING: &str = "Error: Text input element not found";
pub const TEXT_REQUIRED: &str = "Please enter text content";
pub const FILE_REQUIRED: &str = "Please select a file";
pub const QUERY_INPUT_MISSING: &str = "Query input element not found";
pub const QUERY_REQUIRED: &str = "Please enter a query";
pub const DIRECTORY_REQUIRED: &str = "Please enter a directory";
pub const STILL_BUSY: &str = "Please wait for the current request to finish";

pub const PROCESSING: &str = "Processing...";
pub const UPLOADING: &str = "Uploading...";
pub const QUERYING: &str = "Querying...";
pub const SAVING: &str = "Saving...";
pub const LOADING: &str = "Loading...";

pub const TEXT_ADDED: &str = "Text added to the knowledge base";
pub const FILE_UPLOADED: &str = "File uploaded";
pub const KNOWLEDGE_BASE_CLEARED: &str = "Knowledge base cleared";
pub const KNOWLEDGE_BASE_SAVED: &str = "Knowledge base saved";
pub const KNOWLEDGE_BASE_LOADED: &str = "Knowledge base loaded";

pub const CLEAR_CONFIRM: &str =
    "Are you sure you want to clear the knowledge base? This action cannot be undone.";

pub const MODEL_STATUS_FAILED: &str = "Unable to check language model status";

/// How a failed request is reported to the user.
#[derive(Debug, Clone, Copy)]
pub struct FailureText {
    /// Shown when the server rejected the request without a message.
    pub rejected: &'static str,
    /// Shown on transport failures.
    pub transport: &'static str,
    /// Append the transport error's own message after the text.
    pub with_detail: bool,
}

impl FailureText {
    pub fn describe(&self, err: &BackendError) -> String {
        match err {
            BackendError::Rejected { message, .. } => message
                .clone()
                .unwrap_or_else(|| self.rejected.to_string()),
            BackendError::Transport(detail) if self.with_detail => {
                format!("{}: {}", self.transport, detail)
            }
            BackendError::Transport(_) => self.transport.to_string(),
        }
    }
}

pub const PROCESS_FAILED: FailureText = FailureText {
    rejected: "Failed to process text",
    transport: "Error adding text",
    with_detail: true,
};

pub const UPLOAD_FAILED: FailureText = FailureText {
    rejected: "Failed to upload file",
    transport: "Error uploading file",
    with_detail: true,
};

pub const QUERY_FAILED: FailureText = FailureText {
    rejected: "Query failed",
    transport: "Error during query",
    with_detail: true,
};

pub const CLEAR_FAILED: FailureText = FailureText {
    rejected: "Failed to clear knowledge base",
    transport: "Error clearing knowledge base",
    with_detail: false,
};

pub const SAVE_FAILED: FailureText = FailureText {
    rejected: "Failed to save knowledge base",
    transport: "Error saving knowledge base",
    with_detail: true,
};

pub const LOAD_FAILED: FailureText = FailureText {
    rejected: "Failed to load knowledge base",
    transport: "Error loading knowledge base",
    with_detail: true,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_prefers_server_message() {
        let err = BackendError::rejected(500, "bad file");
        assert_eq!(UPLOAD_FAILED.describe(&err), "bad file");

        let bare = BackendError::Rejected {
            status: 500,
            message: None,
        };
        assert_eq!(UPLOAD_FAILED.describe(&bare), "Failed to upload file");
    }

    #[test]
    fn transport_failure_appends_detail_when_asked() {
        let err = BackendError::Transport("connection refused".to_string());
        assert_eq!(
            PROCESS_FAILED.describe(&err),
            "Error adding text: connection refused"
        );
        assert_eq!(CLEAR_FAILED.describe(&err), "Error clearing knowledge base");
    }
}
