use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Body of `POST /api/process`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSubmission {
    pub text: String,
    pub metadata: SourceMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub text: String,
    pub top_k: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub query: Option<String>,
    pub answer: String,
    #[serde(default)]
    pub context: Vec<ContextItem>,
}

/// One retrieved snippet, ranked by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextItem {
    pub score: f64,
    pub text: String,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

impl ContextItem {
    /// The `source` metadata field, when the backend sent one.
    pub fn source(&self) -> Option<String> {
        let value = self.metadata.as_ref()?.get("source")?;
        match value {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Body of `GET /api/status`. Any JSON object reads as a report; missing
/// fields mean "not ready, no documents".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusReport {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub document_count: Option<u64>,
}

impl StatusReport {
    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body the backend attaches to non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelStatus {
    pub connected: bool,
    pub message: String,
    pub api_base: String,
}

/// Body of `POST /api/save` and `POST /api/load`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryRequest {
    pub directory: String,
}

/// A file picked in the upload form.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn submission_omits_absent_source() {
        let body = DocumentSubmission {
            text: "hello".to_string(),
            metadata: SourceMetadata::default(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "text": "hello", "metadata": {} })
        );
    }

    #[test]
    fn status_without_count_reads_as_none() {
        let status: StatusReport = serde_json::from_value(json!({ "status": "ready" })).unwrap();
        assert!(status.is_ready());
        assert_eq!(status.document_count, None);
    }

    #[test]
    fn context_source_accepts_non_string_values() {
        let item: ContextItem = serde_json::from_value(json!({
            "score": 0.5,
            "text": "t",
            "metadata": { "source": 42, "type": "txt" }
        }))
        .unwrap();
        assert_eq!(item.source().as_deref(), Some("42"));

        let bare: ContextItem =
            serde_json::from_value(json!({ "score": 0.5, "text": "t" })).unwrap();
        assert_eq!(bare.source(), None);
    }

    #[test]
    fn falsy_sources_are_skipped() {
        for source in [json!(false), json!(0), json!(0.0), json!(""), json!(null)] {
            let item: ContextItem = serde_json::from_value(json!({
                "score": 0.5,
                "text": "t",
                "metadata": { "source": source }
            }))
            .unwrap();
            assert_eq!(item.source(), None, "source {source}");
        }
    }

    #[test]
    fn empty_status_body_is_not_ready() {
        let status: StatusReport = serde_json::from_value(json!({})).unwrap();
        assert!(!status.is_ready());
        assert_eq!(status.document_count, None);
    }
}
