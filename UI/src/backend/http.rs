use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use super::{Backend, BackendError, BackendFuture};
use crate::config::UiConfig;
use crate::models::*;

/// [`Backend`] over HTTP, resolving `/api/*` paths against a base URL.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &UiConfig) -> Result<Self, BackendError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        Ok(Self::with_client(client, &config.base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let url = self.url(path);
        log::debug!("GET {}", url);
        let response = self.client.get(&url).send().await.map_err(transport)?;
        decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, BackendError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        log::debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        decode(response).await
    }
}

fn transport(err: reqwest::Error) -> BackendError {
    BackendError::Transport(err.to_string())
}

/// Decodes a 2xx body into `T`; anything else becomes a [`BackendError`].
/// Error bodies must still be JSON, otherwise the failure is a transport one.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let status = response.status();
    let body = response.bytes().await.map_err(transport)?;
    log::debug!("Response status: {}", status);

    if status.is_success() {
        return serde_json::from_slice(&body)
            .map_err(|e| BackendError::Transport(format!("invalid response body: {e}")));
    }

    let error: ErrorBody = serde_json::from_slice(&body)
        .map_err(|e| BackendError::Transport(format!("invalid response body: {e}")))?;
    log::warn!(
        "Backend rejected request with HTTP {}: {:?}",
        status.as_u16(),
        error.message
    );
    Err(BackendError::Rejected {
        status: status.as_u16(),
        message: error.message,
    })
}

impl Backend for HttpBackend {
    fn status(&self) -> BackendFuture<'_, StatusReport> {
        Box::pin(self.get("/api/status"))
    }

    fn process_text<'a>(
        &'a self,
        submission: &'a DocumentSubmission,
    ) -> BackendFuture<'a, MessageResponse> {
        Box::pin(self.post_json("/api/process", submission))
    }

    fn upload_file<'a>(&'a self, file: &'a SelectedFile) -> BackendFuture<'a, MessageResponse> {
        Box::pin(async move {
            let url = self.url("/api/upload");
            log::debug!("POST {} ({}, {} bytes)", url, file.name, file.bytes.len());
            let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
            let form = Form::new().part("file", part);
            let response = self
                .client
                .post(&url)
                .multipart(form)
                .send()
                .await
                .map_err(transport)?;
            decode(response).await
        })
    }

    fn query<'a>(&'a self, request: &'a QueryRequest) -> BackendFuture<'a, QueryResult> {
        Box::pin(self.post_json("/api/query", request))
    }

    fn clear(&self) -> BackendFuture<'_, MessageResponse> {
        Box::pin(async move {
            let url = self.url("/api/clear");
            log::debug!("DELETE {}", url);
            let response = self.client.delete(&url).send().await.map_err(transport)?;
            decode(response).await
        })
    }

    fn model_status(&self) -> BackendFuture<'_, ModelStatus> {
        Box::pin(self.get("/api/lm-status"))
    }

    fn save<'a>(&'a self, request: &'a DirectoryRequest) -> BackendFuture<'a, MessageResponse> {
        Box::pin(self.post_json("/api/save", request))
    }

    fn load<'a>(&'a self, request: &'a DirectoryRequest) -> BackendFuture<'a, MessageResponse> {
        Box::pin(self.post_json("/api/load", request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let backend = HttpBackend::with_client(Client::new(), "http://localhost:8000/");
        assert_eq!(backend.base_url(), "http://localhost:8000");
        assert_eq!(backend.url("/api/status"), "http://localhost:8000/api/status");
    }
}
