use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::backend::{Backend, BackendError};
use crate::config::UiConfig;
use crate::events::{Binding, EventKind, Source, UiEvent};
use crate::forms;
use crate::messages::{self, FailureText};
use crate::models::*;
use crate::notifications::Notifier;
use crate::page::{Element, NotificationKind, Page, Target, ACTIVE_CLASS, HIDDEN_CLASS};
use crate::render;

const PROCESSING_KEY: &str = "processing";
const UPLOADING_KEY: &str = "uploading";
const QUERYING_KEY: &str = "querying";
const SAVING_KEY: &str = "saving";
const LOADING_KEY: &str = "loading";

/// Re-entrancy flags, one per action that talks to the backend.
#[derive(Default)]
struct BusyFlags {
    text: AtomicBool,
    file: AtomicBool,
    query: AtomicBool,
    clear: AtomicBool,
    save: AtomicBool,
    load: AtomicBool,
}

/// Holds a busy flag for the duration of a request.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Wires the page to the backend.
///
/// Every handler runs one request/response cycle and reports the outcome
/// through notifications; none of them return errors to the host. The page
/// lock is never held across a backend call.
pub struct Controller<B: Backend, P: Page + 'static> {
    backend: Arc<B>,
    page: Arc<Mutex<P>>,
    notifier: Notifier<P>,
    default_top_k: u32,
    busy: BusyFlags,
}

impl<B: Backend, P: Page + 'static> Controller<B, P> {
    pub fn new(backend: Arc<B>, page: Arc<Mutex<P>>, config: &UiConfig) -> Self {
        let notifier = Notifier::new(Arc::clone(&page), config.notifications);
        Self {
            backend,
            page,
            notifier,
            default_top_k: config.default_top_k,
            busy: BusyFlags::default(),
        }
    }

    /// Page-load sequence: report which elements were found, then poll status.
    pub async fn start(&self) {
        {
            let page = self.page.lock().await;
            let missing: Vec<&str> = Element::ALL
                .iter()
                .filter(|element| !page.contains(**element))
                .map(|element| element.id())
                .collect();
            if missing.is_empty() {
                log::info!("All page elements bound");
            } else {
                log::warn!("Page elements not found: {}", missing.join(", "));
            }
            for form in [Element::TextForm, Element::FileForm, Element::QueryForm] {
                if !page.contains(form) {
                    log::error!("Form element '{}' not found", form.id());
                }
            }
        }

        self.refresh_status().await;
    }

    /// Every listener this controller installs on the page.
    ///
    /// Only elements present in the page get listeners.
    pub async fn bindings(&self) -> Vec<Binding> {
        let page = self.page.lock().await;
        let mut bindings: Vec<Binding> = page
            .tab_ids()
            .into_iter()
            .map(|id| {
                Binding::new(
                    Source::TabButton(id.clone()),
                    EventKind::Click,
                    UiEvent::TabClicked(id),
                )
            })
            .collect();

        let fixed = [
            (Element::FileInput, EventKind::Change, UiEvent::FileChanged),
            (Element::TextForm, EventKind::Submit, UiEvent::TextSubmitted),
            (Element::FileForm, EventKind::Submit, UiEvent::FileSubmitted),
            (Element::QueryForm, EventKind::Submit, UiEvent::QuerySubmitted),
            (Element::ClearButton, EventKind::Click, UiEvent::ClearClicked),
        ];
        bindings.extend(
            fixed
                .into_iter()
                .filter(|(element, _, _)| page.contains(*element))
                .map(|(element, kind, event)| Binding::new(Source::Element(element), kind, event)),
        );
        bindings
    }

    pub async fn dispatch(&self, event: UiEvent) {
        log::debug!("Dispatching {:?}", event);
        match event {
            UiEvent::TabClicked(tab) => self.switch_tab(&tab).await,
            UiEvent::FileChanged => self.file_changed().await,
            UiEvent::TextSubmitted => self.submit_text().await,
            UiEvent::FileSubmitted => self.submit_file().await,
            UiEvent::QuerySubmitted => self.submit_query().await,
            UiEvent::ClearClicked => self.clear().await,
            UiEvent::ModelStatusRequested => self.check_model_status().await,
            UiEvent::SaveRequested(directory) => self.save_knowledge_base(&directory).await,
            UiEvent::LoadRequested(directory) => self.load_knowledge_base(&directory).await,
        }
    }

    pub async fn refresh_status(&self) {
        let report = match self.backend.status().await {
            Ok(report) => Ok(report),
            // The server answered with a JSON body; it just isn't ready.
            Err(BackendError::Rejected { status, .. }) => {
                log::warn!("Status endpoint answered {}", status);
                Ok(StatusReport::default())
            }
            Err(err) => Err(err),
        };

        match report {
            Ok(report) => {
                let mut page = self.page.lock().await;
                let label = if report.is_ready() {
                    messages::STATUS_RUNNING
                } else {
                    messages::STATUS_STOPPED
                };
                let count = report.document_count.unwrap_or(0);
                page.set_text(Element::SystemStatus, label);
                page.set_text(Element::DocCount, &count.to_string());
                log::info!("Status: {} ({} documents)", report.status, count);
            }
            Err(err) => {
                log::error!("Failed to get system status: {}", err);
                self.page
                    .lock()
                    .await
                    .set_text(Element::SystemStatus, messages::STATUS_ERROR);
                self.notifier
                    .show(messages::CONNECTION_FAILED, NotificationKind::Error)
                    .await;
            }
        }
    }

    pub async fn switch_tab(&self, tab: &str) {
        let mut page = self.page.lock().await;
        for id in page.tab_ids() {
            page.remove_class(Target::TabButton(&id), ACTIVE_CLASS);
            page.remove_class(Target::TabPanel(&id), ACTIVE_CLASS);
        }
        page.add_class(Target::TabButton(tab), ACTIVE_CLASS);
        if !page.add_class(Target::TabPanel(tab), ACTIVE_CLASS) {
            log::warn!("Tab panel '{}' not found", tab);
        }
    }

    /// Mirrors the picked file's name into the file label.
    pub async fn file_changed(&self) {
        let mut page = self.page.lock().await;
        let label = page
            .selected_file()
            .map(|file| file.name)
            .unwrap_or_else(|| messages::NO_FILE_SELECTED.to_string());
        page.set_text(Element::FileName, &label);
    }

    pub async fn submit_text(&self) {
        let (text, source) = {
            let page = self.page.lock().await;
            (page.value(Element::TextInput), page.value(Element::TextSource))
        };
        let Some(text) = text else {
            log::error!("Text input element not found");
            self.error(messages::TEXT_INPUT_MISSING).await;
            return;
        };
        let Some(text) = forms::trimmed(Some(text)) else {
            self.warn(messages::TEXT_REQUIRED).await;
            return;
        };
        let Some(_busy) = BusyGuard::acquire(&self.busy.text) else {
            self.warn(messages::STILL_BUSY).await;
            return;
        };

        let submission = DocumentSubmission {
            text,
            metadata: SourceMetadata {
                source: forms::trimmed(source),
            },
        };
        log::debug!("Sending text processing request: {:?}", submission);

        self.notifier
            .show_keyed(PROCESSING_KEY, messages::PROCESSING, NotificationKind::Info)
            .await;
        let result = self.backend.process_text(&submission).await;
        let succeeded = match result {
            Ok(response) => {
                self.success(response.message, messages::TEXT_ADDED).await;
                let mut page = self.page.lock().await;
                page.set_value(Element::TextInput, "");
                page.set_value(Element::TextSource, "");
                true
            }
            Err(err) => {
                self.report(&err, &messages::PROCESS_FAILED).await;
                false
            }
        };
        self.notifier.dismiss(PROCESSING_KEY).await;

        if succeeded {
            self.refresh_status().await;
        }
    }

    pub async fn submit_file(&self) {
        let file = self.page.lock().await.selected_file();
        let Some(file) = file else {
            self.warn(messages::FILE_REQUIRED).await;
            return;
        };
        let Some(_busy) = BusyGuard::acquire(&self.busy.file) else {
            self.warn(messages::STILL_BUSY).await;
            return;
        };

        log::debug!("Uploading file: {}", file.name);
        self.notifier
            .show_keyed(UPLOADING_KEY, messages::UPLOADING, NotificationKind::Info)
            .await;
        let result = self.backend.upload_file(&file).await;
        let succeeded = match result {
            Ok(response) => {
                self.success(response.message, messages::FILE_UPLOADED).await;
                let mut page = self.page.lock().await;
                page.clear_selected_file();
                page.set_text(Element::FileName, messages::NO_FILE_SELECTED);
                true
            }
            Err(err) => {
                self.report(&err, &messages::UPLOAD_FAILED).await;
                false
            }
        };
        self.notifier.dismiss(UPLOADING_KEY).await;

        if succeeded {
            self.refresh_status().await;
        }
    }

    pub async fn submit_query(&self) {
        let (text, top_k) = {
            let page = self.page.lock().await;
            (page.value(Element::QueryInput), page.value(Element::TopK))
        };
        let Some(text) = text else {
            self.error(messages::QUERY_INPUT_MISSING).await;
            return;
        };
        let Some(text) = forms::trimmed(Some(text)) else {
            self.warn(messages::QUERY_REQUIRED).await;
            return;
        };
        let Some(_busy) = BusyGuard::acquire(&self.busy.query) else {
            self.warn(messages::STILL_BUSY).await;
            return;
        };

        let request = QueryRequest {
            text,
            top_k: forms::resolve_top_k(top_k.as_deref(), self.default_top_k),
        };
        log::debug!("Sending query: {:?}", request);

        self.notifier
            .show_keyed(QUERYING_KEY, messages::QUERYING, NotificationKind::Info)
            .await;
        self.hide_results().await;

        match self.backend.query(&request).await {
            Ok(result) => self.show_result(&result).await,
            Err(err) => self.report(&err, &messages::QUERY_FAILED).await,
        }
        self.notifier.dismiss(QUERYING_KEY).await;
    }

    pub async fn clear(&self) {
        let dialog = self.page.lock().await.confirm_dialog(messages::CLEAR_CONFIRM);
        if !dialog(messages::CLEAR_CONFIRM) {
            log::info!("Clearing the knowledge base was cancelled");
            return;
        }
        let Some(_busy) = BusyGuard::acquire(&self.busy.clear) else {
            self.warn(messages::STILL_BUSY).await;
            return;
        };

        match self.backend.clear().await {
            Ok(response) => {
                self.success(response.message, messages::KNOWLEDGE_BASE_CLEARED)
                    .await;
                self.hide_results().await;
                self.refresh_status().await;
            }
            Err(err) => self.report(&err, &messages::CLEAR_FAILED).await,
        }
    }

    pub async fn check_model_status(&self) {
        match self.backend.model_status().await {
            Ok(status) if status.connected => {
                let message = format!(
                    "Language model connected: {} ({})",
                    status.message, status.api_base
                );
                self.notifier.show(message, NotificationKind::Success).await;
            }
            Ok(status) => {
                let message = format!("Language model unavailable: {}", status.message);
                self.warn(&message).await;
            }
            Err(err) => {
                log::error!("Failed to check language model status: {}", err);
                self.error(messages::MODEL_STATUS_FAILED).await;
            }
        }
    }

    pub async fn save_knowledge_base(&self, directory: &str) {
        let Some(directory) = forms::trimmed(Some(directory.to_string())) else {
            self.warn(messages::DIRECTORY_REQUIRED).await;
            return;
        };
        let Some(_busy) = BusyGuard::acquire(&self.busy.save) else {
            self.warn(messages::STILL_BUSY).await;
            return;
        };

        self.notifier
            .show_keyed(SAVING_KEY, messages::SAVING, NotificationKind::Info)
            .await;
        match self.backend.save(&DirectoryRequest { directory }).await {
            Ok(response) => {
                self.success(response.message, messages::KNOWLEDGE_BASE_SAVED)
                    .await
            }
            Err(err) => self.report(&err, &messages::SAVE_FAILED).await,
        }
        self.notifier.dismiss(SAVING_KEY).await;
    }

    pub async fn load_knowledge_base(&self, directory: &str) {
        let Some(directory) = forms::trimmed(Some(directory.to_string())) else {
            self.warn(messages::DIRECTORY_REQUIRED).await;
            return;
        };
        let Some(_busy) = BusyGuard::acquire(&self.busy.load) else {
            self.warn(messages::STILL_BUSY).await;
            return;
        };

        self.notifier
            .show_keyed(LOADING_KEY, messages::LOADING, NotificationKind::Info)
            .await;
        let succeeded = match self.backend.load(&DirectoryRequest { directory }).await {
            Ok(response) => {
                self.success(response.message, messages::KNOWLEDGE_BASE_LOADED)
                    .await;
                true
            }
            Err(err) => {
                self.report(&err, &messages::LOAD_FAILED).await;
                false
            }
        };
        self.notifier.dismiss(LOADING_KEY).await;

        if succeeded {
            self.refresh_status().await;
        }
    }

    async fn show_result(&self, result: &QueryResult) {
        log::info!("Query answered with {} context items", result.context.len());
        let mut page = self.page.lock().await;

        if page.contains(Element::Answer) && page.contains(Element::AnswerContainer) {
            page.set_text(Element::Answer, &result.answer);
            page.remove_class(Target::Element(Element::AnswerContainer), HIDDEN_CLASS);
        }

        if page.contains(Element::Context) && page.contains(Element::ContextContainer) {
            page.replace_context(Vec::new());
            if !result.context.is_empty() {
                page.replace_context(render::render_context(&result.context));
                page.remove_class(Target::Element(Element::ContextContainer), HIDDEN_CLASS);
            }
        }
    }

    async fn hide_results(&self) {
        let mut page = self.page.lock().await;
        page.add_class(Target::Element(Element::AnswerContainer), HIDDEN_CLASS);
        page.add_class(Target::Element(Element::ContextContainer), HIDDEN_CLASS);
    }

    async fn success(&self, message: Option<String>, fallback: &str) {
        let message = message.unwrap_or_else(|| fallback.to_string());
        self.notifier.show(message, NotificationKind::Success).await;
    }

    async fn report(&self, err: &BackendError, text: &FailureText) {
        log::error!("{}: {}", text.transport, err);
        self.error(&text.describe(err)).await;
    }

    async fn warn(&self, message: &str) {
        self.notifier.show(message, NotificationKind::Warning).await;
    }

    async fn error(&self, message: &str) {
        self.notifier.show(message, NotificationKind::Error).await;
    }
}
