//! The host page the controller drives.
//!
//! Elements are addressed by the ids the page markup carries. Every method is
//! a no-op (or returns `false`/`None`) when the element is missing, so hosts
//! with partial markup degrade instead of failing.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::SelectedFile;

pub const ACTIVE_CLASS: &str = "active";
pub const HIDDEN_CLASS: &str = "hidden";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    SystemStatus,
    DocCount,
    ClearButton,
    TextForm,
    TextInput,
    TextSource,
    FileForm,
    FileInput,
    FileName,
    QueryForm,
    QueryInput,
    TopK,
    AnswerContainer,
    Answer,
    ContextContainer,
    Context,
    Notifications,
}

impl Element {
    pub const ALL: [Element; 17] = [
        Element::SystemStatus,
        Element::DocCount,
        Element::ClearButton,
        Element::TextForm,
        Element::TextInput,
        Element::TextSource,
        Element::FileForm,
        Element::FileInput,
        Element::FileName,
        Element::QueryForm,
        Element::QueryInput,
        Element::TopK,
        Element::AnswerContainer,
        Element::Answer,
        Element::ContextContainer,
        Element::Context,
        Element::Notifications,
    ];

    /// The DOM id the element carries in the page markup.
    pub fn id(self) -> &'static str {
        match self {
            Element::SystemStatus => "system-status",
            Element::DocCount => "doc-count",
            Element::ClearButton => "clear-button",
            Element::TextForm => "text-form",
            Element::TextInput => "text-input",
            Element::TextSource => "text-source",
            Element::FileForm => "file-form",
            Element::FileInput => "file-input",
            Element::FileName => "file-name",
            Element::QueryForm => "query-form",
            Element::QueryInput => "query-input",
            Element::TopK => "top-k",
            Element::AnswerContainer => "answer-container",
            Element::Answer => "answer",
            Element::ContextContainer => "context-container",
            Element::Context => "context",
            Element::Notifications => "notifications",
        }
    }
}

/// What a class change applies to: a fixed element, or one half of a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Element(Element),
    /// The tab button whose `data-tab` is the given id.
    TabButton(&'a str),
    /// The tab content panel with the given id.
    TabPanel(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        }
    }
}

/// A notification block about to be attached to the notifications container.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationNode {
    pub handle: Uuid,
    /// `notification-<key>` for keyed notifications.
    pub dom_id: Option<String>,
    pub kind: NotificationKind,
    pub message: String,
}

/// One rendered context entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextBlock {
    pub score_line: String,
    pub text: String,
    pub source_line: Option<String>,
}

/// Answers a confirmation prompt; `true` means the user accepted.
pub type ConfirmDialog = Arc<dyn Fn(&str) -> bool + Send + Sync>;

pub trait Page: Send {
    fn contains(&self, element: Element) -> bool;

    /// Replaces the text content of an element.
    fn set_text(&mut self, element: Element, text: &str);

    /// Current value of an input element; `None` when the element is missing.
    fn value(&self, element: Element) -> Option<String>;

    fn set_value(&mut self, element: Element, value: &str);

    /// The file picked in the file input, if any.
    fn selected_file(&self) -> Option<SelectedFile>;

    fn clear_selected_file(&mut self);

    /// `data-tab` values of the tab buttons, in document order.
    fn tab_ids(&self) -> Vec<String>;

    /// Returns `false` when the target does not exist.
    fn add_class(&mut self, target: Target<'_>, class: &str) -> bool;

    /// Returns `false` when the target does not exist.
    fn remove_class(&mut self, target: Target<'_>, class: &str) -> bool;

    /// Replaces the children of the context list.
    fn replace_context(&mut self, blocks: Vec<ContextBlock>);

    /// Opens the yes/no confirmation dialog for `message`.
    ///
    /// The returned dialog is answered after the page is released, so a
    /// host that blocks on user input does not stall the page.
    fn confirm_dialog(&mut self, message: &str) -> ConfirmDialog;

    fn append_notification(&mut self, node: NotificationNode);

    /// Handle of the attached notification with this DOM id. Fading
    /// notifications have given up their id and are never found.
    fn find_notification(&self, dom_id: &str) -> Option<Uuid>;

    fn set_notification_text(&mut self, handle: Uuid, text: &str);

    /// Starts the fade-out transition of a notification and releases its
    /// DOM id, so the same key can be shown again while this one fades.
    fn fade_notification(&mut self, handle: Uuid);

    /// Detaches a notification; `false` when it was no longer attached.
    fn remove_notification(&mut self, handle: Uuid) -> bool;
}
