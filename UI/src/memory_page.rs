//! An in-memory [`Page`], used by the console host and by tests.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use uuid::Uuid;

use crate::messages::NO_FILE_SELECTED;
use crate::models::SelectedFile;
use crate::page::{
    ConfirmDialog, ContextBlock, Element, NotificationNode, Page, Target, ACTIVE_CLASS,
    HIDDEN_CLASS,
};

#[derive(Debug, Clone)]
struct MemoryTab {
    id: String,
    button: BTreeSet<String>,
    /// `None` when the markup has a button but no matching panel.
    panel: Option<BTreeSet<String>>,
}

/// A notification block attached to the container.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryNotification {
    pub node: NotificationNode,
    pub fading: bool,
}

pub struct MemoryPage {
    present: HashSet<Element>,
    texts: HashMap<Element, String>,
    values: HashMap<Element, String>,
    classes: HashMap<Element, BTreeSet<String>>,
    tabs: Vec<MemoryTab>,
    file: Option<SelectedFile>,
    context: Vec<ContextBlock>,
    notifications: Vec<MemoryNotification>,
    confirm: ConfirmDialog,
    prompts: Vec<String>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    /// A page carrying every element, with the three standard tabs and the
    /// result panels hidden. Confirmation dialogs are declined.
    pub fn new() -> Self {
        let mut page = Self::empty();
        page.present.extend(Element::ALL);
        page.texts.insert(Element::FileName, NO_FILE_SELECTED.to_string());
        page.texts.insert(Element::SystemStatus, "Checking...".to_string());
        page.texts.insert(Element::DocCount, "0".to_string());
        for container in [Element::AnswerContainer, Element::ContextContainer] {
            page.classes
                .entry(container)
                .or_default()
                .insert(HIDDEN_CLASS.to_string());
        }
        page.with_tab("add-text")
            .with_tab("upload-file")
            .with_tab("query")
            .activated("add-text")
    }

    /// A page with no elements and no tabs.
    pub fn empty() -> Self {
        Self {
            present: HashSet::new(),
            texts: HashMap::new(),
            values: HashMap::new(),
            classes: HashMap::new(),
            tabs: Vec::new(),
            file: None,
            context: Vec::new(),
            notifications: Vec::new(),
            confirm: Arc::new(|_| false),
            prompts: Vec::new(),
        }
    }

    pub fn without(mut self, element: Element) -> Self {
        self.present.remove(&element);
        self
    }

    /// Adds a tab button and its content panel.
    pub fn with_tab(mut self, id: &str) -> Self {
        self.tabs.push(MemoryTab {
            id: id.to_string(),
            button: BTreeSet::new(),
            panel: Some(BTreeSet::new()),
        });
        self
    }

    /// Adds a tab button whose `data-tab` names no panel.
    pub fn with_orphan_tab_button(mut self, id: &str) -> Self {
        self.tabs.push(MemoryTab {
            id: id.to_string(),
            button: BTreeSet::new(),
            panel: None,
        });
        self
    }

    /// Marks a tab active in the initial markup.
    pub fn activated(mut self, id: &str) -> Self {
        for tab in self.tabs.iter_mut().filter(|tab| tab.id == id) {
            tab.button.insert(ACTIVE_CLASS.to_string());
            if let Some(panel) = tab.panel.as_mut() {
                panel.insert(ACTIVE_CLASS.to_string());
            }
        }
        self
    }

    pub fn with_confirm<F>(mut self, confirm: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.confirm = Arc::new(confirm);
        self
    }

    /// Puts a file in the file input, as the user's picker would.
    pub fn select_file(&mut self, file: Option<SelectedFile>) {
        if self.present.contains(&Element::FileInput) {
            self.file = file;
        }
    }

    pub fn text(&self, element: Element) -> Option<&str> {
        if !self.present.contains(&element) {
            return None;
        }
        Some(self.texts.get(&element).map(String::as_str).unwrap_or(""))
    }

    pub fn has_class(&self, target: Target<'_>, class: &str) -> bool {
        match target {
            Target::Element(element) => self
                .classes
                .get(&element)
                .is_some_and(|classes| classes.contains(class)),
            Target::TabButton(id) => self
                .tabs
                .iter()
                .any(|tab| tab.id == id && tab.button.contains(class)),
            Target::TabPanel(id) => self.tabs.iter().any(|tab| {
                tab.id == id && tab.panel.as_ref().is_some_and(|p| p.contains(class))
            }),
        }
    }

    pub fn is_hidden(&self, element: Element) -> bool {
        self.has_class(Target::Element(element), HIDDEN_CLASS)
    }

    /// Ids of the tab buttons currently marked active.
    pub fn active_tabs(&self) -> Vec<&str> {
        self.tabs
            .iter()
            .filter(|tab| tab.button.contains(ACTIVE_CLASS))
            .map(|tab| tab.id.as_str())
            .collect()
    }

    /// Ids of the tab panels currently marked active.
    pub fn active_panels(&self) -> Vec<&str> {
        self.tabs
            .iter()
            .filter(|tab| tab.panel.as_ref().is_some_and(|p| p.contains(ACTIVE_CLASS)))
            .map(|tab| tab.id.as_str())
            .collect()
    }

    pub fn context_blocks(&self) -> &[ContextBlock] {
        &self.context
    }

    pub fn notifications(&self) -> &[MemoryNotification] {
        &self.notifications
    }

    /// Messages of the attached notifications, oldest first.
    pub fn notification_messages(&self) -> Vec<&str> {
        self.notifications
            .iter()
            .map(|n| n.node.message.as_str())
            .collect()
    }

    /// Confirmation prompts shown so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    fn classes_mut(&mut self, target: Target<'_>) -> Option<&mut BTreeSet<String>> {
        match target {
            Target::Element(element) => {
                if !self.present.contains(&element) {
                    return None;
                }
                Some(self.classes.entry(element).or_default())
            }
            Target::TabButton(id) => self
                .tabs
                .iter_mut()
                .find(|tab| tab.id == id)
                .map(|tab| &mut tab.button),
            Target::TabPanel(id) => self
                .tabs
                .iter_mut()
                .find(|tab| tab.id == id)
                .and_then(|tab| tab.panel.as_mut()),
        }
    }
}

impl Page for MemoryPage {
    fn contains(&self, element: Element) -> bool {
        self.present.contains(&element)
    }

    fn set_text(&mut self, element: Element, text: &str) {
        if self.present.contains(&element) {
            self.texts.insert(element, text.to_string());
        }
    }

    fn value(&self, element: Element) -> Option<String> {
        if !self.present.contains(&element) {
            return None;
        }
        Some(self.values.get(&element).cloned().unwrap_or_default())
    }

    fn set_value(&mut self, element: Element, value: &str) {
        if self.present.contains(&element) {
            self.values.insert(element, value.to_string());
        }
    }

    fn selected_file(&self) -> Option<SelectedFile> {
        self.file.clone()
    }

    fn clear_selected_file(&mut self) {
        self.file = None;
    }

    fn tab_ids(&self) -> Vec<String> {
        self.tabs.iter().map(|tab| tab.id.clone()).collect()
    }

    fn add_class(&mut self, target: Target<'_>, class: &str) -> bool {
        match self.classes_mut(target) {
            Some(classes) => {
                classes.insert(class.to_string());
                true
            }
            None => false,
        }
    }

    fn remove_class(&mut self, target: Target<'_>, class: &str) -> bool {
        match self.classes_mut(target) {
            Some(classes) => {
                classes.remove(class);
                true
            }
            None => false,
        }
    }

    fn replace_context(&mut self, blocks: Vec<ContextBlock>) {
        if self.present.contains(&Element::Context) {
            self.context = blocks;
        }
    }

    fn confirm_dialog(&mut self, message: &str) -> ConfirmDialog {
        self.prompts.push(message.to_string());
        Arc::clone(&self.confirm)
    }

    fn append_notification(&mut self, node: NotificationNode) {
        if self.present.contains(&Element::Notifications) {
            self.notifications.push(MemoryNotification {
                node,
                fading: false,
            });
        }
    }

    fn find_notification(&self, dom_id: &str) -> Option<Uuid> {
        self.notifications
            .iter()
            .find(|n| !n.fading && n.node.dom_id.as_deref() == Some(dom_id))
            .map(|n| n.node.handle)
    }

    fn set_notification_text(&mut self, handle: Uuid, text: &str) {
        if let Some(n) = self.notifications.iter_mut().find(|n| n.node.handle == handle) {
            n.node.message = text.to_string();
        }
    }

    fn fade_notification(&mut self, handle: Uuid) {
        if let Some(n) = self.notifications.iter_mut().find(|n| n.node.handle == handle) {
            n.fading = true;
            n.node.dom_id = None;
        }
    }

    fn remove_notification(&mut self, handle: Uuid) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.node.handle != handle);
        self.notifications.len() != before
    }
}
