//! The listener table: which page event triggers which controller action.

use crate::page::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Change,
    Submit,
}

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Source {
    Element(Element),
    /// A tab button, identified by its `data-tab`.
    TabButton(String),
}

/// An action the controller performs in response to user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    TabClicked(String),
    FileChanged,
    TextSubmitted,
    FileSubmitted,
    QuerySubmitted,
    ClearClicked,
    ModelStatusRequested,
    SaveRequested(String),
    LoadRequested(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub source: Source,
    pub kind: EventKind,
    pub event: UiEvent,
}

impl Binding {
    pub fn new(source: Source, kind: EventKind, event: UiEvent) -> Self {
        Self {
            source,
            kind,
            event,
        }
    }
}

/// Finds the action bound to `kind` events on `source`.
pub fn lookup(bindings: &[Binding], source: &Source, kind: EventKind) -> Option<UiEvent> {
    bindings
        .iter()
        .find(|binding| &binding.source == source && binding.kind == kind)
        .map(|binding| binding.event.clone())
}
