pub mod backend;
pub mod config;
pub mod controller;
pub mod events;
pub mod forms;
pub mod memory_page;
pub mod messages;
pub mod models;
pub mod notifications;
pub mod page;
pub mod render;

pub use backend::{Backend, BackendError, HttpBackend, MockBackend};
pub use config::UiConfig;
pub use controller::Controller;
pub use events::{Binding, EventKind, Source, UiEvent};
pub use memory_page::MemoryPage;
pub use models::*;
pub use notifications::Notifier;
pub use page::{Element, NotificationKind, Page};
