use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::NotificationTiming;
use crate::page::{Element, NotificationKind, NotificationNode, Page};

/// Shows transient messages in the page's notifications container.
///
/// Unkeyed notifications dismiss themselves: they stay visible for
/// `timing.visible`, fade for `timing.fade`, then are detached. Keyed ones
/// stay until [`Notifier::dismiss`] is called with the same key, and showing a
/// key that is already on screen only rewrites its text.
pub struct Notifier<P: Page + 'static> {
    page: Arc<Mutex<P>>,
    timing: NotificationTiming,
}

fn dom_id(key: &str) -> String {
    format!("notification-{key}")
}

impl<P: Page + 'static> Notifier<P> {
    pub fn new(page: Arc<Mutex<P>>, timing: NotificationTiming) -> Self {
        Self { page, timing }
    }

    pub async fn show(&self, message: impl Into<String>, kind: NotificationKind) {
        let message = message.into();
        let Some(handle) = self.attach(message, kind, None).await else {
            return;
        };

        let page = Arc::clone(&self.page);
        let timing = self.timing;
        tokio::spawn(async move {
            tokio::time::sleep(timing.visible).await;
            page.lock().await.fade_notification(handle);
            tokio::time::sleep(timing.fade).await;
            page.lock().await.remove_notification(handle);
        });
    }

    /// Shows a notification that lives until [`Notifier::dismiss`].
    pub async fn show_keyed(&self, key: &str, message: impl Into<String>, kind: NotificationKind) {
        self.attach(message.into(), kind, Some(key)).await;
    }

    /// Fades out and detaches the notification shown under `key`. The key is
    /// free again as soon as the fade starts.
    pub async fn dismiss(&self, key: &str) {
        let handle = {
            let mut page = self.page.lock().await;
            let Some(handle) = page.find_notification(&dom_id(key)) else {
                return;
            };
            page.fade_notification(handle);
            handle
        };

        let page = Arc::clone(&self.page);
        let fade = self.timing.fade;
        tokio::spawn(async move {
            tokio::time::sleep(fade).await;
            page.lock().await.remove_notification(handle);
        });
    }

    /// Attaches a new block, or rewrites the keyed one still on screen.
    /// Returns the handle of a newly attached block.
    async fn attach(
        &self,
        message: String,
        kind: NotificationKind,
        key: Option<&str>,
    ) -> Option<Uuid> {
        let mut page = self.page.lock().await;
        if !page.contains(Element::Notifications) {
            log::error!("Notifications element not found");
            log::info!("{}: {}", kind.as_str(), message);
            return None;
        }

        let dom_id = key.map(dom_id);
        if let Some(id) = dom_id.as_deref() {
            if let Some(existing) = page.find_notification(id) {
                page.set_notification_text(existing, &message);
                return None;
            }
        }

        let handle = Uuid::new_v4();
        page.append_notification(NotificationNode {
            handle,
            dom_id,
            kind,
            message,
        });
        Some(handle)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::memory_page::MemoryPage;

    fn notifier(page: MemoryPage) -> (Notifier<MemoryPage>, Arc<Mutex<MemoryPage>>) {
        let page = Arc::new(Mutex::new(page));
        (
            Notifier::new(Arc::clone(&page), NotificationTiming::default()),
            page,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn unkeyed_notification_expires_after_visible_plus_fade() {
        let (notifier, page) = notifier(MemoryPage::new());
        notifier.show("saved", NotificationKind::Success).await;

        tokio::time::sleep(Duration::from_millis(2999)).await;
        {
            let page = page.lock().await;
            assert_eq!(page.notification_messages(), vec!["saved"]);
            assert!(!page.notifications()[0].fading);
        }

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(page.lock().await.notifications()[0].fading);

        // 3299ms: still attached while fading.
        tokio::time::sleep(Duration::from_millis(298)).await;
        assert_eq!(page.lock().await.notifications().len(), 1);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(page.lock().await.notifications().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn same_key_updates_in_place() {
        let (notifier, page) = notifier(MemoryPage::new());
        notifier
            .show_keyed("processing", "Processing...", NotificationKind::Info)
            .await;
        notifier
            .show_keyed("processing", "Still processing...", NotificationKind::Info)
            .await;

        let page = page.lock().await;
        assert_eq!(page.notification_messages(), vec!["Still processing..."]);
        assert_eq!(
            page.notifications()[0].node.dom_id.as_deref(),
            Some("notification-processing")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn keyed_notification_persists_until_dismissed() {
        let (notifier, page) = notifier(MemoryPage::new());
        notifier
            .show_keyed("uploading", "Uploading...", NotificationKind::Info)
            .await;

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(page.lock().await.notifications().len(), 1);

        notifier.dismiss("uploading").await;
        assert!(page.lock().await.notifications()[0].fading);

        tokio::time::sleep(Duration::from_millis(301)).await;
        assert!(page.lock().await.notifications().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn key_shown_again_while_fading_gets_a_fresh_block() {
        let (notifier, page) = notifier(MemoryPage::new());
        notifier
            .show_keyed("querying", "Querying...", NotificationKind::Info)
            .await;
        notifier.dismiss("querying").await;

        tokio::time::sleep(Duration::from_millis(100)).await;
        notifier
            .show_keyed("querying", "Querying...", NotificationKind::Info)
            .await;
        assert_eq!(page.lock().await.notifications().len(), 2);

        // The first block's removal timer must leave the new one alone.
        tokio::time::sleep(Duration::from_secs(5)).await;
        let page = page.lock().await;
        assert_eq!(page.notifications().len(), 1);
        assert!(!page.notifications()[0].fading);
        assert_eq!(
            page.notifications()[0].node.dom_id.as_deref(),
            Some("notification-querying")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn dismissing_unknown_key_is_a_no_op() {
        let (notifier, page) = notifier(MemoryPage::new());
        notifier.show("hello", NotificationKind::Info).await;
        notifier.dismiss("querying").await;
        assert_eq!(page.lock().await.notification_messages(), vec!["hello"]);
    }

    #[tokio::test]
    async fn missing_container_renders_nothing() {
        let (notifier, page) = notifier(MemoryPage::new().without(Element::Notifications));
        notifier.show("lost", NotificationKind::Error).await;
        notifier
            .show_keyed("querying", "Querying...", NotificationKind::Info)
            .await;
        assert!(page.lock().await.notifications().is_empty());
    }
}
