//! Notification center state

use shared::models::Notification;

use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::AttendoClient;

/// List filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationFilter {
    #[default]
    All,
    Unread,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    items: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new(items: Vec<Notification>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn replace(&mut self, items: Vec<Notification>) {
        self.items = items;
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    pub fn filtered(&self, filter: NotificationFilter) -> Vec<&Notification> {
        self.items
            .iter()
            .filter(|n| filter == NotificationFilter::All || !n.read)
            .collect()
    }

    fn set_read(&mut self, id: &str, read: bool) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.read = read;
                true
            }
            None => false,
        }
    }

    pub async fn refresh<C: HttpClient>(&mut self, client: &AttendoClient<C>) -> ClientResult<()> {
        self.items = client.notifications().await?;
        Ok(())
    }

    /// Mark one notification read; reverted to unread if the server refuses
    pub async fn mark_read<C: HttpClient>(&mut self, client: &AttendoClient<C>, id: &str) -> ClientResult<()> {
        let was_unread = self.items.iter().any(|n| n.id == id && !n.read);
        self.set_read(id, true);
        if let Err(e) = client.mark_notification_read(id).await {
            tracing::warn!(id, "failed to mark notification read: {e}");
            if was_unread {
                self.set_read(id, false);
            }
            return Err(e);
        }
        Ok(())
    }

    /// Mark everything read; on failure the list is re-fetched
    pub async fn mark_all_read<C: HttpClient>(&mut self, client: &AttendoClient<C>) -> ClientResult<()> {
        for n in &mut self.items {
            n.read = true;
        }
        if let Err(e) = client.mark_all_notifications_read().await {
            tracing::warn!("failed to mark all notifications read: {e}");
            if let Err(refetch) = self.refresh(client).await {
                tracing::warn!("notification refetch failed: {refetch}");
            }
            return Err(e);
        }
        Ok(())
    }
}
