//! `/notifications` endpoints

use shared::models::Notification;

use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::AttendoClient;

impl<C: HttpClient> AttendoClient<C> {
    pub async fn notifications(&self) -> ClientResult<Vec<Notification>> {
        self.fetch("/notifications").await
    }

    pub async fn mark_notification_read(&self, id: &str) -> ClientResult<()> {
        self.send_put_empty(&format!("/notifications/{id}/read")).await
    }

    pub async fn mark_all_notifications_read(&self) -> ClientResult<()> {
        self.send_put_empty("/notifications/read-all").await
    }
}
