//! `/attendance` endpoints

use shared::models::{
    AttendanceAction, AttendanceActionRequest, AttendanceHistoryEntry, AttendanceStatus,
    HourStatsCollection,
};

use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::AttendoClient;

impl<C: HttpClient> AttendoClient<C> {
    pub async fn attendance_status(&self) -> ClientResult<AttendanceStatus> {
        self.fetch("/attendance/status").await
    }

    /// Request a clock transition; the server applies it authoritatively
    pub async fn attendance_action(&self, action: AttendanceAction) -> ClientResult<()> {
        tracing::info!(%action, "attendance action");
        self.send_post("/attendance/action", &AttendanceActionRequest { action }).await
    }

    pub async fn attendance_history(&self) -> ClientResult<Vec<AttendanceHistoryEntry>> {
        self.fetch("/attendance/history").await
    }

    pub async fn attendance_hours(&self) -> ClientResult<HourStatsCollection> {
        self.fetch("/attendance/hours").await
    }
}
