//! Clock-in tracker
//!
//! The local status is updated optimistically before the action is sent and
//! reconciled from `/attendance/status` afterwards. A failed action is not
//! rolled back here; the next refetch or poll restores the server's view.

use chrono::{DateTime, Utc};
use shared::models::{AttendanceAction, AttendanceStatus};

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::AttendoClient;

#[derive(Debug, Clone, Default)]
pub struct AttendanceTracker {
    status: AttendanceStatus,
}

impl AttendanceTracker {
    pub fn new(status: AttendanceStatus) -> Self {
        Self { status }
    }

    pub fn status(&self) -> &AttendanceStatus {
        &self.status
    }

    /// Replace the local view with a server snapshot
    pub fn reconcile(&mut self, status: AttendanceStatus) {
        if !status.is_consistent() {
            tracing::warn!(?status, "inconsistent attendance status from server");
        }
        self.status = status;
    }

    /// Actions offered for the current status
    pub fn available_actions(&self) -> Vec<AttendanceAction> {
        use AttendanceAction::*;
        [ClockIn, StartBreak, EndBreak, ClockOut]
            .into_iter()
            .filter(|a| self.status.apply(*a, Utc::now()).is_some())
            .collect()
    }

    /// Apply an action locally; rejects transitions invalid from the current status
    pub fn apply_optimistic(&mut self, action: AttendanceAction, now: DateTime<Utc>) -> ClientResult<()> {
        let next = self.status.apply(action, now).ok_or_else(|| {
            ClientError::Validation(format!("Cannot {} while {}", action, self.status.status))
        })?;
        self.status = next;
        Ok(())
    }

    /// Optimistic update, server call, then refetch
    ///
    /// The action's error is returned after the refetch attempt so the
    /// caller can alert; the local status reflects whatever the refetch
    /// produced.
    pub async fn perform<C: HttpClient>(&mut self, client: &AttendoClient<C>, action: AttendanceAction) -> ClientResult<()> {
        self.apply_optimistic(action, Utc::now())?;
        let outcome = client.attendance_action(action).await;
        if let Err(e) = &outcome {
            tracing::warn!(%action, "attendance action failed: {e}");
        }
        match client.attendance_status().await {
            Ok(status) => self.reconcile(status),
            Err(e) => tracing::warn!("attendance refetch failed: {e}"),
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ClockStatus;

    #[test]
    fn test_optimistic_transitions() {
        let mut tracker = AttendanceTracker::default();
        assert_eq!(tracker.available_actions(), vec![AttendanceAction::ClockIn]);

        let now = Utc::now();
        tracker.apply_optimistic(AttendanceAction::ClockIn, now).unwrap();
        assert_eq!(tracker.status().status, ClockStatus::ClockedIn);
        assert_eq!(tracker.status().work_start_time, Some(now));
        assert_eq!(
            tracker.available_actions(),
            vec![AttendanceAction::StartBreak, AttendanceAction::ClockOut]
        );

        let err = tracker.apply_optimistic(AttendanceAction::EndBreak, now).unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(tracker.status().status, ClockStatus::ClockedIn);
    }

    #[test]
    fn test_reconcile_overrides_local_view() {
        let mut tracker = AttendanceTracker::default();
        tracker.apply_optimistic(AttendanceAction::ClockIn, Utc::now()).unwrap();
        tracker.reconcile(AttendanceStatus::clocked_out());
        assert_eq!(tracker.status(), &AttendanceStatus::clocked_out());
    }
}
