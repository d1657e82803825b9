//! `/leaves` endpoints

use shared::models::{LeaveBalance, LeaveRequest, LeaveStats, LeaveStatus, LeaveStatusUpdate};

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::leave::LeaveForm;
use crate::AttendoClient;

impl<C: HttpClient> AttendoClient<C> {
    /// Own balance per leave type
    pub async fn my_leave_balance(&self) -> ClientResult<Vec<LeaveBalance>> {
        self.fetch("/leaves/balance").await
    }

    /// Balance of another user (admin entry form)
    pub async fn leave_balance_for(&self, user_id: &str) -> ClientResult<Vec<LeaveBalance>> {
        self.fetch(&format!("/leaves/balance/{user_id}")).await
    }

    pub async fn leave_stats(&self) -> ClientResult<LeaveStats> {
        self.fetch("/leaves/stats").await
    }

    pub async fn my_leave_requests(&self) -> ClientResult<Vec<LeaveRequest>> {
        self.fetch("/leaves/my-requests").await
    }

    /// Every request, with employee snapshots (admin)
    pub async fn all_leave_requests(&self) -> ClientResult<Vec<LeaveRequest>> {
        self.fetch("/leaves").await
    }

    /// Validate against a balance snapshot and submit an own request
    pub async fn submit_leave(&self, form: &LeaveForm, balance: Option<&[LeaveBalance]>) -> ClientResult<()> {
        let req = form.validate(balance)?;
        tracing::info!(leave_type = %req.leave_type, days = req.days, "submitting leave request");
        self.send_post("/leaves", &req).await
    }

    /// Fetch the current balance, then submit an own request
    pub async fn apply_for_leave(&self, form: &LeaveForm) -> ClientResult<()> {
        let balance = self.my_leave_balance().await?;
        self.submit_leave(form, Some(&balance)).await
    }

    /// Enter leave on behalf of an employee, checked against their balance
    pub async fn add_leave_for(&self, user_id: &str, form: &LeaveForm) -> ClientResult<()> {
        let balance = match self.leave_balance_for(user_id).await {
            Ok(b) => Some(b),
            Err(ClientError::Unauthorized) => return Err(ClientError::Unauthorized),
            Err(e) => {
                tracing::warn!(user_id, "failed to fetch leave balance: {e}");
                None
            }
        };
        let req = form.validate_for(user_id, balance.as_deref())?;
        self.send_post("/leaves/admin", &req).await
    }

    /// Approve or reject a pending request
    pub async fn set_leave_status(&self, id: &str, status: LeaveStatus) -> ClientResult<()> {
        if status == LeaveStatus::Pending {
            return Err(ClientError::Validation(
                "A request can only be approved or rejected.".into(),
            ));
        }
        self.send_put(&format!("/leaves/{id}/status"), &LeaveStatusUpdate { status }).await
    }
}
