//! `/dashboard` endpoints

use shared::models::{AdminDashboardStats, LeaveRequest, User};

use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::AttendoClient;

/// Roster and leave set shared by the admin pages
#[derive(Debug, Clone, Default)]
pub struct AdminData {
    pub users: Vec<User>,
    pub leave_requests: Vec<LeaveRequest>,
}

impl<C: HttpClient> AttendoClient<C> {
    pub async fn admin_dashboard(&self) -> ClientResult<AdminDashboardStats> {
        self.fetch("/dashboard/admin").await
    }

    /// Super admin dashboard; layout is backend-defined
    pub async fn super_admin_dashboard(&self) -> ClientResult<serde_json::Value> {
        self.fetch("/dashboard/super-admin").await
    }

    /// Load users and leave requests concurrently
    pub async fn load_admin_data(&self) -> ClientResult<AdminData> {
        let (users, leave_requests) = tokio::try_join!(self.all_users(), self.all_leave_requests())?;
        Ok(AdminData {
            users,
            leave_requests,
        })
    }
}
