//! Dashboard Model

use serde::{Deserialize, Serialize};

/// `/dashboard/admin` payload
///
/// Counters are typed; chart sections are passed through as JSON since
/// their layout is purely presentational.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboardStats {
    #[serde(default)]
    pub total_employees: u32,
    #[serde(default)]
    pub attendance_today_count: u32,
    #[serde(default)]
    pub on_leave_count: u32,
    #[serde(default)]
    pub pending_requests_count: u32,
    #[serde(default)]
    pub departments: serde_json::Value,
    #[serde(default)]
    pub employee_status: serde_json::Value,
    #[serde(default)]
    pub most_punctual: serde_json::Value,
    #[serde(default)]
    pub clock_in_outs: Vec<serde_json::Value>,
    #[serde(default)]
    pub attendance_overview: serde_json::Value,
}

impl AdminDashboardStats {
    /// "N% present" trend for the attendance card
    pub fn present_trend(&self) -> String {
        if self.total_employees == 0 {
            return "0% present".to_string();
        }
        let pct = (self.attendance_today_count as f64 / self.total_employees as f64 * 100.0).round();
        format!("{pct}% present")
    }
}
