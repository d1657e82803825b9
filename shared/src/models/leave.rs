//! Leave Model (请假管理)

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::BasicEmployee;

/// Leave category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LeaveType {
    #[default]
    #[serde(rename = "Annual Leave")]
    Annual,
    #[serde(rename = "Medical Leave")]
    Medical,
    #[serde(rename = "Other")]
    Other,
}

impl LeaveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "Annual Leave",
            Self::Medical => "Medical Leave",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leave request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leave request record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    #[serde(alias = "_id")]
    pub id: String,
    /// Employee snapshot; admin listings send it as `user`
    #[serde(
        default,
        alias = "user",
        deserialize_with = "lenient_employee",
        skip_serializing_if = "Option::is_none"
    )]
    pub employee: Option<BasicEmployee>,
    pub leave_type: LeaveType,
    /// Start date (ISO 8601)
    pub from: String,
    /// End date (ISO 8601)
    pub to: String,
    /// Day count as stored; half days arrive as fractions
    #[serde(default)]
    pub days: f64,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub status: LeaveStatus,
}

/// `user` may be an unpopulated reference (a bare id string) on
/// self-service listings; only an embedded object yields a snapshot.
fn lenient_employee<'de, D>(deserializer: D) -> Result<Option<BasicEmployee>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Per-type allotment and usage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveBalance {
    #[serde(rename = "type")]
    pub leave_type: String,
    pub total: f64,
    pub used: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl LeaveBalance {
    pub fn new(leave_type: LeaveType, total: f64, used: f64) -> Self {
        Self {
            leave_type: leave_type.as_str().to_string(),
            total,
            used,
            color: None,
        }
    }

    /// Days left (`total - used`); negative when over-used
    pub fn available(&self) -> f64 {
        self.total - self.used
    }

    pub fn matches(&self, leave_type: LeaveType) -> bool {
        self.leave_type == leave_type.as_str()
    }
}

/// One row of the leave stats breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveBreakdown {
    #[serde(rename = "type")]
    pub leave_type: String,
    pub total: f64,
    pub taken: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// `/leaves/stats` payload
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveStats {
    pub total_allowed: f64,
    pub taken: f64,
    pub pending: f64,
    pub available: f64,
    #[serde(default)]
    pub breakdown: Vec<LeaveBreakdown>,
}

/// Self-service leave submission payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLeaveRequest {
    pub leave_type: LeaveType,
    pub from: String,
    pub to: String,
    pub days: u32,
    pub reason: String,
}

/// Admin-entered leave on behalf of an employee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminLeaveRequest {
    #[serde(flatten)]
    pub request: NewLeaveRequest,
    /// Target user id
    pub user: String,
}

/// Status change payload for `/leaves/:id/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveStatusUpdate {
    pub status: LeaveStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_listing_maps_user_to_employee() {
        let json = r#"{
            "_id": "l1",
            "user": {"_id": "u1", "name": "Grace Hopper", "role": "EMPLOYEE", "department": "IT"},
            "leaveType": "Medical Leave",
            "from": "2025-02-03",
            "to": "2025-02-04",
            "days": 2,
            "reason": "flu",
            "status": "Approved"
        }"#;
        let req: LeaveRequest = serde_json::from_str(json).unwrap();
        let employee = req.employee.unwrap();
        assert_eq!(employee.name, "Grace Hopper");
        assert_eq!(employee.id.as_deref(), Some("u1"));
        assert_eq!(req.leave_type, LeaveType::Medical);
        assert_eq!(req.status, LeaveStatus::Approved);
    }

    #[test]
    fn test_unpopulated_user_reference() {
        let json = r#"{"_id":"l2","user":"u1","leaveType":"Other","from":"2025-02-03","to":"2025-02-03","status":"Pending"}"#;
        let req: LeaveRequest = serde_json::from_str(json).unwrap();
        assert!(req.employee.is_none());
        assert_eq!(req.days, 0.0);
    }

    #[test]
    fn test_fractional_days() {
        let json = r#"{"_id":"l3","leaveType":"Annual Leave","from":"2025-02-03","to":"2025-02-03","days":0.5,"status":"Approved"}"#;
        let req: LeaveRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.days, 0.5);
    }

    #[test]
    fn test_admin_request_flattens() {
        let body = AdminLeaveRequest {
            request: NewLeaveRequest {
                leave_type: LeaveType::Annual,
                from: "2025-01-01".into(),
                to: "2025-01-02".into(),
                days: 2,
                reason: "trip".into(),
            },
            user: "u9".into(),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["leaveType"], "Annual Leave");
        assert_eq!(value["user"], "u9");
        assert_eq!(value["days"], 2);
    }

    #[test]
    fn test_balance_available() {
        let b = LeaveBalance::new(LeaveType::Annual, 14.0, 5.0);
        assert_eq!(b.available(), 9.0);
        assert!(b.matches(LeaveType::Annual));
        assert!(!b.matches(LeaveType::Other));
    }
}
