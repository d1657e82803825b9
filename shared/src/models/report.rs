//! Report Model (考勤报表)

use serde::{Deserialize, Serialize};

use super::{AttendanceDayStatus, BasicEmployee};

/// Summary card from `/reports/stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatCard {
    pub title: String,
    pub value: String,
    #[serde(default)]
    pub trend: String,
    #[serde(default)]
    pub progress: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Per-employee attendance row from `/reports/attendance-records`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub employee: Option<BasicEmployee>,
    pub date: String,
    #[serde(default)]
    pub check_in: String,
    #[serde(default)]
    pub check_out: String,
    pub status: AttendanceDayStatus,
    #[serde(rename = "break", default)]
    pub break_time: String,
    #[serde(default)]
    pub late: String,
    #[serde(default)]
    pub overtime: String,
    /// Productive hours
    #[serde(default)]
    pub production: f64,
}

/// Combined report page data
#[derive(Debug, Clone, PartialEq)]
pub struct ReportBundle {
    pub stats: Vec<ReportStatCard>,
    /// Chart series; shape is owned by the backend
    pub chart: serde_json::Value,
    pub records: Vec<AttendanceRecord>,
}
