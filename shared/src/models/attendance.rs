//! Attendance Model (打卡状态)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Clock status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockStatus {
    #[default]
    #[serde(rename = "CLOCKED_OUT")]
    ClockedOut,
    #[serde(rename = "CLOCKED_IN")]
    ClockedIn,
    #[serde(rename = "ON_BREAK")]
    OnBreak,
}

impl ClockStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::ClockedOut => "Clocked Out",
            Self::ClockedIn => "Clocked In",
            Self::OnBreak => "On Break",
        }
    }
}

impl fmt::Display for ClockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Transition requested through `/attendance/action`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceAction {
    #[serde(rename = "CLOCK_IN")]
    ClockIn,
    #[serde(rename = "START_BREAK")]
    StartBreak,
    #[serde(rename = "END_BREAK")]
    EndBreak,
    #[serde(rename = "CLOCK_OUT")]
    ClockOut,
}

impl AttendanceAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClockIn => "CLOCK_IN",
            Self::StartBreak => "START_BREAK",
            Self::EndBreak => "END_BREAK",
            Self::ClockOut => "CLOCK_OUT",
        }
    }
}

impl fmt::Display for AttendanceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attendance action payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceActionRequest {
    pub action: AttendanceAction,
}

/// Current attendance status of the authenticated user
///
/// `work_start_time` is `None` iff the status is `ClockedOut`;
/// `break_start_time` is `Some` only while `OnBreak`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStatus {
    pub status: ClockStatus,
    #[serde(default)]
    pub work_start_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub break_start_time: Option<DateTime<Utc>>,
}

impl AttendanceStatus {
    pub fn clocked_out() -> Self {
        Self::default()
    }

    /// Check the status/timestamp invariant
    pub fn is_consistent(&self) -> bool {
        let work_ok = self.work_start_time.is_none() == (self.status == ClockStatus::ClockedOut);
        let break_ok = self.break_start_time.is_none() || self.status == ClockStatus::OnBreak;
        work_ok && break_ok
    }

    /// Apply a transition locally, returning the predicted next status.
    ///
    /// Returns `None` when the action is not valid from the current status.
    pub fn apply(&self, action: AttendanceAction, now: DateTime<Utc>) -> Option<Self> {
        use AttendanceAction::*;
        use ClockStatus::*;

        match (self.status, action) {
            (ClockedOut, ClockIn) => Some(Self {
                status: ClockedIn,
                work_start_time: Some(now),
                break_start_time: None,
            }),
            (ClockedIn, StartBreak) => Some(Self {
                status: OnBreak,
                work_start_time: self.work_start_time,
                break_start_time: Some(now),
            }),
            (OnBreak, EndBreak) => Some(Self {
                status: ClockedIn,
                work_start_time: self.work_start_time,
                break_start_time: None,
            }),
            (ClockedIn | OnBreak, ClockOut) => Some(Self::clocked_out()),
            _ => None,
        }
    }
}

/// One day of attendance history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceHistoryEntry {
    pub date: String,
    #[serde(default)]
    pub clock_in: String,
    #[serde(default)]
    pub clock_out: String,
    #[serde(default)]
    pub hours: String,
    pub status: AttendanceDayStatus,
}

/// Day classification used by history and reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceDayStatus {
    Present,
    Late,
    Absent,
}

impl AttendanceDayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Late => "Late",
            Self::Absent => "Absent",
        }
    }
}

impl fmt::Display for AttendanceDayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Worked and overtime hours for one period
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HourStats {
    pub worked: f64,
    pub overtime: f64,
}

/// `/attendance/hours` payload
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HourStatsCollection {
    pub today: HourStats,
    pub week: HourStats,
    pub month: HourStats,
}
