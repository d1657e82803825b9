//! Roster, leave and report list filtering plus export rows
//!
//! All searches are case-insensitive substring matches over the same
//! employee fields. "All" disables a dropdown filter.

use shared::models::{
    AttendanceDayStatus, AttendanceRecord, BasicEmployee, LeaveRequest, LeaveStatus, LeaveType,
    User, UserStatus,
};
use shared::util::parse_date;

use serde_json::Value;

use crate::csv::CsvRecord;

/// Dropdown value that disables a filter
pub const ALL: &str = "All";

/// Role text as shown in search: first `_` becomes a space
fn role_search_text(role: &str) -> String {
    role.to_lowercase().replacen('_', " ", 1)
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn employee_matches(emp: &BasicEmployee, needle: &str) -> bool {
    contains(&emp.name, needle)
        || emp.email.as_deref().is_some_and(|v| contains(v, needle))
        || emp.employee_id.as_deref().is_some_and(|v| contains(v, needle))
        || emp.department.as_deref().is_some_and(|v| contains(v, needle))
        || role_search_text(&emp.role).contains(needle)
}

fn user_matches(user: &User, needle: &str) -> bool {
    contains(&user.name, needle)
        || contains(&user.email, needle)
        || contains(&user.employee_id, needle)
        || contains(&user.department, needle)
        || role_search_text(user.role.as_str()).contains(needle)
}

// ========== Roster ==========

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterFilter {
    pub department: String,
    pub search: String,
}

impl Default for RosterFilter {
    fn default() -> Self {
        Self {
            department: ALL.to_string(),
            search: String::new(),
        }
    }
}

impl RosterFilter {
    pub fn matches(&self, user: &User) -> bool {
        if self.department != ALL && user.department != self.department {
            return false;
        }
        let needle = self.search.to_lowercase();
        needle.is_empty() || user_matches(user, &needle)
    }

    pub fn apply<'a>(&self, users: &'a [User]) -> Vec<&'a User> {
        users.iter().filter(|u| self.matches(u)).collect()
    }
}

/// "All" followed by distinct departments in first-seen order
pub fn department_options(users: &[User]) -> Vec<String> {
    let mut options = vec![ALL.to_string()];
    for user in users {
        if !options[1..].contains(&user.department) {
            options.push(user.department.clone());
        }
    }
    options
}

pub fn user_export_row(user: &User) -> CsvRecord {
    CsvRecord::new()
        .field("ID", user.employee_id.as_str())
        .field("Name", user.name.as_str())
        .field("Email", user.email.as_str())
        .field("Department", user.department.as_str())
        .field("Role", user.role.as_str())
        .field("JoinedOn", display_date(&user.joined_on))
        .field("Status", user.status.as_str())
}

// ========== Leave requests ==========

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaveFilter {
    /// `None` shows every status
    pub status: Option<LeaveStatus>,
    pub search: String,
}

impl LeaveFilter {
    pub fn matches(&self, req: &LeaveRequest) -> bool {
        if self.status.is_some_and(|s| s != req.status) {
            return false;
        }
        let needle = self.search.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        req.employee.as_ref().is_some_and(|e| employee_matches(e, &needle))
    }

    pub fn apply<'a>(&self, requests: &'a [LeaveRequest]) -> Vec<&'a LeaveRequest> {
        requests.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Summary cards above the leave review table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveSummary {
    /// "active/total"
    pub total_present: String,
    pub planned: usize,
    pub unplanned: usize,
    pub pending: usize,
}

pub fn leave_summary(users: &[User], requests: &[LeaveRequest]) -> LeaveSummary {
    let active = users.iter().filter(|u| u.status == UserStatus::Active).count();
    let planned = requests
        .iter()
        .filter(|r| {
            r.leave_type == LeaveType::Annual
                && matches!(r.status, LeaveStatus::Approved | LeaveStatus::Pending)
        })
        .count();
    let unplanned = requests
        .iter()
        .filter(|r| matches!(r.leave_type, LeaveType::Medical | LeaveType::Other))
        .count();
    let pending = requests.iter().filter(|r| r.status == LeaveStatus::Pending).count();

    LeaveSummary {
        total_present: format!("{active}/{}", users.len()),
        planned,
        unplanned,
        pending,
    }
}

/// Whole day counts export as integers (`2`, not `2.0`)
fn days_cell(days: f64) -> Value {
    if days.fract() == 0.0 && days.abs() < 1e15 {
        Value::from(days as i64)
    } else {
        Value::from(days)
    }
}

pub fn leave_export_row(req: &LeaveRequest) -> CsvRecord {
    let (name, role) = req
        .employee
        .as_ref()
        .map(|e| (e.name.as_str(), e.role.as_str()))
        .unwrap_or_default();
    CsvRecord::new()
        .field("EmployeeName", name)
        .field("EmployeeRole", role)
        .field("LeaveType", req.leave_type.as_str())
        .field("From", display_date(&req.from))
        .field("To", display_date(&req.to))
        .field("Days", days_cell(req.days))
        .field("Reason", req.reason.as_str())
        .field("Status", req.status.as_str())
}

// ========== Attendance records ==========

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub status: Option<AttendanceDayStatus>,
    pub search: String,
}

impl RecordFilter {
    /// Records without an employee snapshot never match
    pub fn matches(&self, rec: &AttendanceRecord) -> bool {
        let Some(emp) = rec.employee.as_ref() else {
            return false;
        };
        if self.status.is_some_and(|s| s != rec.status) {
            return false;
        }
        let needle = self.search.to_lowercase();
        needle.is_empty() || employee_matches(emp, &needle)
    }

    pub fn apply<'a>(&self, records: &'a [AttendanceRecord]) -> Vec<&'a AttendanceRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

pub fn record_export_row(rec: &AttendanceRecord) -> CsvRecord {
    CsvRecord::new()
        .field("EmployeeName", rec.employee.as_ref().map(|e| e.name.as_str()).unwrap_or_default())
        .field("Date", rec.date.as_str())
        .field("CheckIn", rec.check_in.as_str())
        .field("CheckOut", rec.check_out.as_str())
        .field("Status", rec.status.as_str())
        .field("Break", rec.break_time.as_str())
        .field("Late", rec.late.as_str())
        .field("Overtime", rec.overtime.as_str())
        .field("ProductionHours", format!("{:.2}", rec.production))
}

/// Calendar date of an ISO timestamp; raw text when it does not parse
fn display_date(raw: &str) -> String {
    parse_date(raw)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}
