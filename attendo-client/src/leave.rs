//! Leave day-count and balance validation
//!
//! One implementation shared by every leave form (dashboard, profile,
//! self-service page, admin entry). The backend re-validates on submit;
//! these checks are advisory and work on a possibly stale balance snapshot.

use chrono::NaiveDate;
use shared::models::{AdminLeaveRequest, LeaveBalance, LeaveType, NewLeaveRequest};
use thiserror::Error;

use crate::error::ClientError;

/// Leave form errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LeaveError {
    #[error("Start and end dates are required.")]
    MissingDates,
    #[error("End date cannot be before start date.")]
    EndBeforeStart,
    #[error("A reason is required.")]
    MissingReason,
    #[error("An employee must be selected.")]
    MissingEmployee,
    #[error("Exceeds available balance ({available} days left)")]
    ExceedsBalance { available: f64 },
}

impl From<LeaveError> for ClientError {
    fn from(err: LeaveError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Inclusive day count of a leave range
///
/// Missing dates or `to < from` yield 0; a same-day leave is 1 day.
pub fn compute_leave_days(from: Option<NaiveDate>, to: Option<NaiveDate>) -> u32 {
    match (from, to) {
        (Some(from), Some(to)) if to >= from => {
            u32::try_from((to - from).num_days() + 1).unwrap_or(u32::MAX)
        }
        _ => 0,
    }
}

/// Days left for a leave type, if the balance lists it
pub fn available_days(balances: &[LeaveBalance], leave_type: LeaveType) -> Option<f64> {
    balances
        .iter()
        .find(|b| b.matches(leave_type))
        .map(LeaveBalance::available)
}

/// Reject `days` when it exceeds the listed balance
///
/// A type absent from the balance is unconstrained.
pub fn check_balance(balances: &[LeaveBalance], leave_type: LeaveType, days: u32) -> Result<(), LeaveError> {
    match available_days(balances, leave_type) {
        Some(available) if f64::from(days) > available => Err(LeaveError::ExceedsBalance { available }),
        _ => Ok(()),
    }
}

/// Leave application form state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeaveForm {
    pub leave_type: LeaveType,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub reason: String,
}

impl LeaveForm {
    pub fn new(leave_type: LeaveType, from: Option<NaiveDate>, to: Option<NaiveDate>, reason: impl Into<String>) -> Self {
        Self {
            leave_type,
            from,
            to,
            reason: reason.into(),
        }
    }

    /// Derived day count shown next to the date inputs
    pub fn days(&self) -> u32 {
        compute_leave_days(self.from, self.to)
    }

    /// Inline balance message; `None` while the balance is not loaded
    /// or no days are selected
    pub fn balance_error(&self, balances: Option<&[LeaveBalance]>) -> Option<LeaveError> {
        let balances = balances?;
        let days = self.days();
        if days == 0 {
            return None;
        }
        check_balance(balances, self.leave_type, days).err()
    }

    /// Whether the submit action is enabled
    pub fn can_submit(&self, balances: Option<&[LeaveBalance]>) -> bool {
        self.validate(balances).is_ok()
    }

    /// Full submit-time validation producing the request payload
    pub fn validate(&self, balances: Option<&[LeaveBalance]>) -> Result<NewLeaveRequest, LeaveError> {
        let (Some(from), Some(to)) = (self.from, self.to) else {
            return Err(LeaveError::MissingDates);
        };
        let days = self.days();
        if days == 0 {
            return Err(LeaveError::EndBeforeStart);
        }
        if self.reason.trim().is_empty() {
            return Err(LeaveError::MissingReason);
        }
        if let Some(err) = self.balance_error(balances) {
            return Err(err);
        }
        Ok(NewLeaveRequest {
            leave_type: self.leave_type,
            from: from.format("%Y-%m-%d").to_string(),
            to: to.format("%Y-%m-%d").to_string(),
            days,
            reason: self.reason.clone(),
        })
    }

    /// Admin-entry variant: an employee must be chosen and their balance applies
    pub fn validate_for(&self, user_id: &str, balances: Option<&[LeaveBalance]>) -> Result<AdminLeaveRequest, LeaveError> {
        if user_id.trim().is_empty() {
            return Err(LeaveError::MissingEmployee);
        }
        Ok(AdminLeaveRequest {
            request: self.validate(balances)?,
            user: user_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, day)
    }

    fn balances() -> Vec<LeaveBalance> {
        vec![
            LeaveBalance::new(LeaveType::Annual, 14.0, 12.0),
            LeaveBalance::new(LeaveType::Medical, 10.0, 0.0),
        ]
    }

    #[test]
    fn test_day_count_inclusive() {
        assert_eq!(compute_leave_days(d(2025, 5, 5), d(2025, 5, 5)), 1);
        assert_eq!(compute_leave_days(d(2025, 5, 5), d(2025, 5, 9)), 5);
        // spans the March DST change in most zones
        assert_eq!(compute_leave_days(d(2025, 3, 28), d(2025, 4, 2)), 6);
        assert_eq!(compute_leave_days(d(2024, 2, 28), d(2024, 3, 1)), 3);
    }

    #[test]
    fn test_day_count_zero_cases() {
        assert_eq!(compute_leave_days(None, d(2025, 5, 5)), 0);
        assert_eq!(compute_leave_days(d(2025, 5, 5), None), 0);
        assert_eq!(compute_leave_days(d(2025, 5, 6), d(2025, 5, 5)), 0);
    }

    #[test]
    fn test_exceeds_balance_message() {
        let form = LeaveForm::new(LeaveType::Annual, d(2025, 5, 5), d(2025, 5, 7), "trip");
        let err = form.balance_error(Some(&balances())).unwrap();
        assert_eq!(err, LeaveError::ExceedsBalance { available: 2.0 });
        assert_eq!(err.to_string(), "Exceeds available balance (2 days left)");
        assert!(!form.can_submit(Some(&balances())));
    }

    #[test]
    fn test_within_balance_and_unlisted_type() {
        let form = LeaveForm::new(LeaveType::Annual, d(2025, 5, 5), d(2025, 5, 6), "trip");
        assert!(form.balance_error(Some(&balances())).is_none());

        let other = LeaveForm::new(LeaveType::Other, d(2025, 5, 1), d(2025, 5, 30), "sabbatical");
        assert!(other.balance_error(Some(&balances())).is_none());
        assert!(other.can_submit(Some(&balances())));
    }

    #[test]
    fn test_unloaded_balance_is_unconstrained() {
        let form = LeaveForm::new(LeaveType::Annual, d(2025, 5, 1), d(2025, 5, 30), "trip");
        assert!(form.balance_error(None).is_none());
        assert_eq!(form.validate(None).unwrap().days, 30);
    }

    #[test]
    fn test_submit_requires_reason_and_days() {
        let mut form = LeaveForm::new(LeaveType::Medical, d(2025, 5, 5), d(2025, 5, 5), "   ");
        assert_eq!(form.validate(Some(&balances())), Err(LeaveError::MissingReason));

        form.reason = "dentist".into();
        let req = form.validate(Some(&balances())).unwrap();
        assert_eq!(req.from, "2025-05-05");
        assert_eq!(req.days, 1);

        form.to = d(2025, 5, 4);
        assert_eq!(form.validate(Some(&balances())), Err(LeaveError::EndBeforeStart));

        form.from = None;
        assert_eq!(form.validate(Some(&balances())), Err(LeaveError::MissingDates));
    }

    #[test]
    fn test_admin_entry_requires_employee() {
        let form = LeaveForm::new(LeaveType::Medical, d(2025, 5, 5), d(2025, 5, 6), "flu");
        assert_eq!(form.validate_for("", None), Err(LeaveError::MissingEmployee));
        let req = form.validate_for("u7", Some(&balances())).unwrap();
        assert_eq!(req.user, "u7");
        assert_eq!(req.request.days, 2);
    }

    #[test]
    fn test_overused_balance_reports_negative() {
        let b = vec![LeaveBalance::new(LeaveType::Annual, 10.0, 11.0)];
        assert_eq!(
            check_balance(&b, LeaveType::Annual, 1),
            Err(LeaveError::ExceedsBalance { available: -1.0 })
        );
    }
}
