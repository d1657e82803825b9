//! Command-line definitions

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use shared::models::{AttendanceAction, AttendanceDayStatus, LeaveStatus, LeaveType};

#[derive(Debug, Parser)]
#[command(name = "attendo", version, about = "Attendo HR dashboard client")]
pub struct Cli {
    /// REST base URL
    #[arg(long, env = "ATTENDO_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Directory holding the session token
    #[arg(long, env = "ATTENDO_WORK_DIR", global = true)]
    pub work_dir: Option<PathBuf>,

    /// Directory for rolling log files
    #[arg(long, env = "ATTENDO_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// JSON log lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session token
    Login {
        #[arg(long, env = "ATTENDO_EMAIL")]
        email: String,
        #[arg(long, env = "ATTENDO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Drop the stored session
    Logout,
    #[command(flatten)]
    Session(SessionCommand),
}

/// Commands that need a restored session
#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    /// Show the logged-in user
    Whoami,
    /// Show navigation, or resolve a page for the current role
    Nav {
        /// Navigation label, e.g. "Leave Requests"
        page: Option<String>,
    },
    /// Admin dashboard summary
    Dashboard,
    /// Current attendance status
    Status {
        /// Keep running with a live timer
        #[arg(long)]
        watch: bool,
        /// Timer format
        #[arg(long, value_enum, default_value_t = TimerStyle::Clock)]
        style: TimerStyle,
    },
    /// Change clock state
    Clock {
        #[arg(value_enum)]
        action: ClockArg,
    },
    /// Own attendance history and hours
    History,
    #[command(subcommand)]
    Leave(LeaveCommand),
    #[command(subcommand)]
    Users(UsersCommand),
    /// Attendance reports
    Reports(ReportArgs),
    #[command(subcommand)]
    Notifications(NotificationCommand),
    #[command(subcommand)]
    Profile(ProfileCommand),
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TimerStyle {
    /// HH:MM:SS
    Clock,
    /// 00h 00m 00s
    Labeled,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ClockArg {
    In,
    Break,
    Resume,
    Out,
}

impl From<ClockArg> for AttendanceAction {
    fn from(arg: ClockArg) -> Self {
        match arg {
            ClockArg::In => Self::ClockIn,
            ClockArg::Break => Self::StartBreak,
            ClockArg::Resume => Self::EndBreak,
            ClockArg::Out => Self::ClockOut,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LeaveTypeArg {
    Annual,
    Medical,
    Other,
}

impl From<LeaveTypeArg> for LeaveType {
    fn from(arg: LeaveTypeArg) -> Self {
        match arg {
            LeaveTypeArg::Annual => Self::Annual,
            LeaveTypeArg::Medical => Self::Medical,
            LeaveTypeArg::Other => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LeaveStatusArg {
    Pending,
    Approved,
    Rejected,
}

impl From<LeaveStatusArg> for LeaveStatus {
    fn from(arg: LeaveStatusArg) -> Self {
        match arg {
            LeaveStatusArg::Pending => Self::Pending,
            LeaveStatusArg::Approved => Self::Approved,
            LeaveStatusArg::Rejected => Self::Rejected,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Decision {
    Approve,
    Reject,
}

impl From<Decision> for LeaveStatus {
    fn from(d: Decision) -> Self {
        match d {
            Decision::Approve => Self::Approved,
            Decision::Reject => Self::Rejected,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DayStatusArg {
    Present,
    Late,
    Absent,
}

impl From<DayStatusArg> for AttendanceDayStatus {
    fn from(arg: DayStatusArg) -> Self {
        match arg {
            DayStatusArg::Present => Self::Present,
            DayStatusArg::Late => Self::Late,
            DayStatusArg::Absent => Self::Absent,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum LeaveCommand {
    /// Own leave balance
    Balance,
    /// Own requests, or every request with --all
    List {
        #[arg(long)]
        all: bool,
        #[command(flatten)]
        filter: LeaveFilterArgs,
    },
    /// Apply for leave (or enter it for an employee with --for)
    Apply {
        #[arg(long = "type", value_enum)]
        leave_type: LeaveTypeArg,
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
        #[arg(long)]
        reason: String,
        /// Employee id for admin entry
        #[arg(long = "for")]
        for_user: Option<String>,
    },
    /// Approve or reject a request
    Review {
        id: String,
        #[arg(value_enum)]
        decision: Decision,
    },
    /// Summary cards of the review page
    Stats,
    /// Export the filtered request list
    Export {
        #[command(flatten)]
        filter: LeaveFilterArgs,
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct LeaveFilterArgs {
    #[arg(long, value_enum)]
    pub status: Option<LeaveStatusArg>,
    #[arg(long, default_value = "")]
    pub search: String,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List a roster
    List(RosterArgs),
    /// Export a roster as CSV
    Export {
        #[command(flatten)]
        roster: RosterArgs,
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Bulk add employees from CSV (Name, Email, Role, Department, Phone)
    Import {
        file: PathBuf,
        /// Target the admin roster (rejected)
        #[arg(long)]
        admins: bool,
    },
    /// Delete a user
    Delete { id: String },
}

#[derive(Debug, Args)]
pub struct RosterArgs {
    /// Work on the admin roster instead of employees
    #[arg(long)]
    pub admins: bool,
    #[arg(long, default_value = "All")]
    pub department: String,
    #[arg(long, default_value = "")]
    pub search: String,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[arg(long, value_enum)]
    pub status: Option<DayStatusArg>,
    #[arg(long, default_value = "")]
    pub search: String,
    /// Write attendance-report.csv into this directory
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum NotificationCommand {
    List {
        #[arg(long)]
        unread: bool,
    },
    /// Mark one notification read
    Read { id: String },
    /// Mark everything read
    ReadAll,
    /// Poll and print new notifications
    Watch,
}

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    Show,
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    ChangePassword {
        #[arg(long, env = "ATTENDO_OLD_PASSWORD", hide_env_values = true)]
        old: String,
        #[arg(long, env = "ATTENDO_NEW_PASSWORD", hide_env_values = true)]
        new: String,
        #[arg(long, env = "ATTENDO_CONFIRM_PASSWORD", hide_env_values = true)]
        confirm: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    Show,
    SetCompanyName { name: String },
    /// Super admin company settings
    Company,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leave_apply() {
        let cli = Cli::try_parse_from([
            "attendo", "leave", "apply", "--type", "medical", "--from", "2025-05-05", "--to", "2025-05-06",
            "--reason", "flu",
        ])
        .unwrap();
        match cli.command {
            Command::Session(SessionCommand::Leave(LeaveCommand::Apply { leave_type, from, for_user, .. })) => {
                assert_eq!(LeaveType::from(leave_type), LeaveType::Medical);
                assert_eq!(from, NaiveDate::from_ymd_opt(2025, 5, 5).unwrap());
                assert!(for_user.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_clock_and_global_flags() {
        let cli = Cli::try_parse_from(["attendo", "clock", "break", "--api-url", "http://hr/api"]).unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://hr/api"));
        assert!(matches!(
            cli.command,
            Command::Session(SessionCommand::Clock { action: ClockArg::Break })
        ));
    }
}
