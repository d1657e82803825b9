//! Role-gated page dispatch
//!
//! Each role owns an explicit page table. A navigation label resolves to a
//! page only through the caller's table; pages of other roles come back as
//! [`Dispatch::Forbidden`] and are never rendered.

use std::fmt;

use shared::models::{User, UserRole};
use thiserror::Error;

/// Every page the dashboard knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Dashboard,
    AdminManagement,
    Employees,
    LeaveRequests,
    Notifications,
    Reports,
    Settings,
    CompanySettings,
    MyAttendance,
    MyProfile,
    LeaveRequest,
}

impl Page {
    pub const ALL: [Page; 11] = [
        Self::Dashboard,
        Self::AdminManagement,
        Self::Employees,
        Self::LeaveRequests,
        Self::Notifications,
        Self::Reports,
        Self::Settings,
        Self::CompanySettings,
        Self::MyAttendance,
        Self::MyProfile,
        Self::LeaveRequest,
    ];

    /// Navigation label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::AdminManagement => "Admin Management",
            Self::Employees => "Employees",
            Self::LeaveRequests => "Leave Requests",
            Self::Notifications => "Notifications",
            Self::Reports => "Reports",
            Self::Settings => "Settings",
            Self::CompanySettings => "Company Settings",
            Self::MyAttendance => "My Attendance",
            Self::MyProfile => "My Profile",
            Self::LeaveRequest => "Leave Request",
        }
    }

    /// Exact, case-sensitive label lookup
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == label)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const SUPER_ADMIN_PAGES: &[Page] = &[
    Page::Dashboard,
    Page::AdminManagement,
    Page::Employees,
    Page::LeaveRequests,
    Page::Notifications,
    Page::Reports,
    Page::Settings,
    Page::CompanySettings,
];

const ADMIN_PAGES: &[Page] = &[
    Page::Dashboard,
    Page::Employees,
    Page::LeaveRequests,
    Page::Notifications,
    Page::Reports,
    Page::Settings,
];

const EMPLOYEE_PAGES: &[Page] = &[
    Page::Dashboard,
    Page::MyAttendance,
    Page::MyProfile,
    Page::LeaveRequest,
    Page::Notifications,
];

/// Dispatch outcome for a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Render(Page),
    /// A known page outside the role's set ("Not Authorized")
    Forbidden(Page),
}

impl Dispatch {
    pub fn page(&self) -> Page {
        match self {
            Self::Render(p) | Self::Forbidden(p) => *p,
        }
    }

    pub fn into_result(self) -> Result<Page, ViewError> {
        match self {
            Self::Render(p) => Ok(p),
            Self::Forbidden(p) => Err(ViewError::NotAuthorized(p)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("Not Authorized: {0} is not available for this role")]
    NotAuthorized(Page),
    #[error("Not logged in")]
    NoSession,
}

/// Per-role view set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleView {
    Employee,
    Admin,
    SuperAdmin,
}

impl From<UserRole> for RoleView {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Employee => Self::Employee,
            UserRole::Admin => Self::Admin,
            UserRole::SuperAdmin => Self::SuperAdmin,
        }
    }
}

impl RoleView {
    /// Navigation links in sidebar order
    pub fn pages(&self) -> &'static [Page] {
        match self {
            Self::Employee => EMPLOYEE_PAGES,
            Self::Admin => ADMIN_PAGES,
            Self::SuperAdmin => SUPER_ADMIN_PAGES,
        }
    }

    pub fn nav_labels(&self) -> Vec<&'static str> {
        self.pages().iter().map(Page::label).collect()
    }

    pub fn allows(&self, page: Page) -> bool {
        self.pages().contains(&page)
    }

    /// Resolve a navigation label; unknown labels fall back to the dashboard
    pub fn dispatch(&self, label: &str) -> Dispatch {
        match Page::from_label(label) {
            Some(page) if self.allows(page) => Dispatch::Render(page),
            Some(page) => Dispatch::Forbidden(page),
            None => Dispatch::Render(Page::Dashboard),
        }
    }

    /// Whether a page needs the shared roster and leave set loaded first
    pub fn needs_admin_data(&self, page: Page) -> bool {
        !matches!(self, Self::Employee)
            && matches!(
                page,
                Page::Employees | Page::LeaveRequests | Page::Reports | Page::AdminManagement
            )
            && self.allows(page)
    }

    /// Whether the settings endpoints should be fetched at all
    pub fn loads_settings(&self) -> bool {
        !matches!(self, Self::Employee)
    }
}

/// Header title for the active page
pub fn header_title(user: &User, page: Page) -> String {
    match (page, user.role) {
        (Page::Dashboard, UserRole::Employee) => format!("Welcome, {}!", user.first_name()),
        (Page::Dashboard, _) => format!("Welcome Back, {}", user.name),
        _ => page.label().to_string(),
    }
}

/// Breadcrumb trail, always rooted at "Home"
pub fn breadcrumbs(page: Page) -> [&'static str; 2] {
    ["Home", page.label()]
}
