//! Attendo Client - typed client for the Attendo HR backend
//!
//! Wraps the REST API with a session context, the leave and elapsed-time
//! rules shared by every page, role-gated page dispatch, polling and CSV
//! export.

pub mod api;
pub mod attendance;
pub mod client;
pub mod config;
pub mod csv;
pub mod elapsed;
pub mod error;
pub mod filter;
pub mod http;
pub mod leave;
pub mod notifications;
pub mod poll;
pub mod session;
pub mod view;

pub use api::dashboard::AdminData;
pub use api::{MIN_PASSWORD_LEN, RosterMode, validate_password_change};
pub use attendance::AttendanceTracker;
pub use client::AttendoClient;
pub use config::ClientConfig;
pub use elapsed::{AttendanceDisplay, DurationStyle, ElapsedTicker, format_elapsed, format_time_ago};
pub use error::{ClientError, ClientResult, PasswordError};
pub use http::{HttpClient, NetworkHttpClient};
pub use leave::{LeaveError, LeaveForm, compute_leave_days};
pub use notifications::{NotificationCenter, NotificationFilter};
pub use poll::Poller;
pub use session::{FileTokenStore, MemoryTokenStore, Session, SessionData, TokenStore};
pub use view::{Dispatch, Page, RoleView, ViewError};

// Re-export shared types for convenience
pub use shared::models;
