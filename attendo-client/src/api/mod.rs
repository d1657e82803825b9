//! Typed endpoint methods, one module per backend resource.
//!
//! Every method lives on [`crate::AttendoClient`] and goes through its
//! envelope helpers, so 401 accounting applies uniformly.

pub mod attendance;
pub mod auth;
pub mod dashboard;
pub mod leaves;
pub mod notifications;
pub mod reports;
pub mod settings;
pub mod users;

pub use auth::{MIN_PASSWORD_LEN, validate_password_change};
pub use users::RosterMode;
