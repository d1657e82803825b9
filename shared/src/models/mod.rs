//! Data models
//!
//! Shared between attendo-client and attendo-cli (via API).
//! Field names follow the backend's camelCase JSON; document IDs arrive
//! as `_id` and are exposed as `id`.

pub mod attendance;
pub mod dashboard;
pub mod leave;
pub mod notification;
pub mod report;
pub mod settings;
pub mod user;

// Re-exports
pub use attendance::*;
pub use dashboard::*;
pub use leave::*;
pub use notification::*;
pub use report::*;
pub use settings::*;
pub use user::*;
