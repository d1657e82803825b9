//! Shared types for Attendo
//!
//! Wire models and response envelopes exchanged with the HR backend.
//! These types are shared between attendo-client and attendo-cli.

pub mod client;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use response::{ApiResponse, ErrorBody};
