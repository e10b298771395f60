//! Data models for the incident console.
//!
//! These models match the backend JSON payloads (camelCase fields).

mod incident;
mod user;

pub use incident::*;
pub use user::*;
