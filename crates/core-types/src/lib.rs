//! # Core Types
//!
//! The shared vocabulary of the workspace. Every other crate speaks in terms of the
//! `DailyRecord` defined here, so this crate depends on nothing else in the workspace.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::DegeneratePolicy;
pub use error::CoreError;
pub use structs::DailyRecord;
